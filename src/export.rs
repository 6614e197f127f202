//! CSV and JSON output of a computed series.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::params::GrowthParameters;
use crate::series::{summarize, SeriesPoint, SeriesSummary};

pub const CSV_HEADER: &str = "year,population";

/// Everything a consumer needs to redraw or re-share one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReport {
    pub parameters: GrowthParameters,
    pub query: String,
    pub formula: String,
    pub summary: SeriesSummary,
    pub points: Vec<SeriesPoint>,
}

impl SeriesReport {
    pub fn new(parameters: GrowthParameters, points: Vec<SeriesPoint>) -> Self {
        Self {
            query: codec::encode(&parameters),
            formula: parameters.model.formula().to_string(),
            summary: summarize(&points),
            parameters,
            points,
        }
    }
}

/// Header line followed by one `year,population` row per point, no trailing newline.
pub fn to_csv(points: &[SeriesPoint]) -> String {
    let mut csv = String::from(CSV_HEADER);
    for point in points {
        csv.push('\n');
        csv.push_str(&format!("{},{}", point.year, point.population));
    }
    csv
}

pub fn write_csv(path: impl AsRef<Path>, points: &[SeriesPoint]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, to_csv(points))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn to_json(report: &SeriesReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize series report")
}
