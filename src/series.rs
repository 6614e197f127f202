//! Year-by-year population series for the exponential and logistic models.

use serde::{Deserialize, Serialize};

use crate::error::GrowthError;
use crate::params::{GrowthParameters, ModelType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: u32,
    pub population: u64,
}

/// Headline numbers shown next to a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub initial_population: u64,
    pub final_population: u64,
    pub peak_population: u64,
    pub years: u32,
}

/// Advances an unrounded population by one year.
pub fn step(model: ModelType, population: f64, growth_rate: f64, carrying_capacity: f64) -> f64 {
    match model {
        ModelType::Exponential => population * (1.0 + growth_rate),
        ModelType::Logistic => {
            population + growth_rate * population * (1.0 - population / carrying_capacity)
        }
    }
}

/// Produces one point per year in `0..=time_span`.
///
/// Rounding happens only on emission; the full-precision value is carried
/// into the next step so rounding error never compounds.
pub fn generate(params: &GrowthParameters) -> Result<Vec<SeriesPoint>, GrowthError> {
    params.validate()?;

    let mut points = Vec::with_capacity(params.time_span as usize + 1);
    let mut population = params.initial_population;
    for year in 0..=params.time_span {
        points.push(SeriesPoint {
            year,
            population: emit(population),
        });
        population = step(
            params.model,
            population,
            params.growth_rate,
            params.carrying_capacity,
        );
    }
    Ok(points)
}

// f64::round ties away from zero; the float-to-int cast saturates (negatives and NaN become 0)
fn emit(population: f64) -> u64 {
    population.round() as u64
}

pub fn summarize(points: &[SeriesPoint]) -> SeriesSummary {
    let Some(first) = points.first() else {
        return SeriesSummary::default();
    };
    let last = points.last().unwrap_or(first);
    SeriesSummary {
        initial_population: first.population,
        final_population: last.population,
        peak_population: points.iter().map(|p| p.population).max().unwrap_or(0),
        years: last.year,
    }
}
