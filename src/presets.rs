//! Named parameter presets and catalog loading.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    codec,
    error::GrowthError,
    params::{GrowthParameters, ModelType},
};

const BUILTIN_CATALOG: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/presets/catalog.yaml"
));

/// A named bundle of all five parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub model: ModelType,
    pub initial_population: f64,
    pub growth_rate: f64,
    pub carrying_capacity: f64,
    pub time_span: u32,
}

impl Preset {
    pub fn parameters(&self) -> GrowthParameters {
        GrowthParameters {
            initial_population: self.initial_population,
            growth_rate: self.growth_rate,
            carrying_capacity: self.carrying_capacity,
            time_span: self.time_span,
            model: self.model,
        }
    }

    pub fn query(&self) -> String {
        codec::encode(&self.parameters())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetCatalog {
    pub presets: Vec<Preset>,
}

impl PresetCatalog {
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_CATALOG).context("Failed to parse built-in preset catalog")
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let catalog: PresetCatalog = serde_yaml::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen: Vec<&str> = Vec::new();
        for preset in &self.presets {
            if seen.contains(&preset.name.as_str()) {
                anyhow::bail!("preset '{}' defined more than once", preset.name);
            }
            seen.push(&preset.name);
            preset
                .parameters()
                .validate()
                .with_context(|| format!("preset '{}' has invalid parameters", preset.name))?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Preset, GrowthError> {
        self.presets
            .iter()
            .find(|preset| preset.name == name)
            .ok_or_else(|| GrowthError::UnknownPreset(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|preset| preset.name.as_str())
    }

    /// Adds `other`'s presets, replacing same-named entries in place.
    pub fn merge(&mut self, other: PresetCatalog) {
        for preset in other.presets {
            match self.presets.iter_mut().find(|p| p.name == preset.name) {
                Some(existing) => *existing = preset,
                None => self.presets.push(preset),
            }
        }
    }
}

pub struct PresetLoader {
    base_dir: PathBuf,
}

impl PresetLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<PresetCatalog> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preset file {}", path.display()))?;
        let catalog = PresetCatalog::from_yaml_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        info!(
            path = %path.display(),
            count = catalog.presets.len(),
            "loaded preset catalog"
        );
        Ok(catalog)
    }
}
