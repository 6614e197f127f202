//! Growth model parameters, their validation and the slider ranges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GrowthError;

fn default_initial_population() -> f64 {
    1_000.0
}

fn default_growth_rate() -> f64 {
    0.05
}

fn default_carrying_capacity() -> f64 {
    10_000.0
}

fn default_time_span() -> u32 {
    100
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    #[default]
    Exponential,
    Logistic,
}

impl ModelType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelType::Exponential => "exponential",
            ModelType::Logistic => "logistic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelType::Exponential => "Exponential growth",
            ModelType::Logistic => "Logistic growth",
        }
    }

    /// One-step recurrence in the notation used by the model explanation.
    pub fn formula(self) -> &'static str {
        match self {
            ModelType::Exponential => "P(t+1) = P(t) × (1 + r)",
            ModelType::Logistic => "P(t+1) = P(t) + r × P(t) × (1 - P(t)/K)",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = GrowthError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "exponential" => Ok(ModelType::Exponential),
            "logistic" => Ok(ModelType::Logistic),
            other => Err(GrowthError::InvalidModel(other.to_string())),
        }
    }
}

/// The five tunable inputs of a simulation run.
///
/// `carrying_capacity` only takes part in the logistic recurrence; it is
/// carried (and shared through links) for the exponential model too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthParameters {
    #[serde(default = "default_initial_population")]
    pub initial_population: f64,
    #[serde(default = "default_growth_rate")]
    pub growth_rate: f64,
    #[serde(default = "default_carrying_capacity")]
    pub carrying_capacity: f64,
    #[serde(default = "default_time_span")]
    pub time_span: u32,
    #[serde(default)]
    pub model: ModelType,
}

impl Default for GrowthParameters {
    fn default() -> Self {
        Self {
            initial_population: default_initial_population(),
            growth_rate: default_growth_rate(),
            carrying_capacity: default_carrying_capacity(),
            time_span: default_time_span(),
            model: ModelType::default(),
        }
    }
}

impl GrowthParameters {
    pub fn exponential(initial_population: f64, growth_rate: f64, time_span: u32) -> Self {
        Self {
            initial_population,
            growth_rate,
            time_span,
            model: ModelType::Exponential,
            ..Self::default()
        }
    }

    pub fn logistic(
        initial_population: f64,
        growth_rate: f64,
        carrying_capacity: f64,
        time_span: u32,
    ) -> Self {
        Self {
            initial_population,
            growth_rate,
            carrying_capacity,
            time_span,
            model: ModelType::Logistic,
        }
    }

    /// Rejects parameter sets the recurrences are not defined for.
    ///
    /// The capacity is only checked for the logistic model.
    pub fn validate(&self) -> Result<(), GrowthError> {
        if !self.initial_population.is_finite() || self.initial_population <= 0.0 {
            return Err(GrowthError::InvalidParameter {
                name: "initial_population",
                value: self.initial_population,
            });
        }
        if !self.growth_rate.is_finite() {
            return Err(GrowthError::InvalidParameter {
                name: "growth_rate",
                value: self.growth_rate,
            });
        }
        if self.model == ModelType::Logistic
            && (!self.carrying_capacity.is_finite() || self.carrying_capacity <= 0.0)
        {
            return Err(GrowthError::DegenerateCapacity(self.carrying_capacity));
        }
        Ok(())
    }
}

/// Inclusive range plus step of one slider-controlled parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Clamps into `[min, max]` and snaps to the nearest step from `min`.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        if self.step >= 1.0 {
            return snapped.clamp(self.min, self.max);
        }
        // fractional steps (0.01) accumulate binary noise; round to the step's precision
        let scale = (1.0 / self.step).round();
        ((snapped * scale).round() / scale).clamp(self.min, self.max)
    }
}

/// Ranges enforced by the interactive controls. The generator itself imposes none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterBounds {
    pub initial_population: Range,
    pub growth_rate: Range,
    pub carrying_capacity: Range,
    pub time_span: Range,
}

impl Default for ParameterBounds {
    fn default() -> Self {
        Self {
            initial_population: Range::new(100.0, 5_000.0, 100.0),
            growth_rate: Range::new(0.01, 0.2, 0.01),
            carrying_capacity: Range::new(5_000.0, 50_000.0, 1_000.0),
            time_span: Range::new(10.0, 200.0, 10.0),
        }
    }
}

impl ParameterBounds {
    pub fn clamp(&self, params: &GrowthParameters) -> GrowthParameters {
        GrowthParameters {
            initial_population: self.initial_population.snap(params.initial_population),
            growth_rate: self.growth_rate.snap(params.growth_rate),
            carrying_capacity: self.carrying_capacity.snap(params.carrying_capacity),
            time_span: self.time_span.snap(f64::from(params.time_span)) as u32,
            model: params.model,
        }
    }
}
