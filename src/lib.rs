pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod params;
pub mod presets;
pub mod series;
pub mod simulation;
pub mod web;

pub use config::AppConfig;
pub use error::GrowthError;
pub use params::{GrowthParameters, ModelType, ParameterBounds};
pub use series::{generate, SeriesPoint, SeriesSummary};
pub use simulation::Simulation;
