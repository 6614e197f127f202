//! Parameter session that recomputes its series on every change.

use tracing::{debug, warn};

use crate::{
    codec,
    error::GrowthError,
    export::SeriesReport,
    params::{GrowthParameters, ModelType},
    presets::Preset,
    series::{self, SeriesPoint, SeriesSummary},
};

/// Current parameters plus the series computed from them.
///
/// Every setter recomputes the whole series before returning. If the new
/// parameters are rejected the previous ones are kept, so `points()` always
/// matches `params()`.
#[derive(Debug, Clone)]
pub struct Simulation {
    params: GrowthParameters,
    points: Vec<SeriesPoint>,
}

impl Simulation {
    pub fn new(params: GrowthParameters) -> Result<Self, GrowthError> {
        let points = series::generate(&params)?;
        Ok(Self { params, points })
    }

    /// Starts from `defaults` and applies whatever validates in `query`.
    pub fn from_query(defaults: &GrowthParameters, query: &str) -> Result<Self, GrowthError> {
        Self::new(codec::decode(defaults, query))
    }

    pub fn params(&self) -> &GrowthParameters {
        &self.params
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn summary(&self) -> SeriesSummary {
        series::summarize(&self.points)
    }

    pub fn query(&self) -> String {
        codec::encode(&self.params)
    }

    pub fn report(&self) -> SeriesReport {
        SeriesReport::new(self.params, self.points.clone())
    }

    pub fn set_model(&mut self, model: ModelType) -> Result<(), GrowthError> {
        self.update(|params| params.model = model)
    }

    pub fn set_initial_population(&mut self, value: f64) -> Result<(), GrowthError> {
        self.update(|params| params.initial_population = value)
    }

    pub fn set_growth_rate(&mut self, value: f64) -> Result<(), GrowthError> {
        self.update(|params| params.growth_rate = value)
    }

    pub fn set_carrying_capacity(&mut self, value: f64) -> Result<(), GrowthError> {
        self.update(|params| params.carrying_capacity = value)
    }

    pub fn set_time_span(&mut self, years: u32) -> Result<(), GrowthError> {
        self.update(|params| params.time_span = years)
    }

    /// Merges a shared query into the current state.
    pub fn apply_query(&mut self, query: &str) -> Result<(), GrowthError> {
        let next = codec::decode(&self.params, query);
        self.replace(next)
    }

    /// Replaces all five parameters and returns the query to share.
    pub fn apply_preset(&mut self, preset: &Preset) -> Result<String, GrowthError> {
        self.replace(preset.parameters())?;
        debug!(preset = %preset.name, "applied preset");
        Ok(self.query())
    }

    pub fn recompute(&mut self) -> Result<(), GrowthError> {
        self.points = series::generate(&self.params)?;
        debug!(
            model = %self.params.model,
            years = self.params.time_span,
            "recomputed series"
        );
        Ok(())
    }

    fn update(&mut self, mutate: impl FnOnce(&mut GrowthParameters)) -> Result<(), GrowthError> {
        let mut next = self.params;
        mutate(&mut next);
        self.replace(next)
    }

    fn replace(&mut self, next: GrowthParameters) -> Result<(), GrowthError> {
        let previous = std::mem::replace(&mut self.params, next);
        if let Err(err) = self.recompute() {
            warn!(%err, "rejected parameter change");
            self.params = previous;
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_recompute_the_series() {
        let mut sim = Simulation::new(GrowthParameters::exponential(1_000.0, 0.05, 2)).unwrap();
        assert_eq!(sim.points().len(), 3);

        sim.set_time_span(5).unwrap();
        assert_eq!(sim.points().len(), 6);

        sim.set_growth_rate(0.0).unwrap();
        assert!(sim.points().iter().all(|p| p.population == 1_000));
    }

    #[test]
    fn rejected_change_keeps_previous_state() {
        let mut sim = Simulation::new(GrowthParameters::logistic(1_000.0, 0.1, 5_000.0, 10)).unwrap();
        let before = sim.points().to_vec();

        let err = sim.set_carrying_capacity(0.0).unwrap_err();
        assert_eq!(err, GrowthError::DegenerateCapacity(0.0));
        assert_eq!(sim.params().carrying_capacity, 5_000.0);
        assert_eq!(sim.points(), before.as_slice());
    }

    #[test]
    fn switching_model_uses_capacity() {
        let mut sim = Simulation::new(GrowthParameters::default()).unwrap();
        let exponential_final = sim.summary().final_population;
        sim.set_model(ModelType::Logistic).unwrap();
        let logistic_final = sim.summary().final_population;
        assert!(logistic_final < exponential_final);
        assert!(logistic_final <= 10_000);
    }

    #[test]
    fn query_merges_into_current_state() {
        let mut sim = Simulation::new(GrowthParameters::default()).unwrap();
        sim.apply_query("T=20&r=bogus").unwrap();
        assert_eq!(sim.params().time_span, 20);
        assert_eq!(sim.params().growth_rate, 0.05);
        assert_eq!(sim.query(), "model=exponential&P0=1000&r=0.05&K=10000&T=20");
    }
}
