//! Query-string form of [`GrowthParameters`] used for shareable links.
//!
//! ```text
//! model=<exponential|logistic>&P0=<number>&r=<number>&K=<number>&T=<integer>
//! ```
//!
//! Encoding always writes all five keys. Decoding is a merge: every key is
//! optional and validated on its own, and anything that does not validate
//! leaves the caller's current value in place.

use tracing::debug;

use crate::params::{GrowthParameters, ModelType};

pub const MODEL_KEY: &str = "model";
pub const INITIAL_POPULATION_KEY: &str = "P0";
pub const GROWTH_RATE_KEY: &str = "r";
pub const CARRYING_CAPACITY_KEY: &str = "K";
pub const TIME_SPAN_KEY: &str = "T";

pub fn encode(params: &GrowthParameters) -> String {
    format!(
        "{MODEL_KEY}={}&{INITIAL_POPULATION_KEY}={}&{GROWTH_RATE_KEY}={}&{CARRYING_CAPACITY_KEY}={}&{TIME_SPAN_KEY}={}",
        params.model,
        params.initial_population,
        params.growth_rate,
        params.carrying_capacity,
        params.time_span,
    )
}

/// Applies the valid fields of `query` on top of `current`.
///
/// Never fails: a key that is missing, malformed, zero or negative is
/// skipped. A leading `?` is accepted.
pub fn decode(current: &GrowthParameters, query: &str) -> GrowthParameters {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
        Ok(pairs) => pairs,
        Err(err) => {
            debug!(%err, "ignoring undecodable query string");
            return *current;
        }
    };

    let mut next = *current;
    if let Some(model) = lookup(&pairs, MODEL_KEY).and_then(|v| v.parse::<ModelType>().ok()) {
        next.model = model;
    }
    if let Some(value) = lookup(&pairs, INITIAL_POPULATION_KEY).and_then(positive_number) {
        next.initial_population = value;
    }
    if let Some(value) = lookup(&pairs, GROWTH_RATE_KEY).and_then(positive_number) {
        next.growth_rate = value;
    }
    if let Some(value) = lookup(&pairs, CARRYING_CAPACITY_KEY).and_then(positive_number) {
        next.carrying_capacity = value;
    }
    if let Some(value) = lookup(&pairs, TIME_SPAN_KEY).and_then(positive_years) {
        next.time_span = value;
    }
    next
}

/// Joins `base` and the encoded parameters, replacing any existing query.
pub fn share_link(base: &str, params: &GrowthParameters) -> String {
    let base = base.split_once('?').map_or(base, |(path, _)| path);
    format!("{base}?{}", encode(params))
}

// first occurrence wins
fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn positive_number(value: &str) -> Option<f64> {
    let number = value.trim().parse::<f64>().ok()?;
    (number.is_finite() && number > 0.0).then_some(number)
}

fn positive_years(value: &str) -> Option<u32> {
    let number = positive_number(value)?;
    if number.fract() != 0.0 || number > f64::from(u32::MAX) {
        return None;
    }
    Some(number as u32)
}
