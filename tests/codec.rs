use popgrowth::{
    codec::{decode, encode, share_link},
    GrowthParameters, ModelType, Simulation,
};
use proptest::prelude::*;

#[test]
fn malformed_link_falls_back_to_current_state() {
    let current = GrowthParameters::logistic(2_500.0, 0.08, 20_000.0, 150);
    assert_eq!(decode(&current, "model=bogus&P0=-5&r=abc"), current);
}

#[test]
fn partial_link_only_touches_named_fields() {
    let current = GrowthParameters::default();
    let next = decode(&current, "?K=30000&model=logistic");
    assert_eq!(
        next,
        GrowthParameters {
            carrying_capacity: 30_000.0,
            model: ModelType::Logistic,
            ..current
        }
    );
}

#[test]
fn shared_link_restores_simulation() {
    let original = Simulation::new(GrowthParameters::logistic(700.0, 0.15, 9_000.0, 80)).unwrap();
    let link = share_link("https://example.org/growth", original.params());
    let (_, query) = link.split_once('?').unwrap();

    let restored = Simulation::from_query(&GrowthParameters::default(), query).unwrap();
    assert_eq!(restored.params(), original.params());
    assert_eq!(restored.points(), original.points());
}

proptest! {
    #[test]
    fn encoding_is_stable_across_round_trips(p0 in 1.0f64..1_000_000.0,
                                             r in 0.001f64..2.0,
                                             k in 1.0f64..1_000_000.0,
                                             years in 1u32..10_000,
                                             logistic in any::<bool>()) {
        let params = GrowthParameters {
            initial_population: p0,
            growth_rate: r,
            carrying_capacity: k,
            time_span: years,
            model: if logistic { ModelType::Logistic } else { ModelType::Exponential },
        };
        let encoded = encode(&params);
        let decoded = decode(&GrowthParameters::default(), &encoded);
        prop_assert_eq!(decoded, params);
        prop_assert_eq!(encode(&decoded), encoded);
    }
}
