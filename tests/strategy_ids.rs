//! Strategy ids through the registry.

use proptest::prelude::*;

use game_arena::core::Error;
use game_arena::registry::{parameters_from_id, StrategyRegistry};
use game_arena::strategy::{LookaheadProvider, StrategyParameters, UctProvider};

// =============================================================================
// Round Trips
// =============================================================================

proptest! {
    #[test]
    fn test_lookahead_ids_round_trip(plies in 1i64..100, default_outcome in 0.0f64..=1.0) {
        let registry = StrategyRegistry::with_defaults();
        let params = StrategyParameters::builder()
            .put(&LookaheadProvider::plies(), plies)
            .unwrap()
            .put(&LookaheadProvider::default_outcome(), default_outcome)
            .unwrap()
            .build();

        let id = registry.encode("NPlyLookahead", &params).unwrap();
        let (provider, decoded) = registry.decode(&id).unwrap();
        prop_assert_eq!(provider.name(), "NPlyLookahead");
        prop_assert_eq!(&decoded, &params);
        prop_assert_eq!(registry.encode("NPlyLookahead", &decoded).unwrap(), id);
    }

    #[test]
    fn test_uct_ids_round_trip(c_p in 0.0f64..10.0, iterations in 1i64..100_000) {
        let registry = StrategyRegistry::with_defaults();
        let params = StrategyParameters::builder()
            .put(&UctProvider::iteration_count(), iterations)
            .unwrap()
            .put(&UctProvider::exploration(), c_p)
            .unwrap()
            .build();

        for name in ["UCT", "UCTOneNodeExpansion", "UCTWinsFirst"] {
            let id = registry.encode(name, &params).unwrap();
            let prefix = format!("{name}:c_p=");
            prop_assert!(id.starts_with(&prefix));
            let (_, decoded) = registry.decode(&id).unwrap();
            prop_assert_eq!(&decoded, &params);

            let raw = parameters_from_id(&id).unwrap();
            prop_assert_eq!(raw["iterationCount"].clone(), iterations.to_string());
        }
    }
}

// =============================================================================
// Rejected Ids
// =============================================================================

#[test]
fn test_unknown_strategy() {
    let registry = StrategyRegistry::with_defaults();
    assert!(matches!(
        registry.strategy("AlphaZero:depth=3"),
        Err(Error::UnknownStrategy(name)) if name == "AlphaZero"
    ));
}

#[test]
fn test_malformed_ids() {
    let registry = StrategyRegistry::with_defaults();
    for id in ["UCT:c_p", "UCT:c_p=1=2", "UCT:"] {
        assert!(
            matches!(registry.decode(id), Err(Error::MalformedStrategyId { .. })),
            "{id}"
        );
    }
}

#[test]
fn test_out_of_range_values() {
    let registry = StrategyRegistry::with_defaults();
    assert!(matches!(
        registry.strategy("NPlyLookahead:pliesToLookAhead=0"),
        Err(Error::ParameterOutOfBounds { .. })
    ));
    assert!(matches!(
        registry.strategy("UCT:c_p=-1:iterationCount=10"),
        Err(Error::ParameterOutOfBounds { .. })
    ));
    assert!(matches!(
        registry.strategy("UCT:iterationCount=ten"),
        Err(Error::InvalidParameterValue { .. })
    ));
}

#[test]
fn test_missing_required_parameter() {
    let registry = StrategyRegistry::with_defaults();
    assert!(matches!(
        registry.strategy("UCT:c_p=1"),
        Err(Error::MissingParameter(name)) if name == "iterationCount"
    ));
    assert!(registry.strategy("Random").is_ok());
}

#[test]
fn test_parameter_order_is_canonical() {
    let registry = StrategyRegistry::with_defaults();
    let (_, a) = registry.decode("UCT:iterationCount=5:c_p=2").unwrap();
    let (_, b) = registry.decode("UCT:c_p=2:iterationCount=5").unwrap();
    assert_eq!(a, b);
    assert_eq!(
        registry.encode("UCT", &a).unwrap(),
        "UCT:c_p=2:iterationCount=5"
    );
}
