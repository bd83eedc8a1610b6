//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use proptest::prelude::*;

fn arb_valid_spec() -> impl Strategy<Value = WorkbenchSpec> {
    (
        0.01f64..0.99,  // val_ratio
        1usize..200,    // epochs
        1usize..256,    // batch_size
        1e-6f32..1.0,   // lr
        1usize..64,     // hidden_units
        1usize..20,     // patience
        1usize..1000,   // roc_steps
        0.0f32..=1.0,   // threshold
    )
        .prop_map(|(val_ratio, epochs, batch_size, lr, hidden_units, patience, roc_steps, threshold)| {
            let mut spec = WorkbenchSpec::new("train.csv");
            spec.split.val_ratio = val_ratio;
            spec.training = TrainingParams { epochs, batch_size, lr, hidden_units, patience, ..Default::default() };
            spec.eval = EvalConfig { roc_steps, threshold };
            spec
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_config(&spec).is_ok());
    }

    #[test]
    fn prop_ratio_outside_unit_interval_fails(spec in arb_valid_spec(), ratio in 1.0f64..10.0) {
        let mut spec = spec;
        spec.split.val_ratio = ratio;
        prop_assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidValRatio(_))));
        spec.split.val_ratio = -ratio + 1.0;
        prop_assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidValRatio(_))));
    }

    #[test]
    fn prop_threshold_above_one_fails(spec in arb_valid_spec(), th in 1.0001f32..100.0) {
        let mut spec = spec;
        spec.eval.threshold = th;
        prop_assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidThreshold(_))));
    }
}
