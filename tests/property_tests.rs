//! Property-based tests for klog_compat using proptest

mod common;

use common::capture_logger;
use klog_compat::{Loggable, Severity, VerbosityGate, MAX_LEVEL, MIN_LEVEL};
use proptest::prelude::*;
use serde_json::json;
use std::collections::BTreeMap;

fn any_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Debug),
        Just(Severity::Info),
        Just(Severity::Warning),
        Just(Severity::Error),
    ]
}

// ============================================================================
// Verbosity gate
// ============================================================================

proptest! {
    /// Setting a level succeeds exactly when it lies in [0, 4]
    #[test]
    fn test_gate_accepts_only_valid_levels(start in 0i32..=4, level in -100i32..100) {
        let gate = VerbosityGate::with_level(start).unwrap();
        let result = gate.set(level);

        if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            prop_assert!(result.is_ok());
            prop_assert_eq!(gate.get(), level);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(gate.get(), start);
        }
    }

    /// V(n) is enabled iff n <= current level
    #[test]
    fn test_verbose_enabled_iff_at_or_below_level(current in 0i32..=4, requested in -2i32..8) {
        let (logger, sink, _) = capture_logger();
        logger.set_level(current);

        let verbose = logger.v(requested);
        prop_assert_eq!(verbose.enabled(), requested <= current);

        verbose.info("probe");
        prop_assert_eq!(sink.len(), usize::from(requested <= current));
    }

    /// The last successful set_level wins
    #[test]
    fn test_last_valid_level_wins(levels in prop::collection::vec(-3i32..8, 1..20)) {
        let (logger, _, _) = capture_logger();
        let mut expected = 0;
        for level in &levels {
            if logger.set_level(*level) {
                expected = *level;
            }
        }
        prop_assert_eq!(logger.level(), expected);
    }
}

// ============================================================================
// Severity
// ============================================================================

proptest! {
    #[test]
    fn test_severity_str_roundtrip(severity in any_severity()) {
        let parsed: Severity = severity.to_str().parse().unwrap();
        prop_assert_eq!(severity, parsed);
        prop_assert_eq!(severity.to_string(), severity.to_str());
    }
}

// ============================================================================
// Field attachment
// ============================================================================

proptest! {
    /// Every string-keyed pair passed to with_fields becomes an attribute, in order
    #[test]
    fn test_with_fields_keeps_pairs_in_order(
        pairs in prop::collection::vec(("[a-z]{1,8}", any::<i64>()), 0..10)
    ) {
        let (logger, sink, _) = capture_logger();
        let flat: Vec<&dyn Loggable> = pairs
            .iter()
            .flat_map(|(k, v)| [k as &dyn Loggable, v as &dyn Loggable])
            .collect();

        logger.with_fields(&flat).info("kv");

        let records = sink.records();
        prop_assert_eq!(records.len(), 1);
        let attrs = &records[0].attributes;
        prop_assert_eq!(attrs.len(), pairs.len());
        for (attr, (key, value)) in attrs.iter().zip(&pairs) {
            prop_assert_eq!(&attr.key, key);
            prop_assert_eq!(&attr.value, &json!(value));
        }
    }

    /// A dangling key is reported once and only the preceding pairs are bound
    #[test]
    fn test_with_fields_odd_length(
        pairs in prop::collection::vec(("[a-z]{1,8}", any::<i32>()), 0..5),
        dangling in "[a-z]{1,8}"
    ) {
        let (logger, sink, _) = capture_logger();
        let mut flat: Vec<&dyn Loggable> = pairs
            .iter()
            .flat_map(|(k, v)| [k as &dyn Loggable, v as &dyn Loggable])
            .collect();
        flat.push(&dangling);

        logger.with_fields(&flat).info("after");

        let records = sink.records();
        prop_assert_eq!(records.len(), 2);
        prop_assert_eq!(records[0].severity, Severity::Error);
        prop_assert_eq!(records[0].attributes.get("ignored"), Some(&json!(dangling)));
        let bound = &records[1].attributes;
        prop_assert_eq!(bound.len(), pairs.len());
        prop_assert!(bound.keys().eq(pairs.iter().map(|(k, _)| k.as_str())));
    }

    /// Flattening a string-keyed map yields exactly its entries
    #[test]
    fn test_with_map_yields_entries(
        map in prop::collection::btree_map("[a-z]{1,8}", any::<u32>(), 0..10)
    ) {
        let (logger, sink, _) = capture_logger();

        logger.with(&[&map]).info("map");

        let records = sink.records();
        let attrs = &records[0].attributes;
        let seen: BTreeMap<String, u32> = attrs
            .iter()
            .map(|attr| (attr.key.clone(), attr.value.as_u64().unwrap() as u32))
            .collect();
        prop_assert_eq!(seen, map);
    }

    /// Scalars never contribute fields to with
    #[test]
    fn test_with_skips_scalars(n in any::<i64>(), s in ".*", b in any::<bool>()) {
        let (logger, sink, _) = capture_logger();

        logger.with(&[&n, &s, &b]).info("scalars");

        let records = sink.records();
        prop_assert!(records[0].attributes.is_empty());
    }
}
