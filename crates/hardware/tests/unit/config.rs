//! Configuration deserialization tests.

use tomasim_core::config::Config;
use tomasim_core::core::btb::DEFAULT_SEED;

#[test]
fn empty_document_yields_defaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.general.start_pc, 16);
    assert!(!config.general.trace);
    assert_eq!(config.predictor.seed, DEFAULT_SEED);
}

#[test]
fn full_document_overrides_everything() {
    let config: Config = serde_json::from_str(
        r#"{
            "general": { "start_pc": 32, "trace": true },
            "predictor": { "seed": 99 }
        }"#,
    )
    .unwrap();
    assert_eq!(config.general.start_pc, 32);
    assert!(config.general.trace);
    assert_eq!(config.predictor.seed, 99);
}

#[test]
fn partial_section_keeps_remaining_defaults() {
    let config: Config = serde_json::from_str(r#"{ "predictor": { "seed": 5 } }"#).unwrap();
    assert_eq!(config.predictor.seed, 5);
    assert_eq!(config.general.start_pc, 16);
}
