//! Config tests - defaults, environment lookup, JSON documents, validation

use std::collections::HashMap;

use tui_gems::engine::{Board, BoardConfig, ConfigError, EngineError};
use tui_gems::types::InteractionMode;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = BoardConfig::default();
    assert_eq!((config.rows, config.columns), (5, 7));
    assert_eq!(config.drag_threshold, 0.5);
    assert!(config.animations_enabled);
    assert_eq!(config.mode, InteractionMode::Drag);
    assert_eq!(config.swap_duration_ms, 250);
    assert_eq!(config.transition_timeout_ms, Some(2000));
    assert!(config.validate().is_ok());
}

#[test]
fn test_env_overrides_and_fallbacks() {
    let config = BoardConfig::from_lookup(lookup(&[
        ("GEMS_ROWS", "8"),
        ("GEMS_COLUMNS", "not-a-number"),
        ("GEMS_ANIMATIONS", "off"),
        ("GEMS_MODE", "select"),
        ("GEMS_TRANSITION_TIMEOUT_MS", "0"),
        ("GEMS_SEED", " 99 "),
    ]));

    assert_eq!(config.rows, 8);
    assert_eq!(config.columns, 7, "unparseable value keeps the default");
    assert!(!config.animations_enabled);
    assert_eq!(config.mode, InteractionMode::SelectSelect);
    assert_eq!(config.transition_timeout_ms, None);
    assert_eq!(config.seed, 99);
}

#[test]
fn test_json_document() {
    let config = BoardConfig::from_json_str(
        r#"{
            "rows": 6,
            "columns": 6,
            "dragThreshold": 1.5,
            "animationsEnabled": false,
            "mode": "drag",
            "swapDurationMs": 100,
            "transitionTimeoutMs": 500,
            "seed": 3
        }"#,
    )
    .unwrap();

    assert_eq!((config.rows, config.columns), (6, 6));
    assert_eq!(config.drag_threshold, 1.5);
    assert!(!config.animations_enabled);
    assert_eq!(config.swap_duration_ms, 100);
    assert_eq!(config.transition_timeout_ms, Some(500));
    assert_eq!(config.seed, 3);
}

#[test]
fn test_json_errors() {
    assert!(matches!(
        BoardConfig::from_json_str(r#"{"rows": 0}"#),
        Err(ConfigError::Rows(0))
    ));
    assert!(matches!(
        BoardConfig::from_json_str(r#"{"dragThreshold": -1.0}"#),
        Err(ConfigError::DragThreshold(_))
    ));
    assert!(matches!(
        BoardConfig::from_json_str(r#"{"mode": "teleport"}"#),
        Err(ConfigError::UnknownMode(m)) if m == "teleport"
    ));
    assert!(matches!(
        BoardConfig::from_json_str(r#"{"rowz": 5}"#),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(BoardConfig::from_json_str("not json"), Err(ConfigError::Parse(_))));
}

#[test]
fn test_board_rejects_invalid_config() {
    let result = Board::new(BoardConfig {
        columns: 0,
        ..BoardConfig::default()
    });
    assert!(matches!(result, Err(EngineError::Config(ConfigError::Columns(0)))));

    let result = Board::new(BoardConfig {
        drag_threshold: f32::NAN,
        ..BoardConfig::default()
    });
    assert!(matches!(result, Err(EngineError::Config(ConfigError::DragThreshold(_)))));
}

#[test]
fn test_zero_threshold_is_valid() {
    let config = BoardConfig {
        drag_threshold: 0.0,
        ..BoardConfig::default()
    };
    assert!(config.validate().is_ok());
}
