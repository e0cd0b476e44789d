//! Board configuration.
//!
//! Sources, in the order the runner consults them:
//!
//! - a JSON document (`BoardConfig::from_json_str`), camelCase keys, every key optional
//! - environment variables (`BoardConfig::from_env`):
//!   - `GEMS_ROWS`, `GEMS_COLUMNS`
//!   - `GEMS_DRAG_THRESHOLD`
//!   - `GEMS_ANIMATIONS` ("1"/"true" or "0"/"false")
//!   - `GEMS_MODE` ("drag" or "selectSelect")
//!   - `GEMS_SWAP_MS`, `GEMS_TRANSITION_TIMEOUT_MS` (0 disables the watchdog)
//!   - `GEMS_SEED`
//!
//! Unparseable environment values fall back to the defaults. JSON errors are
//! reported. Either way the result must pass [`BoardConfig::validate`].

use serde::Deserialize;
use thiserror::Error;

use crate::core::grid::MAX_DIMENSION;
use crate::types::{
    InteractionMode, DEFAULT_COLUMNS, DEFAULT_DRAG_THRESHOLD, DEFAULT_ROWS,
    DEFAULT_SWAP_DURATION_MS, DEFAULT_TRANSITION_TIMEOUT_MS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rows must be in 1..={max}, got {0}", max = MAX_DIMENSION)]
    Rows(u8),
    #[error("columns must be in 1..={max}, got {0}", max = MAX_DIMENSION)]
    Columns(u8),
    #[error("drag threshold must be a finite value >= 0, got {0}")]
    DragThreshold(f32),
    #[error("unknown interaction mode {0:?}")]
    UnknownMode(String),
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub rows: u8,
    pub columns: u8,
    /// Minimum drag length (pointer units) for a swipe
    pub drag_threshold: f32,
    pub animations_enabled: bool,
    pub mode: InteractionMode,
    pub swap_duration_ms: u32,
    /// Watchdog for a transition that never signals completion; `None` waits forever
    pub transition_timeout_ms: Option<u32>,
    pub seed: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            animations_enabled: true,
            mode: InteractionMode::Drag,
            swap_duration_ms: DEFAULT_SWAP_DURATION_MS,
            transition_timeout_ms: Some(DEFAULT_TRANSITION_TIMEOUT_MS),
            seed: 1,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    rows: Option<u8>,
    columns: Option<u8>,
    drag_threshold: Option<f32>,
    animations_enabled: Option<bool>,
    mode: Option<String>,
    swap_duration_ms: Option<u32>,
    transition_timeout_ms: Option<u32>,
    seed: Option<u32>,
}

impl BoardConfig {
    /// Load from `GEMS_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup (the environment, a map in tests, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).map(|s| s.trim().to_string());

        let rows = parsed("GEMS_ROWS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.rows);
        let columns = parsed("GEMS_COLUMNS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.columns);
        let drag_threshold = parsed("GEMS_DRAG_THRESHOLD")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.drag_threshold);
        let animations_enabled = parsed("GEMS_ANIMATIONS")
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.animations_enabled);
        let mode = parsed("GEMS_MODE")
            .and_then(|s| InteractionMode::from_str(&s))
            .unwrap_or(defaults.mode);
        let swap_duration_ms = parsed("GEMS_SWAP_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.swap_duration_ms);
        let transition_timeout_ms = match parsed("GEMS_TRANSITION_TIMEOUT_MS")
            .and_then(|s| s.parse::<u32>().ok())
        {
            Some(0) => None,
            Some(ms) => Some(ms),
            None => defaults.transition_timeout_ms,
        };
        let seed = parsed("GEMS_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed);

        Self {
            rows,
            columns,
            drag_threshold,
            animations_enabled,
            mode,
            swap_duration_ms,
            transition_timeout_ms,
            seed,
        }
    }

    /// Parse a JSON document; missing keys keep their defaults
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_gems_engine::BoardConfig;
    /// use tui_gems_engine::types::InteractionMode;
    ///
    /// let config = BoardConfig::from_json_str(r#"{"rows": 8, "mode": "selectSelect"}"#).unwrap();
    /// assert_eq!(config.rows, 8);
    /// assert_eq!(config.columns, 7);
    /// assert_eq!(config.mode, InteractionMode::SelectSelect);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let defaults = Self::default();

        let mode = match raw.mode {
            Some(s) => InteractionMode::from_str(&s).ok_or(ConfigError::UnknownMode(s))?,
            None => defaults.mode,
        };
        let transition_timeout_ms = match raw.transition_timeout_ms {
            Some(0) => None,
            Some(ms) => Some(ms),
            None => defaults.transition_timeout_ms,
        };

        let config = Self {
            rows: raw.rows.unwrap_or(defaults.rows),
            columns: raw.columns.unwrap_or(defaults.columns),
            drag_threshold: raw.drag_threshold.unwrap_or(defaults.drag_threshold),
            animations_enabled: raw.animations_enabled.unwrap_or(defaults.animations_enabled),
            mode,
            swap_duration_ms: raw.swap_duration_ms.unwrap_or(defaults.swap_duration_ms),
            transition_timeout_ms,
            seed: raw.seed.unwrap_or(defaults.seed),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.rows > MAX_DIMENSION {
            return Err(ConfigError::Rows(self.rows));
        }
        if self.columns == 0 || self.columns > MAX_DIMENSION {
            return Err(ConfigError::Columns(self.columns));
        }
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(ConfigError::DragThreshold(self.drag_threshold));
        }
        Ok(())
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
