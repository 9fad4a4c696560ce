//! Tunable simulator limits.

use crate::constants;
use serde::{Deserialize, Serialize};

/// Limits and sizes used by a [`Session`](crate::Session).
///
/// Every field falls back to the value in [`constants`] when missing from a
/// serialized config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Distance moved by one MOLD OPEN / MOLD CLOSE press
    pub jog_step_mm: f64,
    /// Lower travel limit
    pub min_mm: f64,
    /// Upper travel limit
    pub max_mm: f64,
    /// Increment used by numeric setting editors
    pub input_step_mm: f64,
    /// Number of log entries shown on the panel
    pub log_display_limit: usize,
    /// Number of log entries kept in memory
    pub log_capacity: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            jog_step_mm: constants::JOG_STEP_MM,
            min_mm: constants::MIN_MM,
            max_mm: constants::MAX_MM,
            input_step_mm: constants::INPUT_STEP_MM,
            log_display_limit: constants::LOG_DISPLAY_LIMIT,
            log_capacity: constants::LOG_CAPACITY,
        }
    }
}

impl SimulatorConfig {
    /// Clamps `value` into `[min_mm, max_mm]`. NaN maps to `min_mm`.
    pub fn clamp(&self, value: f64) -> f64 {
        // f64::max discards NaN, so this never yields NaN and never panics.
        value.max(self.min_mm).min(self.max_mm)
    }
}

/// Normalizes a value typed into a numeric setting editor: rounded to
/// [`constants::INPUT_DECIMALS`] places, then clamped into `config`'s range.
pub fn clamp_mm(config: &SimulatorConfig, value: f64) -> f64 {
    let scale = 10f64.powi(constants::INPUT_DECIMALS as i32);
    config.clamp((value * scale).round() / scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_constants() {
        let config = SimulatorConfig::default();
        assert_eq!(config.jog_step_mm, 5.0);
        assert_eq!(config.min_mm, 0.0);
        assert_eq!(config.max_mm, 300.0);
        assert_eq!(config.input_step_mm, 0.5);
        assert_eq!(config.log_display_limit, 25);
        assert_eq!(config.log_capacity, 1000);
    }

    #[test]
    fn test_clamp_mm() {
        let config = SimulatorConfig::default();
        assert_eq!(clamp_mm(&config, -3.0), 0.0);
        assert_eq!(clamp_mm(&config, 42.5), 42.5);
        assert_eq!(clamp_mm(&config, 512.0), 300.0);
        assert_eq!(clamp_mm(&config, f64::INFINITY), 300.0);
        assert_eq!(clamp_mm(&config, f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp_mm(&config, f64::NAN), 0.0);
    }

    #[test]
    fn test_clamp_mm_keeps_displayed_precision() {
        let config = SimulatorConfig::default();
        assert_eq!(clamp_mm(&config, 8.37), 8.4);
        assert_eq!(clamp_mm(&config, 8.32), 8.3);
        assert_eq!(clamp_mm(&config, 299.97), 300.0);

        let narrow = SimulatorConfig {
            max_mm: 10.0,
            ..SimulatorConfig::default()
        };
        assert_eq!(clamp_mm(&narrow, 12.34), 10.0);
    }

    #[test]
    fn test_partial_config_deserialization() {
        let config: SimulatorConfig = serde_json::from_str(r#"{"log_capacity": 50}"#).unwrap();
        assert_eq!(config.log_capacity, 50);
        assert_eq!(config.jog_step_mm, 5.0);
        assert_eq!(config.max_mm, 300.0);
    }
}
