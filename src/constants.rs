//! Shared application-wide constants.
//! Centralizes the machine limits, defaults and display values used by the
//! session model and the control panel.

// Travel limits
/// Lowest position any setting or the process value may take (mm).
pub const MIN_MM: f64 = 0.0;
/// Highest position any setting or the process value may take (mm).
pub const MAX_MM: f64 = 300.0;

// Hydraulic jog
/// Distance moved by one MOLD OPEN / MOLD CLOSE press (mm).
pub const JOG_STEP_MM: f64 = 5.0;
/// Increment used by the numeric setting editors (mm).
pub const INPUT_STEP_MM: f64 = 0.5;
/// Decimal places shown and kept by the numeric setting editors.
pub const INPUT_DECIMALS: usize = 1;

// Action log
/// Number of log entries shown on the panel.
pub const LOG_DISPLAY_LIMIT: usize = 25;
/// Number of log entries kept in memory before the oldest are dropped.
pub const LOG_CAPACITY: usize = 1000;

// Default settings
/// A. CRACKING
pub const DEFAULT_CRACKING_MM: f64 = 8.0;
/// B. MOLD CLOSE SLOW
pub const DEFAULT_CLOSE_SLOW_MM: f64 = 20.0;
/// C. MOLD OPEN SLOW
pub const DEFAULT_OPEN_SLOW_MM: f64 = 15.0;
/// D. MOLD OPEN STOP 1
pub const DEFAULT_OPEN_STOP1_MM: f64 = 60.0;
/// F. A2A CLOSE
pub const DEFAULT_A2A_CLOSE_MM: f64 = 2.0;
/// G. A2A OPEN
pub const DEFAULT_A2A_OPEN_MM: f64 = 8.0;
/// Process value at session start.
pub const DEFAULT_PV_MM: f64 = 0.0;

// Recipe files
/// Download name for the sample recipe.
pub const SAMPLE_RECIPE_FILE: &str = "sample_recipe.json";
/// Download name for the current session recipe.
pub const CURRENT_RECIPE_FILE: &str = "mold_setting_recipe.json";
/// Timestamp layout used in recipes (local time, second precision).
pub const RECIPE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Clock layout used in action log entries.
pub const LOG_TIME_FORMAT: &str = "%H:%M:%S";

// Persistence
/// eframe storage key for UI preferences.
pub const APP_STATE_KEY: &str = "app_state";
