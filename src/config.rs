use std::path::Path;

use serde::Deserialize;

use crate::error::ValidationError;

/// Knobs for one validation run. Checked once at construction; the scan
/// itself never revalidates.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorConfig {
    /// Maximum forward distance searched on either side when the cursors
    /// stop agreeing.
    pub lookahead_window: usize,
    /// Running mismatch ratio above which a scan aborts early.
    pub max_mismatch_ratio: f64,
    /// Absolute mismatch cap; `None` disables the cap.
    pub max_mismatches: Option<usize>,
    /// Mismatch ratio at or below which a transcript passes.
    pub fail_threshold: f64,
    /// How many mismatch records a report lists per file.
    pub display_limit: usize,
}

impl ValidatorConfig {
    pub const DEFAULT_LOOKAHEAD_WINDOW: usize = 5;
    pub const DEFAULT_MAX_MISMATCH_RATIO: f64 = 0.2;
    pub const DEFAULT_FAIL_THRESHOLD: f64 = 0.02;
    pub const DEFAULT_DISPLAY_LIMIT: usize = 20;

    /// Loads a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ValidationError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::io("read validator config", e))?;
        let partial: PartialConfig = serde_json::from_str(&data)
            .map_err(|e| ValidationError::json("parse validator config", e))?;
        let config = Self {
            lookahead_window: partial.lookahead_window,
            max_mismatch_ratio: partial.max_mismatch_ratio,
            max_mismatches: partial.max_mismatches,
            fail_threshold: partial.fail_threshold,
            display_limit: partial.display_limit,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lookahead_window == 0 {
            return Err(ValidationError::invalid_config(
                "lookahead_window must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.max_mismatch_ratio) {
            return Err(ValidationError::invalid_config(format!(
                "max_mismatch_ratio must be within [0, 1], got {}",
                self.max_mismatch_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.fail_threshold) {
            return Err(ValidationError::invalid_config(format!(
                "fail_threshold must be within [0, 1], got {}",
                self.fail_threshold
            )));
        }
        Ok(())
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            lookahead_window: Self::DEFAULT_LOOKAHEAD_WINDOW,
            max_mismatch_ratio: Self::DEFAULT_MAX_MISMATCH_RATIO,
            max_mismatches: None,
            fail_threshold: Self::DEFAULT_FAIL_THRESHOLD,
            display_limit: Self::DEFAULT_DISPLAY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PartialConfig {
    #[serde(default = "default_lookahead_window")]
    lookahead_window: usize,
    #[serde(default = "default_max_mismatch_ratio")]
    max_mismatch_ratio: f64,
    #[serde(default)]
    max_mismatches: Option<usize>,
    #[serde(default = "default_fail_threshold")]
    fail_threshold: f64,
    #[serde(default = "default_display_limit")]
    display_limit: usize,
}

fn default_lookahead_window() -> usize {
    ValidatorConfig::DEFAULT_LOOKAHEAD_WINDOW
}
fn default_max_mismatch_ratio() -> f64 {
    ValidatorConfig::DEFAULT_MAX_MISMATCH_RATIO
}
fn default_fail_threshold() -> f64 {
    ValidatorConfig::DEFAULT_FAIL_THRESHOLD
}
fn default_display_limit() -> usize {
    ValidatorConfig::DEFAULT_DISPLAY_LIMIT
}
