use crate::backend::progress::easing::Easing;
use crate::backend::progress::stages::{BoundaryTieBreak, STAGES};
use crate::simple_error;
use crate::utils::Result;
use serde::{Deserialize, Serialize};

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable pointing at a JSON config file.
pub const CONFIG_ENV: &str = "MINING_CARD_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub pacing: PacingConfig,
    pub timing: TimingConfig,
    pub behavior: BehaviorConfig,
    pub window: WindowSettings,
}

/// Shape of the main progression curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub base_rate: f64,
    pub min_increment: f64,
    pub slowdown_after_secs: f64,
    pub decay_span_secs: f64,
    pub min_speed_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub ramp_target: f64,
    pub ramp_duration_ms: u64,
    pub tick_interval_ms: u64,
    pub frame_interval_ms: u64,
    pub skip_duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RampMode {
    /// Cubic ease-in-out sampled at frame cadence.
    #[default]
    Eased,
    /// Equal steps at tick cadence.
    FixedStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkipTarget {
    /// Smallest stage target above the current percentage.
    #[default]
    NearestForward,
    /// Target of the stage currently shown.
    OneStage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BehaviorConfig {
    pub tie_break: BoundaryTieBreak,
    pub skip_target: SkipTarget,
    pub ramp_mode: RampMode,
    pub skip_easing: Easing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            base_rate: 0.1,
            min_increment: 0.01,
            slowdown_after_secs: 60.0,
            decay_span_secs: 1140.0,
            min_speed_factor: 0.05,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            ramp_target: 5.0,
            ramp_duration_ms: 3000,
            tick_interval_ms: 100,
            frame_interval_ms: 16,
            skip_duration_ms: 1000,
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Mining insights".to_string(),
            width: 460,
            height: 300,
        }
    }
}

impl PacingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.base_rate > 0.0) {
            return Err(simple_error!("pacing.base_rate must be positive, got {}", self.base_rate));
        }
        if !(self.min_increment > 0.0) {
            return Err(simple_error!(
                "pacing.min_increment must be positive, got {}",
                self.min_increment
            ));
        }
        if !(self.slowdown_after_secs >= 0.0) || !self.slowdown_after_secs.is_finite() {
            return Err(simple_error!(
                "pacing.slowdown_after_secs must be a non-negative number, got {}",
                self.slowdown_after_secs
            ));
        }
        if !(self.decay_span_secs > 0.0) {
            return Err(simple_error!(
                "pacing.decay_span_secs must be positive, got {}",
                self.decay_span_secs
            ));
        }
        if !(self.min_speed_factor > 0.0 && self.min_speed_factor <= 1.0) {
            return Err(simple_error!(
                "pacing.min_speed_factor must be in (0, 1], got {}",
                self.min_speed_factor
            ));
        }
        Ok(())
    }
}

impl TimingConfig {
    pub fn ramp_duration(&self) -> Duration {
        Duration::from_millis(self.ramp_duration_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn skip_duration(&self) -> Duration {
        Duration::from_millis(self.skip_duration_ms)
    }

    pub fn validate(&self) -> Result<()> {
        let first_target = STAGES[0].target();
        if !(self.ramp_target > 0.0 && self.ramp_target < first_target) {
            return Err(simple_error!(
                "timing.ramp_target must be in (0, {}), got {}",
                first_target,
                self.ramp_target
            ));
        }
        for (name, value) in [
            ("ramp_duration_ms", self.ramp_duration_ms),
            ("tick_interval_ms", self.tick_interval_ms),
            ("frame_interval_ms", self.frame_interval_ms),
            ("skip_duration_ms", self.skip_duration_ms),
        ] {
            if value == 0 {
                return Err(simple_error!("timing.{} must be greater than zero", name));
            }
        }
        Ok(())
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.pacing.validate()?;
        self.timing.validate()
    }
}

pub struct ConfigManager;

impl ConfigManager {
    /// Read and validate a JSON config. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<AppConfig> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `MINING_CARD_CONFIG` if set, otherwise use defaults.
    pub fn from_env() -> Result<AppConfig> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(&PathBuf::from(path)),
            None => Ok(AppConfig::default()),
        }
    }

    pub fn save(path: &Path, config: &AppConfig) -> Result<()> {
        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "timing": { "skip_duration_ms": 250 } }"#).unwrap();
        assert_eq!(config.timing.skip_duration(), Duration::from_millis(250));
        assert_eq!(config.timing.ramp_duration_ms, 3000);
        assert_eq!(config.pacing, PacingConfig::default());
    }

    #[test]
    fn variants_use_snake_case() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "behavior": { "tie_break": "inclusive", "skip_target": "one_stage",
                 "ramp_mode": "fixed_step", "skip_easing": "linear" } }"#,
        )
        .unwrap();
        assert_eq!(config.behavior.tie_break, BoundaryTieBreak::Inclusive);
        assert_eq!(config.behavior.skip_target, SkipTarget::OneStage);
        assert_eq!(config.behavior.ramp_mode, RampMode::FixedStep);
        assert_eq!(config.behavior.skip_easing, Easing::Linear);
    }

    #[test]
    fn rejects_ramp_past_first_stage() {
        let mut config = AppConfig::default();
        config.timing.ramp_target = 40.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ramp_target"));
    }

    #[test]
    fn rejects_zero_intervals() {
        let mut config = AppConfig::default();
        config.timing.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_speed_floor_of_zero() {
        let mut config = AppConfig::default();
        config.pacing.min_speed_factor = 0.0;
        assert!(config.validate().is_err());
    }
}
