use crate::error::{DartError, DgResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub timing: TimingParams,
    #[command(flatten)]
    pub gesture: GestureParams,
    #[command(flatten)]
    pub session: SessionParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingParams {
    // Normal trials: input is locked this long before arming
    #[arg(long, default_value_t = 900.0)]
    pub lockout_ms: f64,
    // Gust trials: warning banner shown this long before arming
    #[arg(long, default_value_t = 4500.0)]
    pub gust_warning_ms: f64,
    #[arg(long, default_value_t = 900.0)]
    pub base_flight_ms: f64,
    #[arg(long, default_value_t = 3200.0)]
    pub gust_flight_ms: f64,
    #[arg(long, default_value_t = 1200.0)]
    pub feedback_ms: f64,
    #[arg(long, default_value_t = 450.0)]
    pub iti_ms: f64,
    #[arg(long, default_value_t = 16.0)]
    pub frame_interval_ms: f64,
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            lockout_ms: 900.0,
            gust_warning_ms: 4500.0,
            base_flight_ms: 900.0,
            gust_flight_ms: 3200.0,
            feedback_ms: 1200.0,
            iti_ms: 450.0,
            frame_interval_ms: 16.0,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureParams {
    #[arg(long, default_value_t = 250.0)]
    pub min_hold_ms: f64,
    #[arg(long, default_value_t = 45.0)]
    pub min_drag_px: f64,
    // Release must end at least this far above the press point
    #[arg(long, default_value_t = 10.0)]
    pub min_upward_px: f64,
    // Upward drag that maps to full strength
    #[arg(long, default_value_t = 180.0)]
    pub strength_scale_px: f64,
    #[arg(long, default_value_t = 18.0)]
    pub max_noise_px: f64,
}

impl Default for GestureParams {
    fn default() -> Self {
        Self {
            min_hold_ms: 250.0,
            min_drag_px: 45.0,
            min_upward_px: 10.0,
            strength_scale_px: 180.0,
            max_noise_px: 18.0,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionParams {
    #[arg(long, default_value_t = 5)]
    pub practice_trials: usize,
    #[arg(long, default_value_t = 24)]
    pub main_trials: usize,
    // Every n-th main trial is a gust trial (0 disables gusts)
    #[arg(long, default_value_t = 6)]
    pub gust_every: usize,
    #[arg(long, default_value_t = 4700.0)]
    pub main_gust_warning_ms: f64,
    #[arg(long, default_value_t = 3400.0)]
    pub main_gust_flight_ms: f64,
    #[arg(long, default_value = "TR50")]
    pub forced_zone: String,
    #[arg(long, default_value_t = 5)]
    pub leaderboard_size: usize,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            practice_trials: 5,
            main_trials: 24,
            gust_every: 6,
            main_gust_warning_ms: 4700.0,
            main_gust_flight_ms: 3400.0,
            forced_zone: "TR50".to_string(),
            leaderboard_size: 5,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DgResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DgResult<()> {
        let t = &self.timing;
        for (name, value) in [
            ("base_flight_ms", t.base_flight_ms),
            ("gust_flight_ms", t.gust_flight_ms),
            ("main_gust_flight_ms", self.session.main_gust_flight_ms),
            ("frame_interval_ms", t.frame_interval_ms),
            ("strength_scale_px", self.gesture.strength_scale_px),
        ] {
            if !(value > 0.0) {
                return Err(DartError::Config(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        for (name, value) in [
            ("lockout_ms", t.lockout_ms),
            ("gust_warning_ms", t.gust_warning_ms),
            ("main_gust_warning_ms", self.session.main_gust_warning_ms),
            ("feedback_ms", t.feedback_ms),
            ("iti_ms", t.iti_ms),
            ("min_hold_ms", self.gesture.min_hold_ms),
            ("min_drag_px", self.gesture.min_drag_px),
            ("min_upward_px", self.gesture.min_upward_px),
            ("max_noise_px", self.gesture.max_noise_px),
        ] {
            if !(value >= 0.0) {
                return Err(DartError::Config(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        if self.session.leaderboard_size == 0 {
            return Err(DartError::Config("leaderboard_size must be at least 1".into()));
        }
        Ok(())
    }

    /// Overlays only the flags the user actually typed, so file values
    /// survive clap's defaults.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(timing.lockout_ms);
        update_if_present!(timing.gust_warning_ms);
        update_if_present!(timing.base_flight_ms);
        update_if_present!(timing.gust_flight_ms);
        update_if_present!(timing.feedback_ms);
        update_if_present!(timing.iti_ms);
        update_if_present!(timing.frame_interval_ms);

        update_if_present!(gesture.min_hold_ms);
        update_if_present!(gesture.min_drag_px);
        update_if_present!(gesture.min_upward_px);
        update_if_present!(gesture.strength_scale_px);
        update_if_present!(gesture.max_noise_px);

        update_if_present!(session.practice_trials);
        update_if_present!(session.main_trials);
        update_if_present!(session.gust_every);
        update_if_present!(session.main_gust_warning_ms);
        update_if_present!(session.main_gust_flight_ms);
        update_if_present!(session.forced_zone);
        update_if_present!(session.leaderboard_size);
    }
}
