//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`FXL_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use fixedloop_core::{
    ClockConfig, ClockError, SimulationClock, DEFAULT_FIXED_STEP, DEFAULT_MAX_FRAME_DELTA,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::systems::WorldConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulation clock configuration
    #[serde(default)]
    pub timing: TimingConfig,
    /// Window / frame host configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Demo world configuration
    #[serde(default)]
    pub world: WorldConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`FXL_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // FXL_TIMING__FIXED_STEP=0.01 -> timing.fixed_step = 0.01
        figment = figment.merge(Env::prefixed("FXL_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Build a validated simulation clock from the timing section
    pub fn clock(&self) -> Result<SimulationClock, ClockError> {
        SimulationClock::with_config(self.timing.to_clock_config())
    }
}

/// Simulation timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Seconds of simulated time per fixed step
    pub fixed_step: f64,
    /// Largest wall-clock delta a single frame may contribute
    pub max_frame_delta: f64,
    /// Begin with fixed stepping paused
    pub start_paused: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fixed_step: DEFAULT_FIXED_STEP,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            start_paused: false,
        }
    }
}

impl TimingConfig {
    pub fn to_clock_config(&self) -> ClockConfig {
        ClockConfig {
            fixed_step: self.fixed_step,
            max_frame_delta: self.max_frame_delta,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Run without a window, pacing frames with a timer
    pub headless: bool,
    /// Frames to run in headless mode
    pub headless_frames: u64,
    /// Headless refresh rate in Hz
    pub refresh_rate: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "fixedloop".to_string(),
            width: 1280,
            height: 720,
            headless: false,
            headless_frames: 600,
            refresh_rate: 60.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Frames between statistics log lines (0 disables them)
    pub report_interval: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report_interval: 120,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
