//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `growbox.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Program document settings.
    pub program: ProgramConfig,
    /// Evaluation cycle settings.
    pub cycle: CycleConfig,
    /// Power controller settings.
    pub power: PowerConfig,
    /// Simulated chamber settings.
    pub chamber: ChamberConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Program document location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    /// Path to the JSON program document.
    pub path: String,
}

/// Evaluation cycle timing.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Seconds between evaluation cycles.
    pub period_secs: u64,
}

/// Closed-loop power controller tuning.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    /// Absolute tolerance, in watts, at which convergence stops.
    pub tolerance_watts: f64,
    /// Maximum measure-and-scale iterations per resolution.
    pub max_iterations: u32,
}

/// Parameters of the simulated chamber hardware.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChamberConfig {
    /// Modeled panel draw per channel-level unit, in watts.
    pub watts_per_unit: f64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `growbox.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("growbox.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("GROWBOX_PROGRAM") {
            self.program.path = val;
        }
        if let Ok(val) = std::env::var("GROWBOX_PERIOD_SECS") {
            if let Ok(period) = val.parse() {
                self.cycle.period_secs = period;
            }
        }
        if let Ok(val) = std::env::var("GROWBOX_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle.period_secs == 0 {
            return Err(ConfigError::Validation(
                "cycle period must be non-zero".to_string(),
            ));
        }
        if self.power.tolerance_watts <= 0.0 {
            return Err(ConfigError::Validation(
                "power tolerance must be positive".to_string(),
            ));
        }
        if self.power.max_iterations == 0 {
            return Err(ConfigError::Validation(
                "power iteration budget must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            path: "program.json".to_string(),
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self { period_secs: 5 }
    }
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            tolerance_watts: 0.5,
            max_iterations: 4,
        }
    }
}

impl Default for ChamberConfig {
    fn default() -> Self {
        Self { watts_per_unit: 0.2 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "growboxd=info,growbox=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
