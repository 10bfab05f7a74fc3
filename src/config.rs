//! TOML + environment configuration for the service process.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Environment variable toggling CO2 pricing, read once at startup.
pub const CO2_ENV_VAR: &str = "CO2";

/// Top-level service configuration parsed from TOML.
///
/// All fields have defaults; load from TOML with
/// [`AppConfig::from_toml_file`] or start from [`AppConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// HTTP server parameters.
    pub server: ServerConfig,
    /// Planning parameters, passed explicitly into every plan call.
    pub planner: PlannerConfig,
}

/// HTTP server parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Port to bind on all interfaces (must be > 0).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Planning parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Whether CO2 allowance cost is added to fuel cost (default off).
    pub include_co2: bool,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"planner.include_co2"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl AppConfig {
    /// Parses configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Applies the `CO2` environment variable, if set, onto the planner flag.
    ///
    /// Accepts `true`/`1` and `false`/`0`, case-insensitive. The value is
    /// converted to a typed bool here, once; core logic never touches the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for any other value.
    pub fn apply_co2_env(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        let Some(raw) = value else {
            return Ok(());
        };
        match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => self.planner.include_co2 = true,
            "false" | "0" => self.planner.include_co2 = false,
            other => {
                return Err(ConfigError {
                    field: "planner.include_co2".to_string(),
                    message: format!(
                        "env {CO2_ENV_VAR}=\"{other}\" is not a boolean (true/false/1/0)"
                    ),
                });
            }
        }
        Ok(())
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.server.port == 0 {
            errors.push(ConfigError {
                field: "server.port".into(),
                message: "must be > 0".into(),
            });
        }
        errors
    }
}
