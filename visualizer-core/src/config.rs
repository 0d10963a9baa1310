use crate::error::ConfigError;
use crate::types::AppConfig;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV_VAR: &str = "PATTERN_VISUALIZER_CONFIG";

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            ErrorKind::PermissionDenied => ConfigError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => ConfigError::ValidationFailed {
                reason: format!("could not read {}: {}", path.display(), e),
            },
        })?;

        let config = Self::from_toml_str(&raw)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Picks the explicit path, then the environment variable, then defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::resolve_from(explicit, env_path.as_deref())
    }

    pub fn resolve_from(explicit: Option<&Path>, env_path: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit.or(env_path) {
            Some(path) => Self::load(path),
            None => {
                debug!("No configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.toast_duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "toast_duration_ms".to_string(),
                value: self.toast_duration_ms.to_string(),
            });
        }

        if !self.tree_indent_px.is_finite() || self.tree_indent_px < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "tree_indent_px".to_string(),
                value: self.tree_indent_px.to_string(),
            });
        }

        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "log_filter must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
