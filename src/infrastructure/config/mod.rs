use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::{Path, PathBuf};

use crate::domain::error::{AppError, Result};
use crate::domain::settings::AppSettings;

pub const DEFAULT_CONFIG_FILE: &str = "feedback.toml";
pub const CONFIG_PATH_VAR: &str = "FEEDBACK_CONFIG";
pub const ENV_PREFIX: &str = "FEEDBACK_";

/// Layered settings: defaults, then the TOML file, then `FEEDBACK_*` env vars.
/// Nested keys use `__`, e.g. `FEEDBACK_SERVER__PORT=9000`.
pub struct ConfigService {
    config_path: PathBuf,
    env_prefix: String,
}

impl ConfigService {
    pub fn new() -> Self {
        // .env is optional
        let _ = dotenvy::dotenv();

        let config_path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self::with_file(config_path)
    }

    pub fn with_file(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn figment(&self) -> Figment {
        Figment::from(Serialized::defaults(AppSettings::default()))
            .merge(Toml::file(&self.config_path))
            .merge(
                Env::prefixed(&self.env_prefix)
                    .ignore(&["config"])
                    .split("__"),
            )
    }

    pub fn load(&self) -> Result<AppSettings> {
        let settings: AppSettings = self.figment().extract().map_err(|e| {
            AppError::ConfigError(format!(
                "Failed to load settings from {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let validation = settings.validate();
        for warning in &validation.warnings {
            tracing::warn!(config = %self.config_path.display(), "{}", warning);
        }
        if !validation.valid {
            return Err(AppError::ConfigError(validation.errors.join("; ")));
        }

        Ok(settings)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
