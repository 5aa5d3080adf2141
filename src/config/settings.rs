use super::ConfigError;
use crate::provider::{DEFAULT_API_BASE, DEFAULT_MODEL};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const API_BASE_ENV: &str = "EXPERTCHAT_API_BASE";
pub const MODEL_ENV: &str = "EXPERTCHAT_MODEL";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Settings("`model` must be non-empty".to_string()));
        }
        let base = self.api_base.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Settings(format!(
                "`api_base` must be an http(s) url, got `{}`",
                self.api_base
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Settings(
                "`timeout_secs` must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Each override is validated on its own; a rejected one leaves the
    /// current value of that field in place.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Vec<ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();
        if let Some(api_base) = lookup(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            let candidate = Self {
                api_base: api_base.trim().to_string(),
                ..self.clone()
            };
            self.accept_override(candidate, API_BASE_ENV, &mut rejected);
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.trim().is_empty()) {
            let candidate = Self {
                model: model.trim().to_string(),
                ..self.clone()
            };
            self.accept_override(candidate, MODEL_ENV, &mut rejected);
        }
        rejected
    }

    fn accept_override(&mut self, candidate: Self, var: &str, rejected: &mut Vec<ConfigError>) {
        match candidate.validate() {
            Ok(()) => *self = candidate,
            Err(err) => rejected.push(ConfigError::Settings(format!("{var} ignored: {err}"))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
