use super::{state_root_for_home, ConfigError, Settings, GLOBAL_SETTINGS_FILE_NAME};
use crate::provider::openai::API_KEY_ENV;
use std::path::{Path, PathBuf};

/// Startup problems that are reported to the user but never halt startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    MissingCredential,
    HomeDirectoryUnavailable,
    InvalidSettings(String),
}

impl ConfigIssue {
    pub fn message(&self) -> String {
        match self {
            Self::MissingCredential => {
                format!("環境変数 {API_KEY_ENV} が設定されていません。")
            }
            Self::HomeDirectoryUnavailable => {
                "ホームディレクトリを特定できないため、設定ファイルとログを使用しません。"
                    .to_string()
            }
            Self::InvalidSettings(reason) => {
                format!("設定ファイルを読み込めませんでした（既定値を使用します）: {reason}")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub settings: Settings,
    pub api_key: Option<String>,
    pub state_root: Option<PathBuf>,
    pub issues: Vec<ConfigIssue>,
}

impl RuntimeConfig {
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Missing file means defaults; an unreadable or invalid file is an error.
pub fn load_settings_file(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let settings = Settings::from_path(path)?;
    settings.validate()?;
    Ok(settings)
}

pub fn load_runtime_config() -> RuntimeConfig {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    load_runtime_config_with(home.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_runtime_config_with<F>(home: Option<&Path>, lookup: F) -> RuntimeConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut issues = Vec::new();
    let state_root = home.map(state_root_for_home);

    let mut settings = match &state_root {
        Some(root) => match load_settings_file(&root.join(GLOBAL_SETTINGS_FILE_NAME)) {
            Ok(settings) => settings,
            Err(err) => {
                issues.push(ConfigIssue::InvalidSettings(err.to_string()));
                Settings::default()
            }
        },
        None => {
            issues.push(ConfigIssue::HomeDirectoryUnavailable);
            Settings::default()
        }
    };
    for err in settings.apply_env_overrides(&lookup) {
        issues.push(ConfigIssue::InvalidSettings(err.to_string()));
    }

    let api_key = lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty());
    if api_key.is_none() {
        issues.push(ConfigIssue::MissingCredential);
    }

    RuntimeConfig {
        settings,
        api_key,
        state_root,
        issues,
    }
}
