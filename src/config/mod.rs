pub mod error;
pub mod load;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use load::{
    load_runtime_config, load_runtime_config_with, load_settings_file, ConfigIssue, RuntimeConfig,
};
pub use paths::{state_root_for_home, GLOBAL_SETTINGS_FILE_NAME, GLOBAL_STATE_DIR};
pub use settings::{Settings, API_BASE_ENV, DEFAULT_TIMEOUT_SECS, MODEL_ENV};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::tempdir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_settings_file_uses_defaults() {
        let dir = tempdir().expect("tempdir");
        let config = load_runtime_config_with(
            Some(dir.path()),
            env_from(&[("OPENAI_API_KEY", "sk-test")]),
        );
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.settings.model, "gpt-4o-mini");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert!(config.issues.is_empty());
        assert_eq!(config.state_root, Some(dir.path().join(".expertchat")));
    }

    #[test]
    fn missing_credential_is_reported_without_failing() {
        let dir = tempdir().expect("tempdir");
        let config =
            load_runtime_config_with(Some(dir.path()), env_from(&[("OPENAI_API_KEY", "  ")]));
        assert!(!config.has_credential());
        assert_eq!(config.issues, vec![ConfigIssue::MissingCredential]);
        assert_eq!(
            config.issues[0].message(),
            "環境変数 OPENAI_API_KEY が設定されていません。"
        );
    }

    #[test]
    fn settings_file_and_env_overrides_are_layered() {
        let dir = tempdir().expect("tempdir");
        let state_root = state_root_for_home(dir.path());
        fs::create_dir_all(&state_root).expect("state root");
        fs::write(
            state_root.join(GLOBAL_SETTINGS_FILE_NAME),
            "model: gpt-4o\ntimeout_secs: 15\n",
        )
        .expect("write settings");

        let config = load_runtime_config_with(
            Some(dir.path()),
            env_from(&[
                ("OPENAI_API_KEY", "sk-test"),
                (API_BASE_ENV, "http://127.0.0.1:8080/v1"),
            ]),
        );
        assert_eq!(config.settings.model, "gpt-4o");
        assert_eq!(config.settings.timeout_secs, 15);
        assert_eq!(config.settings.api_base, "http://127.0.0.1:8080/v1");
        assert!(config.issues.is_empty());

        let overridden = load_runtime_config_with(
            Some(dir.path()),
            env_from(&[("OPENAI_API_KEY", "sk-test"), (MODEL_ENV, "gpt-4.1-mini")]),
        );
        assert_eq!(overridden.settings.model, "gpt-4.1-mini");
    }

    #[test]
    fn invalid_settings_fall_back_to_defaults_with_issue() {
        let dir = tempdir().expect("tempdir");
        let state_root = state_root_for_home(dir.path());
        fs::create_dir_all(&state_root).expect("state root");
        fs::write(state_root.join(GLOBAL_SETTINGS_FILE_NAME), "model: [unclosed\n")
            .expect("write settings");

        let config = load_runtime_config_with(
            Some(dir.path()),
            env_from(&[("OPENAI_API_KEY", "sk-test")]),
        );
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.issues.len(), 1);
        assert!(matches!(config.issues[0], ConfigIssue::InvalidSettings(_)));
    }

    #[test]
    fn invalid_env_override_keeps_file_values_and_is_reported() {
        let dir = tempdir().expect("tempdir");
        let state_root = state_root_for_home(dir.path());
        fs::create_dir_all(&state_root).expect("state root");
        fs::write(
            state_root.join(GLOBAL_SETTINGS_FILE_NAME),
            "model: gpt-4o\ntimeout_secs: 15\napi_base: http://127.0.0.1:9000/v1\n",
        )
        .expect("write settings");

        let config = load_runtime_config_with(
            Some(dir.path()),
            env_from(&[
                ("OPENAI_API_KEY", "sk-test"),
                (API_BASE_ENV, "ftp://example.com"),
                (MODEL_ENV, "gpt-4.1-mini"),
            ]),
        );
        assert_eq!(config.settings.api_base, "http://127.0.0.1:9000/v1");
        assert_eq!(config.settings.model, "gpt-4.1-mini");
        assert_eq!(config.settings.timeout_secs, 15);
        assert_eq!(config.issues.len(), 1);
        match &config.issues[0] {
            ConfigIssue::InvalidSettings(reason) => assert!(reason.contains(API_BASE_ENV)),
            other => panic!("unexpected issue: {other:?}"),
        }
    }

    #[test]
    fn settings_validation_rejects_bad_values() {
        let bad_base = Settings {
            api_base: "ftp://example.com".to_string(),
            ..Settings::default()
        };
        assert!(bad_base.validate().is_err());

        let zero_timeout = Settings {
            timeout_secs: 0,
            ..Settings::default()
        };
        assert!(zero_timeout.validate().is_err());

        let blank_model = Settings {
            model: " ".to_string(),
            ..Settings::default()
        };
        assert!(blank_model.validate().is_err());

        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn missing_home_is_reported() {
        let config = load_runtime_config_with(None, env_from(&[("OPENAI_API_KEY", "sk-test")]));
        assert!(config.state_root.is_none());
        assert_eq!(config.issues, vec![ConfigIssue::HomeDirectoryUnavailable]);
    }
}
