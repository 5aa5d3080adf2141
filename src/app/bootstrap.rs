use crate::app::submission::Notice;
use crate::config::{load_runtime_config, RuntimeConfig, GLOBAL_SETTINGS_FILE_NAME};
use crate::provider::{CompletionInvoker, OpenAiClient};
use crate::shared::logging::EventLog;
use std::sync::Arc;

pub struct App {
    pub config: RuntimeConfig,
    pub invoker: Arc<CompletionInvoker<OpenAiClient>>,
    pub startup_notices: Vec<Notice>,
    pub log: EventLog,
}

pub fn bootstrap() -> App {
    bootstrap_from(load_runtime_config())
}

/// Builds the shared client once; configuration problems become notices.
pub fn bootstrap_from(config: RuntimeConfig) -> App {
    let log = match &config.state_root {
        Some(root) => EventLog::for_state_root(root),
        None => EventLog::disabled(),
    };

    let settings = &config.settings;
    let client = OpenAiClient::new(
        &settings.api_base,
        config.api_key.clone(),
        settings.timeout(),
    );
    let invoker =
        Arc::new(CompletionInvoker::new(client, &settings.model).with_event_log(log.clone()));

    log.info(
        "startup.config",
        &format!(
            "model={} api_base={} credential={}",
            settings.model,
            settings.api_base,
            if config.has_credential() {
                "present"
            } else {
                "missing"
            }
        ),
    );
    for issue in &config.issues {
        log.warn("startup.config_issue", &issue.message());
    }

    let startup_notices = config.issues.iter().map(Notice::from).collect();
    App {
        config,
        invoker,
        startup_notices,
        log,
    }
}

impl App {
    pub fn doctor_lines(&self) -> Vec<String> {
        let settings = &self.config.settings;
        let mut lines = vec![
            format!(
                "credential={}",
                if self.config.has_credential() {
                    "present"
                } else {
                    "missing"
                }
            ),
            format!("model={}", settings.model),
            format!("api_base={}", settings.api_base),
            format!("timeout_secs={}", settings.timeout_secs),
        ];
        match &self.config.state_root {
            Some(root) => {
                lines.push(format!(
                    "config_path={}",
                    root.join(GLOBAL_SETTINGS_FILE_NAME).display()
                ));
                if let Some(path) = self.log.path() {
                    lines.push(format!("log_path={}", path.display()));
                }
            }
            None => lines.push("config_path=unavailable".to_string()),
        }
        for notice in &self.startup_notices {
            lines.push(format!("issue={}", notice.text));
        }
        lines
    }
}
