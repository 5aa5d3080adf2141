#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Form,
    Ask,
    Personas,
    Doctor,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "form" => CliVerb::Form,
        "ask" => CliVerb::Ask,
        "personas" => CliVerb::Personas,
        "doctor" => CliVerb::Doctor,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

/// Verbs that own the terminal or stdout and skip the banner.
pub fn prints_header(verb: CliVerb) -> bool {
    !matches!(verb, CliVerb::Form | CliVerb::Ask)
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  (no command) | form                  Open the interactive question form".to_string(),
        "  ask <persona> <question...>          Ask one question and print the answer"
            .to_string(),
        "  personas                             List selectable personas".to_string(),
        "  doctor                               Show credential and settings status".to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.push("Environment:".to_string());
    lines.push("  OPENAI_API_KEY                       Required API credential".to_string());
    lines.push(
        "  EXPERTCHAT_API_BASE                  Override the completion API base url".to_string(),
    );
    lines.push("  EXPERTCHAT_MODEL                     Override the model identifier".to_string());
    lines.join("\n")
}
