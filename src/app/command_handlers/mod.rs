use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod ask;
pub mod doctor;
pub mod form;
pub mod personas;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return form::cmd_form();
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Form => form::cmd_form(),
        CliVerb::Ask => ask::cmd_ask(&args[1..]),
        CliVerb::Personas => Ok(personas::cmd_personas()),
        CliVerb::Doctor => Ok(doctor::cmd_doctor()),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`\n\n{}", args[0], help_text())),
    }
}
