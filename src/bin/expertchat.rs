use expertchat::app::cli::{parse_cli_verb, prints_header, CliVerb};
use expertchat::app::command_handlers;

fn output_header() -> &'static str {
    "expertchat\nAsk an LLM a question through the lens of a selected expert persona."
}

fn print_header() {
    println!("{}\n", output_header());
}

fn run() -> Result<(), String> {
    // A missing .env is fine; the credential check reports it later.
    let _ = dotenv::dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let verb = args
        .first()
        .map(|arg| parse_cli_verb(arg))
        .unwrap_or(CliVerb::Form);
    if prints_header(verb) {
        print_header();
    }
    let output = command_handlers::run_cli(args)?;
    println!("{output}");
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
