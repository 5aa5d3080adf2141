use crate::app::bootstrap::bootstrap;
use crate::app::submission::{submit, Submission, SubmissionOutcome, ANSWER_HEADING};
use crate::persona::Persona;

pub fn cmd_ask(args: &[String]) -> Result<String, String> {
    if args.len() < 2 {
        return Err("usage: ask <persona> <question...>".to_string());
    }

    let persona = Persona::from_cli_arg(&args[0]);
    let question = args[1..].join(" ");

    let app = bootstrap();
    for notice in &app.startup_notices {
        eprintln!("{notice}");
    }
    render_submission(submit(app.invoker.as_ref(), persona, &question))
}

pub fn render_submission(submission: Submission) -> Result<String, String> {
    let notices = submission
        .notices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    match submission.outcome {
        SubmissionOutcome::Answered(text) => Ok(format!("{ANSWER_HEADING}\n{text}")),
        SubmissionOutcome::Rejected | SubmissionOutcome::Failed { .. } => {
            Err(notices.join("\n"))
        }
    }
}
