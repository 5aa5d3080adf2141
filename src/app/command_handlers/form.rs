use crate::app::bootstrap::bootstrap;
use crate::tui::form::run_form_tui;

pub fn cmd_form() -> Result<String, String> {
    let app = bootstrap();
    app.log.info("form.open", "interactive form started");
    run_form_tui(app.invoker, app.startup_notices)?;
    Ok("form closed".to_string())
}
