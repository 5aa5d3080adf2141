use crate::app::bootstrap::bootstrap;

pub fn cmd_doctor() -> String {
    let app = bootstrap();
    let mut lines = vec!["doctor".to_string()];
    lines.extend(app.doctor_lines());
    lines.join("\n")
}
