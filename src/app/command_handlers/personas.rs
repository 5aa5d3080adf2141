use crate::persona::Persona;

pub fn cmd_personas() -> String {
    let mut lines = vec!["Personas:".to_string()];
    lines.extend(
        Persona::ALL
            .iter()
            .enumerate()
            .map(|(index, persona)| {
                format!("  {}. {:18} {}", index + 1, persona.slug(), persona.label())
            }),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::cmd_personas;

    #[test]
    fn lists_all_four_personas_in_selector_order() {
        let output = cmd_personas();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("it-engineer") && lines[1].contains("ITエンジニア"));
        assert!(lines[4].contains("general") && lines[4].contains("一般的なアシスタント"));
    }
}
