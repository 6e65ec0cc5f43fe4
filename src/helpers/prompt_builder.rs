use crate::constants::prompts::SUGGESTION_FORMAT_INSTRUCTIONS;

/// Render an analyzer prompt template, substituting the source code, the
/// file path and the output-schema instructions.
pub fn render_prompt(template: &str, source_code: &str, file_path: &str) -> String {
    template
        .replace("{code_class}", source_code)
        .replace("{file_path}", file_path)
        .replace("{output_format}", SUGGESTION_FORMAT_INSTRUCTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::prompts::JAVA_MIGRATION_PROMPT;

    #[test]
    fn substitutes_all_placeholders() {
        let prompt = render_prompt(JAVA_MIGRATION_PROMPT, "class A {}", "src/A.java");

        assert!(prompt.contains("class A {}"));
        assert!(prompt.contains("src/A.java"));
        assert!(prompt.contains("\"suggestions\""));
        assert!(!prompt.contains("{code_class}"));
        assert!(!prompt.contains("{file_path}"));
        assert!(!prompt.contains("{output_format}"));
    }
}
