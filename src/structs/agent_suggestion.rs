use serde::{Deserialize, Serialize};

/// One suggestion exactly as the model emits it: location, rationale and
/// replacement code for a single improvable stretch of a source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSuggestion {
    pub file_path: String,
    pub description: String,
    pub start_line: u32,
    pub end_line: u32,
    pub original_snippet: String,
    pub modified_code: String,
    pub difficulty_level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl AgentSuggestion {
    /// Range checks the schema typing cannot express. Line numbers are
    /// 1-based and difficulty is a 1-5 score.
    pub fn validate(&self) -> Result<(), String> {
        if self.start_line < 1 {
            return Err(format!("start_line must be >= 1, got {}", self.start_line));
        }
        if self.start_line > self.end_line {
            return Err(format!(
                "start_line {} is greater than end_line {}",
                self.start_line, self.end_line
            ));
        }
        if !(1..=5).contains(&self.difficulty_level) {
            return Err(format!(
                "difficulty_level must be in 1..=5, got {}",
                self.difficulty_level
            ));
        }
        Ok(())
    }
}

/// The full response schema the agent instructs the model to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsList {
    pub suggestions: Vec<AgentSuggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(start_line: u32, end_line: u32, difficulty_level: u8) -> AgentSuggestion {
        AgentSuggestion {
            file_path: "src/Main.java".to_string(),
            description: "Replace explicit type with var".to_string(),
            start_line,
            end_line,
            original_snippet: "List<String> names = new ArrayList<>();".to_string(),
            modified_code: "var names = new ArrayList<String>();".to_string(),
            difficulty_level,
            additional_notes: None,
        }
    }

    #[test]
    fn valid_ranges_pass() {
        assert!(suggestion(1, 1, 1).validate().is_ok());
        assert!(suggestion(3, 10, 5).validate().is_ok());
    }

    #[test]
    fn zero_start_line_is_rejected() {
        assert!(suggestion(0, 4, 2).validate().is_err());
    }

    #[test]
    fn inverted_line_range_is_rejected() {
        assert!(suggestion(7, 3, 2).validate().is_err());
    }

    #[test]
    fn difficulty_out_of_range_is_rejected() {
        assert!(suggestion(1, 2, 0).validate().is_err());
        assert!(suggestion(1, 2, 6).validate().is_err());
    }
}
