use std::sync::Arc;
use crate::enums::agent_error::AgentError;
use crate::helpers::prompt_builder;
use crate::services::suggestion_parser;
use crate::structs::agent_suggestion::AgentSuggestion;
use crate::traits::ai_provider::AiProvider;

/// The LLM agent adapter: renders a fixed prompt template for one source
/// file, invokes the provider, and parses the response strictly against the
/// suggestion-list schema. Pure per call; retries are the worker's concern.
pub struct SuggestionAgent {
    provider: Arc<dyn AiProvider>,
    prompt_template: &'static str,
}

impl SuggestionAgent {
    pub fn new(provider: Arc<dyn AiProvider>, prompt_template: &'static str) -> Self {
        Self { provider, prompt_template }
    }

    pub async fn generate_suggestions(
        &self,
        source_code: &str,
        file_path: &str,
    ) -> Result<Vec<AgentSuggestion>, AgentError> {
        let prompt = prompt_builder::render_prompt(self.prompt_template, source_code, file_path);

        let response_text = self.provider.chat(String::new(), vec![prompt]).await?;

        suggestion_parser::parse_suggestions(&response_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use crate::constants::prompts::JAVA_MIGRATION_PROMPT;
    use crate::enums::ai_provider_error::AiProviderError;

    mock! {
        Provider {}

        #[async_trait]
        impl AiProvider for Provider {
            async fn chat(&self, system_prompt: String, user_prompts: Vec<String>) -> Result<String, AiProviderError>;
        }
    }

    const ONE_SUGGESTION: &str = r#"{
        "suggestions": [
            {
                "file_path": "src/Legacy.java",
                "description": "Use var for the local",
                "start_line": 4,
                "end_line": 4,
                "original_snippet": "final String name = compute();",
                "modified_code": "var name = compute();",
                "difficulty_level": 1
            }
        ]
    }"#;

    #[tokio::test]
    async fn renders_prompt_and_parses_response() {
        let mut provider = MockProvider::new();
        provider
            .expect_chat()
            .withf(|system, users| {
                system.is_empty()
                    && users.len() == 1
                    && users[0].contains("class Legacy {}")
                    && users[0].contains("src/Legacy.java")
                    && users[0].contains("\"suggestions\"")
            })
            .times(1)
            .returning(|_, _| Ok(ONE_SUGGESTION.to_string()));

        let agent = SuggestionAgent::new(Arc::new(provider), JAVA_MIGRATION_PROMPT);
        let suggestions = agent
            .generate_suggestions("class Legacy {}", "src/Legacy.java")
            .await
            .unwrap();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].difficulty_level, 1);
    }

    #[tokio::test]
    async fn provider_failure_maps_to_upstream_error() {
        let mut provider = MockProvider::new();
        provider
            .expect_chat()
            .returning(|_, _| Err(AiProviderError::NetworkError("timeout".to_string())));

        let agent = SuggestionAgent::new(Arc::new(provider), JAVA_MIGRATION_PROMPT);
        let result = agent.generate_suggestions("class A {}", "A.java").await;

        assert!(matches!(result, Err(AgentError::UpstreamError(_))));
    }

    #[tokio::test]
    async fn nonconforming_response_maps_to_parse_error() {
        let mut provider = MockProvider::new();
        provider
            .expect_chat()
            .returning(|_, _| Ok("Sure! Here are some ideas:".to_string()));

        let agent = SuggestionAgent::new(Arc::new(provider), JAVA_MIGRATION_PROMPT);
        let result = agent.generate_suggestions("class A {}", "A.java").await;

        assert!(matches!(result, Err(AgentError::ParseError(_))));
    }
}
