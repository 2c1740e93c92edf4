use async_trait::async_trait;
use panel_llm_sdk::{
    CompletionRequest, CompletionResponse, ContentBlock, LlmClient, LlmError, Role, Usage,
};
use std::sync::Mutex;

/// LLM client that answers every request with a fixed reply
pub struct MockLlmClient {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockLlmClient {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, flattened to text
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let prompt = request
            .messages
            .iter()
            .flat_map(|m| m.content.iter())
            .map(|ContentBlock::Text { text }| text.clone())
            .collect::<String>();
        self.prompts.lock().unwrap().push(prompt);

        match &self.reply {
            Ok(text) => Ok(CompletionResponse {
                content: vec![ContentBlock::Text { text: text.clone() }],
                role: Role::Assistant,
                usage: Usage::default(),
                stop_reason: Some("STOP".to_string()),
            }),
            Err(message) => Err(LlmError::api_error(500, message.clone())),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
