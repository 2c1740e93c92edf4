use super::client::GeminiClient;
use super::types::*;
use crate::error::LlmError;

pub struct MessageBuilder<'a> {
    client: &'a GeminiClient,
    model: Option<String>,
    contents: Vec<GeminiContent>,
    system_instruction: Option<String>,
    generation_config: GenerationConfig,
}

impl<'a> MessageBuilder<'a> {
    pub fn new(client: &'a GeminiClient) -> Self {
        Self {
            client,
            model: None,
            contents: Vec::new(),
            system_instruction: None,
            generation_config: GenerationConfig::default(),
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn user_message(mut self, text: impl Into<String>) -> Self {
        self.contents.push(GeminiContent {
            role: GeminiRole::User,
            parts: vec![GeminiPart::text(text)],
        });
        self
    }

    pub fn model_message(mut self, text: impl Into<String>) -> Self {
        self.contents.push(GeminiContent {
            role: GeminiRole::Model,
            parts: vec![GeminiPart::text(text)],
        });
        self
    }

    pub fn system(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(text.into());
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.generation_config.temperature = Some(temp);
        self
    }

    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.generation_config.max_output_tokens = Some(tokens);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.generation_config.top_p = Some(top_p);
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.generation_config.top_k = Some(top_k);
        self
    }

    pub fn stop_sequences(mut self, stops: Vec<String>) -> Self {
        self.generation_config.stop_sequences = Some(stops);
        self
    }

    /// Assemble the request without sending it
    pub fn build(self) -> Result<(String, GeminiGenerateContentRequest), LlmError> {
        let model = self
            .model
            .unwrap_or_else(|| self.client.model().to_string());

        if self.contents.is_empty() {
            return Err(LlmError::invalid_request(
                "At least one message is required",
            ));
        }

        let request = GeminiGenerateContentRequest {
            contents: self.contents,
            system_instruction: self.system_instruction.map(|text| GeminiContent {
                role: GeminiRole::User,
                parts: vec![GeminiPart::text(text)],
            }),
            generation_config: self.generation_config.into_option(),
        };

        Ok((model, request))
    }

    pub async fn send(self) -> Result<GeminiGenerateContentResponse, LlmError> {
        let client = self.client;
        let (model, request) = self.build()?;
        client.generate_content(model, request).await
    }
}
