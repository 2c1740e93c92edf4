use super::types::*;
use crate::error::LlmError;
use crate::models::gemini::DEFAULT_MODEL;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

/// Google Gemini API client
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::authentication("API key cannot be empty"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| LlmError::Network { source: e })?;

        Ok(Self {
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: DEFAULT_MODEL.to_string(),
            http_client,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Model used when a request does not name one
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_content(
        &self,
        model: impl Into<String>,
        request: GeminiGenerateContentRequest,
    ) -> Result<GeminiGenerateContentResponse, LlmError> {
        let model = model.into();
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| LlmError::authentication(format!("Invalid API key format: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(model = %model, "Sending Gemini generateContent request");

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network { source: e })?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            tracing::warn!(status = status.as_u16(), "Gemini request failed");

            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&error_body) {
                return Err(Self::map_error(
                    error_response.error.code,
                    error_response.error.message,
                ));
            }

            return Err(LlmError::api_error(status.as_u16(), error_body));
        }

        let generate_response = response
            .json::<GeminiGenerateContentResponse>()
            .await
            .map_err(|e| LlmError::internal(format!("Failed to parse response: {}", e)))?;

        Ok(generate_response)
    }

    fn map_error(status: u16, message: String) -> LlmError {
        match status {
            400 => LlmError::invalid_request(message),
            401 | 403 => LlmError::Authentication { message },
            429 => LlmError::rate_limit(message, None),
            _ => LlmError::api_error(status, message),
        }
    }

    pub fn provider_name(&self) -> &str {
        "Google"
    }

    pub fn message_builder(&self) -> super::builder::MessageBuilder<'_> {
        super::builder::MessageBuilder::new(self)
    }
}

#[async_trait::async_trait]
impl crate::client::LlmClient for GeminiClient {
    async fn complete(
        &self,
        request: crate::types::CompletionRequest,
    ) -> Result<crate::types::CompletionResponse, LlmError> {
        // Convert generic messages to Gemini contents
        let contents = request
            .messages
            .into_iter()
            .map(|msg| {
                let role = match msg.role {
                    crate::types::Role::User => GeminiRole::User,
                    crate::types::Role::Assistant => GeminiRole::Model,
                };
                let parts = msg
                    .content
                    .into_iter()
                    .map(|block| match block {
                        crate::types::ContentBlock::Text { text } => GeminiPart::text(text),
                    })
                    .collect();
                GeminiContent { role, parts }
            })
            .collect::<Vec<_>>();

        if contents.is_empty() {
            return Err(LlmError::invalid_request(
                "At least one message is required",
            ));
        }

        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model
        };

        let generation_config = GenerationConfig {
            temperature: request.temperature,
            top_p: request.top_p,
            top_k: None,
            max_output_tokens: Some(request.max_tokens),
            stop_sequences: request.stop_sequences,
        };

        let gemini_request = GeminiGenerateContentRequest {
            contents,
            system_instruction: request.system.map(|text| GeminiContent {
                role: GeminiRole::User,
                parts: vec![GeminiPart::text(text)],
            }),
            generation_config: generation_config.into_option(),
        };

        let response = self.generate_content(model, gemini_request).await?;

        let candidate = response
            .candidates
            .first()
            .ok_or_else(|| LlmError::empty_response("Gemini returned no candidates"))?;
        let stop_reason = candidate.finish_reason.clone();
        let text = response.text();
        let usage = response.usage_metadata.unwrap_or_default();

        Ok(crate::types::CompletionResponse {
            content: vec![crate::types::ContentBlock::Text { text }],
            role: crate::types::Role::Assistant,
            usage: crate::types::Usage {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage.candidates_token_count,
            },
            stop_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "Google"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LlmClient;
    use crate::types::CompletionRequest;

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    #[test]
    fn test_client_creation() {
        let client = GeminiClient::new("test-key");
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_creation_empty_key() {
        let client = GeminiClient::new("");
        assert!(client.is_err());
    }

    #[test]
    fn test_with_model_overrides_default() {
        let client = GeminiClient::new("test-key")
            .unwrap()
            .with_model("gemini-2.5-pro");
        assert_eq!(LlmClient::model_name(&client), "gemini-2.5-pro");
    }

    #[tokio::test]
    async fn test_complete_returns_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", GENERATE_PATH)
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "SELECT 1;"}]},
                        "finishReason": "STOP",
                        "index": 0
                    }],
                    "usageMetadata": {
                        "promptTokenCount": 12,
                        "candidatesTokenCount": 3,
                        "totalTokenCount": 15
                    },
                    "modelVersion": "gemini-2.0-flash"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = GeminiClient::new("test-key")
            .unwrap()
            .with_base_url(server.url());
        let response = client
            .complete(CompletionRequest::from_prompt("give me one", 256))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.text(), "SELECT 1;");
        assert_eq!(response.usage.input_tokens, 12);
        assert_eq!(response.usage.output_tokens, 3);
        assert_eq!(response.stop_reason.as_deref(), Some("STOP"));
    }

    #[tokio::test]
    async fn test_error_body_is_mapped() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", GENERATE_PATH)
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "error": {
                        "code": 403,
                        "message": "API key not valid",
                        "status": "PERMISSION_DENIED"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = GeminiClient::new("bad-key")
            .unwrap()
            .with_base_url(server.url());
        let err = client
            .complete(CompletionRequest::from_prompt("anything", 64))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Authentication { .. }));
    }

    #[tokio::test]
    async fn test_unstructured_error_keeps_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", GENERATE_PATH)
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let client = GeminiClient::new("test-key")
            .unwrap()
            .with_base_url(server.url());
        let err = client
            .complete(CompletionRequest::from_prompt("anything", 64))
            .await
            .unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let client = GeminiClient::new("test-key")
            .unwrap()
            .with_base_url(server.url());
        let err = client
            .complete(CompletionRequest::from_prompt("anything", 64))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::EmptyResponse { .. }));
    }
}
