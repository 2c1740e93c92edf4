//! Natural language to SQL through the configured LLM client.
//!
//! The generated statement is only returned to the caller; nothing here
//! executes it.

use crate::error::{AppError, AppResult};
use panel_llm_sdk::{CompletionRequest, LlmClient};
use regex::Regex;
use std::sync::LazyLock;

const MAX_OUTPUT_TOKENS: u32 = 1024;

pub const NOT_CONFIGURED_MESSAGE: &str = "Gemini API key not configured.";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate SQL query.";

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^```(?:\w+)?\n([\s\S]*?)\n```$").expect("code fence pattern is valid")
});

/// Full prompt sent to the model
pub fn build_prompt(schema: &str, request: &str) -> String {
    format!(
        "{}\nGenerate a SQLite SQL query for the following request:\n{}\nProvide only the SQL query, without any additional text or markdown formatting.",
        schema, request
    )
}

/// Trim the model output and unwrap a single fenced code block around it
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    match CODE_FENCE.captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) if !inner.as_str().is_empty() => inner.as_str().trim().to_string(),
        _ => trimmed.to_string(),
    }
}

/// The configured client, or the error reported when none is set up
pub fn configured(client: Option<&dyn LlmClient>) -> AppResult<&dyn LlmClient> {
    client.ok_or_else(|| AppError::ServiceUnavailable(NOT_CONFIGURED_MESSAGE.to_string()))
}

/// Ask `client` for a statement answering `request` against `schema`
pub async fn generate_sql(client: &dyn LlmClient, schema: &str, request: &str) -> AppResult<String> {
    if request.trim().is_empty() {
        return Err(AppError::BadRequest("A prompt is required".to_string()));
    }

    let completion = CompletionRequest::from_prompt(build_prompt(schema, request), MAX_OUTPUT_TOKENS);

    tracing::info!(
        provider = client.provider_name(),
        model = client.model_name(),
        "Generating SQL from natural language"
    );

    let response = client.complete(completion).await.map_err(|e| {
        tracing::error!("SQL generation failed: {}", e);
        AppError::ServiceUnavailable(GENERATION_FAILED_MESSAGE.to_string())
    })?;

    Ok(strip_code_fence(&response.text()))
}
