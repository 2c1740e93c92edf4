use panel_llm_sdk::client::LlmClient;
use panel_llm_sdk::gemini::GeminiClient;
use std::sync::Arc;

#[test]
fn test_gemini_implements_trait() {
    fn assert_implements_trait<T: LlmClient>() {}

    assert_implements_trait::<GeminiClient>();
}

#[test]
fn test_trait_object_usage() {
    // Shared trait objects are how the server holds its client
    let _client: Arc<dyn LlmClient> = Arc::new(GeminiClient::new("test-key").unwrap());
}

#[test]
fn test_provider_and_model_names() {
    let client: Box<dyn LlmClient> = Box::new(GeminiClient::new("test-key").unwrap());
    assert_eq!(client.provider_name(), "Google");
    assert_eq!(client.model_name(), "gemini-2.0-flash");
}
