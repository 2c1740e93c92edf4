//! # Panel LLM SDK
//!
//! A small LLM client used by the SQLite panel to turn natural language
//! into SQL. Google Gemini is the only provider.
//!
//! ## Example
//!
//! ```rust,no_run
//! use panel_llm_sdk::gemini::GeminiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::new("your-api-key")?;
//!     let response = client
//!         .message_builder()
//!         .model("gemini-2.0-flash")
//!         .user_message("List all users")
//!         .send()
//!         .await?;
//!
//!     println!("Response: {}", response.text());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod gemini;
pub mod models;
pub mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use types::{CompletionRequest, CompletionResponse, ContentBlock, Message, Role, Usage};
