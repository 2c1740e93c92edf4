//! Model constants for the supported provider
//!
//! Model IDs are sourced from the provider documentation.

/// Google Gemini model constants
pub mod gemini {
    /// Gemini 2.0 Flash - fast general purpose model, default for query generation
    pub const GEMINI_2_0_FLASH_ID: &str = "gemini-2.0-flash";
    pub const GEMINI_2_0_FLASH_NAME: &str = "Gemini 2.0 Flash";

    /// Gemini 2.5 Flash - newer Flash model with thinking support
    pub const GEMINI_2_5_FLASH_ID: &str = "gemini-2.5-flash";
    pub const GEMINI_2_5_FLASH_NAME: &str = "Gemini 2.5 Flash";

    /// Gemini 2.5 Pro
    pub const GEMINI_2_5_PRO_ID: &str = "gemini-2.5-pro";
    pub const GEMINI_2_5_PRO_NAME: &str = "Gemini 2.5 Pro";

    pub const DEFAULT_MODEL: &str = GEMINI_2_0_FLASH_ID;

    /// Human-readable name for a known model id
    pub fn display_name(model_id: &str) -> Option<&'static str> {
        match model_id {
            GEMINI_2_0_FLASH_ID => Some(GEMINI_2_0_FLASH_NAME),
            GEMINI_2_5_FLASH_ID => Some(GEMINI_2_5_FLASH_NAME),
            GEMINI_2_5_PRO_ID => Some(GEMINI_2_5_PRO_NAME),
            _ => None,
        }
    }
}
