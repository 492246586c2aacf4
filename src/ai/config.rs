use std::env;

use crate::ai::common::OPENAI_CHAT_URL;

pub const DEFAULT_TEXT_MODEL: &str = "gpt-4.1";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";

#[derive(Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub text_model: String,
    pub vision_model: String,
    pub openai_chat_url: Option<String>,
}

impl AiConfig {
    /// Read the OpenAI settings. Returns `None` when no API key is set.
    pub fn from_env() -> Option<Self> {
        let api_key = match env::var("OPENAI_API_KEY") {
            Ok(k) => k,
            Err(_) => return None,
        };
        Some(Self {
            api_key,
            text_model: env::var("OPENAI_TEXT_MODEL")
                .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            vision_model: env::var("OPENAI_VISION_MODEL")
                .unwrap_or_else(|_| DEFAULT_VISION_MODEL.to_string()),
            openai_chat_url: env::var("OPENAI_CHAT_URL").ok(),
        })
    }

    pub fn chat_url(&self) -> &str {
        self.openai_chat_url.as_deref().unwrap_or(OPENAI_CHAT_URL)
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("text_model", &self.text_model)
            .field("vision_model", &self.vision_model)
            .field("openai_chat_url", &self.openai_chat_url)
            .finish_non_exhaustive()
    }
}
