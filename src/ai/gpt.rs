use async_trait::async_trait;
use tracing::instrument;

use crate::ai::common::{build_text_chat_body, send_chat_request};
use crate::ai::TextModel;
use crate::error::RemoteError;

/// Text generation through an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiTextModel {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiTextModel {
    pub fn new(client: reqwest::Client, api_key: &str, model: &str, url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl TextModel for OpenAiTextModel {
    #[instrument(level = "trace", skip_all, fields(model = %self.model))]
    async fn generate_text(&self, payload: &str) -> Result<String, RemoteError> {
        let body = build_text_chat_body(&self.model, payload);
        send_chat_request(&self.client, &self.api_key, &self.url, &body).await
    }
}
