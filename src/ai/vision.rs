use async_trait::async_trait;
use base64::Engine as _;
use tracing::instrument;

use crate::ai::common::{build_vision_chat_body, send_chat_request};
use crate::ai::VisionModel;
use crate::error::RemoteError;
use crate::request::ImageAttachment;

/// Image description through an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiVisionModel {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiVisionModel {
    pub fn new(client: reqwest::Client, api_key: &str, model: &str, url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            url: url.to_string(),
        }
    }
}

/// Encode an attachment as a `data:` URL the chat API accepts inline.
pub fn image_data_url(image: &ImageAttachment) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(image.bytes());
    format!("data:{};base64,{}", image.mime(), encoded)
}

#[async_trait]
impl VisionModel for OpenAiVisionModel {
    #[instrument(level = "trace", skip_all, fields(model = %self.model, mime = image.mime()))]
    async fn generate_from_image(
        &self,
        instruction: &str,
        image: &ImageAttachment,
    ) -> Result<String, RemoteError> {
        let data_url = image_data_url(image);
        let body = build_vision_chat_body(&self.model, instruction, &data_url);
        send_chat_request(&self.client, &self.api_key, &self.url, &body).await
    }
}
