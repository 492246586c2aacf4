use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, trace, warn};

use crate::error::RemoteError;

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Chat body with a single user message carrying the whole payload.
pub fn build_text_chat_body(model: &str, payload: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "user", "content": payload }
        ]
    })
}

/// Chat body with an instruction and an inline image given as a `data:` URL.
pub fn build_vision_chat_body(model: &str, instruction: &str, data_url: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            {
                "role": "user",
                "content": [
                    { "type": "text", "text": instruction },
                    { "type": "image_url", "image_url": { "url": data_url } }
                ]
            }
        ]
    })
}

/// Extract the first choice's message text from a raw chat response.
pub fn parse_chat_content(raw: &str) -> Result<String, RemoteError> {
    let chat: ChatResponse = serde_json::from_str(raw)?;
    chat.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .ok_or(RemoteError::MissingContent)
}

/// POST a chat body and return the message text of the first choice.
#[instrument(level = "trace", skip(client, api_key, body))]
pub async fn send_chat_request(
    client: &reqwest::Client,
    api_key: &str,
    url: &str,
    body: &Value,
) -> Result<String, RemoteError> {
    debug!(url, "sending chat completion request");

    let resp = client.post(url).bearer_auth(api_key).json(body).send().await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        warn!(%status, "OpenAI API error");
        return Err(RemoteError::Status { status, body });
    }

    let raw = resp.text().await?;
    let snippet: String = raw.chars().take(200).collect();
    debug!(snippet = %snippet, "chat response body");
    trace!(raw = %raw, "chat response");
    parse_chat_content(&raw)
}
