//! Remote model capabilities.
//!
//! The generation core only sees the [`TextModel`] and [`VisionModel`]
//! traits, bundled into a [`RemoteCapabilities`] value that is built once at
//! startup and handed to the scheduler. Production implementations speak the
//! OpenAI chat-completions format; tests plug in scripted fakes.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{CapabilityError, RemoteError};
use crate::request::ImageAttachment;

pub mod common;
pub mod config;
pub mod gpt;
pub mod prompts;
pub mod vision;

use config::AiConfig;
use gpt::OpenAiTextModel;
use vision::OpenAiVisionModel;

/// A model that turns an instruction payload into text.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate_text(&self, payload: &str) -> Result<String, RemoteError>;
}

/// A model that describes an image according to an instruction.
#[async_trait]
pub trait VisionModel: Send + Sync {
    async fn generate_from_image(
        &self,
        instruction: &str,
        image: &ImageAttachment,
    ) -> Result<String, RemoteError>;
}

/// The capabilities that initialised successfully. A missing entry disables
/// the matching request path.
#[derive(Clone, Default)]
pub struct RemoteCapabilities {
    pub text: Option<Arc<dyn TextModel>>,
    pub vision: Option<Arc<dyn VisionModel>>,
}

impl RemoteCapabilities {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(text: Option<Arc<dyn TextModel>>, vision: Option<Arc<dyn VisionModel>>) -> Self {
        Self { text, vision }
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn has_vision(&self) -> bool {
        self.vision.is_some()
    }
}

impl fmt::Debug for RemoteCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteCapabilities")
            .field("text", &self.has_text())
            .field("vision", &self.has_vision())
            .finish()
    }
}

/// Capabilities plus whatever went wrong while setting them up.
#[derive(Debug, Default)]
pub struct Initialization {
    pub capabilities: RemoteCapabilities,
    pub errors: Vec<CapabilityError>,
}

impl Initialization {
    /// Human-readable summary for the front end, `None` when everything
    /// initialised cleanly.
    pub fn error_summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        let details: Vec<String> = self.errors.iter().map(|e| format!("- {e}")).collect();
        let headline = if self.capabilities.has_text() || self.capabilities.has_vision() {
            "Some AI features are disabled:"
        } else {
            "No AI model could be initialised; generation is disabled:"
        };
        Some(format!("{headline}\n{}", details.join("\n")))
    }
}

/// Build the remote capabilities from configuration.
///
/// Never fails: problems are collected in [`Initialization::errors`] and the
/// affected capability is left out.
pub fn initialize(config: Option<&AiConfig>) -> Initialization {
    let mut init = Initialization::default();

    let Some(config) = config else {
        tracing::warn!("no AI configuration; generation disabled");
        init.errors.push(CapabilityError::MissingApiKey);
        return init;
    };

    if config.api_key.trim().is_empty() {
        tracing::warn!("empty API key; generation disabled");
        init.errors.push(CapabilityError::MissingApiKey);
        return init;
    }

    let client = match reqwest::Client::builder().build() {
        Ok(client) => client,
        Err(err) => {
            tracing::warn!(error = %err, "failed to build HTTP client");
            init.errors.push(CapabilityError::Client(err));
            return init;
        }
    };

    match validate_model("text", &config.text_model) {
        Ok(model) => {
            tracing::info!(model, "text model initialised");
            init.capabilities.text = Some(Arc::new(OpenAiTextModel::new(
                client.clone(),
                &config.api_key,
                model,
                config.chat_url(),
            )));
        }
        Err(err) => {
            tracing::warn!(error = %err, "text model unavailable");
            init.errors.push(err);
        }
    }

    match validate_model("vision", &config.vision_model) {
        Ok(model) => {
            tracing::info!(model, "vision model initialised");
            init.capabilities.vision = Some(Arc::new(OpenAiVisionModel::new(
                client,
                &config.api_key,
                model,
                config.chat_url(),
            )));
        }
        Err(err) => {
            tracing::warn!(error = %err, "vision model unavailable");
            init.errors.push(err);
        }
    }

    init
}

fn validate_model<'a>(capability: &'static str, model: &'a str) -> Result<&'a str, CapabilityError> {
    let trimmed = model.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(CapabilityError::InvalidModel {
            capability,
            model: model.to_string(),
        });
    }
    Ok(trimmed)
}
