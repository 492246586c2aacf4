//! Execution of a single generation request.

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::ai::RemoteCapabilities;
use crate::builder::{text_payload, vision_instruction};
use crate::request::{GenerationRequest, OperationKind};
use crate::sanitize::sanitize;

/// Description recorded for work skipped because the owner asked to stop.
pub const CANCELLED: &str = "cancelled";
pub const TEXT_NOT_INITIALIZED: &str = "text model not initialized";
pub const VISION_NOT_INITIALIZED: &str = "vision model not initialized";
pub const NO_IMAGE_PROVIDED: &str = "No image provided to vision worker.";

/// Outcome of one variation in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariationResult {
    Text(String),
    Failed(String),
}

impl VariationResult {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, VariationResult::Failed(msg) if msg == CANCELLED)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            VariationResult::Text(t) => Some(t),
            VariationResult::Failed(_) => None,
        }
    }
}

/// Terminal result of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success(Vec<VariationResult>),
    FatalError(String),
}

/// One request, run to completion against the injected capabilities.
///
/// Cancellation is cooperative: the token is only checked before a remote
/// call is issued, never while one is in flight.
pub struct GenerationJob {
    request: GenerationRequest,
    capabilities: RemoteCapabilities,
    cancel: CancellationToken,
}

impl GenerationJob {
    pub fn new(request: GenerationRequest, capabilities: RemoteCapabilities) -> Self {
        Self {
            request,
            capabilities,
            cancel: CancellationToken::new(),
        }
    }

    /// Handle the owner can use to ask the job to stop.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    #[instrument(level = "debug", skip(self), fields(context = %self.request.context(), kind = ?self.request.kind()))]
    pub async fn run(self) -> GenerationOutcome {
        match self.request.kind() {
            OperationKind::Text => self.run_text().await,
            OperationKind::Vision => self.run_vision().await,
        }
    }

    async fn run_text(&self) -> GenerationOutcome {
        let Some(model) = self.capabilities.text.as_ref() else {
            warn!("text generation requested without a text model");
            return GenerationOutcome::FatalError(TEXT_NOT_INITIALIZED.to_string());
        };

        let count = self.request.variation_count();
        let mut results = Vec::with_capacity(count);

        for i in 0..count {
            if self.cancel.is_cancelled() {
                debug!(variation = i, remaining = count - i, "cancelled before variation");
                results.resize(count, VariationResult::Failed(CANCELLED.to_string()));
                break;
            }

            let payload = text_payload(self.request.query(), self.request.context(), i);
            match model.generate_text(&payload).await {
                Ok(raw) => {
                    let clean = sanitize(&raw, OperationKind::Text);
                    debug!(variation = i, len = clean.len(), "variation generated");
                    results.push(VariationResult::Text(clean));
                }
                Err(err) => {
                    warn!(variation = i, error = %err, "variation failed");
                    results.push(VariationResult::Failed(format!(
                        "API error (variation {}): {err}",
                        i + 1
                    )));
                }
            }
        }

        GenerationOutcome::Success(results)
    }

    async fn run_vision(&self) -> GenerationOutcome {
        let Some(image) = self.request.image() else {
            return GenerationOutcome::FatalError(NO_IMAGE_PROVIDED.to_string());
        };
        let Some(model) = self.capabilities.vision.as_ref() else {
            warn!("vision generation requested without a vision model");
            return GenerationOutcome::FatalError(VISION_NOT_INITIALIZED.to_string());
        };

        let target = self.request.target();
        let instruction = vision_instruction(target);

        if self.cancel.is_cancelled() {
            debug!("cancelled before vision call");
            return GenerationOutcome::FatalError(CANCELLED.to_string());
        }

        match model.generate_from_image(instruction, image).await {
            Ok(raw) => {
                let clean = sanitize(&raw, OperationKind::Vision);
                let text = if clean.is_empty() {
                    format!("The vision model returned an empty description for the {target} prompt.")
                } else {
                    clean
                };
                GenerationOutcome::Success(vec![VariationResult::Text(text)])
            }
            Err(err) => {
                warn!(%target, error = %err, "vision call failed");
                GenerationOutcome::FatalError(format!("Vision API error ({target}): {err}"))
            }
        }
    }
}
