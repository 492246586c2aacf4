//! Error types for request building, remote calls and capability setup.
//!
//! Application edges (config, library, CLI) use `anyhow`; the types here are
//! the ones the generation core needs to tell apart.

use thiserror::Error;

/// Returned by the request builder before any job is created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("nothing to generate: provide at least one field or a base prompt")]
    EmptyRequest,
}

/// A single remote model call failed.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("API error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no message content")]
    MissingContent,
}

/// A remote capability could not be set up at startup.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("OPENAI_API_KEY is not set; text and vision generation are disabled")]
    MissingApiKey,

    #[error("{capability} model id {model:?} is not usable")]
    InvalidModel {
        capability: &'static str,
        model: String,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Why the controller could not start a generation.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{}", crate::messages::BUSY)]
    Busy,

    #[error("{}", crate::messages::SHUTTING_DOWN)]
    Closed,
}
