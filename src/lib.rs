use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;

pub mod ai;
pub mod builder;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod forms;
pub mod job;
pub mod library;
pub mod messages;
pub mod render;
pub mod request;
pub mod sanitize;
pub mod scheduler;
mod system_info;
pub mod text_utils;

#[doc(hidden)]
pub mod tests;

pub use ai::{RemoteCapabilities, TextModel, VisionModel};
pub use builder::{PromptFields, RequestBuilder};
pub use config::Config;
pub use controller::Controller;
pub use error::{CapabilityError, RemoteError, SubmitError, ValidationError};
pub use job::{GenerationJob, GenerationOutcome, VariationResult};
pub use library::{FavoriteEntry, PromptLibrary};
pub use request::{GenerationRequest, ImageAttachment, OperationKind, TargetKind};
pub use sanitize::sanitize;
pub use scheduler::{Admission, JobEvent, JobEvents, JobId, JobScheduler, ShutdownReport};
pub use system_info::get_system_info;

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

pub async fn run() -> Result<()> {
    // Load .env file if it exists (for local development)
    dotenv().ok();

    // Logs go to stderr; stdout carries only generated prompts.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = commands::Cli::parse();
    let config = Config::from_env();
    tracing::debug!(library = %config.library_path.display(), "configuration loaded");

    let init = ai::initialize(config.ai.as_ref());
    if let Some(summary) = init.error_summary() {
        eprintln!("{summary}");
    }

    let library = PromptLibrary::load(&config.library_path);
    let mut controller = Controller::new(init.capabilities, library, config.shutdown_grace);

    let result = cli.command.dispatch(&mut controller).await;

    let report = controller.shutdown().await;
    tracing::debug!(?report, "scheduler stopped");
    result
}
