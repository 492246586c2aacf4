use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::controller::Controller;
use crate::error::ValidationError;
use crate::forms::{BasicForm, ImageForm, VideoForm, VisionForm};
use crate::job::GenerationOutcome;
use crate::library::Upsert;
use crate::messages;
use crate::render::{render_fatal, render_results};
use crate::request::GenerationRequest;
use crate::system_info::get_system_info;
use crate::text_utils::preview;

#[derive(Parser, Debug)]
#[command(name = "promptcraft", version, about = "Generate prompts for image and video models.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Turn a core idea into one or more prompt variations.
    Basic {
        #[command(flatten)]
        form: BasicForm,
        /// Save the first result as a favorite, optionally under a name.
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        save: Option<String>,
    },
    /// Build a detailed image prompt from structured fields.
    Image {
        #[command(flatten)]
        form: ImageForm,
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        save: Option<String>,
    },
    /// Build a detailed video prompt from structured fields.
    Video {
        #[command(flatten)]
        form: VideoForm,
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        save: Option<String>,
    },
    /// Derive a prompt from an image.
    Vision {
        #[command(flatten)]
        form: VisionForm,
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        save: Option<String>,
    },
    /// Manage saved favorite prompts.
    #[command(subcommand)]
    Library(LibraryCommand),
    /// Show build and capability information.
    Info,
}

#[derive(Subcommand, Debug)]
pub enum LibraryCommand {
    /// List saved prompts.
    List,
    /// Print one saved prompt.
    Show { name: String },
    /// Save a prompt under a name, replacing any entry with the same name.
    Save { name: String, prompt: String },
    /// Delete a saved prompt.
    Delete { name: String },
}

impl Command {
    pub async fn dispatch(self, controller: &mut Controller) -> Result<()> {
        match self {
            Command::Basic { form, save } => {
                let base = controller.resolve_base(&form.base)?;
                let request = form.request(base.as_deref());
                generate(controller, request, save).await?
            }
            Command::Image { form, save } => {
                let base = controller.resolve_base(&form.base)?;
                let request = form.request(base.as_deref());
                generate(controller, request, save).await?
            }
            Command::Video { form, save } => {
                let base = controller.resolve_base(&form.base)?;
                let request = form.request(base.as_deref());
                generate(controller, request, save).await?
            }
            Command::Vision { form, save } => {
                if !controller.capabilities().has_vision() {
                    bail!(messages::VISION_DISABLED);
                }
                let request = form.request()?;
                generate(controller, Ok(request), save).await?
            }
            Command::Library(cmd) => cmd.dispatch(controller)?,
            Command::Info => show_system_info(controller),
        }
        Ok(())
    }
}

impl LibraryCommand {
    pub fn dispatch(self, controller: &mut Controller) -> Result<()> {
        let library = controller.library_mut();
        match self {
            LibraryCommand::List => {
                if library.is_empty() {
                    eprintln!("{}", messages::LIBRARY_EMPTY);
                }
                for entry in library.sorted() {
                    println!("{}\t{}", entry.name, preview(&entry.prompt, 60));
                }
            }
            LibraryCommand::Show { name } => match library.find(&name) {
                Some(entry) => println!("{}", entry.prompt),
                None => bail!(messages::not_found(&name)),
            },
            LibraryCommand::Save { name, prompt } => {
                let status = match library.upsert(&name, &prompt)? {
                    Upsert::Inserted => messages::saved(name.trim()),
                    Upsert::Replaced => messages::replaced(name.trim()),
                };
                eprintln!("{status}");
            }
            LibraryCommand::Delete { name } => {
                if !library.remove(&name)? {
                    bail!(messages::not_found(&name));
                }
                eprintln!("{}", messages::deleted(name.trim()));
            }
        }
        Ok(())
    }
}

async fn generate(
    controller: &mut Controller,
    request: Result<GenerationRequest, ValidationError>,
    save: Option<String>,
) -> Result<()> {
    let request = match request {
        Ok(request) => request,
        Err(_) => bail!(messages::INPUT_MISSING),
    };
    eprintln!(
        "{}",
        messages::starting(request.context(), request.variation_count())
    );
    let interrupt = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let outcome = controller.generate(request, interrupt).await?;

    let rendered = match &outcome {
        GenerationOutcome::Success(results) => render_results(results),
        GenerationOutcome::FatalError(error) => render_fatal(error),
    };
    println!("{}", rendered.body);

    if let Some(name) = save {
        match controller.save_outcome(&outcome, Some(&name)) {
            Ok(status) => eprintln!("{status}"),
            Err(err) => eprintln!("{err}"),
        }
    }

    if rendered.has_issues {
        bail!(rendered.status);
    }
    eprintln!("{}", rendered.status);
    Ok(())
}

fn show_system_info(controller: &Controller) {
    println!("{}", system_report(controller));
}

fn system_report(controller: &Controller) -> String {
    let caps = controller.capabilities();
    let status = |on: bool| if on { "available" } else { "disabled" };
    format!(
        "{}\nText generation: {}\nImage analysis: {}\nLibrary: {}",
        get_system_info(),
        status(caps.has_text()),
        status(caps.has_vision()),
        controller.library().path().display()
    )
}
