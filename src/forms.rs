//! The input forms the front end offers, and how each becomes a request.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::builder::{PromptFields, RequestBuilder};
use crate::error::ValidationError;
use crate::request::{GenerationRequest, ImageAttachment, TargetKind, MAX_VARIATIONS};

pub const BASIC_CONTEXT: &str = "Basic Prompt";
pub const IMAGE_CONTEXT: &str = "Advanced Image Prompt";
pub const VIDEO_CONTEXT: &str = "Detailed Video Prompt";

/// Options shared by every text form for reworking an existing prompt.
#[derive(Args, Debug, Clone, Default)]
pub struct BaseOptions {
    /// Existing prompt to refine.
    #[arg(long, conflicts_with = "load")]
    pub base: Option<String>,
    /// Use a saved favorite as the base prompt.
    #[arg(long)]
    pub load: Option<String>,
    /// How to change the base prompt.
    #[arg(long)]
    pub edit: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BasicForm {
    /// Core idea for the prompt.
    #[arg(long)]
    pub idea: Option<String>,
    #[command(flatten)]
    pub base: BaseOptions,
    /// Number of variations to generate.
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=MAX_VARIATIONS as i64))]
    pub variations: u8,
}

impl BasicForm {
    pub fn fields(&self) -> PromptFields {
        PromptFields::new().with("Core Idea", self.idea.clone())
    }

    /// `base_prompt` is the resolved base (from `--base` or a loaded favorite).
    pub fn request(&self, base_prompt: Option<&str>) -> Result<GenerationRequest, ValidationError> {
        let query = RequestBuilder::new().build(&self.fields(), base_prompt, self.base.edit.as_deref())?;
        Ok(GenerationRequest::text(
            query,
            BASIC_CONTEXT,
            usize::from(self.variations),
        ))
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ImageForm {
    /// Core idea or subject.
    #[arg(long)]
    pub subject: Option<String>,
    /// Primary artistic style.
    #[arg(long)]
    pub style: Option<String>,
    /// Secondary style or modifier blended with the primary style.
    #[arg(long)]
    pub secondary_style: Option<String>,
    #[arg(long)]
    pub characters: Option<String>,
    /// Scene and environment.
    #[arg(long)]
    pub scene: Option<String>,
    /// Artist or movement to draw on.
    #[arg(long)]
    pub influence: Option<String>,
    /// Camera and composition.
    #[arg(long)]
    pub camera: Option<String>,
    #[arg(long)]
    pub lighting: Option<String>,
    #[arg(long)]
    pub palette: Option<String>,
    /// Elements to avoid.
    #[arg(long)]
    pub negative: Option<String>,
    #[command(flatten)]
    pub base: BaseOptions,
}

impl ImageForm {
    pub fn fields(&self) -> PromptFields {
        PromptFields::new()
            .with("Core Idea/Subject", self.subject.clone())
            .with("Primary Artistic Style", self.style.clone())
            .with("Secondary Style/Modifier", self.secondary_style.clone())
            .with("Character Details", self.characters.clone())
            .with("Scene & Environment", self.scene.clone())
            .with("Artistic Influence", self.influence.clone())
            .with("Camera & Composition", self.camera.clone())
            .with("Lighting", self.lighting.clone())
            .with("Color Palette", self.palette.clone())
            .with("Negative Prompts (Elements to AVOID)", self.negative.clone())
    }

    pub fn request(&self, base_prompt: Option<&str>) -> Result<GenerationRequest, ValidationError> {
        let query = RequestBuilder::for_artifact("image").build(
            &self.fields(),
            base_prompt,
            self.base.edit.as_deref(),
        )?;
        Ok(GenerationRequest::text(query, IMAGE_CONTEXT, 1))
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct VideoForm {
    /// Core concept or story.
    #[arg(long)]
    pub concept: Option<String>,
    /// Overall video style.
    #[arg(long)]
    pub style: Option<String>,
    /// Scene and setting.
    #[arg(long)]
    pub scene: Option<String>,
    /// Key actions and events.
    #[arg(long)]
    pub actions: Option<String>,
    /// Characters and subjects.
    #[arg(long)]
    pub characters: Option<String>,
    /// Shot types and camera movement.
    #[arg(long)]
    pub camera: Option<String>,
    /// Pacing and duration.
    #[arg(long)]
    pub pacing: Option<String>,
    /// Lighting and atmosphere.
    #[arg(long)]
    pub lighting: Option<String>,
    /// Audio cues that set the mood.
    #[arg(long)]
    pub audio: Option<String>,
    /// Desired output format or feeling.
    #[arg(long)]
    pub format: Option<String>,
    #[command(flatten)]
    pub base: BaseOptions,
}

impl VideoForm {
    pub fn fields(&self) -> PromptFields {
        PromptFields::new()
            .with("Core Concept / Story", self.concept.clone())
            .with("Video Style", self.style.clone())
            .with("Scene & Setting", self.scene.clone())
            .with("Key Actions & Events", self.actions.clone())
            .with("Characters & Subjects", self.characters.clone())
            .with("Shot Types & Camera Movement", self.camera.clone())
            .with("Pacing & Duration", self.pacing.clone())
            .with("Lighting & Atmosphere", self.lighting.clone())
            .with("Audio Cues (for Mood)", self.audio.clone())
            .with("Desired Output Format/Feeling", self.format.clone())
    }

    pub fn request(&self, base_prompt: Option<&str>) -> Result<GenerationRequest, ValidationError> {
        let query = RequestBuilder::for_artifact("video").build(
            &self.fields(),
            base_prompt,
            self.base.edit.as_deref(),
        )?;
        Ok(GenerationRequest::text(query, VIDEO_CONTEXT, 1))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Target {
    #[default]
    Image,
    Video,
}

impl From<Target> for TargetKind {
    fn from(t: Target) -> Self {
        match t {
            Target::Image => TargetKind::Image,
            Target::Video => TargetKind::Video,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct VisionForm {
    /// Image to analyse.
    pub image: PathBuf,
    /// Kind of prompt to derive from the image.
    #[arg(long, value_enum, default_value_t = Target::Image)]
    pub target: Target,
}

impl VisionForm {
    pub fn request(&self) -> Result<GenerationRequest> {
        let image = ImageAttachment::from_path(&self.image)?;
        Ok(GenerationRequest::vision(self.target.into(), Some(image)))
    }
}
