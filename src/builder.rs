//! Turns form input into the text sent to the remote models.
//!
//! Everything here is pure: the same input always yields the same payload.

use crate::ai::prompts::{
    SYSTEM_INSTRUCTION, VARIATION_PROMPTS, VISION_IMAGE_INSTRUCTION, VISION_VIDEO_INSTRUCTION,
};
use crate::error::ValidationError;
use crate::request::TargetKind;

/// Ordered label/value pairs collected from a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptFields {
    entries: Vec<(String, String)>,
}

impl PromptFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.entries.push((label.into(), value.into()));
    }

    /// Builder-style [`push`](Self::push). `None` values are skipped.
    pub fn with(mut self, label: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            self.push(label, value);
        }
        self
    }

    /// Fields whose value is not blank, trimmed, in insertion order.
    pub fn non_empty(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(label, value)| (label.as_str(), value.trim()))
            .filter(|(_, value)| !value.is_empty())
    }

    pub fn has_content(&self) -> bool {
        self.non_empty().next().is_some()
    }
}

impl<L, V> FromIterator<(L, V)> for PromptFields
where
    L: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (L, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(l, v)| (l.into(), v.into()))
                .collect(),
        }
    }
}

/// Assembles the natural-language request body for one kind of artifact.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    artifact: Option<String>,
}

impl RequestBuilder {
    /// A builder for plain prompts with no particular artifact kind.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder that names the artifact (for example `"image"` or `"video"`)
    /// in its instructions.
    pub fn for_artifact(artifact: impl Into<String>) -> Self {
        Self {
            artifact: Some(artifact.into()),
        }
    }

    fn artifact_prompt(&self) -> String {
        match self.artifact.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => format!("{a} prompt"),
            _ => "prompt".to_string(),
        }
    }

    /// Build the query text.
    ///
    /// With a base prompt the output quotes it first, then either the edit
    /// instruction or the remaining fields as refinement hints. Without one,
    /// every non-empty field becomes a `- Label: value` line. The output
    /// always ends with an output-only directive.
    pub fn build(
        &self,
        fields: &PromptFields,
        base_prompt: Option<&str>,
        edit_instruction: Option<&str>,
    ) -> Result<String, ValidationError> {
        let base = non_blank(base_prompt);
        let edit = non_blank(edit_instruction);
        let artifact = self.artifact_prompt();
        let mut parts = Vec::new();

        match base {
            Some(base) => {
                parts.push(format!("Base existing prompt to work with:\n```\n{base}\n```"));
                if let Some(edit) = edit {
                    parts.push(format!("Refine or modify according to: {edit}"));
                } else if fields.has_content() {
                    parts.push(format!(
                        "Refine or combine it with these details:\n{}",
                        labeled_lines(fields)
                    ));
                } else {
                    parts.push("Refine or generate variations.".to_string());
                }
            }
            None => {
                if !fields.has_content() {
                    return Err(ValidationError::EmptyRequest);
                }
                parts.push(format!(
                    "Synthesize a single detailed {artifact} from the following components:\n{}",
                    labeled_lines(fields)
                ));
            }
        }

        parts.push(format!(
            "Output ONLY the generated {artifact} string. Do not add any preamble, explanation, or commentary."
        ));
        Ok(parts.join("\n\n"))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn labeled_lines(fields: &PromptFields) -> String {
    fields
        .non_empty()
        .map(|(label, value)| format!("- {label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extra instruction for variation `index`. The first variation gets none.
pub fn variation_modifier(index: usize) -> Option<&'static str> {
    if index == 0 {
        None
    } else {
        Some(VARIATION_PROMPTS[index % VARIATION_PROMPTS.len()])
    }
}

/// Full text-model payload for one variation of a query.
pub fn text_payload(query: &str, context: &str, variation_index: usize) -> String {
    let mut payload = String::from(SYSTEM_INSTRUCTION);
    let context = context.trim();
    if !context.is_empty() {
        payload.push_str(&format!(
            "\nContext for this specific request: The user is trying to generate a '{context}'. Emphasize detail and richness for this type of prompt."
        ));
    }
    payload.push_str("\n\nUser's Request Details (aim for high detail):\n");
    payload.push_str(query);
    if let Some(modifier) = variation_modifier(variation_index) {
        payload.push_str(&format!(
            "\n\nInstruction for this specific variation (out of several): {modifier} Ensure maximum detail and output only the prompt."
        ));
    }
    payload
}

/// Fixed instruction sent with an image to the vision model.
pub fn vision_instruction(target: TargetKind) -> &'static str {
    match target {
        TargetKind::Image => VISION_IMAGE_INSTRUCTION,
        TargetKind::Video => VISION_VIDEO_INSTRUCTION,
    }
}
