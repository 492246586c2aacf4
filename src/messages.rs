//! Shared text shown to the user.
//!
//! Keep all user-facing strings in this module so they stay in one place and are
//! easy to update or translate.

pub const BUSY: &str = "Generation in progress. Please wait.";
pub const SHUTTING_DOWN: &str = "Shutting down; no new generations are accepted.";
pub const CANCEL_REQUESTED: &str =
    "Cancellation requested; waiting briefly for the current remote call.";

pub const VISION_DISABLED: &str =
    "Image analysis is unavailable: the vision model is not initialised.";
pub const INPUT_MISSING: &str = "Input missing: provide at least one field or a base prompt.";

pub const NO_RESULTS: &str = "The job returned no results.";
pub const GENERATION_CANCELLED: &str = "Generation cancelled.";
pub const GENERATION_OK: &str = "Prompt generation successful.";
pub const GENERATION_FAILED: &str = "Generation failed or cancelled. Check output.";
pub const BATCH_WITH_ISSUES: &str =
    "Batch complete with issues: one or more variations failed.";

pub fn batch_cancelled(done: usize, total: usize) -> String {
    format!("Batch cancelled: {done} of {total} prompts generated.")
}

pub fn batch_ok(count: usize) -> String {
    format!("Batch of {count} prompts generated successfully.")
}

pub fn starting(context: &str, variations: usize) -> String {
    format!("Starting {context} generation ({variations} var)...")
}

pub const LIBRARY_EMPTY: &str = "The prompt library is empty.";
pub const NOTHING_TO_SAVE: &str = "No successful prompt to save.";

pub fn saved(name: &str) -> String {
    format!("Saved '{name}'.")
}

pub fn replaced(name: &str) -> String {
    format!("Overwrote '{name}'.")
}

pub fn deleted(name: &str) -> String {
    format!("Deleted '{name}'.")
}

pub fn not_found(name: &str) -> String {
    format!("No saved prompt named '{name}'.")
}
