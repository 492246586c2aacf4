//! Turns job outcomes into display text.
//!
//! A single result is shown as-is; several are shown as numbered blocks. The
//! choice depends only on how many results came back.

use crate::job::{VariationResult, CANCELLED};
use crate::messages::{
    batch_cancelled, batch_ok, BATCH_WITH_ISSUES, GENERATION_CANCELLED, GENERATION_FAILED,
    GENERATION_OK, NO_RESULTS,
};

const BATCH_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Text for the output area.
    pub body: String,
    /// One-line status summary.
    pub status: String,
    /// Something failed, as opposed to succeeding or being cancelled.
    pub has_issues: bool,
}

pub fn render_results(results: &[VariationResult]) -> Rendered {
    match results {
        [] => Rendered {
            body: NO_RESULTS.to_string(),
            status: NO_RESULTS.to_string(),
            has_issues: true,
        },
        [single] => render_single(single),
        many => render_batch(many),
    }
}

fn render_single(result: &VariationResult) -> Rendered {
    match result {
        VariationResult::Text(text) => Rendered {
            body: text.clone(),
            status: GENERATION_OK.to_string(),
            has_issues: false,
        },
        VariationResult::Failed(_) if result.is_cancelled() => Rendered {
            body: GENERATION_CANCELLED.to_string(),
            status: GENERATION_CANCELLED.to_string(),
            has_issues: false,
        },
        VariationResult::Failed(error) => Rendered {
            body: error.clone(),
            status: GENERATION_FAILED.to_string(),
            has_issues: true,
        },
    }
}

fn render_batch(results: &[VariationResult]) -> Rendered {
    let mut blocks = Vec::with_capacity(results.len());
    let mut has_issues = false;
    let mut cancelled = 0;
    for (i, result) in results.iter().enumerate() {
        let n = i + 1;
        match result {
            VariationResult::Text(text) => {
                blocks.push(format!("--- Prompt Variation {n} ---\n{text}"));
            }
            VariationResult::Failed(_) if result.is_cancelled() => {
                cancelled += 1;
                blocks.push(format!("--- Variation {n} CANCELLED ---"));
            }
            VariationResult::Failed(error) => {
                has_issues = true;
                blocks.push(format!("--- Variation {n} FAILED ---\n{error}"));
            }
        }
    }
    let status = if has_issues {
        BATCH_WITH_ISSUES.to_string()
    } else if cancelled > 0 {
        batch_cancelled(results.len() - cancelled, results.len())
    } else {
        batch_ok(results.len())
    };
    Rendered {
        body: blocks.join(BATCH_SEPARATOR),
        status,
        has_issues,
    }
}

/// Render a job-level failure. Cancellation is reported as a notice.
pub fn render_fatal(error: &str) -> Rendered {
    if error == CANCELLED {
        return Rendered {
            body: GENERATION_CANCELLED.to_string(),
            status: GENERATION_CANCELLED.to_string(),
            has_issues: false,
        };
    }
    Rendered {
        body: format!("An error occurred:\n{error}"),
        status: format!("Error: {}", crate::text_utils::preview(error, 60)),
        has_issues: true,
    }
}
