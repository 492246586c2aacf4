//! Strips the conversational wrapping models like to add around a prompt.

use tracing::trace;

use crate::request::OperationKind;

/// Known lead-ins for text generations, checked in order.
pub const TEXT_PREFIXES: &[&str] = &[
    "Okay, here's the prompt:",
    "Okay, here is the prompt:",
    "Here's the prompt:",
    "Here is the prompt:",
    "Sure, here's a prompt:",
    "Sure, here is a prompt:",
    "Here's a prompt for you:",
    "Here is a prompt for you:",
    "Prompt:",
    "Generated Prompt:",
    "Okay, here's a variation:",
    "Here's another variation:",
];

/// Known sign-offs for text generations.
pub const TEXT_SUFFIXES: &[&str] = &[
    "Let me know if you'd like another one!",
    "Hope this helps!",
    "Is there anything else I can help with?",
];

/// Known lead-ins for vision generations.
pub const VISION_PREFIXES: &[&str] = &[
    "Prompt:",
    "Here's a prompt based on the image:",
    "Image Description Prompt:",
    "Video Prompt Idea:",
];

/// Remove known boilerplate from raw model output.
///
/// Each pass removes at most one prefix (first match in list order) and, for
/// text, at most one suffix. Unlike a single first-match pass, passes repeat
/// until nothing changes, so stacked lead-ins such as `Prompt: Prompt: x`
/// are all removed and the result is stable under a second call. Text
/// without boilerplate comes back trimmed and otherwise untouched.
pub fn sanitize(raw: &str, kind: OperationKind) -> String {
    let (prefixes, suffixes) = match kind {
        OperationKind::Text => (TEXT_PREFIXES, TEXT_SUFFIXES),
        OperationKind::Vision => (VISION_PREFIXES, &[][..]),
    };

    let mut text = raw.trim();
    loop {
        let before = text.len();
        text = strip_first_prefix(text, prefixes);
        text = strip_first_suffix(text, suffixes);
        if text.len() == before {
            break;
        }
    }
    trace!(raw_len = raw.len(), clean_len = text.len(), "sanitized model output");
    text.to_string()
}

fn strip_first_prefix<'a>(text: &'a str, phrases: &[&str]) -> &'a str {
    for phrase in phrases {
        let head = text.get(..phrase.len());
        if head.is_some_and(|h| h.eq_ignore_ascii_case(phrase)) {
            return text[phrase.len()..].trim();
        }
    }
    text
}

fn strip_first_suffix<'a>(text: &'a str, phrases: &[&str]) -> &'a str {
    for phrase in phrases {
        let Some(start) = text.len().checked_sub(phrase.len()) else {
            continue;
        };
        let tail = text.get(start..);
        if tail.is_some_and(|t| t.eq_ignore_ascii_case(phrase)) {
            return text[..start].trim();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_known_prefix() {
        assert_eq!(
            sanitize("Here's the prompt: a red fox", OperationKind::Text),
            "a red fox"
        );
    }

    #[test]
    fn prefix_match_ignores_case() {
        assert_eq!(
            sanitize("HERE IS THE PROMPT:\n  misty forest", OperationKind::Text),
            "misty forest"
        );
    }

    #[test]
    fn strips_suffix_for_text_only() {
        let raw = "a neon city at night. Hope this helps!";
        assert_eq!(sanitize(raw, OperationKind::Text), "a neon city at night.");
        assert_eq!(sanitize(raw, OperationKind::Vision), raw);
    }

    #[test]
    fn vision_uses_its_own_prefixes() {
        assert_eq!(
            sanitize("Video Prompt Idea: slow pan over ruins", OperationKind::Vision),
            "slow pan over ruins"
        );
        assert_eq!(
            sanitize("Sure, here is a prompt: x", OperationKind::Vision),
            "Sure, here is a prompt: x"
        );
    }

    #[test]
    fn whole_text_boilerplate_trims_to_empty() {
        assert_eq!(sanitize("Hope this helps!", OperationKind::Text), "");
        assert_eq!(sanitize("Prompt:", OperationKind::Vision), "");
    }

    #[test]
    fn plain_text_is_only_trimmed() {
        assert_eq!(
            sanitize("  a lighthouse, stormy sea \n", OperationKind::Text),
            "a lighthouse, stormy sea"
        );
    }

    #[test]
    fn multibyte_text_does_not_panic() {
        assert_eq!(sanitize("ÿ", OperationKind::Text), "ÿ");
        assert_eq!(sanitize("日本の庭園", OperationKind::Text), "日本の庭園");
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let once = sanitize("Prompt: Generated Prompt: koi pond", OperationKind::Text);
        assert_eq!(once, "koi pond");
        assert_eq!(sanitize(&once, OperationKind::Text), once);
    }
}
