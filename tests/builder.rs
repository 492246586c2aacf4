use proptest::prelude::*;
use promptcraft::builder::{text_payload, variation_modifier, vision_instruction};
use promptcraft::{PromptFields, RequestBuilder, TargetKind, ValidationError};

const DIRECTIVE_TAIL: &str = "Do not add any preamble, explanation, or commentary.";

#[test]
fn empty_fields_without_base_is_rejected() {
    let err = RequestBuilder::new()
        .build(&PromptFields::new(), None, None)
        .unwrap_err();
    assert_eq!(err, ValidationError::EmptyRequest);
}

#[test]
fn whitespace_only_fields_count_as_empty() {
    let fields: PromptFields = [("Core Idea", "   "), ("Lighting", "\n")].into_iter().collect();
    assert!(RequestBuilder::for_artifact("image")
        .build(&fields, Some("  "), Some("tweak"))
        .is_err());
}

#[test]
fn fields_are_listed_in_order() {
    let fields: PromptFields = [
        ("Core Idea/Subject", "a lighthouse"),
        ("Lighting", ""),
        ("Color Palette", "teal and amber"),
    ]
    .into_iter()
    .collect();
    let query = RequestBuilder::for_artifact("image")
        .build(&fields, None, None)
        .unwrap();
    assert_eq!(
        query,
        "Synthesize a single detailed image prompt from the following components:\n\
         - Core Idea/Subject: a lighthouse\n\
         - Color Palette: teal and amber\n\n\
         Output ONLY the generated image prompt string. \
         Do not add any preamble, explanation, or commentary."
    );
}

#[test]
fn edit_instruction_wins_over_fields() {
    let fields: PromptFields = [("Lighting", "neon")].into_iter().collect();
    let query = RequestBuilder::new()
        .build(&fields, Some("a rainy street"), Some("add a cat"))
        .unwrap();
    assert!(query.starts_with("Base existing prompt to work with:\n```\na rainy street\n```"));
    assert!(query.contains("Refine or modify according to: add a cat"));
    assert!(!query.contains("neon"));
}

#[test]
fn base_alone_asks_for_variations() {
    let query = RequestBuilder::new()
        .build(&PromptFields::new(), Some("a rainy street"), None)
        .unwrap();
    assert!(query.contains("Refine or generate variations."));
}

#[test]
fn variation_rotation() {
    assert_eq!(variation_modifier(0), None);
    assert_eq!(variation_modifier(1), variation_modifier(5));
    assert_ne!(variation_modifier(1), variation_modifier(2));
    assert!(variation_modifier(4).is_some());
}

#[test]
fn payload_carries_context_and_query() {
    let payload = text_payload("QUERY", "Basic Prompt", 0);
    assert!(payload.contains("'Basic Prompt'"));
    assert!(payload.ends_with("QUERY"));
    let no_context = text_payload("QUERY", "", 2);
    assert!(!no_context.contains("Context for this specific request"));
    assert!(no_context.contains("Instruction for this specific variation"));
}

#[test]
fn vision_templates_differ_by_target() {
    assert_ne!(
        vision_instruction(TargetKind::Image),
        vision_instruction(TargetKind::Video)
    );
}

fn fields_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[A-Z][a-z]{1,8}", "(?s).{0,20}"), 0..6)
}

proptest! {
    #[test]
    fn prop_build_fails_only_when_empty(
        pairs in fields_strategy(),
        base in prop::option::of("(?s).{0,20}"),
        edit in prop::option::of("(?s).{0,20}"),
    ) {
        let fields: PromptFields = pairs.iter().map(|(l, v)| (l.as_str(), v.as_str())).collect();
        let has_base = base.as_deref().is_some_and(|b| !b.trim().is_empty());
        let result = RequestBuilder::new().build(&fields, base.as_deref(), edit.as_deref());
        if has_base || fields.has_content() {
            let query = result.unwrap();
            prop_assert!(query.ends_with(DIRECTIVE_TAIL));
        } else {
            prop_assert_eq!(result.unwrap_err(), ValidationError::EmptyRequest);
        }
    }
}
