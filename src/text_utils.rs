use unicode_segmentation::UnicodeSegmentation;

const DEFAULT_NAME_WORDS: usize = 5;

/// Suggested favorite name: the first five words of the prompt, with `...`
/// appended when the prompt is longer.
pub fn default_favorite_name(prompt: &str) -> String {
    let words: Vec<&str> = prompt.split_whitespace().collect();
    let mut name = words
        .iter()
        .take(DEFAULT_NAME_WORDS)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if words.len() > DEFAULT_NAME_WORDS {
        name.push_str("...");
    }
    name
}

/// Shorten `text` to at most `max` user-perceived characters, adding `...`
/// when something was cut.
pub fn preview(text: &str, max: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max).collect();
    if graphemes.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
