use regex::Regex;
use std::sync::OnceLock;

fn think_block() -> &'static Regex {
    static THINK_BLOCK: OnceLock<Regex> = OnceLock::new();
    THINK_BLOCK.get_or_init(|| {
        Regex::new(r"(?s)<think>.*?</think>").expect("think block pattern is valid")
    })
}

/// Removes every `<think>...</think>` span from a reasoning model's reply and
/// trims the result.
///
/// Markers are case-sensitive and matched non-greedily across newlines.
/// Removal repeats until no span is left, so applying this twice gives the
/// same text as applying it once.
pub fn strip_think_blocks(text: &str) -> String {
    let mut cleaned = text.to_string();
    while think_block().is_match(&cleaned) {
        cleaned = think_block().replace_all(&cleaned, "").into_owned();
    }
    cleaned.trim().to_string()
}
