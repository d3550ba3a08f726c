//! Text helpers shared by the detectors.
//!
//! All offsets are UTF-8 byte offsets into the normalised text; window
//! sizes are counted in characters and always land on char boundaries.

/// Characters of context kept on each side of a match
pub const CONTEXT_PAD_CHARS: usize = 30;

/// Maximum number of snippets joined into one indicator context
const MAX_SNIPPETS: usize = 3;

/// Lower-case the text and fold typographic apostrophes to `'`
pub fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .replace(['\u{2019}', '\u{2018}'], "'")
}

/// Byte offset `n` characters before `pos` (or 0)
pub fn back_chars(text: &str, pos: usize, n: usize) -> usize {
    if n == 0 {
        return pos;
    }
    text[..pos]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset `n` characters after `pos` (or the end of the text)
pub fn forward_chars(text: &str, pos: usize, n: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Snippet of `CONTEXT_PAD_CHARS` characters either side of a byte span
pub fn context_around(text: &str, start: usize, end: usize) -> String {
    let from = back_chars(text, start, CONTEXT_PAD_CHARS);
    let to = forward_chars(text, end, CONTEXT_PAD_CHARS);
    text[from..to].trim().to_string()
}

/// Snippets around the first occurrence of each keyword, up to three
pub fn keyword_context(text: &str, keywords: &[&str]) -> String {
    keywords
        .iter()
        .filter_map(|kw| text.find(kw).map(|pos| context_around(text, pos, pos + kw.len())))
        .take(MAX_SNIPPETS)
        .collect::<Vec<_>>()
        .join(" | ")
}
