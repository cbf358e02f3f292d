//! Word budget enforcement.

/// Marker appended to truncated answers.
pub const ELLIPSIS: &str = "...";

/// Whitespace-separated words in `text`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Cuts `text` down to `limit` words.
///
/// Text within the budget is returned as is. Longer text keeps its first
/// `limit` words, joined by single spaces, followed by [`ELLIPSIS`]. A limit
/// of zero always yields an empty string.
///
/// ```
/// use archivist_response::truncate_to_word_limit;
///
/// assert_eq!(truncate_to_word_limit("one two  three", 3), "one two  three");
/// assert_eq!(truncate_to_word_limit("one two three four", 2), "one two...");
/// assert_eq!(truncate_to_word_limit("anything", 0), "");
/// ```
pub fn truncate_to_word_limit(text: &str, limit: u32) -> String {
    if limit == 0 {
        return String::new();
    }
    let limit = limit as usize;
    if count_words(text) <= limit {
        return text.to_string();
    }
    let mut kept = text
        .split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ");
    kept.push_str(ELLIPSIS);
    kept
}
