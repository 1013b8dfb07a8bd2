/*
 * truncate.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Word-boundary-aware text truncation.
 */

//! Word-boundary-aware text truncation.

/// Bound the length of `text`, breaking at a word boundary where possible.
///
/// Text shorter than `max_length` is returned unchanged. Otherwise the text
/// is clipped and an ellipsis appended: if a space occurs within the first
/// `max_length` characters (strictly after position 0) the text breaks at the
/// last such space, else it breaks at the raw clip boundary. The ellipsis
/// occupies the saved character, so output never exceeds `max_length`
/// characters.
///
/// Counts are `char`-based, so multibyte text is never split mid-code-point.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < max_length {
        return text.to_string();
    }

    let window = &chars[..max_length.min(chars.len())];
    let cut = match window.iter().rposition(|c| *c == ' ') {
        Some(pos) if pos > 0 => pos,
        _ => max_length.saturating_sub(1),
    };

    let mut out: String = chars[..cut].iter().collect();
    out.push('…');
    out
}
