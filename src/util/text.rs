// src/util/text.rs
use crate::constants::ELLIPSIS;

/// Shorten note text for a list tile.
///
/// Counts characters, not bytes, so multi-byte text (Cyrillic, emoji) is never
/// split inside a code point. The ellipsis is only appended when something was cut.
///
/// # Examples
///
/// ```
/// use studydesk::util::text::truncate_preview;
///
/// assert_eq!(truncate_preview("Derivatives and limits", 11), "Derivatives...");
/// assert_eq!(truncate_preview("Short", 80), "Short");
/// ```
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
    }
}
