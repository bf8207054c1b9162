//! Text helpers for error messages.

/// Marker appended to messages that were cut short
pub const ELLIPSIS: &str = "...";

/// Cut `message` to at most `max_chars` characters, appending [`ELLIPSIS`]
/// when anything was removed. Counts characters, not bytes, so multi-byte
/// text is never split mid-codepoint.
pub fn truncate_message(message: &str, max_chars: usize) -> String {
    match message.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &message[..byte_idx], ELLIPSIS),
        None => message.to_string(),
    }
}
