//! Utilities for sanitizing server-provided text.
//!
//! Response bodies and error messages come from a remote endpoint and may
//! contain control characters or whole HTML pages. These helpers make them
//! safe and short enough for a single log line.

/// Sanitizes a message by removing control characters.
///
/// Control characters (0x00-0x1F, except newline/tab/carriage return) can
/// corrupt terminal output and JSON log lines, so they are dropped.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 // Printable ASCII starts at 0x20 (space)
                || code == 0x09 // Tab
                || code == 0x0A // Newline
                || code == 0x0D // Carriage return
        })
        .filter(|c| *c != '\u{7F}')
        .collect()
}

/// Sanitizes `text` and keeps at most `max_chars` characters.
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    let sanitized = sanitize_error_message(text);
    match sanitized.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &sanitized[..byte_idx]),
        None => sanitized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_error_message_removes_control_chars() {
        let input = "Error\x00message\x01with\x02control\x03chars";
        let output = sanitize_error_message(input);
        assert_eq!(output, "Errormessagewithcontrolchars");
    }

    #[test]
    fn test_sanitize_error_message_preserves_whitespace() {
        let input = "Error\nmessage\twith\r\nwhitespace";
        assert_eq!(sanitize_error_message(input), input);
    }

    #[test]
    fn test_sanitize_error_message_preserves_unicode() {
        let input = "Error message with unicode: 测试 🚀";
        let output = sanitize_error_message(input);
        assert_eq!(output, "Error message with unicode: 测试 🚀");
    }

    #[test]
    fn test_truncate_preview_short_text_untouched() {
        assert_eq!(truncate_preview("<html>", 200), "<html>");
        assert_eq!(truncate_preview("", 200), "");
    }

    #[test]
    fn test_truncate_preview_long_text() {
        let body = "x".repeat(500);
        let preview = truncate_preview(&body, 200);
        assert_eq!(preview.len(), 203);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_truncate_preview_counts_chars_not_bytes() {
        let preview = truncate_preview("测试测试", 2);
        assert_eq!(preview, "测试...");
    }
}
