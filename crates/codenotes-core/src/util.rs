//! Shared utility functions used across multiple modules.

/// Normalize user-entered text by trimming whitespace and removing empties.
///
/// Returns `None` when the trimmed value is empty.
pub fn normalize_text(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Normalize optional text the same way as [`normalize_text`].
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    normalize_text(&value?)
}

/// Truncate text to at most 180 characters for prompts and log lines.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_rejects_blank() {
        assert_eq!(normalize_text(""), None);
        assert_eq!(normalize_text(" \n\t "), None);
        assert_eq!(normalize_text_option(None), None);
    }

    #[test]
    fn normalize_text_trims_value() {
        assert_eq!(normalize_text("  buy milk "), Some("buy milk".to_string()));
        assert_eq!(
            normalize_text_option(Some(" fix bug\n".to_string())),
            Some("fix bug".to_string())
        );
    }

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
