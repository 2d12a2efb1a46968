use crate::types::DEFAULT_WEBSITE;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text for a single-quoted JavaScript string literal
pub fn escape_js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}

/// Ensure a website URL carries a scheme, prepending `https://` when it has none.
/// Empty values and the `#` marker resolve to `#`.
pub fn ensure_protocol(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || url == DEFAULT_WEBSITE {
        return DEFAULT_WEBSITE.to_string();
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Strip every non-digit character, for `tel:` links
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a phone number as `(XXX) XXX-XXXX` when it holds exactly 10 digits.
/// Anything else is returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let digits = phone_digits(phone);
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..])
    } else {
        phone.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_js_string() {
        assert_eq!(escape_js_string("O'Brien's"), r"O\'Brien\'s");
        assert_eq!(escape_js_string(r"C:\logo"), r"C:\\logo");
        assert_eq!(escape_js_string("plain"), "plain");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>Tom & "Jerry's"</b>"#),
            "&lt;b&gt;Tom &amp; &quot;Jerry&#039;s&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_ensure_protocol() {
        assert_eq!(ensure_protocol("example.com"), "https://example.com");
        assert_eq!(ensure_protocol("http://example.com"), "http://example.com");
        assert_eq!(ensure_protocol("https://example.com/a"), "https://example.com/a");
        assert_eq!(ensure_protocol(""), "#");
        assert_eq!(ensure_protocol("#"), "#");
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("702-555-1234"), "(702) 555-1234");
        assert_eq!(format_phone("(702) 555 1234"), "(702) 555-1234");
        assert_eq!(format_phone("555-1234"), "555-1234");
        assert_eq!(format_phone("+1 702 555 1234"), "+1 702 555 1234");
        assert_eq!(format_phone("Phone not available"), "Phone not available");
    }

    #[test]
    fn test_formatted_phone_keeps_digits() {
        for raw in ["7025551234", "702.555.1234", "(800) 000-0001"] {
            let digits = phone_digits(raw);
            assert_eq!(phone_digits(&format_phone(raw)), digits);
        }
    }
}
