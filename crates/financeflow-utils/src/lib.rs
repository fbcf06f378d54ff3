//! Utility functions and helpers

/// Format a digit string with thousands separators
///
/// A leading minus sign is kept in front of the grouped digits.
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    let grouped: String = result.chars().rev().collect();
    format!("{}{}", sign, grouped)
}

/// Escape text for safe interpolation into HTML content and attributes
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Uppercase the first character, leaving the rest unchanged
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Keep only ASCII digit characters
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(5000), "5,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number("-1234"), "-1,234");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b onclick="x">'a' & b</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;&#39;a&#39; &amp; b&lt;/b&gt;"
        );
        assert_eq!(escape_html("12345"), "12345");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("insufficient balance"), "Insufficient balance");
        assert_eq!(capitalize_first("Already upper"), "Already upper");
        assert_eq!(capitalize_first("éclair"), "Éclair");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("12a3-4 5"), "12345");
        assert_eq!(digits_only("abc"), "");
        assert_eq!(digits_only("1.5e3"), "153");
    }
}
