use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::REJECTION_REASON_CHAR_LIMIT;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalizes caller-supplied text before storage: collapses whitespace runs,
/// trims, and caps the length on a character boundary. Returns None when
/// nothing readable remains.
pub fn clean_text(raw: &str, max_chars: usize) -> Option<String> {
    let collapsed = WHITESPACE_RUN.replace_all(raw.trim(), " ");
    if collapsed.is_empty() {
        return None;
    }

    Some(collapsed.chars().take(max_chars).collect())
}

/// Sanitizes an admin rejection reason. The caller substitutes the default
/// placeholder when this returns None.
pub fn sanitize_reason(raw: &str) -> Option<String> {
    clean_text(raw, REJECTION_REASON_CHAR_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_and_trims() {
        assert_eq!(
            clean_text("  policy \n\n violation \t here  ", 100),
            Some("policy violation here".to_string())
        );
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(clean_text("", 100), None);
        assert_eq!(clean_text("   \n\t  ", 100), None);
    }

    #[test]
    fn test_caps_length() {
        let long = "a".repeat(500);
        let cleaned = sanitize_reason(&long).unwrap();
        assert_eq!(cleaned.len(), REJECTION_REASON_CHAR_LIMIT);
    }

    #[test]
    fn test_caps_on_char_boundary() {
        let cleaned = clean_text("héllo wörld", 7).unwrap();
        assert_eq!(cleaned, "héllo w");
        assert_eq!(cleaned.chars().count(), 7);
    }

    #[test]
    fn test_plain_reason_passes_through() {
        assert_eq!(
            sanitize_reason("policy violation"),
            Some("policy violation".to_string())
        );
    }
}
