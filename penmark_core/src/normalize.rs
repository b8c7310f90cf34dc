//! Answer normalization before comparison

/// Trim surrounding whitespace and lower-case.
///
/// No Unicode canonical normalization is applied, so composed and
/// decomposed spellings of the same text compare as different.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// True when nothing but whitespace remains after trimming
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(normalize("  I Go To School.\n"), "i go to school.");
    }

    #[test]
    fn test_keeps_inner_whitespace() {
        assert_eq!(normalize("a  b\tc"), "a  b\tc");
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(normalize(" ÉCOLE "), "école");
    }

    #[test]
    fn test_no_canonical_normalization() {
        // precomposed vs. e + combining acute
        assert_ne!(normalize("caf\u{e9}"), normalize("cafe\u{301}"));
    }

    #[test]
    fn test_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n "));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_byte_order_mark_is_not_whitespace() {
        assert!(!is_blank("\u{feff}"));
        assert_eq!(normalize(" \u{feff}A "), "\u{feff}a");
    }
}
