//! Query and attribute normalization for fuzzy field matching.

/// Lowercases `text` and strips every character that is not an ASCII
/// letter or digit.
///
/// ```rust
/// use form_assist::locator::normalize;
///
/// assert_eq!(normalize("DLI-Number"), "dlinumber");
/// assert_eq!(normalize("  School Code: "), "schoolcode");
/// ```
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("DLI Number"), "dlinumber");
        assert_eq!(normalize("dli_number"), "dlinumber");
        assert_eq!(normalize("UCI #"), "uci");
        assert_eq!(normalize("école 42"), "cole42");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" - / "), "");
    }

    proptest! {
        #[test]
        fn prop_normalized_is_lowercase_alphanumeric(text in ".{0,64}") {
            let normalized = normalize(&text);
            prop_assert!(normalized
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }

        #[test]
        fn prop_normalize_is_idempotent(text in ".{0,64}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once.clone());
        }

        #[test]
        fn prop_separators_do_not_matter(words in prop::collection::vec("[a-zA-Z0-9]{1,8}", 1..5)) {
            prop_assert_eq!(normalize(&words.join(" ")), normalize(&words.join("-")));
        }
    }
}
