// Name conversion for story titles and artifact file names

use once_cell::sync::Lazy;
use regex::Regex;

static LOWER_TO_UPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("invalid camel case regex"));

static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z])([A-Z][a-z])").expect("invalid acronym regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

static UNSAFE_FILE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\-]+").expect("invalid file name regex"));

/// Turns a camel-cased or underscored identifier into a sentence:
/// `WhenBuyingAWidget` and `when_buying_a_widget` both become
/// `When buying a widget`. Text that already contains spaces is kept as is.
pub fn humanize(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.contains(' ') {
        return trimmed.to_string();
    }

    let spaced = LOWER_TO_UPPER.replace_all(trimmed, "$1 $2");
    let spaced = ACRONYM_BOUNDARY.replace_all(&spaced, "$1 $2");
    let spaced = spaced.replace('_', " ");
    let lowered = WHITESPACE.replace_all(spaced.trim(), " ").to_lowercase();

    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-cased, underscore-separated form safe to use in a file name.
pub fn underscore(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let joined = WHITESPACE.replace_all(&lowered, "_");
    UNSAFE_FILE_CHARS.replace_all(&joined, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_camel_case() {
        assert_eq!(humanize("WhenBuyingAWidget"), "When buying a widget");
    }

    #[test]
    fn test_humanize_snake_case() {
        assert_eq!(humanize("when_buying_a_widget"), "When buying a widget");
    }

    #[test]
    fn test_humanize_keeps_sentences() {
        assert_eq!(humanize("A User Story"), "A User Story");
    }

    #[test]
    fn test_humanize_empty() {
        assert_eq!(humanize("   "), "");
    }

    #[test]
    fn test_humanize_acronym() {
        assert_eq!(humanize("ParsesHTMLPage"), "Parses html page");
    }

    #[test]
    fn test_underscore() {
        assert_eq!(underscore("A Step Name"), "a_step_name");
        assert_eq!(underscore("  open   the/page?  "), "open_thepage");
    }
}
