//! Language code helpers.

/// Source language code that asks the backend to detect the language.
pub const AUTO: &str = "auto";

/// Known language codes and their English names.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    (AUTO, "auto-detected language"),
];

/// Human-readable name for a language code, used in LLM prompts.
///
/// Regional variants (`en-US`, `zh_CN`) resolve through their primary
/// subtag. Unknown codes are returned unchanged.
pub fn display_name(code: &str) -> &str {
    let lower = code.trim().to_lowercase();
    let primary = lower.split(['-', '_']).next().unwrap_or_default();

    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == lower || *c == primary)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// Whether a string looks like a usable language code.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= 16
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(display_name("en"), "English");
        assert_eq!(display_name("es"), "Spanish");
        assert_eq!(display_name("auto"), "auto-detected language");
    }

    #[test]
    fn test_regional_variant_uses_primary_subtag() {
        assert_eq!(display_name("pt-BR"), "Portuguese");
        assert_eq!(display_name("zh_CN"), "Chinese");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        assert_eq!(display_name("eu"), "eu");
    }

    #[test]
    fn test_code_validation() {
        assert!(is_valid_code("en"));
        assert!(is_valid_code("zh-CN"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("en us"));
    }
}
