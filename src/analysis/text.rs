//! Whitespace tokenization shared by the extraction stages.

/// Lowercase a token and strip leading/trailing punctuation.
///
/// Returns an empty string for tokens made only of punctuation.
pub fn normalize(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Normalized, non-empty word tokens.
pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize)
        .filter(|w| !w.is_empty())
        .collect()
}

/// Whether any word starts with any trigger ("protected" matches "protect").
pub fn mentions_any(words: &[String], triggers: &[String]) -> bool {
    triggers
        .iter()
        .any(|trigger| words.iter().any(|w| w.starts_with(trigger.as_str())))
}

/// The first `n` characters of a word (character-aware, not byte-sliced).
pub fn char_prefix(word: &str, n: usize) -> String {
    word.chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_normalize_strips_edge_punctuation() {
        assert_eq!(normalize("Freedom,"), "freedom");
        assert_eq!(normalize("[ja]"), "ja");
        assert_eq!(normalize("don't"), "don't");
        assert_eq!(normalize("..."), "");
    }

    #[test]
    fn test_words_skips_punctuation_only_tokens() {
        assert_eq!(words("Hello , world !"), owned(&["hello", "world"]));
        assert!(words("   ").is_empty());
    }

    #[test]
    fn test_mentions_any_prefix_match() {
        let text = owned(&["we", "protected", "them"]);
        assert!(mentions_any(&text, &owned(&["protect"])));
        assert!(!mentions_any(&text, &owned(&["shield", "guard"])));
    }

    #[test]
    fn test_char_prefix_multibyte() {
        assert_eq!(char_prefix("自由と平和", 2), "自由");
        assert_eq!(char_prefix("ab", 4), "ab");
    }
}
