//! Language registry: the immutable table of language metadata.
//!
//! The registry is built once and handed to the engine at construction time,
//! so tests can swap in small synthetic tables. Adding a language only needs a
//! new entry in `builtin_languages` (or in a JSON table file).

use crate::error::{AnalysisError, AnalysisResult};
use crate::i18n::metadata::{
    LanguageFamily, LanguageMetadata, Morphology, Script, TenseSystem, WordOrder,
};
use std::collections::HashSet;
use std::path::Path;

/// Read-only table of supported languages, keyed by code.
///
/// Table order is preserved and is the candidate iteration order used by
/// language selection.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<LanguageMetadata>,
}

impl LanguageRegistry {
    /// Build a registry from an explicit table.
    ///
    /// # Returns
    /// * `Err(AnalysisError::Registry)` if a code is empty or appears twice
    pub fn new(languages: Vec<LanguageMetadata>) -> AnalysisResult<Self> {
        let mut seen = HashSet::new();
        for lang in &languages {
            if lang.code.trim().is_empty() {
                return Err(AnalysisError::Registry(format!(
                    "language '{}' has an empty code",
                    lang.name
                )));
            }
            if !seen.insert(lang.code.as_str()) {
                return Err(AnalysisError::Registry(format!(
                    "duplicate language code: '{}'",
                    lang.code
                )));
            }
        }

        Ok(Self { languages })
    }

    /// The built-in table of deliberately diverse languages.
    pub fn builtin() -> Self {
        Self {
            languages: builtin_languages(),
        }
    }

    /// Parse a registry from a JSON array of `LanguageMetadata`.
    pub fn from_json_str(json: &str) -> AnalysisResult<Self> {
        let languages: Vec<LanguageMetadata> = serde_json::from_str(json)
            .map_err(|e| AnalysisError::Registry(format!("invalid language table: {}", e)))?;
        Self::new(languages)
    }

    /// Load a replacement table from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> AnalysisResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::Registry(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Get the metadata for a language code.
    ///
    /// # Returns
    /// * `Some(&LanguageMetadata)` if the language exists
    /// * `None` if the language is not registered
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageMetadata> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// All registered codes, in table order.
    pub fn codes(&self) -> Vec<&str> {
        self.languages.iter().map(|lang| lang.code.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageMetadata> {
        self.languages.iter()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Default language table.
///
/// Spans twelve families and eight scripts so that farthest-point selection
/// always has genuinely unrelated candidates to pick from.
fn builtin_languages() -> Vec<LanguageMetadata> {
    use LanguageFamily as F;
    use Morphology as M;
    use Script as S;
    use TenseSystem as T;
    use WordOrder as W;

    vec![
        LanguageMetadata::new(
            "en",
            "English",
            F::IndoEuropean,
            S::Latin,
            W::Svo,
            M::Fusional,
            T::Tensed,
            &["explicit", "individual", "direct", "linear", "informal", "phrasal_verbs"],
        ),
        LanguageMetadata::new(
            "es",
            "Spanish",
            F::IndoEuropean,
            S::Latin,
            W::Svo,
            M::Fusional,
            T::Tensed,
            &["grammatical_gender", "pro_drop", "subjunctive_mood", "explicit", "collective"],
        ),
        LanguageMetadata::new(
            "de",
            "German",
            F::IndoEuropean,
            S::Latin,
            W::Svo,
            M::Fusional,
            T::Tensed,
            &["grammatical_gender", "case_system", "compound_words", "formal", "explicit", "direct"],
        ),
        LanguageMetadata::new(
            "ru",
            "Russian",
            F::IndoEuropean,
            S::Cyrillic,
            W::Free,
            M::Fusional,
            T::Aspectual,
            &["aspect_pairs", "case_system", "grammatical_gender", "collective", "direct"],
        ),
        LanguageMetadata::new(
            "ar",
            "Arabic",
            F::AfroAsiatic,
            S::Arabic,
            W::Vso,
            M::Fusional,
            T::Aspectual,
            &["root_pattern", "dual_number", "diglossia", "formal", "collective", "abstract"],
        ),
        LanguageMetadata::new(
            "zh",
            "Mandarin Chinese",
            F::SinoTibetan,
            S::Han,
            W::Svo,
            M::Isolating,
            T::Tenseless,
            &["tonal", "classifiers", "topic_prominent", "implicit", "collective", "cyclical", "concrete"],
        ),
        LanguageMetadata::new(
            "ja",
            "Japanese",
            F::Japonic,
            S::Japanese,
            W::Sov,
            M::Agglutinative,
            T::PastNonPast,
            &["honorifics", "topic_prominent", "pro_drop", "implicit", "indirect", "collective", "formal"],
        ),
        LanguageMetadata::new(
            "ko",
            "Korean",
            F::Koreanic,
            S::Hangul,
            W::Sov,
            M::Agglutinative,
            T::Tensed,
            &["honorifics", "speech_levels", "implicit", "indirect", "collective", "formal"],
        ),
        LanguageMetadata::new(
            "hi",
            "Hindi",
            F::IndoEuropean,
            S::Devanagari,
            W::Sov,
            M::Fusional,
            T::Tensed,
            &["grammatical_gender", "postpositions", "honorifics", "collective", "formal"],
        ),
        LanguageMetadata::new(
            "sw",
            "Swahili",
            F::NigerCongo,
            S::Latin,
            W::Svo,
            M::Agglutinative,
            T::Tensed,
            &["noun_classes", "verb_extensions", "collective", "cyclical", "concrete"],
        ),
        LanguageMetadata::new(
            "fi",
            "Finnish",
            F::Uralic,
            S::Latin,
            W::Svo,
            M::Agglutinative,
            T::PastNonPast,
            &["case_system", "vowel_harmony", "genderless", "individual", "concrete", "informal"],
        ),
        LanguageMetadata::new(
            "tr",
            "Turkish",
            F::Turkic,
            S::Latin,
            W::Sov,
            M::Agglutinative,
            T::Tensed,
            &["vowel_harmony", "evidentiality", "case_system", "formal", "indirect"],
        ),
        LanguageMetadata::new(
            "qu",
            "Quechua",
            F::Quechuan,
            S::Latin,
            W::Sov,
            M::Agglutinative,
            T::Tensed,
            &["evidentiality", "clusivity", "collective", "cyclical", "concrete"],
        ),
        LanguageMetadata::new(
            "eu",
            "Basque",
            F::Isolate,
            S::Latin,
            W::Sov,
            M::Agglutinative,
            T::Tensed,
            &["ergativity", "case_system", "collective", "concrete"],
        ),
        LanguageMetadata::new(
            "id",
            "Indonesian",
            F::Austronesian,
            S::Latin,
            W::Svo,
            M::Isolating,
            T::Tenseless,
            &["reduplication", "clusivity", "informal", "collective", "indirect"],
        ),
        LanguageMetadata::new(
            "ta",
            "Tamil",
            F::Dravidian,
            S::Tamil,
            W::Sov,
            M::Agglutinative,
            T::Tensed,
            &["diglossia", "clusivity", "honorifics", "formal", "collective", "cyclical"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample(code: &str) -> LanguageMetadata {
        LanguageMetadata::new(
            code,
            "Sample",
            LanguageFamily::Isolate,
            Script::Latin,
            WordOrder::Svo,
            Morphology::Isolating,
            TenseSystem::Tensed,
            &[],
        )
    }

    // ==================== Builtin Table Tests ====================

    #[test]
    fn test_builtin_contains_english() {
        let registry = LanguageRegistry::builtin();
        let config = registry.get_by_code("en").expect("English should be registered");

        assert_eq!(config.name, "English");
        assert_eq!(config.family, LanguageFamily::IndoEuropean);
        assert_eq!(config.word_order, WordOrder::Svo);
    }

    #[test]
    fn test_builtin_codes_are_unique() {
        let registry = LanguageRegistry::builtin();
        let codes = registry.codes();
        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len());
    }

    #[test]
    fn test_builtin_is_diverse() {
        let registry = LanguageRegistry::builtin();
        let families: HashSet<_> = registry.iter().map(|l| l.family).collect();
        let scripts: HashSet<_> = registry.iter().map(|l| l.script).collect();

        assert!(registry.len() >= 15);
        assert!(families.len() >= 10);
        assert!(scripts.len() >= 6);
    }

    #[test]
    fn test_builtin_passes_validation() {
        let languages = LanguageRegistry::builtin().iter().cloned().collect();
        assert!(LanguageRegistry::new(languages).is_ok());
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        let registry = LanguageRegistry::builtin();
        assert!(registry.get_by_code("xx").is_none());
        assert!(!registry.contains("xx"));
    }

    #[test]
    fn test_codes_preserve_table_order() {
        let registry = LanguageRegistry::new(vec![sample("b"), sample("a"), sample("c")])
            .expect("Should build");
        assert_eq!(registry.codes(), vec!["b", "a", "c"]);
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_new_rejects_duplicate_codes() {
        let result = LanguageRegistry::new(vec![sample("aa"), sample("aa")]);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate"));
        assert!(err.contains("aa"));
    }

    #[test]
    fn test_new_rejects_empty_code() {
        let result = LanguageRegistry::new(vec![sample("  ")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_accepts_empty_table() {
        let registry = LanguageRegistry::new(Vec::new()).expect("Should build");
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    // ==================== JSON Loading Tests ====================

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[
                {{"code": "aa", "name": "Alpha", "family": "isolate", "script": "latin",
                  "word_order": "svo", "morphology": "isolating", "tense_system": "tensed",
                  "conceptual_features": ["formal"]}},
                {{"code": "bb", "name": "Beta", "family": "uralic", "script": "cyrillic",
                  "word_order": "sov", "morphology": "agglutinative", "tense_system": "aspectual"}}
            ]"#
        )
        .expect("write");

        let registry = LanguageRegistry::from_json_file(file.path()).expect("Should load");
        assert_eq!(registry.codes(), vec!["aa", "bb"]);
        assert_eq!(
            registry.get_by_code("aa").unwrap().conceptual_features,
            vec!["formal".to_string()]
        );
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = LanguageRegistry::from_json_file("/nonexistent/languages.json");
        assert!(result.unwrap_err().to_string().contains("failed to read"));
    }

    #[test]
    fn test_from_json_str_invalid() {
        let result = LanguageRegistry::from_json_str("{not json");
        assert!(result.unwrap_err().to_string().contains("invalid language table"));
    }
}
