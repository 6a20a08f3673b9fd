//! Language metadata: the structural and conceptual description of a language.
//!
//! Every categorical dimension is a closed enum so that the distance metric can
//! compare by equality, while conceptual features stay free-text labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Genealogical language family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageFamily {
    IndoEuropean,
    SinoTibetan,
    Japonic,
    Koreanic,
    AfroAsiatic,
    NigerCongo,
    Austronesian,
    Dravidian,
    Turkic,
    Uralic,
    Quechuan,
    Isolate,
}

/// Writing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    Latin,
    Cyrillic,
    Arabic,
    Han,
    Japanese,
    Hangul,
    Devanagari,
    Tamil,
}

/// Dominant constituent order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordOrder {
    Svo,
    Sov,
    Vso,
    Vos,
    Free,
}

/// Morphological type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Morphology {
    Isolating,
    Agglutinative,
    Fusional,
    Polysynthetic,
}

/// How the grammar encodes time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenseSystem {
    /// Obligatory past/present/future marking.
    Tensed,
    /// Past vs non-past.
    PastNonPast,
    /// Aspect carries the temporal load.
    Aspectual,
    /// Time left to context and particles.
    Tenseless,
}

/// Metadata for one supported language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageMetadata {
    /// Language code (e.g., "en", "ja")
    pub code: String,

    /// English name of the language
    pub name: String,

    pub family: LanguageFamily,
    pub script: Script,
    pub word_order: WordOrder,
    pub morphology: Morphology,
    pub tense_system: TenseSystem,

    /// Free-text labels such as "honorifics", "collective", "implicit".
    #[serde(default)]
    pub conceptual_features: Vec<String>,
}

impl LanguageMetadata {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        code: &str,
        name: &str,
        family: LanguageFamily,
        script: Script,
        word_order: WordOrder,
        morphology: Morphology,
        tense_system: TenseSystem,
        conceptual_features: &[&str],
    ) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            family,
            script,
            word_order,
            morphology,
            tense_system,
            conceptual_features: conceptual_features.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl WordOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordOrder::Svo => "svo",
            WordOrder::Sov => "sov",
            WordOrder::Vso => "vso",
            WordOrder::Vos => "vos",
            WordOrder::Free => "free",
        }
    }
}

impl Morphology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Morphology::Isolating => "isolating",
            Morphology::Agglutinative => "agglutinative",
            Morphology::Fusional => "fusional",
            Morphology::Polysynthetic => "polysynthetic",
        }
    }
}

impl TenseSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenseSystem::Tensed => "tensed",
            TenseSystem::PastNonPast => "past_non_past",
            TenseSystem::Aspectual => "aspectual",
            TenseSystem::Tenseless => "tenseless",
        }
    }
}

impl fmt::Display for WordOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_order_labels() {
        assert_eq!(WordOrder::Svo.as_str(), "svo");
        assert_eq!(WordOrder::Sov.to_string(), "sov");
        assert_eq!(WordOrder::Free.as_str(), "free");
    }

    #[test]
    fn test_metadata_deserialize_without_features() {
        let json = r#"{
            "code": "xx",
            "name": "Test",
            "family": "isolate",
            "script": "latin",
            "word_order": "vos",
            "morphology": "polysynthetic",
            "tense_system": "tenseless"
        }"#;

        let meta: LanguageMetadata = serde_json::from_str(json).expect("Should parse");
        assert_eq!(meta.code, "xx");
        assert_eq!(meta.family, LanguageFamily::Isolate);
        assert_eq!(meta.word_order, WordOrder::Vos);
        assert!(meta.conceptual_features.is_empty());
    }

    #[test]
    fn test_metadata_serialize_uses_snake_case_tags() {
        let meta = LanguageMetadata::new(
            "ja",
            "Japanese",
            LanguageFamily::Japonic,
            Script::Japanese,
            WordOrder::Sov,
            Morphology::Agglutinative,
            TenseSystem::PastNonPast,
            &["honorifics"],
        );

        let json = serde_json::to_string(&meta).expect("Should serialize");
        assert!(json.contains("\"japonic\""));
        assert!(json.contains("\"sov\""));
        assert!(json.contains("\"past_non_past\""));
        assert!(json.contains("honorifics"));
    }
}
