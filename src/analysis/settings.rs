//! Tunable heuristics for every stage of the engine.
//!
//! All weights, thresholds and trigger tables live here as plain data. Only
//! their relative ordering matters; the specific values are defaults that can
//! be overridden from a JSON file where any missing field keeps its default.

use crate::error::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub distance: DistanceWeights,
    pub extraction: ExtractionSettings,
    pub symbolic: SymbolicSettings,
    pub insight: InsightWeights,
}

/// Per-dimension indicator values for the conceptual distance.
///
/// A matching dimension contributes `match_value`; a mismatch contributes the
/// dimension's own value. Family and script outrank word order and morphology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceWeights {
    pub match_value: f64,
    pub family_mismatch: f64,
    pub script_mismatch: f64,
    pub word_order_mismatch: f64,
    pub morphology_mismatch: f64,
    /// Returned when either language has no metadata.
    pub unknown_fallback: f64,
}

/// Parameters of the per-language surface extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Tokens must be strictly longer than this to count as concepts.
    pub min_concept_length: usize,
    pub max_concepts: usize,
    /// Texts with fewer words than this are labelled "simple".
    pub short_text_threshold: usize,
    pub metaphor_triggers: Vec<String>,
    /// Confidence given to analyses built from a placeholder translation.
    pub placeholder_confidence: f64,
    /// Confidence given to analyses of languages without metadata.
    pub unknown_language_confidence: f64,
}

/// Trigger tables and weights for the symbolic layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolicSettings {
    /// Archetype label paired with its trigger words.
    pub archetypes: Vec<(String, Vec<String>)>,
    /// Opposite semantic-field tags that make a paradox.
    pub paradox_opposites: Vec<(String, String)>,
    /// Opposite words that make two metaphors contradict.
    pub contradiction_opposites: Vec<(String, String)>,
    /// Words signalling change in the source text.
    pub change_words: Vec<String>,
    /// Concepts sharing this many leading characters are grouped.
    pub emergent_prefix_length: usize,
    /// Distinct concepts above `factor * analyses` flag divergence.
    pub divergence_factor: f64,
    /// First word must occur more than this many times for recursive emphasis.
    pub recursion_threshold: usize,
    pub archetype_weight: f64,
    pub paradox_weight: f64,
    pub chaos_weight: f64,
    pub contradiction_weight: f64,
    pub emergent_weight: f64,
}

/// Weights of the final insight score.
///
/// Shared concepts and convergence dominate; divergence, unique perspectives
/// and the symbolic signal contribute secondarily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightWeights {
    pub shared_concepts: f64,
    pub unique_perspective: f64,
    pub convergent: f64,
    pub divergent: f64,
    pub transformation: f64,
}

impl AnalysisSettings {
    /// Parse overrides from JSON; omitted fields keep their defaults.
    pub fn from_json_str(json: &str) -> AnalysisResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AnalysisError::Settings(format!("invalid settings: {}", e)))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> AnalysisResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::Settings(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }
}

impl Default for DistanceWeights {
    fn default() -> Self {
        Self {
            match_value: 0.0,
            family_mismatch: 1.0,
            script_mismatch: 0.9,
            word_order_mismatch: 0.6,
            morphology_mismatch: 0.5,
            unknown_fallback: 0.5,
        }
    }
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            min_concept_length: 3,
            max_concepts: 10,
            short_text_threshold: 10,
            metaphor_triggers: strings(&["like", "as", "is", "are"]),
            placeholder_confidence: 0.3,
            unknown_language_confidence: 0.5,
        }
    }
}

impl Default for SymbolicSettings {
    fn default() -> Self {
        Self {
            archetypes: vec![
                archetype("protection", &["protect", "shield", "guard", "safe", "shelter", "defend"]),
                archetype("transformation", &["transform", "change", "become", "evolve", "metamorph"]),
                archetype("connection", &["connect", "bond", "link", "together", "unite", "bridge"]),
                archetype("conflict", &["fight", "war", "struggle", "battle", "clash", "against"]),
                archetype("creation", &["create", "birth", "build", "begin", "origin", "genesis"]),
                archetype("destruction", &["destroy", "ruin", "collapse", "break", "death", "decay"]),
            ],
            paradox_opposites: pairs(&[
                ("formal", "informal"),
                ("explicit", "implicit"),
                ("individual", "collective"),
                ("direct", "indirect"),
                ("linear", "cyclical"),
                ("concrete", "abstract"),
            ]),
            contradiction_opposites: pairs(&[
                ("up", "down"),
                ("in", "out"),
                ("open", "closed"),
                ("light", "dark"),
                ("fast", "slow"),
                ("hard", "soft"),
            ]),
            change_words: strings(&["change", "transform", "become", "evolve", "shift", "turn"]),
            emergent_prefix_length: 4,
            divergence_factor: 2.0,
            recursion_threshold: 2,
            archetype_weight: 0.1,
            paradox_weight: 0.1,
            chaos_weight: 0.1,
            contradiction_weight: 0.2,
            emergent_weight: 0.2,
        }
    }
}

impl Default for InsightWeights {
    fn default() -> Self {
        Self {
            shared_concepts: 0.3,
            unique_perspective: 0.05,
            convergent: 0.1,
            divergent: 0.03,
            transformation: 0.1,
        }
    }
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn pairs(table: &[(&str, &str)]) -> Vec<(String, String)> {
    table
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

fn archetype(label: &str, triggers: &[&str]) -> (String, Vec<String>) {
    (label.to_string(), strings(triggers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_family_and_script_outweigh_structure() {
        let d = DistanceWeights::default();
        assert!(d.family_mismatch > d.word_order_mismatch);
        assert!(d.family_mismatch > d.morphology_mismatch);
        assert!(d.script_mismatch > d.word_order_mismatch);
        assert!(d.script_mismatch > d.morphology_mismatch);
        assert!(d.match_value < d.morphology_mismatch);
    }

    #[test]
    fn test_contradictions_and_emergence_weigh_most() {
        let s = SymbolicSettings::default();
        for other in [s.archetype_weight, s.paradox_weight, s.chaos_weight] {
            assert!(s.contradiction_weight > other);
            assert!(s.emergent_weight > other);
        }
    }

    #[test]
    fn test_shared_and_convergent_dominate_insight() {
        let w = InsightWeights::default();
        assert!(w.shared_concepts > w.divergent);
        assert!(w.convergent > w.divergent);
        assert!(w.convergent > w.unique_perspective);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let settings = AnalysisSettings::from_json_str(
            r#"{"insight": {"convergent": 0.5}, "extraction": {"max_concepts": 4}}"#,
        )
        .expect("Should parse");

        assert_eq!(settings.insight.convergent, 0.5);
        assert_eq!(settings.insight.shared_concepts, 0.3);
        assert_eq!(settings.extraction.max_concepts, 4);
        assert_eq!(settings.extraction.min_concept_length, 3);
        assert_eq!(settings.distance, DistanceWeights::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        let settings = AnalysisSettings::from_json_str("{}").expect("Should parse");
        assert_eq!(settings, AnalysisSettings::default());
    }

    #[test]
    fn test_invalid_json_is_settings_error() {
        let err = AnalysisSettings::from_json_str("[1, 2").unwrap_err();
        assert!(matches!(err, AnalysisError::Settings(_)));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"symbolic": {{"emergent_prefix_length": 3}}}}"#).expect("write");

        let settings = AnalysisSettings::from_json_file(file.path()).expect("Should load");
        assert_eq!(settings.symbolic.emergent_prefix_length, 3);
        assert_eq!(settings.symbolic.archetypes.len(), 6);
    }
}
