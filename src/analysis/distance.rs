//! Conceptual distance between two languages.
//!
//! Four categorical dimensions (family, script, word order, morphology) each
//! contribute an indicator value, and the conceptual-feature sets contribute
//! one minus their Jaccard similarity. The distance is the mean of the five.

use crate::analysis::settings::DistanceWeights;
use crate::i18n::{LanguageMetadata, LanguageRegistry};
use std::collections::HashSet;

/// Distance metric bound to a registry and a set of weights.
#[derive(Debug, Clone, Copy)]
pub struct ConceptualDistance<'a> {
    registry: &'a LanguageRegistry,
    weights: &'a DistanceWeights,
}

impl<'a> ConceptualDistance<'a> {
    pub fn new(registry: &'a LanguageRegistry, weights: &'a DistanceWeights) -> Self {
        Self { registry, weights }
    }

    /// Distance in `[0, 1]` between two language codes.
    ///
    /// Identical codes are at distance 0. If either code is unregistered the
    /// neutral fallback is returned instead of failing.
    pub fn distance(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 0.0;
        }

        match (self.registry.get_by_code(a), self.registry.get_by_code(b)) {
            (Some(meta_a), Some(meta_b)) => self.between(meta_a, meta_b),
            _ => self.weights.unknown_fallback.clamp(0.0, 1.0),
        }
    }

    fn between(&self, a: &LanguageMetadata, b: &LanguageMetadata) -> f64 {
        let w = self.weights;
        let indicator = |same: bool, mismatch: f64| if same { w.match_value } else { mismatch };

        let dimensions = [
            indicator(a.family == b.family, w.family_mismatch),
            indicator(a.script == b.script, w.script_mismatch),
            indicator(a.word_order == b.word_order, w.word_order_mismatch),
            indicator(a.morphology == b.morphology, w.morphology_mismatch),
            1.0 - jaccard(&a.conceptual_features, &b.conceptual_features),
        ];

        let mean = dimensions.iter().sum::<f64>() / dimensions.len() as f64;
        mean.clamp(0.0, 1.0)
    }
}

/// Intersection over union; two empty sets are identical.
fn jaccard(a: &[String], b: &[String]) -> f64 {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();

    let union = a.union(&b).count();
    if union == 0 {
        return 1.0;
    }

    a.intersection(&b).count() as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{LanguageFamily, Morphology, Script, TenseSystem, WordOrder};
    use proptest::prelude::*;

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn builtin_distance(a: &str, b: &str) -> f64 {
        let registry = LanguageRegistry::builtin();
        let weights = DistanceWeights::default();
        ConceptualDistance::new(&registry, &weights).distance(a, b)
    }

    // ==================== Identity and Fallback Tests ====================

    #[test]
    fn test_distance_to_self_is_zero() {
        for code in ["en", "ja", "sw", "xx", ""] {
            assert_eq!(builtin_distance(code, code), 0.0);
        }
    }

    #[test]
    fn test_unregistered_language_is_neutral() {
        assert_eq!(builtin_distance("en", "xx"), 0.5);
        assert_eq!(builtin_distance("xx", "en"), 0.5);
        assert_eq!(builtin_distance("xx", "yy"), 0.5);
    }

    // ==================== Ordering Tests ====================

    #[test]
    fn test_related_languages_are_closer() {
        let spanish = builtin_distance("en", "es");
        let japanese = builtin_distance("en", "ja");
        let tamil = builtin_distance("en", "ta");

        assert!(spanish < japanese);
        assert!(spanish < tamil);
    }

    #[test]
    fn test_structural_match_with_identical_features_is_zero() {
        let mk = |code: &str| {
            LanguageMetadata::new(
                code,
                code,
                LanguageFamily::Uralic,
                Script::Latin,
                WordOrder::Svo,
                Morphology::Agglutinative,
                TenseSystem::Tensed,
                &["formal"],
            )
        };
        let registry = LanguageRegistry::new(vec![mk("aa"), mk("bb")]).unwrap();
        let weights = DistanceWeights::default();
        let metric = ConceptualDistance::new(&registry, &weights);

        assert_eq!(metric.distance("aa", "bb"), 0.0);
    }

    #[test]
    fn test_fully_different_languages_use_all_weights() {
        let registry = LanguageRegistry::new(vec![
            LanguageMetadata::new(
                "aa",
                "A",
                LanguageFamily::Uralic,
                Script::Latin,
                WordOrder::Svo,
                Morphology::Agglutinative,
                TenseSystem::Tensed,
                &["formal"],
            ),
            LanguageMetadata::new(
                "bb",
                "B",
                LanguageFamily::Japonic,
                Script::Japanese,
                WordOrder::Sov,
                Morphology::Isolating,
                TenseSystem::Tensed,
                &["informal"],
            ),
        ])
        .unwrap();
        let weights = DistanceWeights::default();
        let metric = ConceptualDistance::new(&registry, &weights);

        let expected = (1.0 + 0.9 + 0.6 + 0.5 + 1.0) / 5.0;
        assert!((metric.distance("aa", "bb") - expected).abs() < 1e-12);
    }

    // ==================== Jaccard Tests ====================

    #[test]
    fn test_jaccard_partial_overlap() {
        let a = owned(&["formal", "collective", "tonal"]);
        let b = owned(&["formal", "collective", "honorifics", "implicit"]);
        assert!((jaccard(&a, &b) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_jaccard_empty_sets() {
        assert_eq!(jaccard(&[], &[]), 1.0);
        assert_eq!(jaccard(&owned(&["formal"]), &[]), 0.0);
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_distance_symmetric_and_bounded(i in 0usize..16, j in 0usize..16) {
            let registry = LanguageRegistry::builtin();
            let weights = DistanceWeights::default();
            let metric = ConceptualDistance::new(&registry, &weights);
            let codes = registry.codes();
            let (a, b) = (codes[i % codes.len()], codes[j % codes.len()]);

            let ab = metric.distance(a, b);
            let ba = metric.distance(b, a);
            prop_assert_eq!(ab, ba);
            prop_assert!((0.0..=1.0).contains(&ab));
        }

        #[test]
        fn prop_unknown_codes_fall_back(code in "[a-z]{3,5}") {
            prop_assume!(!LanguageRegistry::builtin().contains(&code));
            prop_assert_eq!(builtin_distance("en", &code), 0.5);
        }
    }
}
