//! Per-language surface analysis.
//!
//! Deterministic given the same text, language and registry. Extraction works
//! on the rendering (the translation, or the source text for the root).

use crate::analysis::model::{CulturalContext, GrammaticalInsights, LanguageAnalysis};
use crate::analysis::settings::ExtractionSettings;
use crate::analysis::text;
use crate::i18n::{LanguageMetadata, LanguageRegistry};
use std::collections::HashSet;

pub struct PerLanguageAnalyzer<'a> {
    registry: &'a LanguageRegistry,
    settings: &'a ExtractionSettings,
}

impl<'a> PerLanguageAnalyzer<'a> {
    pub fn new(registry: &'a LanguageRegistry, settings: &'a ExtractionSettings) -> Self {
        Self { registry, settings }
    }

    /// Analyze the source text in its own (root) language.
    pub fn analyze_root(&self, text: &str, language: &str) -> LanguageAnalysis {
        self.build(text, None, language, None)
    }

    /// Analyze a translation of `original` into `language`.
    pub fn analyze_translation(
        &self,
        original: &str,
        translated: &str,
        language: &str,
    ) -> LanguageAnalysis {
        self.build(original, Some(translated), language, None)
    }

    /// Analyze a placeholder standing in for a failed translation.
    pub fn analyze_placeholder(
        &self,
        original: &str,
        placeholder: &str,
        language: &str,
    ) -> LanguageAnalysis {
        self.build(
            original,
            Some(placeholder),
            language,
            Some(self.settings.placeholder_confidence),
        )
    }

    fn build(
        &self,
        original: &str,
        translated: Option<&str>,
        language: &str,
        confidence_cap: Option<f64>,
    ) -> LanguageAnalysis {
        let rendered = translated.unwrap_or(original);
        let words = text::words(rendered);
        let metadata = self.registry.get_by_code(language);
        let is_root = translated.is_none();

        let key_concepts = self.key_concepts(&words);
        let unique_expressions = if is_root {
            Vec::new()
        } else {
            let source: HashSet<String> = text::words(original).into_iter().collect();
            key_concepts
                .iter()
                .filter(|concept| !source.contains(*concept))
                .cloned()
                .collect()
        };

        let base_confidence = if metadata.is_some() {
            1.0
        } else {
            self.settings.unknown_language_confidence
        };
        let confidence = confidence_cap
            .map_or(base_confidence, |cap| base_confidence.min(cap))
            .clamp(0.0, 1.0);

        LanguageAnalysis {
            language: language.to_string(),
            original_text: original.to_string(),
            translated_text: translated.map(str::to_string),
            key_concepts,
            unique_expressions,
            metaphors: self.metaphors(&words),
            cultural_context: cultural_context(metadata.filter(|_| !is_root)),
            grammatical_insights: self.grammatical_insights(&words, metadata, is_root),
            semantic_field: metadata
                .filter(|_| !is_root)
                .map(|meta| meta.conceptual_features.iter().cloned().collect())
                .unwrap_or_default(),
            confidence,
        }
    }

    /// Long tokens, deduplicated in first-seen order and capped.
    fn key_concepts(&self, words: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        words
            .iter()
            .filter(|w| w.chars().count() > self.settings.min_concept_length)
            .filter(|w| seen.insert(w.as_str()))
            .take(self.settings.max_concepts)
            .cloned()
            .collect()
    }

    /// Three-word windows centred on a trigger word not at either boundary.
    fn metaphors(&self, words: &[String]) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        if words.len() < 3 {
            return found;
        }

        for i in 1..words.len() - 1 {
            if self.settings.metaphor_triggers.iter().any(|t| *t == words[i]) {
                let window = words[i - 1..=i + 1].join(" ");
                if !found.contains(&window) {
                    found.push(window);
                }
            }
        }
        found
    }

    fn grammatical_insights(
        &self,
        words: &[String],
        metadata: Option<&LanguageMetadata>,
        is_root: bool,
    ) -> GrammaticalInsights {
        let word_count = words.len();
        let avg_word_length = if word_count == 0 {
            0.0
        } else {
            words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count as f64
        };
        let sentence_structure = match word_count {
            0 => "empty",
            n if n < self.settings.short_text_threshold => "simple",
            _ => "complex",
        };

        let root_meta = metadata.filter(|_| is_root);
        GrammaticalInsights {
            word_count,
            avg_word_length,
            sentence_structure: sentence_structure.to_string(),
            word_order: metadata.map(|meta| meta.word_order.to_string()),
            morphology: root_meta.map(|meta| meta.morphology.as_str().to_string()),
            tense_system: root_meta.map(|meta| meta.tense_system.as_str().to_string()),
        }
    }
}

/// Target-language context; the root carries its metadata in the
/// grammatical insights instead.
fn cultural_context(metadata: Option<&LanguageMetadata>) -> CulturalContext {
    match metadata {
        Some(meta) => CulturalContext {
            conceptual_features: meta.conceptual_features.clone(),
            word_order: Some(meta.word_order.to_string()),
        },
        None => CulturalContext::default(),
    }
}
