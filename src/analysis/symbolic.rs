//! The symbolic layer: archetypes, paradoxes, contradictions, chaos patterns
//! and emergent symbols that no single language carries on its own.

use crate::analysis::model::{LanguageAnalysis, Paradox, SymbolicLayer};
use crate::analysis::settings::SymbolicSettings;
use crate::analysis::text;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub const RECURSIVE_EMPHASIS: &str = "recursive_emphasis";
pub const HIGH_CONCEPTUAL_DIVERGENCE: &str = "high_conceptual_divergence";
pub const TRANSFORMATION_SIGNAL: &str = "transformation_signal";

pub struct SymbolicLayerExtractor<'a> {
    settings: &'a SymbolicSettings,
}

impl<'a> SymbolicLayerExtractor<'a> {
    pub fn new(settings: &'a SymbolicSettings) -> Self {
        Self { settings }
    }

    /// Derive the symbolic layer of `text` from every language analysis.
    pub fn extract(&self, text: &str, analyses: &[&LanguageAnalysis]) -> SymbolicLayer {
        let source_words = text::words(text);

        let archetypes = self.archetypes(&source_words, analyses);
        let paradoxes = self.paradoxes(analyses);
        let contradictions = self.contradictions(analyses);
        let chaos_patterns = self.chaos_patterns(&source_words, analyses);
        let emergent_symbols = self.emergent_symbols(analyses);

        let s = self.settings;
        let transformation_potential = (archetypes.len() as f64 * s.archetype_weight
            + paradoxes.len() as f64 * s.paradox_weight
            + chaos_patterns.len() as f64 * s.chaos_weight
            + contradictions.len() as f64 * s.contradiction_weight
            + emergent_symbols.len() as f64 * s.emergent_weight)
            .clamp(0.0, 1.0);

        debug!(
            "Symbolic layer: {} archetypes, {} paradoxes, {} contradictions, {} chaos patterns, {} emergent symbols",
            archetypes.len(),
            paradoxes.len(),
            contradictions.len(),
            chaos_patterns.len(),
            emergent_symbols.len()
        );

        SymbolicLayer {
            archetypes,
            paradoxes,
            chaos_patterns,
            emergent_symbols,
            contradictions,
            transformation_potential,
        }
    }

    /// Archetypes whose trigger words appear in the source, any rendering, or any concept.
    fn archetypes(
        &self,
        source_words: &[String],
        analyses: &[&LanguageAnalysis],
    ) -> BTreeSet<String> {
        let mut vocabulary: Vec<String> = source_words.to_vec();
        for analysis in analyses {
            if let Some(translated) = &analysis.translated_text {
                vocabulary.extend(text::words(translated));
            }
            vocabulary.extend(analysis.key_concepts.iter().cloned());
        }

        self.settings
            .archetypes
            .iter()
            .filter(|(_, triggers)| text::mentions_any(&vocabulary, triggers))
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// One record per opposite pair split across two languages' semantic fields.
    fn paradoxes(&self, analyses: &[&LanguageAnalysis]) -> Vec<Paradox> {
        let mut paradoxes = Vec::new();

        for (i, first) in analyses.iter().enumerate() {
            for second in &analyses[i + 1..] {
                for (a, b) in &self.settings.paradox_opposites {
                    let (left, right) = (&first.semantic_field, &second.semantic_field);
                    let split = if left.contains(a) && right.contains(b) {
                        Some((a, b))
                    } else if left.contains(b) && right.contains(a) {
                        Some((b, a))
                    } else {
                        None
                    };

                    if let Some((x, y)) = split {
                        paradoxes.push(Paradox {
                            languages: (first.language.clone(), second.language.clone()),
                            opposites: (x.clone(), y.clone()),
                            description: format!("{} vs {} perspective", x, y),
                        });
                    }
                }
            }
        }

        paradoxes
    }

    /// Metaphor pairs from different languages that use opposite words.
    fn contradictions(&self, analyses: &[&LanguageAnalysis]) -> Vec<(String, String)> {
        let tagged: Vec<(usize, &str, &str, Vec<String>)> = analyses
            .iter()
            .enumerate()
            .flat_map(|(index, analysis)| {
                analysis.metaphors.iter().map(move |metaphor| {
                    (
                        index,
                        analysis.language.as_str(),
                        metaphor.as_str(),
                        text::words(metaphor),
                    )
                })
            })
            .collect();

        let mut contradictions = Vec::new();
        for (i, (index_a, lang_a, metaphor_a, words_a)) in tagged.iter().enumerate() {
            for (index_b, lang_b, metaphor_b, words_b) in &tagged[i + 1..] {
                if index_a == index_b {
                    continue;
                }

                let opposed = self.settings.contradiction_opposites.iter().any(|(x, y)| {
                    (words_a.contains(x) && words_b.contains(y))
                        || (words_a.contains(y) && words_b.contains(x))
                });
                if opposed {
                    contradictions.push((
                        format!("{}: {}", lang_a, metaphor_a),
                        format!("{}: {}", lang_b, metaphor_b),
                    ));
                }
            }
        }

        contradictions
    }

    fn chaos_patterns(&self, source_words: &[String], analyses: &[&LanguageAnalysis]) -> Vec<String> {
        let mut patterns = Vec::new();

        if let Some(first) = source_words.first() {
            let occurrences = source_words.iter().filter(|w| *w == first).count();
            if occurrences > self.settings.recursion_threshold {
                patterns.push(RECURSIVE_EMPHASIS.to_string());
            }
        }

        let distinct: BTreeSet<&str> = analyses
            .iter()
            .flat_map(|a| a.key_concepts.iter().map(String::as_str))
            .collect();
        if distinct.len() as f64 > self.settings.divergence_factor * analyses.len() as f64 {
            patterns.push(HIGH_CONCEPTUAL_DIVERGENCE.to_string());
        }

        if text::mentions_any(source_words, &self.settings.change_words) {
            patterns.push(TRANSFORMATION_SIGNAL.to_string());
        }

        patterns
    }

    /// Concepts grouped by a short prefix; groups of two or more become symbols.
    fn emergent_symbols(&self, analyses: &[&LanguageAnalysis]) -> Vec<String> {
        let mut groups: BTreeMap<String, BTreeSet<(&str, &str)>> = BTreeMap::new();
        for analysis in analyses {
            for concept in &analysis.key_concepts {
                let prefix = text::char_prefix(concept, self.settings.emergent_prefix_length);
                groups
                    .entry(prefix)
                    .or_default()
                    .insert((analysis.language.as_str(), concept.as_str()));
            }
        }

        groups
            .into_iter()
            .filter(|(_, members)| members.len() >= 2)
            .map(|(prefix, _)| format!("emergent:{}", prefix))
            .collect()
    }
}
