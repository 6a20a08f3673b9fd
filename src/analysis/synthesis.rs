//! Synthesis of the root analysis, the unrelated analyses and the symbolic
//! layer into one `MultiLanguageInsight`.

use crate::analysis::model::{
    LanguageAnalysis, MultiLanguageInsight, SymbolicLayer, UniquePerspective,
    GRAMMATICAL_CONVERGENCE, SHARED_CONCEPTS, UNIQUE_EXPRESSIONS,
};
use crate::analysis::settings::InsightWeights;
use chrono::Utc;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

pub struct InsightSynthesizer<'a> {
    weights: &'a InsightWeights,
}

impl<'a> InsightSynthesizer<'a> {
    pub fn new(weights: &'a InsightWeights) -> Self {
        Self { weights }
    }

    pub fn synthesize(
        &self,
        root: LanguageAnalysis,
        unrelated: Vec<LanguageAnalysis>,
        symbolic: SymbolicLayer,
    ) -> MultiLanguageInsight {
        let (cross_linguistic_patterns, unique_perspectives, (convergent_meanings, divergent_meanings)) = {
            let all: Vec<&LanguageAnalysis> =
                std::iter::once(&root).chain(unrelated.iter()).collect();
            (
                cross_linguistic_patterns(&all),
                unique_perspectives(&all),
                meanings(&all),
            )
        };

        let shared = cross_linguistic_patterns
            .get(SHARED_CONCEPTS)
            .map_or(0, Vec::len);
        let distinctive = unique_perspectives
            .values()
            .filter(|p| p.is_distinctive())
            .count();

        let insight_score = if root.original_text.trim().is_empty() {
            0.0
        } else {
            let shared_ratio = if root.key_concepts.is_empty() {
                0.0
            } else {
                shared as f64 / root.key_concepts.len() as f64
            };
            let w = self.weights;
            (w.shared_concepts * shared_ratio
                + w.unique_perspective * distinctive as f64
                + w.convergent * convergent_meanings.len() as f64
                + w.divergent * divergent_meanings.len() as f64
                + w.transformation * symbolic.transformation_potential)
                .clamp(0.0, 1.0)
        };

        debug!(
            "Synthesis: {} shared concepts, {} convergent, {} divergent, score {:.3}",
            shared,
            convergent_meanings.len(),
            divergent_meanings.len(),
            insight_score
        );

        MultiLanguageInsight {
            root_analysis: root,
            unrelated_analyses: unrelated,
            symbolic_layer: symbolic,
            cross_linguistic_patterns,
            unique_perspectives,
            convergent_meanings,
            divergent_meanings,
            insight_score,
            created_at: Utc::now(),
        }
    }
}

fn cross_linguistic_patterns(all: &[&LanguageAnalysis]) -> BTreeMap<String, Vec<String>> {
    let mut patterns = BTreeMap::new();

    // Intersection of every concept set, in the root's order.
    let shared: Vec<String> = match all.split_first() {
        Some((root, others)) => root
            .key_concepts
            .iter()
            .filter(|concept| others.iter().all(|a| a.key_concepts.contains(concept)))
            .cloned()
            .collect(),
        None => Vec::new(),
    };
    patterns.insert(SHARED_CONCEPTS.to_string(), shared);

    let expressions = all
        .iter()
        .flat_map(|a| {
            a.unique_expressions
                .iter()
                .map(move |e| format!("{}: {}", a.language, e))
        })
        .collect();
    patterns.insert(UNIQUE_EXPRESSIONS.to_string(), expressions);

    if let Some(order) = majority_word_order(all) {
        patterns.insert(GRAMMATICAL_CONVERGENCE.to_string(), vec![order]);
    }

    patterns
}

/// Most frequent word order, if a strict majority of analyses share it.
fn majority_word_order(all: &[&LanguageAnalysis]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for analysis in all {
        if let Some(order) = analysis.grammatical_insights.word_order.as_deref() {
            match counts.iter_mut().find(|(seen, _)| *seen == order) {
                Some((_, count)) => *count += 1,
                None => counts.push((order, 1)),
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (order, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((order, count));
        }
    }

    best.filter(|(_, count)| count * 2 > all.len())
        .map(|(order, _)| order.to_string())
}

fn unique_perspectives(all: &[&LanguageAnalysis]) -> BTreeMap<String, UniquePerspective> {
    let mut perspectives = BTreeMap::new();

    for (index, analysis) in all.iter().enumerate() {
        let others = all
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .map(|(_, a)| a);

        let other_concepts: HashSet<&str> = others
            .flat_map(|other| other.key_concepts.iter().map(String::as_str))
            .collect();

        // A feature counts unless another language names it as a concept.
        let cultural_features: Vec<String> = analysis
            .cultural_context
            .conceptual_features
            .iter()
            .filter(|f| !other_concepts.contains(f.as_str()))
            .cloned()
            .collect();
        let unique_concepts: Vec<String> = analysis
            .key_concepts
            .iter()
            .filter(|c| !other_concepts.contains(c.as_str()))
            .cloned()
            .collect();

        let perspective = describe(analysis, &cultural_features);
        perspectives.insert(
            analysis.language.clone(),
            UniquePerspective {
                cultural_features,
                unique_concepts,
                perspective,
            },
        );
    }

    perspectives
}

fn describe(analysis: &LanguageAnalysis, exclusive: &[String]) -> String {
    let order = analysis
        .cultural_context
        .word_order
        .as_deref()
        .or(analysis.grammatical_insights.word_order.as_deref())
        .unwrap_or("unknown");
    let lens = if exclusive.is_empty() {
        "features shared with the other languages".to_string()
    } else {
        exclusive.join(", ")
    };
    format!(
        "{} ({} order, {}) frames the text through {}",
        analysis.language, order, analysis.grammatical_insights.sentence_structure, lens
    )
}

/// Semantic-field tags held by a majority (convergent) or by exactly one analysis (divergent).
fn meanings(all: &[&LanguageAnalysis]) -> (Vec<String>, Vec<String>) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for analysis in all {
        for tag in &analysis.semantic_field {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    let mut convergent = Vec::new();
    let mut divergent = Vec::new();
    for (tag, count) in counts {
        if count * 2 > all.len() {
            convergent.push(tag.to_string());
        } else if count == 1 {
            divergent.push(tag.to_string());
        }
    }

    (convergent, divergent)
}
