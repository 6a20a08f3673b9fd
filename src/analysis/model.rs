//! Data produced by the analysis pipeline.
//!
//! Every type here is built once by the stage that owns it and is read-only
//! afterwards. Maps and sets are ordered so identical inputs serialize to
//! identical output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Cultural context attached to one language rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CulturalContext {
    /// Conceptual features of the language (empty without metadata).
    pub conceptual_features: Vec<String>,
    pub word_order: Option<String>,
}

/// Surface grammar of one rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrammaticalInsights {
    pub word_count: usize,
    pub avg_word_length: f64,
    /// "simple" below the short-text threshold, "complex" otherwise, "empty" for no words.
    pub sentence_structure: String,
    pub word_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morphology: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tense_system: Option<String>,
}

/// Analysis of the text rendered in a single language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageAnalysis {
    pub language: String,
    pub original_text: String,
    /// `None` for the root language.
    pub translated_text: Option<String>,
    pub key_concepts: Vec<String>,
    /// Concepts the translation introduced that the source text lacks.
    pub unique_expressions: Vec<String>,
    pub metaphors: Vec<String>,
    pub cultural_context: CulturalContext,
    pub grammatical_insights: GrammaticalInsights,
    pub semantic_field: BTreeSet<String>,
    pub confidence: f64,
}

impl LanguageAnalysis {
    /// The text this analysis was extracted from.
    pub fn rendered_text(&self) -> &str {
        self.translated_text.as_deref().unwrap_or(&self.original_text)
    }
}

/// Two languages whose semantic fields carry opposite tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paradox {
    pub languages: (String, String),
    pub opposites: (String, String),
    pub description: String,
}

/// Patterns that belong to no single language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolicLayer {
    pub archetypes: BTreeSet<String>,
    pub paradoxes: Vec<Paradox>,
    pub chaos_patterns: Vec<String>,
    pub emergent_symbols: Vec<String>,
    /// Each side is formatted as "{language}: {metaphor}".
    pub contradictions: Vec<(String, String)>,
    pub transformation_potential: f64,
}

/// What one language sees that the others do not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniquePerspective {
    pub cultural_features: Vec<String>,
    pub unique_concepts: Vec<String>,
    pub perspective: String,
}

impl UniquePerspective {
    pub fn is_distinctive(&self) -> bool {
        !self.cultural_features.is_empty() || !self.unique_concepts.is_empty()
    }
}

/// Final product of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLanguageInsight {
    pub root_analysis: LanguageAnalysis,
    pub unrelated_analyses: Vec<LanguageAnalysis>,
    pub symbolic_layer: SymbolicLayer,
    pub cross_linguistic_patterns: BTreeMap<String, Vec<String>>,
    pub unique_perspectives: BTreeMap<String, UniquePerspective>,
    pub convergent_meanings: Vec<String>,
    pub divergent_meanings: Vec<String>,
    pub insight_score: f64,
    pub created_at: DateTime<Utc>,
}

impl MultiLanguageInsight {
    /// Root first, then unrelated languages in selection order.
    pub fn all_analyses(&self) -> impl Iterator<Item = &LanguageAnalysis> {
        std::iter::once(&self.root_analysis).chain(self.unrelated_analyses.iter())
    }

    pub fn shared_concepts(&self) -> &[String] {
        self.cross_linguistic_patterns
            .get(SHARED_CONCEPTS)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

pub const SHARED_CONCEPTS: &str = "shared_concepts";
pub const UNIQUE_EXPRESSIONS: &str = "unique_expressions";
pub const GRAMMATICAL_CONVERGENCE: &str = "grammatical_convergence";
