//! The analysis engine.
//!
//! # Pipeline
//!
//! 1. `selector` picks the registered languages farthest from the root, using
//!    the metric in `distance`
//! 2. `language` analyzes the root text and each translation
//! 3. `symbolic` extracts archetypes, paradoxes and patterns across analyses
//! 4. `synthesis` merges everything into a `MultiLanguageInsight`
//!
//! `engine` drives the pipeline and owns the translation collaborator.
//! Every tunable number and trigger table lives in `settings`.
//!
//! # Example
//!
//! ```rust,ignore
//! use polyglot_insight::analysis::{AnalysisSettings, MultiLanguageAnalyzer};
//! use polyglot_insight::i18n::LanguageRegistry;
//! use polyglot_insight::translation::MockTranslator;
//!
//! let analyzer = MultiLanguageAnalyzer::new(
//!     LanguageRegistry::builtin(),
//!     MockTranslator::new(),
//!     AnalysisSettings::default(),
//! );
//! let insight = analyzer.analyze("The river remembers", "en", None).await?;
//! ```

mod distance;
mod engine;
mod language;
mod model;
mod selector;
mod settings;
mod symbolic;
mod synthesis;
pub(crate) mod text;

pub use distance::ConceptualDistance;
pub use engine::{MultiLanguageAnalyzer, DEFAULT_TRANSLATION_TIMEOUT, DEFAULT_UNRELATED_COUNT};
pub use language::PerLanguageAnalyzer;
pub use model::{
    CulturalContext, GrammaticalInsights, LanguageAnalysis, MultiLanguageInsight, Paradox,
    SymbolicLayer, UniquePerspective, GRAMMATICAL_CONVERGENCE, SHARED_CONCEPTS,
    UNIQUE_EXPRESSIONS,
};
pub use selector::LanguageSelector;
pub use settings::{
    AnalysisSettings, DistanceWeights, ExtractionSettings, InsightWeights, SymbolicSettings,
};
pub use symbolic::{
    SymbolicLayerExtractor, HIGH_CONCEPTUAL_DIVERGENCE, RECURSIVE_EMPHASIS, TRANSFORMATION_SIGNAL,
};
pub use synthesis::InsightSynthesizer;
