//! Look at a text through one root language and several maximally unrelated
//! ones, then through a symbolic layer, and merge the views into one insight.

pub mod analysis;
pub mod config;
pub mod error;
pub mod i18n;
pub mod retry;
pub mod translation;

pub use analysis::{AnalysisSettings, MultiLanguageAnalyzer, MultiLanguageInsight};
pub use error::{AnalysisError, AnalysisResult, TranslationError};
pub use i18n::LanguageRegistry;
pub use translation::Translator;
