//! Language metadata and the registry that holds it.
//!
//! # Architecture
//!
//! - `metadata`: `LanguageMetadata` and the categorical tags it is made of
//! - `registry`: immutable, injectable table of supported languages
//!
//! # Example
//!
//! ```rust,ignore
//! use polyglot_insight::i18n::LanguageRegistry;
//!
//! let registry = LanguageRegistry::builtin();
//! let japanese = registry.get_by_code("ja").expect("registered");
//! ```

mod metadata;
mod registry;

pub use metadata::{
    LanguageFamily, LanguageMetadata, Morphology, Script, TenseSystem, WordOrder,
};
pub use registry::LanguageRegistry;
