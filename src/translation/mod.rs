//! The translation collaborator.
//!
//! The engine only ever sees the narrow `Translator` trait. Failures are
//! never fatal: the engine substitutes `placeholder_translation` and lowers
//! the confidence of the resulting analysis.
//!
//! - `openai`: chat-completions backend with retry and validation
//! - `mock`: deterministic in-memory backend for tests and offline runs
//! - `validator`: post-translation sanity checks
//! - `metrics`: request/success/failure counters

mod metrics;
mod mock;
mod openai;
mod validator;

pub use metrics::{MetricsReport, TranslationMetrics};
pub use mock::MockTranslator;
pub use openai::{OpenAiSettings, OpenAiTranslator};
pub use validator::{TranslationValidator, ValidationReport};

use crate::error::TranslationError;
use async_trait::async_trait;
use std::sync::Arc;

/// Translate `text` from `source` into `target` (language codes).
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;
}

#[async_trait]
impl<T: Translator + ?Sized> Translator for Arc<T> {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        (**self).translate(text, source, target).await
    }
}

#[async_trait]
impl<T: Translator + ?Sized> Translator for Box<T> {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        (**self).translate(text, source, target).await
    }
}

/// Backend used when no translation service is configured.
///
/// Every call fails, so every unrelated language is analyzed from a placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTranslator;

#[async_trait]
impl Translator for OfflineTranslator {
    async fn translate(
        &self,
        _text: &str,
        _source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        Err(TranslationError::Unsupported {
            target: target.to_string(),
        })
    }
}

/// Stand-in text for a translation that could not be obtained.
pub fn placeholder_translation(text: &str, target: &str) -> String {
    format!("[{}] {}", target, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_format() {
        assert_eq!(placeholder_translation("the sky", "ja"), "[ja] the sky");
    }

    #[test]
    fn test_offline_translator_always_fails() {
        let result = tokio_test::block_on(OfflineTranslator.translate("hello", "en", "ja"));
        assert_eq!(
            result,
            Err(TranslationError::Unsupported {
                target: "ja".to_string()
            })
        );
    }

    #[test]
    fn test_boxed_translator_delegates() {
        let boxed: Box<dyn Translator> = Box::new(MockTranslator::new().with_response("ja", "sora"));
        let result = tokio_test::block_on(boxed.translate("sky", "en", "ja"));
        assert_eq!(result, Ok("sora".to_string()));
    }

    #[test]
    fn test_arc_translator_delegates() {
        let shared = Arc::new(MockTranslator::new());
        let result = tokio_test::block_on(shared.translate("sky", "en", "sw"));
        assert_eq!(result, Ok("sky".to_string()));
        assert_eq!(shared.call_count(), 1);
    }
}
