//! Deterministic in-memory translator.

use crate::error::TranslationError;
use crate::translation::Translator;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Returns a fixed text per target language, echoing the input otherwise.
///
/// Targets can be marked as failing (503) and a delay can be added to
/// exercise timeouts.
#[derive(Debug, Default)]
pub struct MockTranslator {
    responses: HashMap<String, String>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer `text` when translating into `target`.
    pub fn with_response(mut self, target: &str, text: &str) -> Self {
        self.responses.insert(target.to_string(), text.to_string());
        self
    }

    /// Fail every translation into `target`.
    pub fn failing_for(mut self, target: &str) -> Self {
        self.failing.insert(target.to_string());
        self
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of translate calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.contains(target) {
            return Err(TranslationError::Api {
                status: 503,
                body: format!("mock backend unavailable for '{}'", target),
            });
        }

        Ok(self
            .responses
            .get(target)
            .cloned()
            .unwrap_or_else(|| text.to_string()))
    }
}
