//! The multi-language analyzer: one root, N unrelated languages, one symbolic layer.
//!
//! This is the only component that talks to the translation collaborator.
//! Translations for the selected languages run concurrently, each under its
//! own deadline; every failure degrades to a placeholder analysis.

use crate::analysis::distance::ConceptualDistance;
use crate::analysis::language::PerLanguageAnalyzer;
use crate::analysis::model::{LanguageAnalysis, MultiLanguageInsight};
use crate::analysis::selector::LanguageSelector;
use crate::analysis::settings::AnalysisSettings;
use crate::analysis::symbolic::SymbolicLayerExtractor;
use crate::analysis::synthesis::InsightSynthesizer;
use crate::error::{AnalysisError, AnalysisResult, TranslationError};
use crate::i18n::LanguageRegistry;
use crate::translation::{placeholder_translation, TranslationMetrics, Translator};
use futures::future::join_all;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default number of unrelated languages (the "3" in 1 + 3 + 1).
pub const DEFAULT_UNRELATED_COUNT: usize = 3;

/// Default per-call translation deadline.
pub const DEFAULT_TRANSLATION_TIMEOUT: Duration = Duration::from_secs(30);

/// How one unrelated language got its text.
enum Rendering {
    Translated(String),
    Placeholder(String),
}

pub struct MultiLanguageAnalyzer<T: Translator> {
    registry: LanguageRegistry,
    translator: T,
    settings: AnalysisSettings,
    unrelated_count: usize,
    translation_timeout: Duration,
    metrics: TranslationMetrics,
}

impl<T: Translator> MultiLanguageAnalyzer<T> {
    pub fn new(registry: LanguageRegistry, translator: T, settings: AnalysisSettings) -> Self {
        Self {
            registry,
            translator,
            settings,
            unrelated_count: DEFAULT_UNRELATED_COUNT,
            translation_timeout: DEFAULT_TRANSLATION_TIMEOUT,
            metrics: TranslationMetrics::new(),
        }
    }

    /// Number of unrelated languages picked when no targets are given.
    pub fn with_unrelated_count(mut self, count: usize) -> Self {
        self.unrelated_count = count;
        self
    }

    pub fn with_translation_timeout(mut self, timeout: Duration) -> Self {
        self.translation_timeout = timeout;
        self
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Conceptual distance between two language codes.
    pub fn distance(&self, a: &str, b: &str) -> f64 {
        ConceptualDistance::new(&self.registry, &self.settings.distance).distance(a, b)
    }

    /// The languages farthest from `root`, chosen from the whole registry.
    pub fn select_unrelated(&self, root: &str) -> Vec<String> {
        let metric = ConceptualDistance::new(&self.registry, &self.settings.distance);
        let pool = self.registry.codes();
        LanguageSelector::new(metric).select(root, &pool, self.unrelated_count)
    }

    /// Analyze `text` from the root language and from unrelated languages.
    ///
    /// With `targets` the given languages are used as-is (root and duplicates
    /// removed); without, the most unrelated registered languages are chosen.
    ///
    /// # Returns
    /// * `Err(AnalysisError::UnsupportedRootLanguage)` if `root` is not registered
    /// * `Ok(insight)` otherwise, degraded but complete on translation failures
    pub async fn analyze(
        &self,
        text: &str,
        root: &str,
        targets: Option<&[&str]>,
    ) -> AnalysisResult<MultiLanguageInsight> {
        if !self.registry.contains(root) {
            return Err(AnalysisError::UnsupportedRootLanguage(root.to_string()));
        }

        let languages = match targets {
            Some(explicit) => dedupe_targets(root, explicit),
            None => {
                let selected = self.select_unrelated(root);
                if selected.len() < self.unrelated_count {
                    warn!(
                        "Only {} of {} unrelated languages available for root '{}'",
                        selected.len(),
                        self.unrelated_count,
                        root
                    );
                }
                selected
            }
        };
        info!("Analyzing from '{}' through {:?}", root, languages);

        let analyzer = PerLanguageAnalyzer::new(&self.registry, &self.settings.extraction);
        let root_analysis = analyzer.analyze_root(text, root);

        let unrelated_analyses: Vec<LanguageAnalysis> = if text.trim().is_empty() {
            info!("Input text is empty, skipping translation");
            languages
                .iter()
                .map(|lang| analyzer.analyze_translation(text, text, lang))
                .collect()
        } else {
            let renderings = join_all(
                languages
                    .iter()
                    .map(|lang| self.render(text, root, lang.as_str())),
            )
            .await;

            languages
                .iter()
                .zip(renderings)
                .map(|(lang, rendering)| match rendering {
                    Rendering::Translated(translated) => {
                        analyzer.analyze_translation(text, &translated, lang)
                    }
                    Rendering::Placeholder(placeholder) => {
                        analyzer.analyze_placeholder(text, &placeholder, lang)
                    }
                })
                .collect()
        };

        let symbolic = {
            let all: Vec<&LanguageAnalysis> = std::iter::once(&root_analysis)
                .chain(unrelated_analyses.iter())
                .collect();
            SymbolicLayerExtractor::new(&self.settings.symbolic).extract(text, &all)
        };

        let insight = InsightSynthesizer::new(&self.settings.insight).synthesize(
            root_analysis,
            unrelated_analyses,
            symbolic,
        );

        info!(
            "Analysis complete: {} perspectives, insight score {:.3}",
            insight.unrelated_analyses.len() + 1,
            insight.insight_score
        );
        Ok(insight)
    }

    /// Translate into one language, falling back to a placeholder.
    async fn render(&self, text: &str, root: &str, target: &str) -> Rendering {
        self.metrics.record_request();

        let outcome = tokio::time::timeout(
            self.translation_timeout,
            self.translator.translate(text, root, target),
        )
        .await
        .unwrap_or_else(|_| {
            Err(TranslationError::Timeout {
                target: target.to_string(),
                limit: self.translation_timeout,
            })
        });

        match outcome {
            Ok(translated) => {
                self.metrics.record_success();
                debug!("Translation into '{}' succeeded", target);
                Rendering::Translated(translated)
            }
            Err(e) => {
                if matches!(e, TranslationError::Timeout { .. }) {
                    self.metrics.record_timeout();
                } else {
                    self.metrics.record_failure();
                }
                self.metrics.record_placeholder();
                warn!("Translation into '{}' unavailable, using placeholder: {}", target, e);
                Rendering::Placeholder(placeholder_translation(text, target))
            }
        }
    }
}

/// Explicit targets in the given order, without the root or repeats.
fn dedupe_targets(root: &str, targets: &[&str]) -> Vec<String> {
    let mut languages: Vec<String> = Vec::with_capacity(targets.len());
    for &target in targets {
        if target != root && !languages.iter().any(|l| l == target) {
            languages.push(target.to_string());
        }
    }
    languages
}
