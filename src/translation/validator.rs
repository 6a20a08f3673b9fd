//! Translation quality validation.
//!
//! A translation is only rejected when it is empty. Everything else (numbers
//! or URLs that went missing, text that came back untranslated) is reported
//! as a warning and the translation is still used.

use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Critical errors that make the translation unusable
    pub errors: Vec<String>,

    /// Non-critical warnings about potential issues
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

/// Validator for translation quality.
pub struct TranslationValidator;

static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate a translation against its source text.
    ///
    /// Checks that:
    /// - the translation is not empty (error)
    /// - the translation differs from a multi-word source (warning)
    /// - numbers are preserved (warning)
    /// - URLs are preserved (warning)
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        if translated.trim().is_empty() {
            if !original.trim().is_empty() {
                report.errors.push("Translation is empty".to_string());
            }
            return report;
        }

        if original.split_whitespace().count() > 1 && original.trim() == translated.trim() {
            report
                .warnings
                .push("Translation is identical to the source text".to_string());
        }

        let orig_numbers = Self::extract_numbers(original);
        let trans_numbers = Self::extract_numbers(translated);
        if orig_numbers != trans_numbers {
            report.warnings.push(format!(
                "Number mismatch: original has {:?}, translation has {:?}",
                orig_numbers, trans_numbers
            ));
        }

        let orig_urls = Self::extract_urls(original);
        let trans_urls = Self::extract_urls(translated);
        if orig_urls != trans_urls {
            report.warnings.push(format!(
                "URL mismatch: original has {} URLs, translation has {} URLs",
                orig_urls.len(),
                trans_urls.len()
            ));
        }

        report
    }

    /// Extract all numbers from text, in order
    fn extract_numbers(text: &str) -> Vec<String> {
        let regex = NUMBER_REGEX.get_or_init(|| Regex::new(r"\d+(?:[.,]\d+)?").expect("static regex"));

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Extract all URLs from text
    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"https?://[^\s)\]]+").expect("static regex"));

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
