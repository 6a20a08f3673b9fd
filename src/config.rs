use crate::analysis::AnalysisSettings;
use crate::i18n::LanguageRegistry;
use crate::translation::OpenAiSettings;
use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Clone)]
pub struct Config {
    // OpenAI
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,

    // Analysis
    pub root_language: String,
    pub unrelated_languages: usize,
    pub translation_timeout_secs: u64,

    // Overrides
    pub registry_file: Option<String>,
    pub settings_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // OpenAI - optional, analysis degrades to placeholders without it
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),

            // Analysis
            root_language: std::env::var("ROOT_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
            unrelated_languages: std::env::var("UNRELATED_LANGUAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            translation_timeout_secs: std::env::var("TRANSLATION_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),

            // Overrides
            registry_file: std::env::var("LANGUAGE_REGISTRY_FILE").ok(),
            settings_file: std::env::var("ANALYSIS_SETTINGS_FILE").ok(),
        })
    }

    pub fn translation_timeout(&self) -> Duration {
        Duration::from_secs(self.translation_timeout_secs)
    }

    /// OpenAI connection settings, if an API key is configured.
    pub fn openai_settings(&self) -> Option<OpenAiSettings> {
        self.openai_api_key.as_ref().map(|api_key| OpenAiSettings {
            api_key: api_key.clone(),
            model: self.openai_model.clone(),
            api_url: self.openai_api_url.clone(),
            max_tokens: 2000,
        })
    }

    /// The registry file if one is configured, the built-in table otherwise.
    pub fn load_registry(&self) -> Result<LanguageRegistry> {
        match &self.registry_file {
            Some(path) => LanguageRegistry::from_json_file(path)
                .with_context(|| format!("Failed to load language registry from {}", path)),
            None => Ok(LanguageRegistry::builtin()),
        }
    }

    pub fn load_settings(&self) -> Result<AnalysisSettings> {
        match &self.settings_file {
            Some(path) => AnalysisSettings::from_json_file(path)
                .with_context(|| format!("Failed to load analysis settings from {}", path)),
            None => Ok(AnalysisSettings::default()),
        }
    }
}
