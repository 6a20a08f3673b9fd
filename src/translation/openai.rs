use crate::error::TranslationError;
use crate::retry::{with_retry_if, RetryConfig};
use crate::translation::{TranslationValidator, Translator};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// OpenAI Chat Completion request for translation
#[derive(Debug, Serialize)]
struct TranslationRequest {
    model: String,
    messages: Vec<Message>,
    max_completion_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<String>,
}

/// Check if a model is a reasoning model that doesn't support temperature
fn is_reasoning_model(model: &str) -> bool {
    model.starts_with("gpt-5")
        || model.starts_with("o1")
        || model.starts_with("o3")
        || model.starts_with("o4")
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Connection settings for the OpenAI backend.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub max_tokens: u32,
}

/// Build the system prompt for translation
fn build_translation_system_prompt(source: &str, target: &str) -> String {
    format!(
        r#"You are a professional translator. Translate the user's text from the language with ISO 639-1 code "{}" into the language with ISO 639-1 code "{}".

## Translation Rules
- Render the meaning the way a native speaker of the target language would express it
- Prefer the target language's own idioms and metaphors over literal word-for-word renderings
- Keep numbers and URLs exactly as written
- Do not add explanations, notes, or transliterations

Output ONLY the translated text."#,
        source, target
    )
}

/// Translator backed by the OpenAI chat-completions API.
pub struct OpenAiTranslator {
    client: reqwest::Client,
    settings: OpenAiSettings,
    retry: RetryConfig,
}

impl OpenAiTranslator {
    pub fn new(settings: OpenAiSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
            retry: RetryConfig::translation(),
        }
    }

    /// Override the retry policy (tests use a single attempt).
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn build_request(&self, text: &str, source: &str, target: &str) -> TranslationRequest {
        // Reasoning models need higher token limits and don't support temperature
        let is_reasoning = is_reasoning_model(&self.settings.model);
        let max_completion_tokens = if is_reasoning {
            16000
        } else {
            self.settings.max_tokens
        };

        TranslationRequest {
            model: self.settings.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: build_translation_system_prompt(source, target),
                },
                Message {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            max_completion_tokens,
            temperature: if is_reasoning { None } else { Some(0.3) },
            reasoning_effort: if is_reasoning {
                Some("low".to_string())
            } else {
                None
            },
        }
    }

    async fn send(&self, request: &TranslationRequest) -> Result<String, TranslationError> {
        let response = self
            .client
            .post(&self.settings.api_url)
            .header("Authorization", format!("Bearer {}", self.settings.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslationError::Api { status, body });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Request(format!("invalid response body: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(TranslationError::EmptyResponse)
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        if source == target {
            return Ok(text.to_string());
        }

        let request = self.build_request(text, source, target);
        let translated = with_retry_if(
            &self.retry,
            &format!("Translation {} -> {}", source, target),
            || self.send(&request),
            TranslationError::is_retryable,
        )
        .await?;

        let validation = TranslationValidator::validate(text, &translated);
        if validation.has_warnings() {
            warn!(
                "Translation validation warnings for {}: {:?}",
                target, validation.warnings
            );
        }
        if validation.has_errors() {
            warn!(
                "Translation validation errors for {}: {:?}",
                target, validation.errors
            );
            return Err(TranslationError::EmptyResponse);
        }

        debug!("Translated {} chars into {}", translated.len(), target);
        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_test_translator(api_url: &str) -> OpenAiTranslator {
        OpenAiTranslator::new(OpenAiSettings {
            api_key: "test-openai-key".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_url: api_url.to_string(),
            max_tokens: 2000,
        })
        .with_retry(RetryConfig::single_attempt())
    }

    fn create_openai_response(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": content
                    },
                    "finish_reason": "stop"
                }
            ]
        })
    }

    // ==================== Prompt Tests ====================

    #[test]
    fn test_system_prompt_names_both_languages() {
        let prompt = build_translation_system_prompt("en", "ja");
        assert!(prompt.contains("\"en\""));
        assert!(prompt.contains("\"ja\""));
        assert!(prompt.contains("idioms"));
        assert!(prompt.contains("Output ONLY"));
    }

    #[test]
    fn test_is_reasoning_model() {
        assert!(is_reasoning_model("gpt-5-mini"));
        assert!(is_reasoning_model("o3"));
        assert!(!is_reasoning_model("gpt-4o-mini"));
    }

    // ==================== Request Structure Tests ====================

    #[test]
    fn test_request_serialization_standard_model() {
        let translator = create_test_translator("http://unused");
        let request = translator.build_request("Hello world", "en", "sw");

        let json = serde_json::to_string(&request).expect("Should serialize");
        assert!(json.contains("gpt-4o-mini"));
        assert!(json.contains("0.3"));
        assert!(json.contains("\"max_completion_tokens\":2000"));
        assert!(json.contains("Hello world"));
        assert!(!json.contains("reasoning_effort"));
    }

    #[test]
    fn test_request_serialization_reasoning_model() {
        let mut translator = create_test_translator("http://unused");
        translator.settings.model = "o3-mini".to_string();
        let request = translator.build_request("Hello", "en", "sw");

        let json = serde_json::to_string(&request).expect("Should serialize");
        assert!(json.contains("\"reasoning_effort\":\"low\""));
        assert!(json.contains("16000"));
        assert!(!json.contains("temperature"));
    }

    // ==================== Integration Tests with Wiremock ====================

    #[tokio::test]
    async fn test_same_language_skips_request() {
        let translator = create_test_translator("http://127.0.0.1:1/unreachable");
        let result = translator.translate("The sky", "en", "en").await;
        assert_eq!(result, Ok("The sky".to_string()));
    }

    #[tokio::test]
    async fn test_translate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-openai-key"))
            .and(body_partial_json(serde_json::json!({ "model": "gpt-4o-mini" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(create_openai_response("Anga ni bluu")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let translator =
            create_test_translator(&format!("{}/v1/chat/completions", mock_server.uri()));
        let result = translator.translate("The sky is blue", "en", "sw").await;

        assert_eq!(result, Ok("Anga ni bluu".to_string()));
    }

    #[tokio::test]
    async fn test_translate_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let translator =
            create_test_translator(&format!("{}/v1/chat/completions", mock_server.uri()));
        let err = translator.translate("Test", "en", "ja").await.unwrap_err();

        assert_eq!(
            err,
            TranslationError::Api {
                status: 500,
                body: "Internal Server Error".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_translate_client_error_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let translator = create_test_translator(&format!("{}/v1/chat/completions", mock_server.uri()))
            .with_retry(RetryConfig::new(3, std::time::Duration::from_millis(5)));
        let err = translator.translate("Test", "en", "ja").await.unwrap_err();

        assert!(matches!(err, TranslationError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_translate_server_error_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(2)
            .mount(&mock_server)
            .await;

        let translator = create_test_translator(&format!("{}/v1/chat/completions", mock_server.uri()))
            .with_retry(RetryConfig::new(2, std::time::Duration::from_millis(5)));
        let result = translator.translate("Test", "en", "ja").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_translate_empty_choices() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&mock_server)
            .await;

        let translator =
            create_test_translator(&format!("{}/v1/chat/completions", mock_server.uri()));
        let err = translator.translate("Original", "en", "ja").await.unwrap_err();

        assert_eq!(err, TranslationError::EmptyResponse);
        assert!(err.to_string().contains("no choices"));
    }

    #[tokio::test]
    async fn test_translate_blank_content_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(create_openai_response("  ")))
            .mount(&mock_server)
            .await;

        let translator =
            create_test_translator(&format!("{}/v1/chat/completions", mock_server.uri()));
        let result = translator.translate("The river remembers", "en", "ja").await;

        assert_eq!(result, Err(TranslationError::EmptyResponse));
    }
}
