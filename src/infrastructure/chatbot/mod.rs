//! Hosted chatbot adapter

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::DomainError;
use crate::domain::assist::ChatProvider;

const SERVICE_NAME: &str = "chatbot";

/// Reply used when the hosted assistant cannot be reached. The API layer
/// returns this instead of surfacing the dependency failure.
pub const FALLBACK_REPLY: &str = "I'm having trouble connecting. Please try again in a moment.";

/// Hosted chat assistant settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChatbotConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Instructions prepended to every user message
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_system_prompt() -> String {
    "You are a helpful assistant for a marketplace connecting local artisans \
     with buyers. Answer briefly and in the user's language."
        .to_string()
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

/// Chat adapter for a hosted generative-language API
#[derive(Debug)]
pub struct HostedChatbot {
    client: reqwest::Client,
    config: ChatbotConfig,
}

impl HostedChatbot {
    pub fn new(config: ChatbotConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::dependency(SERVICE_NAME, format!("Failed to build client: {}", e))
            })?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ChatProvider for HostedChatbot {
    async fn reply(&self, message: &str) -> Result<String, DomainError> {
        if message.trim().is_empty() {
            return Err(DomainError::validation("Message is empty"));
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let response = self
            .client
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&serde_json::json!({
                "contents": [{
                    "parts": [{
                        "text": format!("{}\n\nUser: {}", self.config.system_prompt, message),
                    }],
                }],
            }))
            .send()
            .await
            .map_err(|e| {
                DomainError::dependency(SERVICE_NAME, format!("Chat request failed: {}", e))
            })?
            .error_for_status()
            .map_err(|e| {
                DomainError::dependency(SERVICE_NAME, format!("Chat request failed: {}", e))
            })?;

        let body: GenerateResponse = response.json().await.map_err(|e| {
            DomainError::dependency(SERVICE_NAME, format!("Malformed chat response: {}", e))
        })?;

        let text = body
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                DomainError::dependency(SERVICE_NAME, "Provider returned no reply text")
            })?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: String) -> ChatbotConfig {
        ChatbotConfig {
            api_key: "test-key".to_string(),
            base_url,
            model: "test-model".to_string(),
            timeout_secs: 5,
            system_prompt: "Be brief.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_reply_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/test-model:generateContent"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{"text": "Pashmina shawls are listed under handloom."}]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let chatbot = HostedChatbot::new(config(server.uri())).unwrap();
        let reply = chatbot.reply("Where are the shawls?").await.unwrap();

        assert_eq!(reply, "Pashmina shawls are listed under handloom.");
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let server = MockServer::start().await;
        let chatbot = HostedChatbot::new(config(server.uri())).unwrap();

        let result = chatbot.reply("  ").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/test-model:generateContent"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let chatbot = HostedChatbot::new(config(server.uri())).unwrap();
        let result = chatbot.reply("hello").await;

        assert!(matches!(result, Err(DomainError::Dependency { .. })));
    }

    #[tokio::test]
    async fn test_no_candidates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/test-model:generateContent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let chatbot = HostedChatbot::new(config(server.uri())).unwrap();
        let result = chatbot.reply("hello").await;

        assert!(matches!(result, Err(DomainError::Dependency { .. })));
    }
}
