//! Hosted speech synthesis adapter
//!
//! Single POST per clip; the provider streams back encoded MP3 audio.
//! Voices are selected per language, with Hindi doubling for Dogri.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

use crate::domain::DomainError;
use crate::domain::assist::SpeechProvider;

const SERVICE_NAME: &str = "speech-synthesis";

/// Hosted speech synthesis settings
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Voice used for English text
    #[serde(default = "default_voice_en")]
    pub voice_en: String,
    /// Voice used for Hindi and Dogri text
    #[serde(default = "default_voice_hi")]
    pub voice_hi: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_voice_en() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_voice_hi() -> String {
    "MF3mGyEYCl7XYWbV9V6O".to_string()
}

fn default_model() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Text-to-speech adapter for a hosted synthesis API
#[derive(Debug)]
pub struct HostedSpeechSynthesizer {
    client: reqwest::Client,
    config: SynthesisConfig,
}

impl HostedSpeechSynthesizer {
    pub fn new(config: SynthesisConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::dependency(SERVICE_NAME, format!("Failed to build client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    fn voice_for(&self, language: &str) -> &str {
        match language.to_lowercase().as_str() {
            "hi" | "doi" => &self.config.voice_hi,
            _ => &self.config.voice_en,
        }
    }
}

#[async_trait]
impl SpeechProvider for HostedSpeechSynthesizer {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Bytes, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::validation("Text to synthesize is empty"));
        }

        let response = self
            .client
            .post(format!(
                "{}/v1/text-to-speech/{}",
                self.config.base_url,
                self.voice_for(language)
            ))
            .header("xi-api-key", &self.config.api_key)
            .json(&serde_json::json!({
                "text": text,
                "model_id": self.config.model,
            }))
            .send()
            .await
            .map_err(|e| {
                DomainError::dependency(SERVICE_NAME, format!("Synthesis request failed: {}", e))
            })?
            .error_for_status()
            .map_err(|e| {
                DomainError::dependency(SERVICE_NAME, format!("Synthesis request failed: {}", e))
            })?;

        let audio = response.bytes().await.map_err(|e| {
            DomainError::dependency(SERVICE_NAME, format!("Failed to read audio body: {}", e))
        })?;

        if audio.is_empty() {
            return Err(DomainError::dependency(
                SERVICE_NAME,
                "Provider returned an empty audio body",
            ));
        }

        Ok(audio)
    }
}
