//! Hosted transcription adapter
//!
//! Upload-then-poll flow: the audio clip is uploaded first, a transcript
//! job is created for it, and the job is polled until it completes. Every
//! request carries an explicit timeout and polling is bounded, so a stuck
//! provider turns into a dependency error instead of a hung request.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

use crate::domain::DomainError;
use crate::domain::assist::{Transcription, TranscriptionProvider};

const SERVICE_NAME: &str = "transcription";

/// Hosted transcription service settings
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Delay between polls in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Maximum number of polls before giving up
    #[serde(default = "default_poll_attempts")]
    pub poll_attempts: u32,
}

fn default_base_url() -> String {
    "https://api.assemblyai.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    1500
}

fn default_poll_attempts() -> u32 {
    40
}

/// Maps a marketplace language code to one the provider understands.
/// Dogri is not supported upstream; Hindi is the closest match.
fn provider_language(code: &str) -> &'static str {
    match code.to_lowercase().as_str() {
        "hi" | "doi" => "hi",
        _ => "en",
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    id: String,
    status: String,
    text: Option<String>,
    confidence: Option<f64>,
    error: Option<String>,
}

/// Speech-to-text adapter for a hosted transcription API
#[derive(Debug)]
pub struct HostedTranscriber {
    client: reqwest::Client,
    config: TranscriptionConfig,
}

impl HostedTranscriber {
    pub fn new(config: TranscriptionConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::dependency(SERVICE_NAME, format!("Failed to build client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    async fn upload(&self, audio: Bytes) -> Result<String, DomainError> {
        let response = self
            .client
            .post(format!("{}/v2/upload", self.config.base_url))
            .header("authorization", &self.config.api_key)
            .body(audio)
            .send()
            .await
            .map_err(|e| DomainError::dependency(SERVICE_NAME, format!("Upload failed: {}", e)))?
            .error_for_status()
            .map_err(|e| DomainError::dependency(SERVICE_NAME, format!("Upload failed: {}", e)))?;

        let body: UploadResponse = response.json().await.map_err(|e| {
            DomainError::dependency(SERVICE_NAME, format!("Malformed upload response: {}", e))
        })?;

        Ok(body.upload_url)
    }

    async fn create_job(&self, audio_url: &str, language: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .post(format!("{}/v2/transcript", self.config.base_url))
            .header("authorization", &self.config.api_key)
            .json(&serde_json::json!({
                "audio_url": audio_url,
                "language_code": provider_language(language),
            }))
            .send()
            .await
            .map_err(|e| {
                DomainError::dependency(SERVICE_NAME, format!("Job creation failed: {}", e))
            })?
            .error_for_status()
            .map_err(|e| {
                DomainError::dependency(SERVICE_NAME, format!("Job creation failed: {}", e))
            })?;

        let body: TranscriptResponse = response.json().await.map_err(|e| {
            DomainError::dependency(SERVICE_NAME, format!("Malformed job response: {}", e))
        })?;

        Ok(body.id)
    }

    async fn poll(&self, job_id: &str) -> Result<TranscriptResponse, DomainError> {
        for _ in 0..self.config.poll_attempts {
            let response = self
                .client
                .get(format!("{}/v2/transcript/{}", self.config.base_url, job_id))
                .header("authorization", &self.config.api_key)
                .send()
                .await
                .map_err(|e| DomainError::dependency(SERVICE_NAME, format!("Poll failed: {}", e)))?
                .error_for_status()
                .map_err(|e| {
                    DomainError::dependency(SERVICE_NAME, format!("Poll failed: {}", e))
                })?;

            let body: TranscriptResponse = response.json().await.map_err(|e| {
                DomainError::dependency(SERVICE_NAME, format!("Malformed poll response: {}", e))
            })?;

            match body.status.as_str() {
                "completed" => return Ok(body),
                "error" => {
                    return Err(DomainError::dependency(
                        SERVICE_NAME,
                        body.error
                            .unwrap_or_else(|| "Transcription job failed".to_string()),
                    ));
                }
                _ => {
                    tokio::time::sleep(Duration::from_millis(self.config.poll_interval_ms)).await;
                }
            }
        }

        Err(DomainError::dependency(
            SERVICE_NAME,
            "Transcription job did not complete in time",
        ))
    }
}

#[async_trait]
impl TranscriptionProvider for HostedTranscriber {
    async fn transcribe(&self, audio: Bytes, language: &str) -> Result<Transcription, DomainError> {
        if audio.is_empty() {
            return Err(DomainError::validation("Audio upload is empty"));
        }

        let audio_url = self.upload(audio).await?;
        let job_id = self.create_job(&audio_url, language).await?;
        let result = self.poll(&job_id).await?;

        Ok(Transcription {
            text: result.text.unwrap_or_default(),
            confidence: result.confidence,
            language: language.to_string(),
        })
    }
}
