//! Assistance domain - traits for the hosted speech and chat collaborators
//!
//! The marketplace consumes three external capabilities through narrow
//! request/response seams: speech-to-text, text-to-speech, and a
//! conversational assistant. Implementations live in
//! `infrastructure::voice` and `infrastructure::chatbot`.

use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::DomainError;

/// Result of transcribing an audio clip
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transcription {
    /// Recognized text
    pub text: String,
    /// Provider confidence in [0, 1], when reported
    pub confidence: Option<f64>,
    /// Language code the caller requested (not the provider's mapped code)
    pub language: String,
}

/// Speech-to-text collaborator
#[async_trait]
pub trait TranscriptionProvider: Send + Sync + Debug {
    /// Transcribe an audio clip in the given language
    async fn transcribe(&self, audio: Bytes, language: &str) -> Result<Transcription, DomainError>;
}

/// Text-to-speech collaborator; returns encoded audio bytes
#[async_trait]
pub trait SpeechProvider: Send + Sync + Debug {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Bytes, DomainError>;
}

/// Conversational assistant collaborator
#[async_trait]
pub trait ChatProvider: Send + Sync + Debug {
    async fn reply(&self, message: &str) -> Result<String, DomainError>;
}
