//! Voice endpoints - speech-to-text and text-to-speech

use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub transcript: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

#[derive(Debug, Serialize)]
pub struct SynthesizeResponse {
    pub audio_url: String,
}

/// `POST /api/voice/transcribe` - multipart audio clip plus a language code
pub async fn transcribe(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let Some(transcriber) = state.transcriber.as_ref() else {
        return Err(ApiError::internal("Transcription is not configured"));
    };

    let mut audio = None;
    let mut language = DEFAULT_LANGUAGE.to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        match field.name().unwrap_or_default() {
            "audio" => {
                audio = Some(field.bytes().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read audio upload: {}", e))
                })?);
            }
            "language" => {
                language = field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read language field: {}", e))
                })?;
            }
            _ => {}
        }
    }

    let audio = audio.ok_or_else(|| {
        ApiError::bad_request("Missing required field 'audio'").with_param("audio")
    })?;

    let transcription = transcriber.transcribe(audio, &language).await?;

    Ok(Json(TranscribeResponse {
        transcript: transcription.text,
        confidence: transcription.confidence,
        language: transcription.language,
    }))
}

/// `POST /api/voice/synthesize` - renders text to an MP3 asset
pub async fn synthesize(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Json(request): Json<SynthesizeRequest>,
) -> Result<Json<SynthesizeResponse>, ApiError> {
    let Some(synthesizer) = state.synthesizer.as_ref() else {
        return Err(ApiError::internal("Speech synthesis is not configured"));
    };

    let audio = synthesizer
        .synthesize(&request.text, &request.language)
        .await?;

    let audio_url = state.assets.store_audio(audio).await?;

    Ok(Json(SynthesizeResponse { audio_url }))
}
