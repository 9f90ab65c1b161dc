//! Chat assistant endpoint

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::DomainError;
use crate::infrastructure::chatbot::FALLBACK_REPLY;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub message: String,
}

/// `POST /api/chatbot`
///
/// An unreachable assistant degrades to a fixed apology instead of an
/// error status; malformed input is still a 400.
pub async fn chat(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Some(chatbot) = state.chatbot.as_ref() else {
        return Ok(Json(ChatResponse {
            success: false,
            message: FALLBACK_REPLY.to_string(),
        }));
    };

    match chatbot.reply(&request.message).await {
        Ok(reply) => Ok(Json(ChatResponse {
            success: true,
            message: reply,
        })),
        Err(DomainError::Validation { message }) => Err(ApiError::bad_request(message)),
        Err(e) => {
            tracing::warn!(error = %e, "Chat assistant unavailable, using fallback reply");

            Ok(Json(ChatResponse {
                success: false,
                message: FALLBACK_REPLY.to_string(),
            }))
        }
    }
}
