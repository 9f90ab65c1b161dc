//! Registration and login endpoints

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{Role, User};
use crate::domain::DomainError;
use crate::infrastructure::user::RegisterUserRequest;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the user it belongs to
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// `POST /auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(axum::http::StatusCode, Json<AuthResponse>), ApiError> {
    let user = state
        .user_service
        .register(RegisterUserRequest {
            name: request.name,
            email: request.email,
            password: request.password,
            role: request.role,
        })
        .await?;

    let token = state.jwt_service.generate(&user)?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(AuthResponse { token, user }),
    ))
}

/// `POST /auth/login`
///
/// Bad credentials are a 401, not the 403 that role mismatches produce
/// elsewhere.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&request.email, &request.password)
        .await
        .map_err(|e| match e {
            DomainError::Authorization { message } => ApiError::unauthorized(message),
            e => e.into(),
        })?;

    let token = state.jwt_service.generate(&user)?;

    Ok(Json(AuthResponse { token, user }))
}

/// `GET /auth/me`
pub async fn me(RequireUser(user): RequireUser) -> Json<User> {
    Json(user)
}
