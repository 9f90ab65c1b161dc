//! Job board endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{JobId, JobPosting};
use crate::infrastructure::job::PostJobRequest;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
}

/// `GET /api/jobs`
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<JobPosting>>, ApiError> {
    let jobs = state.job_service.list(&user).await?;

    Ok(Json(jobs))
}

/// `POST /api/jobs`
pub async fn post(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobPosting>), ApiError> {
    let job = state
        .job_service
        .post(
            &user,
            PostJobRequest {
                title: request.title,
                description: request.description,
                location: request.location,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// `DELETE /api/jobs/:id`
pub async fn delete(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = JobId::new(id)?;

    state.job_service.delete(&user, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
