//! Notification inbox endpoints

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Notification, NotificationId};

#[derive(Debug, Deserialize, Default)]
pub struct InboxQuery {
    #[serde(default)]
    pub unread_only: bool,
}

/// `GET /api/notifications`
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<InboxQuery>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let notifications = state
        .notification_service
        .list_for_user(&user, query.unread_only)
        .await?;

    Ok(Json(notifications))
}

/// `POST /api/notifications/:id/read`
///
/// Always succeeds; marking someone else's notification silently does
/// nothing.
pub async fn mark_read(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = NotificationId::new(id)?;

    state.notification_service.mark_read(&user, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
