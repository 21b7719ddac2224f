use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{require_level, AuthSession, Level, OwnerRef};
use crate::error::AppError;
use crate::state::AppState;
use infra::repos::{CreateNotification, NotificationRepo};

/// Visible notifications for the caller. The tier filter uses the fresh
/// user level, so a promotion immediately widens what the user sees.
pub async fn list(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Guest).await?;

    let notifications = NotificationRepo::new(state.db.clone())
        .visible_for(user.id, user.level)
        .await?;

    Ok(Json(notifications))
}

pub async fn unread(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Guest).await?;

    let notifications = NotificationRepo::new(state.db.clone())
        .unread_for(user.id, user.level)
        .await?;

    Ok(Json(notifications))
}

pub async fn mark_read(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Guest).await?;

    let repo = NotificationRepo::new(state.db.clone());
    repo.get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("notification not found".to_string()))?;

    repo.mark_read(id, user.id).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Per-user delete. The shared notification row stays; only this user's
/// view of it goes away.
pub async fn delete(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Guest).await?;

    let repo = NotificationRepo::new(state.db.clone());
    repo.get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("notification not found".to_string()))?;

    repo.mark_deleted(id, user.id).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

#[derive(Deserialize)]
pub struct CreateNotificationBody {
    pub kind: String,
    pub title: String,
    pub message: String,
    pub user: Option<serde_json::Value>,
    pub required_level: Option<i16>,
}

pub async fn create(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Json(body): Json<CreateNotificationBody>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Admin).await?;

    // Exactly one addressing mode, matching the table CHECK.
    let (user_id, required_level) = match (&body.user, body.required_level) {
        (Some(value), None) => (Some(OwnerRef::from_value(value)?.id()), None),
        (None, Some(level)) => {
            if !(0..=5).contains(&level) {
                return Err(AppError::Validation(format!(
                    "required_level must be between 0 and 5, got {}",
                    level
                )));
            }
            (None, Some(level))
        }
        _ => {
            return Err(AppError::Validation(
                "exactly one of user or required_level must be given".to_string(),
            ))
        }
    };

    if body.title.trim().is_empty() || body.message.trim().is_empty() {
        return Err(AppError::Validation(
            "title and message are required".to_string(),
        ));
    }

    let notification = NotificationRepo::new(state.db.clone())
        .create(CreateNotification {
            kind: body.kind,
            title: body.title,
            message: body.message,
            user_id,
            required_level,
        })
        .await?;

    Ok(Json(notification))
}
