use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{require_level, AuthSession, Level};
use crate::error::AppError;
use crate::services::notify_level_best_effort;
use crate::state::AppState;
use infra::repos::{UpdateProfile, UserRepo};

pub async fn list(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Admin).await?;

    let users = UserRepo::new(state.db.clone()).list(None).await?;
    Ok(Json(users))
}

pub async fn me(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Guest).await?;
    Ok(Json(user))
}

#[derive(Deserialize)]
pub struct UpdateMeBody {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birth: Option<chrono::NaiveDate>,
    pub rating: Option<i32>,
    pub address: Option<String>,
}

pub async fn update_me(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Json(body): Json<UpdateMeBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Guest).await?;

    let updated = UserRepo::new(state.db.clone())
        .update_profile(
            user.id,
            UpdateProfile {
                name: body.name,
                phone: body.phone,
                gender: body.gender,
                birth: body.birth,
                rating: body.rating,
                address: body.address,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(Json(updated))
}

#[derive(Deserialize)]
pub struct SetLevelBody {
    pub level: i16,
}

pub async fn set_level(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
    Json(body): Json<SetLevelBody>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Admin).await?;

    if !(0..=5).contains(&body.level) {
        return Err(AppError::Validation(format!(
            "level must be between 0 and 5, got {}",
            body.level
        )));
    }

    let updated = UserRepo::new(state.db.clone())
        .set_level(id, body.level)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(Json(updated))
}

/// Explicit withdrawal. The administrator notification is best-effort: its
/// failure never blocks the deletion.
pub async fn withdraw(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Guest).await?;

    let deleted = UserRepo::new(state.db.clone()).delete(user.id).await?;
    if !deleted {
        return Err(AppError::NotFound("user not found".to_string()));
    }

    notify_level_best_effort(
        &state.db,
        Level::Admin,
        "member_withdrawn",
        "Member withdrawal",
        &format!("{} ({}) has withdrawn from the club", user.name, user.email),
    )
    .await;

    Ok(Json(serde_json::json!({ "success": true })))
}
