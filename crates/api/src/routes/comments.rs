use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{check_ownership_or_admin, require_level, AuthSession, Level, OwnerRef};
use crate::error::AppError;
use crate::state::AppState;
use infra::repos::{CommentRepo, PostRepo};

#[derive(Deserialize)]
pub struct CreateCommentBody {
    pub body: String,
}

pub async fn create(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(post_id): Path<Uuid>,
    Json(body): Json<CreateCommentBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Member).await?;

    if body.body.trim().is_empty() {
        return Err(AppError::Validation("comment body is required".to_string()));
    }

    PostRepo::new(state.db.clone())
        .get(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    let comment = CommentRepo::new(state.db.clone())
        .create(post_id, user.id, &body.body)
        .await?;

    Ok(Json(comment))
}

pub async fn list(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let comments = CommentRepo::new(state.db.clone())
        .list_by_post(post_id)
        .await?;

    Ok(Json(comments))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Member).await?;

    let repo = CommentRepo::new(state.db.clone());
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;

    check_ownership_or_admin(&user, &OwnerRef::from(existing.author_id))?;

    repo.delete(id).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}
