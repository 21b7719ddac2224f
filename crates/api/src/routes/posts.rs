use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{check_ownership_or_admin, require_level, AuthSession, Level, OwnerRef};
use crate::error::AppError;
use crate::state::AppState;
use infra::pagination::LimitOffset;
use infra::repos::{PostRepo, UpdatePost};

#[derive(Deserialize)]
pub struct CreatePostBody {
    pub title: String,
    pub body: String,
}

pub async fn create(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Json(body): Json<CreatePostBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Member).await?;

    if body.title.trim().is_empty() || body.body.trim().is_empty() {
        return Err(AppError::Validation(
            "title and body are required".to_string(),
        ));
    }

    let post = PostRepo::new(state.db.clone())
        .create(user.id, &body.title, &body.body)
        .await?;

    Ok(Json(post))
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListQuery {
    fn page(&self) -> Option<LimitOffset> {
        match (self.limit, self.offset) {
            (None, None) => None,
            (limit, offset) => {
                let mut p = LimitOffset::default();
                if let Some(limit) = limit {
                    p.limit = limit;
                }
                if let Some(offset) = offset {
                    p.offset = offset;
                }
                Some(p)
            }
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let posts = PostRepo::new(state.db.clone()).list(query.page()).await?;
    Ok(Json(posts))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let post = PostRepo::new(state.db.clone())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    Ok(Json(post))
}

#[derive(Deserialize)]
pub struct UpdatePostBody {
    pub title: Option<String>,
    pub body: Option<String>,
}

pub async fn update(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePostBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Member).await?;

    let repo = PostRepo::new(state.db.clone());
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    check_ownership_or_admin(&user, &OwnerRef::from(existing.author_id))?;

    let updated = repo
        .update(
            id,
            UpdatePost {
                title: body.title,
                body: body.body,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Member).await?;

    let repo = PostRepo::new(state.db.clone());
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    check_ownership_or_admin(&user, &OwnerRef::from(existing.author_id))?;

    repo.delete(id).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}
