use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{require_level, AuthSession, Level};
use crate::error::AppError;
use crate::services::notify_user;
use crate::state::AppState;
use infra::repos::QuestionRepo;

#[derive(Deserialize)]
pub struct CreateQuestionBody {
    pub title: String,
    pub body: String,
}

pub async fn create(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Json(body): Json<CreateQuestionBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Member).await?;

    if body.title.trim().is_empty() || body.body.trim().is_empty() {
        return Err(AppError::Validation(
            "title and body are required".to_string(),
        ));
    }

    let question = QuestionRepo::new(state.db.clone())
        .create(user.id, &body.title, &body.body)
        .await?;

    Ok(Json(question))
}

/// The caller's own inquiries. Seeing even your own submissions requires an
/// elevated account.
pub async fn mine(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Elevated).await?;

    let questions = QuestionRepo::new(state.db.clone())
        .list_by_author(user.id)
        .await?;

    Ok(Json(questions))
}

pub async fn list(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Moderator).await?;

    let questions = QuestionRepo::new(state.db.clone()).list(None).await?;
    Ok(Json(questions))
}

#[derive(Deserialize)]
pub struct AnswerBody {
    pub answer: String,
}

pub async fn answer(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
    Json(body): Json<AnswerBody>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Admin).await?;

    if body.answer.trim().is_empty() {
        return Err(AppError::Validation("answer is required".to_string()));
    }

    let answered = QuestionRepo::new(state.db.clone())
        .answer(id, &body.answer)
        .await?
        .ok_or_else(|| AppError::NotFound("question not found".to_string()))?;

    if let Err(e) = notify_user(
        &state.db,
        answered.author_id,
        "question_answered",
        "Your inquiry was answered",
        &format!("\"{}\" has received an answer", answered.title),
    )
    .await
    {
        tracing::warn!(error = %e, "failed to notify question author");
    }

    Ok(Json(answered))
}
