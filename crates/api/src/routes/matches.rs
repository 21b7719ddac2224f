use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{require_level, AuthSession, Level};
use crate::error::AppError;
use crate::state::AppState;
use infra::repos::{MatchRepo, MatchStatus};
use infra::standings::{compute_standings, GroupMatch, SetScore};

#[derive(Deserialize)]
pub struct ListQuery {
    pub division: String,
}

pub async fn list(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let matches = MatchRepo::new(state.db.clone())
        .list_by_division(tournament_id, &query.division)
        .await?;

    Ok(Json(matches))
}

#[derive(Deserialize)]
pub struct RecordResultBody {
    pub set_scores: Vec<SetScore>,
}

/// Record a match result. The score is validated before it is stored so a
/// drawn or empty score can never corrupt the standings.
pub async fn record_result(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
    Json(body): Json<RecordResultBody>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Admin).await?;

    let repo = MatchRepo::new(state.db.clone());
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("match not found".to_string()))?;

    if existing.status == MatchStatus::Cancelled {
        return Err(AppError::Validation(
            "a cancelled match cannot receive a result".to_string(),
        ));
    }

    let candidate = GroupMatch {
        group_id: existing.group_id.clone(),
        team_a: existing.team_a.clone(),
        team_b: existing.team_b.clone(),
        completed: true,
        sets: body.set_scores.clone(),
    };
    compute_standings(std::slice::from_ref(&candidate))
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let scores = serde_json::to_value(&body.set_scores)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let updated = repo
        .record_result(id, scores)
        .await?
        .ok_or_else(|| AppError::NotFound("match not found".to_string()))?;

    Ok(Json(updated))
}

#[derive(Deserialize)]
pub struct SetStatusBody {
    pub status: MatchStatus,
}

pub async fn set_status(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
    Json(body): Json<SetStatusBody>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Admin).await?;

    if body.status == MatchStatus::Completed {
        return Err(AppError::Validation(
            "completion requires a recorded result".to_string(),
        ));
    }

    let updated = MatchRepo::new(state.db.clone())
        .set_status(id, body.status)
        .await?
        .ok_or_else(|| AppError::NotFound("match not found".to_string()))?;

    Ok(Json(updated))
}
