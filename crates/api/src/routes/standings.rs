use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use infra::repos::{MatchRepo, TournamentRepo};
use infra::standings::{compute_standings, GroupMatch};

#[derive(Deserialize)]
pub struct StandingsQuery {
    pub division: String,
}

/// Current group tables for one division, recomputed from the match rows on
/// every request.
pub async fn get(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Query(query): Query<StandingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.division.trim().is_empty() {
        return Err(AppError::Validation("division is required".to_string()));
    }

    TournamentRepo::new(state.db.clone())
        .get(tournament_id)
        .await?
        .ok_or_else(|| AppError::NotFound("tournament not found".to_string()))?;

    let rows = MatchRepo::new(state.db.clone())
        .list_by_division(tournament_id, &query.division)
        .await?;

    let matches: Vec<GroupMatch> = rows
        .iter()
        .map(|row| row.to_group_match())
        .collect::<Result<_, _>>()
        .map_err(|e| AppError::Internal(format!("stored score is unreadable: {}", e)))?;

    let tables =
        compute_standings(&matches).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(tables))
}
