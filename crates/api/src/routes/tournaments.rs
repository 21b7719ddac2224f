use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{require_level, AuthSession, Level};
use crate::error::AppError;
use crate::services::notify_level_best_effort;
use crate::state::AppState;
use infra::grouping::{assign_groups, group_label, plan_groups};
use infra::repos::matches::CreateMatch;
use infra::repos::{
    ApplicationRepo, CreateTournament, MatchRepo, TournamentRepo, TournamentStatus,
};

#[derive(Deserialize)]
pub struct CreateTournamentBody {
    pub club_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
}

pub async fn create(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Json(body): Json<CreateTournamentBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Admin).await?;

    if body.title.trim().is_empty() {
        return Err(AppError::Validation(
            "tournament title is required".to_string(),
        ));
    }

    let tournament = TournamentRepo::new(state.db.clone())
        .create(CreateTournament {
            club_id: body.club_id,
            title: body.title,
            description: body.description,
            start_date: body.start_date,
            created_by: user.id,
        })
        .await?;

    Ok(Json(tournament))
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub status: Option<TournamentStatus>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tournaments = TournamentRepo::new(state.db.clone())
        .list(query.status, None)
        .await?;

    Ok(Json(tournaments))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tournament = TournamentRepo::new(state.db.clone())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("tournament not found".to_string()))?;

    Ok(Json(tournament))
}

pub async fn publish(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Admin).await?;

    let repo = TournamentRepo::new(state.db.clone());
    let tournament = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("tournament not found".to_string()))?;

    if tournament.status != TournamentStatus::Draft {
        return Err(AppError::Validation(format!(
            "only draft tournaments can be published, current status is {}",
            tournament.status.as_str()
        )));
    }

    let published = repo
        .set_status(id, TournamentStatus::Published)
        .await?
        .ok_or_else(|| AppError::NotFound("tournament not found".to_string()))?;

    notify_level_best_effort(
        &state.db,
        Level::Member,
        "tournament_published",
        "New tournament",
        &format!("Applications are open for {}", published.title),
    )
    .await;

    Ok(Json(published))
}

/// Draw the group stage for one division: partition approved entrants into
/// groups of 2-3, stamp the assignments, and create the round-robin match
/// schedule. Redrawing replaces scheduled matches but keeps completed ones.
pub async fn draw(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path((id, division)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Admin).await?;

    if division.trim().is_empty() {
        return Err(AppError::Validation("division is required".to_string()));
    }

    TournamentRepo::new(state.db.clone())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("tournament not found".to_string()))?;

    let entrants = ApplicationRepo::new(state.db.clone())
        .list_approved(id, &division)
        .await?;

    let plan =
        plan_groups(entrants.len()).map_err(|e| AppError::Validation(e.to_string()))?;
    let groups = assign_groups(&entrants).map_err(|e| AppError::Validation(e.to_string()))?;

    let mut tx = state.db.begin().await?;

    MatchRepo::delete_scheduled(&mut *tx, id, &division).await?;

    let mut matches_created = 0usize;
    for (index, group) in groups.iter().enumerate() {
        let label = group_label(index);

        for application in group {
            ApplicationRepo::set_group(&mut *tx, application.id, &label).await?;
        }

        // Round robin within the group.
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                MatchRepo::create(
                    &mut *tx,
                    CreateMatch {
                        tournament_id: id,
                        division: division.clone(),
                        group_id: label.clone(),
                        team_a: a.team_name.clone(),
                        team_b: b.team_name.clone(),
                    },
                )
                .await?;
                matches_created += 1;
            }
        }
    }

    tx.commit().await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "total_groups": plan.total_groups,
        "groups_of_three": plan.groups_of_three,
        "groups_of_two": plan.groups_of_two,
        "matches_created": matches_created,
    })))
}
