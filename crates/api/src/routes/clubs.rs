use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{require_level, AuthSession, Level};
use crate::error::AppError;
use crate::state::AppState;
use infra::repos::{ClubMemberRepo, ClubRepo, CreateClub};

#[derive(Deserialize)]
pub struct CreateClubBody {
    pub name: String,
    pub city: Option<String>,
    pub description: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Json(body): Json<CreateClubBody>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Admin).await?;

    if body.name.trim().is_empty() {
        return Err(AppError::Validation("club name is required".to_string()));
    }

    let club = ClubRepo::new(state.db.clone())
        .create(CreateClub {
            name: body.name,
            city: body.city,
            description: body.description,
        })
        .await?;

    Ok(Json(club))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let clubs = ClubRepo::new(state.db.clone()).list(None).await?;
    Ok(Json(clubs))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let club = ClubRepo::new(state.db.clone())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("club not found".to_string()))?;

    Ok(Json(club))
}

pub async fn join(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Member).await?;

    ClubRepo::new(state.db.clone())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("club not found".to_string()))?;

    let membership = ClubMemberRepo::new(state.db.clone()).join(id, user.id).await?;
    Ok(Json(membership))
}

pub async fn members(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Member).await?;

    let members = ClubMemberRepo::new(state.db.clone()).list_by_club(id).await?;
    Ok(Json(members))
}

#[derive(Deserialize)]
pub struct MemberStatusBody {
    pub status: String,
}

pub async fn set_member_status(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path((club_id, user_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<MemberStatusBody>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Admin).await?;

    if !matches!(body.status.as_str(), "pending" | "active") {
        return Err(AppError::Validation(format!(
            "unknown membership status: {}",
            body.status
        )));
    }

    let membership = ClubMemberRepo::new(state.db.clone())
        .set_status(club_id, user_id, &body.status)
        .await?
        .ok_or_else(|| AppError::NotFound("membership not found".to_string()))?;

    Ok(Json(membership))
}
