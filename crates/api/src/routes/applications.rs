use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{
    check_ownership_or_admin, level_satisfies, require_level, AuthSession, Level, OwnerRef,
};
use crate::error::AppError;
use crate::services::{notify_level_best_effort, notify_user};
use crate::state::AppState;
use infra::repos::{
    ApplicationRepo, ApplicationStatus, CreateApplication, TournamentRepo, TournamentStatus,
    UpdateApplication,
};

#[derive(Deserialize)]
pub struct CreateApplicationBody {
    pub division: String,
    pub team_name: String,
    /// Owner reference, accepted for imported records. Defaults to the
    /// caller; submitting on behalf of someone else requires admin.
    pub owner: Option<serde_json::Value>,
}

pub async fn create(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(tournament_id): Path<Uuid>,
    Json(body): Json<CreateApplicationBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Member).await?;

    if body.division.trim().is_empty() || body.team_name.trim().is_empty() {
        return Err(AppError::Validation(
            "division and team_name are required".to_string(),
        ));
    }

    let tournament = TournamentRepo::new(state.db.clone())
        .get(tournament_id)
        .await?
        .ok_or_else(|| AppError::NotFound("tournament not found".to_string()))?;

    if tournament.status != TournamentStatus::Published {
        return Err(AppError::Validation(
            "applications are only accepted for published tournaments".to_string(),
        ));
    }

    let owner = match &body.owner {
        Some(value) => {
            let owner = OwnerRef::from_value(value)?;
            if owner.id() != user.id && !level_satisfies(user.level, Level::Admin) {
                return Err(AppError::Forbidden(
                    "you may only apply on your own behalf".to_string(),
                ));
            }
            owner
        }
        None => OwnerRef::from(user.id),
    };

    let application = ApplicationRepo::new(state.db.clone())
        .create(CreateApplication {
            tournament_id,
            division: body.division.clone(),
            team_name: body.team_name.clone(),
            user_id: owner.id(),
        })
        .await?;

    notify_level_best_effort(
        &state.db,
        Level::Admin,
        "application_submitted",
        "New tournament application",
        &format!(
            "{} applied to the {} division of {}",
            body.team_name, body.division, tournament.title
        ),
    )
    .await;

    Ok(Json(application))
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub division: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(tournament_id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Member).await?;

    let applications = ApplicationRepo::new(state.db.clone())
        .list_by_tournament(tournament_id, query.division.as_deref())
        .await?;

    Ok(Json(applications))
}

#[derive(Deserialize)]
pub struct UpdateApplicationBody {
    pub division: Option<String>,
    pub team_name: Option<String>,
    pub status: Option<ApplicationStatus>,
}

/// Whether `user` may still mutate (edit or withdraw) `application`.
/// Administrators always may; the owner only while it is pending — an
/// approved, rejected or cancelled application is locked for them.
fn check_application_mutable(
    user: &infra::models::UserRow,
    application: &infra::models::ApplicationRow,
) -> Result<(), AppError> {
    check_ownership_or_admin(user, &OwnerRef::from(application.user_id))?;

    if !level_satisfies(user.level, Level::Admin)
        && application.status != ApplicationStatus::Pending
    {
        return Err(AppError::Forbidden(format!(
            "a {} application can only be changed by an administrator",
            application.status.as_str()
        )));
    }

    Ok(())
}

/// Update an application. Status transitions are an admin decision; field
/// edits are open to the owner only while the application is still pending.
pub async fn update(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateApplicationBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Member).await?;

    let repo = ApplicationRepo::new(state.db.clone());
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("application not found".to_string()))?;

    check_application_mutable(&user, &existing)?;

    if body.status.is_some() && !level_satisfies(user.level, Level::Admin) {
        return Err(AppError::Forbidden(
            "only administrators may change application status".to_string(),
        ));
    }

    let mut current = existing;

    if body.division.is_some() || body.team_name.is_some() {
        current = repo
            .update(
                id,
                UpdateApplication {
                    division: body.division,
                    team_name: body.team_name,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("application not found".to_string()))?;
    }

    if let Some(status) = body.status {
        current = repo
            .set_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("application not found".to_string()))?;

        if let Err(e) = notify_user(
            &state.db,
            current.user_id,
            "application_status",
            "Application update",
            &format!(
                "Your application for team {} is now {}",
                current.team_name,
                status.as_str()
            ),
        )
        .await
        {
            tracing::warn!(error = %e, "failed to notify applicant");
        }
    }

    Ok(Json(current))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Member).await?;

    let repo = ApplicationRepo::new(state.db.clone());
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("application not found".to_string()))?;

    check_application_mutable(&user, &existing)?;

    repo.delete(id).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use infra::models::{ApplicationRow, UserRow};

    fn user(level: i16) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "member@club.test".to_string(),
            name: "Test Member".to_string(),
            phone: None,
            gender: None,
            birth: None,
            rating: None,
            address: None,
            level,
            oauth_provider: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn application(owner: Uuid, status: ApplicationStatus) -> ApplicationRow {
        ApplicationRow {
            id: Uuid::new_v4(),
            tournament_id: Uuid::new_v4(),
            division: "open".to_string(),
            team_name: "Baseliners".to_string(),
            user_id: owner,
            status,
            group_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_may_mutate_while_pending() {
        let owner = user(1);
        let pending = application(owner.id, ApplicationStatus::Pending);

        assert!(check_application_mutable(&owner, &pending).is_ok());
    }

    #[test]
    fn approved_application_is_locked_for_the_owner() {
        let owner = user(1);

        for status in [
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::Cancelled,
        ] {
            let locked = application(owner.id, status);
            assert!(
                matches!(
                    check_application_mutable(&owner, &locked),
                    Err(AppError::Forbidden(_))
                ),
                "{} should be locked",
                status.as_str()
            );
        }
    }

    #[test]
    fn admin_may_mutate_any_status() {
        let admin = user(5);

        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::Cancelled,
        ] {
            let row = application(Uuid::new_v4(), status);
            assert!(check_application_mutable(&admin, &row).is_ok());
        }
    }

    #[test]
    fn stranger_is_rejected_regardless_of_status() {
        let stranger = user(4);
        let pending = application(Uuid::new_v4(), ApplicationStatus::Pending);

        assert!(matches!(
            check_application_mutable(&stranger, &pending),
            Err(AppError::Forbidden(_))
        ));
    }
}
