use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::OAuthProvider;
use crate::error::AppError;
use crate::state::AppState;
use infra::models::UserRow;
use infra::repos::{CreateUser, UserRepo};

#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: String,
}

#[derive(Serialize)]
pub struct AuthorizeResponse {
    pub auth_url: String,
    pub csrf_token: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserRow,
}

pub async fn authorize(
    State(state): State<AppState>,
    Path(provider_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let provider = OAuthProvider::parse(&provider_str)?;

    let (auth_url, csrf_token) = state.oauth_service().get_authorize_url(provider)?;

    Ok(Json(AuthorizeResponse {
        auth_url,
        csrf_token,
    }))
}

pub async fn callback(
    State(state): State<AppState>,
    Path(provider_str): Path<String>,
    Query(query): Query<CallbackQuery>,
) -> Result<impl IntoResponse, AppError> {
    let provider = OAuthProvider::parse(&provider_str)?;

    let oauth_user = state
        .oauth_service()
        .exchange_code_for_user_info(provider, query.code)
        .await?;

    let repo = UserRepo::new(state.db.clone());

    // First social-login completion creates the member record.
    let user = match repo.get_by_email(&oauth_user.email).await? {
        Some(existing) => existing,
        None => {
            repo.create(CreateUser {
                email: oauth_user.email.clone(),
                name: oauth_user.name.clone(),
                oauth_provider: Some(provider.as_str().to_string()),
            })
            .await?
        }
    };

    let token = state
        .jwt_service()
        .create_token(user.id, user.email.clone(), user.level)?;

    Ok(Json(AuthResponse { token, user }))
}
