use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{
        header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::middleware::jwt::jwt_middleware;
use crate::routes::{
    applications, assets, auth, awards, clubs, comments, expenses, matches, notifications, posts,
    questions, standings, tournaments, users,
};
use crate::state::AppState;

/// Build the Axum router: health endpoint, OAuth login flow and the
/// membership / tournament / content surface.
pub fn build_router(state: AppState) -> Router {
    // Rate limiting: 10 requests per minute per IP on auth endpoints
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(6) // 1 token every 6 seconds = ~10/min
        .burst_size(10)
        .finish()
        .unwrap();

    let rate_limited_routes = Router::new()
        .route("/auth/{provider}/authorize", get(auth::authorize))
        .route("/auth/{provider}/callback", get(auth::callback))
        .layer(GovernorLayer::new(Arc::new(governor_conf)));

    Router::new()
        // Simple liveness check; also proves DB connectivity.
        .route("/health", get(health))
        .merge(rate_limited_routes)
        // Members
        .route("/users", get(users::list))
        .route(
            "/users/me",
            get(users::me).patch(users::update_me).delete(users::withdraw),
        )
        .route("/users/{id}/level", patch(users::set_level))
        // Clubs
        .route("/clubs", get(clubs::list).post(clubs::create))
        .route("/clubs/{id}", get(clubs::get))
        .route("/clubs/{id}/join", post(clubs::join))
        .route("/clubs/{id}/members", get(clubs::members))
        .route(
            "/clubs/{club_id}/members/{user_id}",
            patch(clubs::set_member_status),
        )
        // Tournaments, applications and the group stage
        .route(
            "/tournaments",
            get(tournaments::list).post(tournaments::create),
        )
        .route("/tournaments/{id}", get(tournaments::get))
        .route("/tournaments/{id}/publish", post(tournaments::publish))
        .route(
            "/tournaments/{id}/divisions/{division}/draw",
            post(tournaments::draw),
        )
        .route(
            "/tournaments/{id}/applications",
            get(applications::list).post(applications::create),
        )
        .route(
            "/applications/{id}",
            patch(applications::update).delete(applications::delete),
        )
        .route("/tournaments/{id}/matches", get(matches::list))
        .route("/matches/{id}/result", post(matches::record_result))
        .route("/matches/{id}/status", patch(matches::set_status))
        .route("/tournaments/{id}/standings", get(standings::get))
        // Notifications
        .route(
            "/notifications",
            get(notifications::list).post(notifications::create),
        )
        .route("/notifications/unread", get(notifications::unread))
        .route("/notifications/{id}/read", post(notifications::mark_read))
        .route("/notifications/{id}", delete(notifications::delete))
        // Board
        .route("/posts", get(posts::list).post(posts::create))
        .route(
            "/posts/{id}",
            get(posts::get).patch(posts::update).delete(posts::delete),
        )
        .route(
            "/posts/{id}/comments",
            get(comments::list).post(comments::create),
        )
        .route("/comments/{id}", delete(comments::delete))
        // Inquiries
        .route("/questions", get(questions::list).post(questions::create))
        .route("/questions/mine", get(questions::mine))
        .route("/questions/{id}/answer", post(questions::answer))
        // Club records
        .route("/awards", get(awards::list).post(awards::create))
        .route(
            "/awards/{id}",
            patch(awards::update).delete(awards::delete),
        )
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/expenses/{id}", delete(expenses::delete))
        .route("/assets", post(assets::create))
        .route("/assets/{id}", get(assets::get))
        // App state (PgPool, auth services)
        .with_state(state.clone())
        // JWT middleware for authentication
        .layer(middleware::from_fn_with_state(state, jwt_middleware))
        // Useful default middlewares
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer({
            let allowed_origins = std::env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".to_string());

            let origins: Vec<HeaderValue> = allowed_origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                .allow_headers([CONTENT_TYPE, AUTHORIZATION])
                .allow_credentials(true)
        })
}

/// Liveness + quick DB probe.
async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    infra::db::ping(&state.db).await?;
    Ok("ok")
}
