use tracing::warn;
use uuid::Uuid;

use crate::auth::Level;
use crate::error::AppError;
use infra::db::Db;
use infra::repos::{CreateNotification, NotificationRepo};

/// Notify one user. Read/delete state is tracked per user in the overlay
/// table; the body row is shared.
pub async fn notify_user(
    db: &Db,
    user_id: Uuid,
    kind: &str,
    title: &str,
    message: &str,
) -> Result<(), AppError> {
    NotificationRepo::new(db.clone())
        .create(CreateNotification {
            kind: kind.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            user_id: Some(user_id),
            required_level: None,
        })
        .await?;

    Ok(())
}

/// Notify every user at or above `min_level` with a single tiered row.
pub async fn notify_level(
    db: &Db,
    min_level: Level,
    kind: &str,
    title: &str,
    message: &str,
) -> Result<(), AppError> {
    NotificationRepo::new(db.clone())
        .create(CreateNotification {
            kind: kind.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            user_id: None,
            required_level: Some(min_level.as_i16()),
        })
        .await?;

    Ok(())
}

/// Same as [`notify_level`] but a failure is logged and swallowed; used
/// where the surrounding operation must not be blocked (e.g. withdrawal).
pub async fn notify_level_best_effort(
    db: &Db,
    min_level: Level,
    kind: &str,
    title: &str,
    message: &str,
) {
    if let Err(e) = notify_level(db, min_level, kind, title, message).await {
        warn!(error = %e, kind, "failed to create notification");
    }
}
