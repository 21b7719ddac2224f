use sqlx::Result as SqlxResult;
use uuid::Uuid;

use crate::{db::Db, models::NotificationRow};

const NOTIFICATION_COLUMNS: &str =
    "id, kind, title, message, user_id, required_level, created_at";

const PREFIXED_COLUMNS: &str =
    "n.id, n.kind, n.title, n.message, n.user_id, n.required_level, n.created_at";

/// Exactly one of `user_id` / `required_level` must be set; the table CHECK
/// enforces the same.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub kind: String,
    pub title: String,
    pub message: String,
    pub user_id: Option<Uuid>,
    pub required_level: Option<i16>,
}

#[derive(Clone)]
pub struct NotificationRepo {
    db: Db,
}

impl NotificationRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn create(&self, data: CreateNotification) -> SqlxResult<NotificationRow> {
        sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            INSERT INTO notifications (kind, title, message, user_id, required_level)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(&data.kind)
        .bind(&data.title)
        .bind(&data.message)
        .bind(data.user_id)
        .bind(data.required_level)
        .fetch_one(&self.db)
        .await
    }

    /// Notifications visible to a user: targeted at them, or tiered at or
    /// below their level; minus the ones they deleted (per-user overlay).
    pub async fn visible_for(&self, user_id: Uuid, level: i16) -> SqlxResult<Vec<NotificationRow>> {
        sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            SELECT {PREFIXED_COLUMNS}
            FROM notifications n
            LEFT JOIN notification_statuses s
                ON s.notification_id = n.id AND s.user_id = $1
            WHERE (n.user_id = $1 OR (n.required_level IS NOT NULL AND n.required_level <= $2))
              AND s.deleted_at IS NULL
            ORDER BY n.created_at DESC
            "#
        ))
        .bind(user_id)
        .bind(level)
        .fetch_all(&self.db)
        .await
    }

    pub async fn unread_for(&self, user_id: Uuid, level: i16) -> SqlxResult<Vec<NotificationRow>> {
        sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            SELECT {PREFIXED_COLUMNS}
            FROM notifications n
            LEFT JOIN notification_statuses s
                ON s.notification_id = n.id AND s.user_id = $1
            WHERE (n.user_id = $1 OR (n.required_level IS NOT NULL AND n.required_level <= $2))
              AND s.deleted_at IS NULL
              AND s.read_at IS NULL
            ORDER BY n.created_at DESC
            "#
        ))
        .bind(user_id)
        .bind(level)
        .fetch_all(&self.db)
        .await
    }

    pub async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> SqlxResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notification_statuses (notification_id, user_id, read_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (notification_id, user_id)
                DO UPDATE SET read_at = COALESCE(notification_statuses.read_at, NOW())
            "#,
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Per-user delete: hides the notification for this user only, the
    /// shared body stays.
    pub async fn mark_deleted(&self, notification_id: Uuid, user_id: Uuid) -> SqlxResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notification_statuses (notification_id, user_id, deleted_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (notification_id, user_id)
                DO UPDATE SET deleted_at = COALESCE(notification_statuses.deleted_at, NOW())
            "#,
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> SqlxResult<Option<NotificationRow>> {
        sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }
}
