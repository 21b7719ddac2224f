use sqlx::Result as SqlxResult;
use uuid::Uuid;

use crate::{db::Db, models::ClubMemberRow};

#[derive(Clone)]
pub struct ClubMemberRepo {
    db: Db,
}

impl ClubMemberRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Request membership; a duplicate request keeps the existing row.
    pub async fn join(&self, club_id: Uuid, user_id: Uuid) -> SqlxResult<ClubMemberRow> {
        sqlx::query_as::<_, ClubMemberRow>(
            r#"
            INSERT INTO club_members (club_id, user_id, status)
            VALUES ($1, $2, 'pending')
            ON CONFLICT (club_id, user_id) DO UPDATE SET club_id = EXCLUDED.club_id
            RETURNING id, club_id, user_id, status, joined_at
            "#,
        )
        .bind(club_id)
        .bind(user_id)
        .fetch_one(&self.db)
        .await
    }

    pub async fn set_status(
        &self,
        club_id: Uuid,
        user_id: Uuid,
        status: &str,
    ) -> SqlxResult<Option<ClubMemberRow>> {
        sqlx::query_as::<_, ClubMemberRow>(
            r#"
            UPDATE club_members
            SET status = $3
            WHERE club_id = $1 AND user_id = $2
            RETURNING id, club_id, user_id, status, joined_at
            "#,
        )
        .bind(club_id)
        .bind(user_id)
        .bind(status)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn list_by_club(&self, club_id: Uuid) -> SqlxResult<Vec<ClubMemberRow>> {
        sqlx::query_as::<_, ClubMemberRow>(
            "SELECT id, club_id, user_id, status, joined_at FROM club_members WHERE club_id = $1 ORDER BY joined_at",
        )
        .bind(club_id)
        .fetch_all(&self.db)
        .await
    }
}
