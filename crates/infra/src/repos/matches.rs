use sqlx::Result as SqlxResult;
use std::str::FromStr;
use uuid::Uuid;

use crate::{db::Db, models::MatchRow};

const MATCH_COLUMNS: &str = "id, tournament_id, division, group_id, team_a, team_b, status, set_scores, created_at, updated_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize)]
#[sqlx(type_name = "match_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Completed => "completed",
            MatchStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(MatchStatus::Scheduled),
            "in_progress" => Ok(MatchStatus::InProgress),
            "completed" => Ok(MatchStatus::Completed),
            "cancelled" => Ok(MatchStatus::Cancelled),
            _ => Err(format!("Unknown match status: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMatch {
    pub tournament_id: Uuid,
    pub division: String,
    pub group_id: String,
    pub team_a: String,
    pub team_b: String,
}

#[derive(Clone)]
pub struct MatchRepo {
    db: Db,
}

impl MatchRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> SqlxResult<Option<MatchRow>> {
        sqlx::query_as::<_, MatchRow>(&format!(
            "SELECT {MATCH_COLUMNS} FROM tournament_matches WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn list_by_division(
        &self,
        tournament_id: Uuid,
        division: &str,
    ) -> SqlxResult<Vec<MatchRow>> {
        sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            SELECT {MATCH_COLUMNS} FROM tournament_matches
            WHERE tournament_id = $1 AND division = $2
            ORDER BY group_id, created_at
            "#
        ))
        .bind(tournament_id)
        .bind(division)
        .fetch_all(&self.db)
        .await
    }

    /// Insert one scheduled match inside the draw transaction.
    pub async fn create<'e, E>(executor: E, data: CreateMatch) -> SqlxResult<MatchRow>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            INSERT INTO tournament_matches (tournament_id, division, group_id, team_a, team_b, status)
            VALUES ($1, $2, $3, $4, $5, 'scheduled')
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(data.tournament_id)
        .bind(&data.division)
        .bind(&data.group_id)
        .bind(&data.team_a)
        .bind(&data.team_b)
        .fetch_one(executor)
        .await
    }

    pub async fn record_result(
        &self,
        id: Uuid,
        set_scores: serde_json::Value,
    ) -> SqlxResult<Option<MatchRow>> {
        sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            UPDATE tournament_matches
            SET status = 'completed', set_scores = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(set_scores)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn set_status(&self, id: Uuid, status: MatchStatus) -> SqlxResult<Option<MatchRow>> {
        sqlx::query_as::<_, MatchRow>(&format!(
            "UPDATE tournament_matches SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {MATCH_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.db)
        .await
    }

    /// Remove a division's scheduled matches before a redraw. Completed
    /// matches are kept.
    pub async fn delete_scheduled<'e, E>(
        executor: E,
        tournament_id: Uuid,
        division: &str,
    ) -> SqlxResult<u64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let result = sqlx::query(
            "DELETE FROM tournament_matches WHERE tournament_id = $1 AND division = $2 AND status = 'scheduled'",
        )
        .bind(tournament_id)
        .bind(division)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
