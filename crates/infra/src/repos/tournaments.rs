use chrono::NaiveDate;
use sqlx::Result as SqlxResult;
use std::str::FromStr;
use uuid::Uuid;

use crate::{db::Db, models::TournamentRow, pagination::LimitOffset};

const TOURNAMENT_COLUMNS: &str =
    "id, club_id, title, description, start_date, status, created_by, created_at, updated_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize)]
#[sqlx(type_name = "tournament_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Draft,
    Published,
    Ongoing,
    Completed,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Draft => "draft",
            TournamentStatus::Published => "published",
            TournamentStatus::Ongoing => "ongoing",
            TournamentStatus::Completed => "completed",
        }
    }
}

impl FromStr for TournamentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(TournamentStatus::Draft),
            "published" => Ok(TournamentStatus::Published),
            "ongoing" => Ok(TournamentStatus::Ongoing),
            "completed" => Ok(TournamentStatus::Completed),
            _ => Err(format!("Unknown tournament status: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTournament {
    pub club_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub created_by: Uuid,
}

#[derive(Clone)]
pub struct TournamentRepo {
    db: Db,
}

impl TournamentRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> SqlxResult<Option<TournamentRow>> {
        sqlx::query_as::<_, TournamentRow>(&format!(
            "SELECT {TOURNAMENT_COLUMNS} FROM tournaments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn list(
        &self,
        status: Option<TournamentStatus>,
        page: Option<LimitOffset>,
    ) -> SqlxResult<Vec<TournamentRow>> {
        let p = page.unwrap_or_default();

        // COALESCE-style optional filter keeps a single prepared statement.
        sqlx::query_as::<_, TournamentRow>(&format!(
            r#"
            SELECT {TOURNAMENT_COLUMNS} FROM tournaments
            WHERE ($1::tournament_status IS NULL OR status = $1)
            ORDER BY start_date DESC NULLS LAST, created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(status)
        .bind(p.limit)
        .bind(p.offset)
        .fetch_all(&self.db)
        .await
    }

    /// Tournaments are created as drafts; publishing is a separate gated
    /// transition.
    pub async fn create(&self, data: CreateTournament) -> SqlxResult<TournamentRow> {
        sqlx::query_as::<_, TournamentRow>(&format!(
            r#"
            INSERT INTO tournaments (club_id, title, description, start_date, status, created_by)
            VALUES ($1, $2, $3, $4, 'draft', $5)
            RETURNING {TOURNAMENT_COLUMNS}
            "#
        ))
        .bind(data.club_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.start_date)
        .bind(data.created_by)
        .fetch_one(&self.db)
        .await
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: TournamentStatus,
    ) -> SqlxResult<Option<TournamentRow>> {
        sqlx::query_as::<_, TournamentRow>(&format!(
            "UPDATE tournaments SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {TOURNAMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.db)
        .await
    }
}
