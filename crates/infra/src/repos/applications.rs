use sqlx::Result as SqlxResult;
use std::str::FromStr;
use uuid::Uuid;

use crate::{db::Db, models::ApplicationRow};

const APPLICATION_COLUMNS: &str =
    "id, tournament_id, division, team_name, user_id, status, group_id, created_at, updated_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize)]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "cancelled" => Ok(ApplicationStatus::Cancelled),
            _ => Err(format!("Unknown application status: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateApplication {
    pub tournament_id: Uuid,
    pub division: String,
    pub team_name: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateApplication {
    pub division: Option<String>,
    pub team_name: Option<String>,
}

#[derive(Clone)]
pub struct ApplicationRepo {
    db: Db,
}

impl ApplicationRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> SqlxResult<Option<ApplicationRow>> {
        sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM tournament_applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn list_by_tournament(
        &self,
        tournament_id: Uuid,
        division: Option<&str>,
    ) -> SqlxResult<Vec<ApplicationRow>> {
        sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM tournament_applications
            WHERE tournament_id = $1 AND ($2::text IS NULL OR division = $2)
            ORDER BY created_at
            "#
        ))
        .bind(tournament_id)
        .bind(division)
        .fetch_all(&self.db)
        .await
    }

    /// Approved entrants for a division, in application order. This is the
    /// draw input.
    pub async fn list_approved(
        &self,
        tournament_id: Uuid,
        division: &str,
    ) -> SqlxResult<Vec<ApplicationRow>> {
        sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM tournament_applications
            WHERE tournament_id = $1 AND division = $2 AND status = 'approved'
            ORDER BY created_at
            "#
        ))
        .bind(tournament_id)
        .bind(division)
        .fetch_all(&self.db)
        .await
    }

    pub async fn create(&self, data: CreateApplication) -> SqlxResult<ApplicationRow> {
        sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            INSERT INTO tournament_applications (tournament_id, division, team_name, user_id, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(data.tournament_id)
        .bind(&data.division)
        .bind(&data.team_name)
        .bind(data.user_id)
        .fetch_one(&self.db)
        .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        data: UpdateApplication,
    ) -> SqlxResult<Option<ApplicationRow>> {
        sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            UPDATE tournament_applications
            SET division = COALESCE($2, division),
                team_name = COALESCE($3, team_name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.division)
        .bind(&data.team_name)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> SqlxResult<Option<ApplicationRow>> {
        sqlx::query_as::<_, ApplicationRow>(&format!(
            "UPDATE tournament_applications SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.db)
        .await
    }

    /// Stamp a group assignment inside the draw transaction.
    pub async fn set_group<'e, E>(executor: E, id: Uuid, group_id: &str) -> SqlxResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query(
            "UPDATE tournament_applications SET group_id = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(group_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> SqlxResult<bool> {
        let result = sqlx::query("DELETE FROM tournament_applications WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
