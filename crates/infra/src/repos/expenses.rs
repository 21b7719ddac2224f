use chrono::NaiveDate;
use sqlx::Result as SqlxResult;
use uuid::Uuid;

use crate::{db::Db, models::ExpenseRow, pagination::LimitOffset};

const EXPENSE_COLUMNS: &str =
    "id, amount_cents, store_name, spent_at, memo, receipt_url, recorded_by, created_at";

#[derive(Debug, Clone)]
pub struct CreateExpense {
    pub amount_cents: i32,
    pub store_name: Option<String>,
    pub spent_at: Option<NaiveDate>,
    pub memo: Option<String>,
    pub receipt_url: Option<String>,
    pub recorded_by: Uuid,
}

#[derive(Clone)]
pub struct ExpenseRepo {
    db: Db,
}

impl ExpenseRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn list(&self, page: Option<LimitOffset>) -> SqlxResult<Vec<ExpenseRow>> {
        let p = page.unwrap_or_default();

        sqlx::query_as::<_, ExpenseRow>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY spent_at DESC NULLS LAST, created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(p.limit)
        .bind(p.offset)
        .fetch_all(&self.db)
        .await
    }

    pub async fn create(&self, data: CreateExpense) -> SqlxResult<ExpenseRow> {
        sqlx::query_as::<_, ExpenseRow>(&format!(
            r#"
            INSERT INTO expenses (amount_cents, store_name, spent_at, memo, receipt_url, recorded_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(data.amount_cents)
        .bind(&data.store_name)
        .bind(data.spent_at)
        .bind(&data.memo)
        .bind(&data.receipt_url)
        .bind(data.recorded_by)
        .fetch_one(&self.db)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> SqlxResult<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
