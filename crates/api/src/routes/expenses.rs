use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::auth::{require_level, AuthSession, Level};
use crate::error::AppError;
use crate::state::AppState;
use infra::repos::{CreateExpense, ExpenseRepo};

#[derive(Deserialize)]
pub struct CreateExpenseBody {
    pub amount_cents: Option<i32>,
    pub store_name: Option<String>,
    pub spent_at: Option<chrono::NaiveDate>,
    pub memo: Option<String>,
    pub receipt_url: Option<String>,
}

/// Record an expense. When a receipt image is attached, the analyzer fills
/// in whatever fields the caller left out; its failure only costs the
/// autofill, never the expense itself.
pub async fn create(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Json(body): Json<CreateExpenseBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Advanced).await?;

    if let Some(receipt_url) = &body.receipt_url {
        url::Url::parse(receipt_url)
            .map_err(|e| AppError::Validation(format!("invalid receipt_url: {}", e)))?;
    }

    let mut amount_cents = body.amount_cents;
    let mut store_name = body.store_name;
    let mut spent_at = body.spent_at;

    if let Some(receipt_url) = &body.receipt_url {
        match state.receipt_analyzer().analyze(receipt_url).await {
            Ok(fields) => {
                amount_cents = amount_cents.or(fields.amount_cents);
                store_name = store_name.or(fields.store_name);
                spent_at = spent_at.or(fields.spent_at);
            }
            Err(e) => warn!(error = %e, "receipt analysis skipped"),
        }
    }

    let amount_cents = amount_cents.ok_or_else(|| {
        AppError::Validation(
            "amount_cents is required when no readable receipt is attached".to_string(),
        )
    })?;

    if amount_cents <= 0 {
        return Err(AppError::Validation(
            "amount_cents must be positive".to_string(),
        ));
    }

    let expense = ExpenseRepo::new(state.db.clone())
        .create(CreateExpense {
            amount_cents,
            store_name,
            spent_at,
            memo: body.memo,
            receipt_url: body.receipt_url,
            recorded_by: user.id,
        })
        .await?;

    Ok(Json(expense))
}

pub async fn list(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Advanced).await?;

    let expenses = ExpenseRepo::new(state.db.clone()).list(None).await?;
    Ok(Json(expenses))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Admin).await?;

    let deleted = ExpenseRepo::new(state.db.clone()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("expense not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "success": true })))
}
