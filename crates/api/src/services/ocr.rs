use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppError;

/// Structured fields the vision service extracts from a receipt image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReceiptFields {
    pub amount_cents: Option<i32>,
    pub store_name: Option<String>,
    pub spent_at: Option<NaiveDate>,
}

/// Client for the external receipt-OCR analyzer. A missing configuration or
/// failed call surfaces as `Upstream`; callers treat that as non-fatal and
/// fall back to manually entered fields.
#[derive(Clone)]
pub struct ReceiptAnalyzer {
    client: reqwest::Client,
    endpoint: Option<String>,
    api_key: Option<String>,
}

impl ReceiptAnalyzer {
    pub fn from_env() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: std::env::var("OCR_ENDPOINT").ok(),
            api_key: std::env::var("OCR_API_KEY").ok(),
        }
    }

    pub async fn analyze(&self, image_url: &str) -> Result<ReceiptFields, AppError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| AppError::Upstream("receipt analyzer is not configured".to_string()))?;

        let mut request = self
            .client
            .post(endpoint)
            .json(&serde_json::json!({ "image_url": image_url }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("receipt analysis failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "receipt analysis failed: {}",
                response.status()
            )));
        }

        response
            .json::<ReceiptFields>()
            .await
            .map_err(|e| AppError::Upstream(format!("failed to parse analyzer response: {}", e)))
    }
}
