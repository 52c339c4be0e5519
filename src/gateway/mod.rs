//! Client for the remote data gateway.
//!
//! The gateway is a single endpoint: GET returns every collection at once,
//! POST upserts one record into the sheet named by its `sheet` field.

use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{Report, SaveResponse, Sheets, SnapshotResponse};

/// Save request body: the record's columns plus the target sheet. The
/// discriminator replaces any `sheet` column carried over from a read.
fn save_body<R: Report>(record: &R) -> Result<String, serde_json::Error> {
    let mut body = serde_json::to_value(record)?;
    if let Value::Object(columns) = &mut body {
        columns.insert("sheet".to_string(), serde_json::to_value(R::SHEET)?);
    }
    serde_json::to_string(&body)
}

#[derive(Debug, Clone)]
pub struct DataGateway {
    client: reqwest::Client,
    url: String,
}

impl DataGateway {
    pub fn new(url: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ramadan-portal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Read the full snapshot. A cache-busting timestamp defeats
    /// intermediary caches.
    pub async fn fetch_snapshot(&self) -> Result<Sheets, AppError> {
        let resp = self
            .client
            .get(&self.url)
            .query(&[("t", Utc::now().timestamp_millis())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Gateway(format!(
                "Gateway read failed with status {}",
                status
            )));
        }

        let body = resp.bytes().await?;
        let snapshot: SnapshotResponse = serde_json::from_slice(&body)?;

        match snapshot {
            SnapshotResponse {
                success: true,
                sheets: Some(sheets),
            } => Ok(sheets),
            _ => Err(AppError::Gateway(
                "Gateway reported an unsuccessful read".to_string(),
            )),
        }
    }

    /// Upsert one record.
    ///
    /// The body is sent as `text/plain` so browsers skip the CORS preflight the
    /// gateway cannot answer. A response that is empty or not JSON is taken as
    /// success, since such gateways often cannot return a readable body.
    pub async fn save<R: Report>(&self, record: &R) -> Result<SaveResponse, AppError> {
        let body = save_body(record).map_err(|e| AppError::Internal(format!("Failed to encode record: {}", e)))?;

        let resp = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        match serde_json::from_str::<SaveResponse>(&text) {
            Ok(parsed) => Ok(parsed),
            Err(_) => {
                tracing::warn!(
                    %status,
                    record_id = record.record_id(),
                    "Unreadable save response, assuming success"
                );
                Ok(SaveResponse::optimistic())
            }
        }
    }
}
