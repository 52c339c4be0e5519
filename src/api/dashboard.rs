//! Dashboard endpoints.

use axum::extract::State;
use serde::Serialize;

use super::{success, ApiResult};
use crate::views::dashboard::{self, DashboardSummary};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct Insight {
    pub text: String,
}

/// GET /api/dashboard - Totals over the current snapshot.
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<DashboardSummary> {
    let portal = state.store.lock().await;
    success(dashboard::summarize(&portal.sheets))
}

/// POST /api/dashboard/insight - AI summary of every field report.
pub async fn generate_insight(State(state): State<AppState>) -> ApiResult<Insight> {
    let records = state.store.lock().await.sheets.field_reports.clone();
    let text = dashboard::insight(&state.ai, &records).await;
    success(Insight { text })
}
