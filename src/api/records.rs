//! Record and maintenance list endpoints.

use axum::extract::{Query, State};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::models::{FieldReport, MaintenanceReport};
use crate::views::list::filter_and_sort;
use crate::AppState;

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Search term; empty keeps every record.
    #[serde(default)]
    pub q: String,
}

/// GET /api/records - Field reports matching `q`, newest first.
pub async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> ApiResult<Vec<FieldReport>> {
    let portal = state.store.lock().await;
    success(filter_and_sort(&portal.sheets.field_reports, &params.q))
}

/// GET /api/maintenance - Maintenance reports matching `q`, newest first.
pub async fn list_maintenance(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> ApiResult<Vec<MaintenanceReport>> {
    let portal = state.store.lock().await;
    success(filter_and_sort(&portal.sheets.maintenance_reports, &params.q))
}
