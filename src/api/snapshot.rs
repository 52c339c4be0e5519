//! Snapshot endpoints.

use axum::extract::State;
use serde::Serialize;

use super::{success, ApiResult};
use crate::models::Sheets;
use crate::AppState;

/// Size of each collection after a refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCounts {
    pub field_reports: usize,
    pub maintenance_reports: usize,
    pub photos: usize,
    pub sites: usize,
    pub periods: usize,
}

impl From<&Sheets> for SnapshotCounts {
    fn from(sheets: &Sheets) -> Self {
        Self {
            field_reports: sheets.field_reports.len(),
            maintenance_reports: sheets.maintenance_reports.len(),
            photos: sheets.photos.len(),
            sites: sheets.sites.len(),
            periods: sheets.periods.len(),
        }
    }
}

/// POST /api/refresh - Re-read every collection from the gateway.
pub async fn refresh(State(state): State<AppState>) -> ApiResult<SnapshotCounts> {
    state.store.refresh().await?;
    let portal = state.store.lock().await;
    success(SnapshotCounts::from(&portal.sheets))
}

/// GET /api/snapshot - The last snapshot read. Site passwords are omitted.
pub async fn get_snapshot(State(state): State<AppState>) -> ApiResult<Sheets> {
    let portal = state.store.lock().await;
    success(portal.sheets.clone())
}
