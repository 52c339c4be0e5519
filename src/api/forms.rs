//! Form endpoints.
//!
//! Opening a form makes it the current screen; every later call acts on that
//! form. The responses carry the refreshed form so the UI can re-render.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult, ViewInfo};
use crate::errors::AppError;
use crate::models::{ApprovalStatus, SaveResponse};
use crate::store::PortalState;
use crate::AppState;

/// Open an existing record instead of an empty draft.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenFormQuery {
    pub record_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SiteRequest {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct DayRequest {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct FieldRequest {
    /// Column header
    pub field: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ApprovalRequest {
    /// One of `pending`, `approved`, `rejected`, `resubmit`
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResult {
    pub record_id: Option<String>,
}

fn current(state: &PortalState) -> ApiResult<ViewInfo> {
    success(ViewInfo::of(state)?)
}

/// POST /api/forms/field-report - Open the field report form.
pub async fn open_field_report(
    State(state): State<AppState>,
    Query(params): Query<OpenFormQuery>,
) -> ApiResult<ViewInfo> {
    let mut portal = state.store.lock().await;
    portal.open_field_report(params.record_id.as_deref())?;
    current(&portal)
}

/// POST /api/forms/maintenance - Open the maintenance form.
pub async fn open_maintenance(
    State(state): State<AppState>,
    Query(params): Query<OpenFormQuery>,
) -> ApiResult<ViewInfo> {
    let mut portal = state.store.lock().await;
    portal.open_maintenance(params.record_id.as_deref())?;
    current(&portal)
}

/// GET /api/forms/current - The open form.
pub async fn get_current_form(State(state): State<AppState>) -> ApiResult<ViewInfo> {
    let portal = state.store.lock().await;
    if portal.view.form_json()?.is_none() {
        return Err(AppError::NoActiveForm);
    }
    current(&portal)
}

/// PUT /api/forms/current/site - Select the reporting site.
pub async fn select_site(
    State(state): State<AppState>,
    Json(request): Json<SiteRequest>,
) -> ApiResult<ViewInfo> {
    let mut portal = state.store.lock().await;
    portal.select_site(&request.code)?;
    current(&portal)
}

/// PUT /api/forms/current/password - Enter the site password.
pub async fn enter_password(
    State(state): State<AppState>,
    Json(request): Json<PasswordRequest>,
) -> ApiResult<ViewInfo> {
    let mut portal = state.store.lock().await;
    portal.enter_password(&request.password)?;
    current(&portal)
}

/// PUT /api/forms/current/day - Select the reporting day.
pub async fn select_day(
    State(state): State<AppState>,
    Json(request): Json<DayRequest>,
) -> ApiResult<ViewInfo> {
    let mut portal = state.store.lock().await;
    portal.select_day(&request.code)?;
    current(&portal)
}

/// PUT /api/forms/current/fields - Update one column of the draft.
pub async fn set_field(
    State(state): State<AppState>,
    Json(request): Json<FieldRequest>,
) -> ApiResult<ViewInfo> {
    let mut portal = state.store.lock().await;
    portal.set_field(&request.field, &request.value)?;
    current(&portal)
}

/// PUT /api/forms/current/approval - Set the review status (reviewers only).
pub async fn set_approval(
    State(state): State<AppState>,
    Json(request): Json<ApprovalRequest>,
) -> ApiResult<ViewInfo> {
    let status = ApprovalStatus::from_api(&request.status).ok_or_else(|| {
        AppError::BadRequest(format!("Unknown approval status: {}", request.status))
    })?;

    let mut portal = state.store.lock().await;
    portal.set_approval(status)?;
    current(&portal)
}

/// POST /api/forms/current/submit - Validate and save the open form.
pub async fn submit_form(State(state): State<AppState>) -> ApiResult<SubmitResult> {
    let SaveResponse { record_id, .. } = state.store.submit_current().await?;
    success(SubmitResult { record_id })
}
