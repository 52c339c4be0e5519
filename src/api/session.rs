//! Reviewer session and notification endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::store::{Notification, PortalState, Screen};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub admin: bool,
    /// False when no reviewer secret is configured
    pub admin_enabled: bool,
    pub screen: Screen,
    pub notification: Option<Notification>,
}

impl SessionInfo {
    fn new(state: &PortalState, admin_enabled: bool) -> Self {
        Self {
            admin: state.admin,
            admin_enabled,
            screen: state.view.screen(),
            notification: state.notification.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// GET /api/session - Admin flag, current screen and pending notification.
pub async fn get_session(State(state): State<AppState>) -> ApiResult<SessionInfo> {
    let portal = state.store.lock().await;
    success(SessionInfo::new(&portal, state.admin_gate.is_enabled()))
}

/// POST /api/session/admin - Enter reviewer mode.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<SessionInfo> {
    if !state.admin_gate.verify(&request.password) {
        tracing::warn!("Rejected reviewer login");
        return Err(AppError::Unauthorized("Invalid reviewer password".to_string()));
    }

    let mut portal = state.store.lock().await;
    portal.admin = true;
    tracing::info!("Reviewer mode enabled");
    success(SessionInfo::new(&portal, true))
}

/// DELETE /api/session/admin - Leave reviewer mode.
pub async fn admin_logout(State(state): State<AppState>) -> ApiResult<SessionInfo> {
    let mut portal = state.store.lock().await;
    portal.admin = false;
    tracing::info!("Reviewer mode disabled");
    success(SessionInfo::new(&portal, state.admin_gate.is_enabled()))
}

/// DELETE /api/session/notification - Dismiss the current notification.
pub async fn dismiss_notification(State(state): State<AppState>) -> ApiResult<SessionInfo> {
    let mut portal = state.store.lock().await;
    portal.notification = None;
    success(SessionInfo::new(&portal, state.admin_gate.is_enabled()))
}
