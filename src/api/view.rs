//! Screen navigation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::store::{PortalState, Screen};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewInfo {
    pub screen: Screen,
    /// Open form, when the screen is a form
    pub form: Option<serde_json::Value>,
}

impl ViewInfo {
    pub fn of(state: &PortalState) -> Result<Self, crate::errors::AppError> {
        Ok(Self {
            screen: state.view.screen(),
            form: state.view.form_json()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub screen: Screen,
}

/// GET /api/view - Current screen.
pub async fn get_view(State(state): State<AppState>) -> ApiResult<ViewInfo> {
    let portal = state.store.lock().await;
    success(ViewInfo::of(&portal)?)
}

/// PUT /api/view - Switch to a screen without a form. Any open draft is
/// discarded.
pub async fn set_view(
    State(state): State<AppState>,
    Json(request): Json<NavigateRequest>,
) -> ApiResult<ViewInfo> {
    let mut portal = state.store.lock().await;
    portal.show(request.screen)?;
    tracing::debug!(screen = ?request.screen, "Navigated");
    success(ViewInfo::of(&portal)?)
}
