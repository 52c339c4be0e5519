//! Meditation app endpoints.

use std::time::Duration;

use axum::extract::{Query, State};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::models::{Koan, Language};
use crate::zen::{self, BreathPhase, BreathState};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReflectionQuery {
    #[serde(default)]
    pub lang: Language,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingQuery {
    #[serde(default)]
    pub elapsed_ms: u64,
}

/// GET /api/zen/reflection - A generated koan, or the fixed fallback.
pub async fn get_reflection(
    State(state): State<AppState>,
    Query(params): Query<ReflectionQuery>,
) -> ApiResult<Koan> {
    success(zen::reflection(&state.ai, params.lang).await)
}

/// GET /api/zen/breathing - Breathing phase after `elapsedMs`.
pub async fn get_breathing(Query(params): Query<BreathingQuery>) -> ApiResult<BreathState> {
    success(BreathPhase::at(Duration::from_millis(params.elapsed_ms)))
}
