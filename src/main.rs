//! Ramadan Field Portal
//!
//! Local portal service for the mosque field-report programme: daily field
//! reports and maintenance reports gated per site, a reviewer approval mode,
//! dashboards backed by a remote spreadsheet gateway, and a small meditation
//! app.

mod ai;
mod api;
mod auth;
mod config;
mod errors;
mod forms;
mod gateway;
mod hijri;
mod models;
mod store;
mod views;
mod zen;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ai::TextGateway;
use auth::AdminGate;
use config::Config;
use gateway::DataGateway;
use store::Store;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub ai: Arc<TextGateway>,
    pub admin_gate: Arc<AdminGate>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, errors::AppError> {
        let gateway = DataGateway::new(config.gateway_url.clone())?;
        let ai = TextGateway::new(
            config.ai_base_url.clone(),
            config.ai_model.clone(),
            config.ai_api_key.clone(),
        )?;

        Ok(Self {
            store: Arc::new(Store::new(gateway, config.refresh_delay)),
            ai: Arc::new(ai),
            admin_gate: Arc::new(AdminGate::new(config.admin_password.clone())),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Ramadan Field Portal");
    tracing::info!("Data gateway: {}", config.gateway_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.admin_password.is_none() {
        tracing::warn!("No reviewer password configured (PORTAL_ADMIN_PASSWORD). Reviewer mode is disabled!");
    }

    let state = AppState::from_config(&config)?;

    if !state.ai.is_configured() {
        tracing::warn!("No generative text API key configured (GEMINI_API_KEY). AI features will use fallbacks");
    }

    // Initial load; the portal still starts when the gateway is down
    if let Err(e) = state.store.refresh().await {
        tracing::warn!("Initial snapshot load failed: {}", e);
    }

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Session
        .route("/session", get(api::get_session))
        .route("/session/admin", post(api::admin_login))
        .route("/session/admin", delete(api::admin_logout))
        .route("/session/notification", delete(api::dismiss_notification))
        // Snapshot
        .route("/refresh", post(api::refresh))
        .route("/snapshot", get(api::get_snapshot))
        // Navigation
        .route("/view", get(api::get_view))
        .route("/view", put(api::set_view))
        // Dashboard
        .route("/dashboard", get(api::get_dashboard))
        .route("/dashboard/insight", post(api::generate_insight))
        // Lists
        .route("/records", get(api::list_records))
        .route("/maintenance", get(api::list_maintenance))
        // Forms
        .route("/forms/field-report", post(api::open_field_report))
        .route("/forms/maintenance", post(api::open_maintenance))
        .route("/forms/current", get(api::get_current_form))
        .route("/forms/current/site", put(api::select_site))
        .route("/forms/current/password", put(api::enter_password))
        .route("/forms/current/day", put(api::select_day))
        .route("/forms/current/fields", put(api::set_field))
        .route("/forms/current/approval", put(api::set_approval))
        .route("/forms/current/submit", post(api::submit_form))
        // Meditation
        .route("/zen/reflection", get(api::get_reflection))
        .route("/zen/breathing", get(api::get_breathing));

    let public_routes = Router::new()
        .route("/", get(api::landing))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(public_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
