pub mod api;
pub mod health;
pub mod hub;
pub mod settings;

use axum::{Router, routing::get};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tunnelhub::probe::ReqwestProber;
use tunnelhub::resolver::BackendResolver;
use tunnelhub::storage::{settings_path, tunnels_path};
use tunnelhub::theme::ThemeSwitcher;

#[derive(Clone)]
pub struct AppState {
    pub settings_path: PathBuf,
    pub tunnels_path: PathBuf,
    pub resolver: BackendResolver,
    pub theme: ThemeSwitcher,
}

pub fn build_router(state: AppState) -> Router {
    let web_dir = web_dir();
    Router::new()
        .route("/api/status", get(api::status))
        .route("/api/resolve", axum::routing::post(api::resolve))
        .route("/api/status/stream", get(api::status_stream))
        .route("/api/tunnels", get(api::get_tunnels).post(api::set_tunnels))
        .route("/settings", get(settings::settings_page).post(settings::settings_save))
        .route("/settings/tunnels", axum::routing::post(settings::tunnels_save))
        .route("/theme", axum::routing::post(hub::select_theme))
        .route("/partials/header-status", get(hub::header_status_partial))
        .route("/partials/backend-status", get(hub::backend_status_card).post(hub::backend_status_action))
        .route("/health", get(health::health))
        .route("/", get(hub::hub_page))
        .nest_service("/web", ServeDir::new(web_dir))
        .with_state(state)
}

pub fn default_state() -> AppState {
    AppState {
        settings_path: settings_path(),
        tunnels_path: tunnels_path(),
        resolver: BackendResolver::new(Arc::new(ReqwestProber::new())),
        theme: ThemeSwitcher::new(),
    }
}

fn web_dir() -> PathBuf {
    std::env::var("TUNNELHUB_WEB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("web"))
}
