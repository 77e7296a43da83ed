use crate::forms::{StatusActionForm, ThemeForm};
use crate::routes::AppState;
use crate::services::current_datetime;
use crate::views::hub::{render_backend_status_card, render_hub_page};
use crate::views::layout::template_env;
use axum::{Form, extract::State, http::StatusCode, response::Html};
use minijinja::context;
use tunnelhub::storage::load_settings;
use tunnelhub::theme::ThemeKey;

pub async fn hub_page(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let settings = load_settings(&state.settings_path)
        .await
        .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;
    let snapshot = state.resolver.snapshot().await;
    let theme = state.theme.current().await;
    Ok(Html(render_hub_page(&settings, &snapshot, theme)))
}

pub async fn header_status_partial(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let snapshot = state.resolver.snapshot().await;
    let datetime = current_datetime();
    let status_class = format!("status-pill {}", snapshot.status.css_class());

    let context = context! {
        datetime => datetime,
        backend_status => snapshot.status.label(),
        status_class => status_class,
        active_url => snapshot.active_url,
    };

    let html = template_env()
        .get_template("partials/header_status.html")
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?
        .render(context)
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    Ok(Html(html))
}

pub async fn backend_status_card(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let snapshot = state.resolver.snapshot().await;
    Ok(Html(render_backend_status_card(&snapshot, None)))
}

pub async fn backend_status_action(
    State(state): State<AppState>,
    Form(form): Form<StatusActionForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    match form.action.trim() {
        "retry" => {
            let settings = load_settings(&state.settings_path)
                .await
                .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;
            let snapshot = state.resolver.resolve(&settings, &state.tunnels_path).await;
            Ok(Html(render_backend_status_card(&snapshot, None)))
        }
        _ => {
            let snapshot = state.resolver.snapshot().await;
            Ok(Html(render_backend_status_card(
                &snapshot,
                Some("Unknown action."),
            )))
        }
    }
}

pub async fn select_theme(
    State(state): State<AppState>,
    Form(form): Form<ThemeForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let theme = ThemeKey::parse(&form.theme)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("unknown theme: {}", form.theme)))?;
    state.theme.select(theme).await;

    let settings = load_settings(&state.settings_path)
        .await
        .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;
    let snapshot = state.resolver.snapshot().await;
    Ok(Html(render_hub_page(&settings, &snapshot, theme)))
}
