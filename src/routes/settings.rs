use crate::forms::{SettingsForm, SettingsQuery, TunnelsForm};
use crate::routes::AppState;
use crate::services::parse_tunnel_input;
use crate::views::settings::render_settings_page;
use axum::{Form, extract::State, http::StatusCode, response::Html};
use tunnelhub::storage::{
    self, BackendSource, CandidateDoc, HubSettings, load_settings, save_settings,
};

pub async fn settings_page(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<SettingsQuery>,
) -> Result<Html<String>, (StatusCode, String)> {
    let settings = load_settings(&state.settings_path)
        .await
        .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;
    let tunnels = storage::load_candidate_doc(&state.tunnels_path).await;
    let theme = state.theme.current().await;
    Ok(Html(render_settings_page(
        &settings,
        &tunnels.urls(),
        theme,
        query.tab.as_deref(),
        None,
    )))
}

pub async fn settings_save(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let tunnels = storage::load_candidate_doc(&state.tunnels_path).await;
    let theme = state.theme.current().await;

    let parsed = parse_settings_form(form);
    let settings = match parsed {
        Ok(settings) => settings,
        Err(message) => {
            let existing = load_settings(&state.settings_path)
                .await
                .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;
            return Ok(Html(render_settings_page(
                &existing,
                &tunnels.urls(),
                theme,
                Some("backend"),
                Some(&message),
            )));
        }
    };

    if let Err(message) = settings.validate() {
        return Ok(Html(render_settings_page(
            &settings,
            &tunnels.urls(),
            theme,
            Some("backend"),
            Some(&message),
        )));
    }

    save_settings(&state.settings_path, &settings)
        .await
        .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;
    crate::routes::api::spawn_resolve(state.clone());

    Ok(Html(render_settings_page(
        &settings,
        &tunnels.urls(),
        theme,
        Some("backend"),
        Some("Settings saved."),
    )))
}

pub async fn tunnels_save(
    State(state): State<AppState>,
    Form(form): Form<TunnelsForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let settings = load_settings(&state.settings_path)
        .await
        .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;
    let theme = state.theme.current().await;

    let urls = parse_tunnel_input(&form.tunnels);
    let doc = CandidateDoc::from_urls(urls);
    storage::save_candidate_doc(&state.tunnels_path, &doc)
        .await
        .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;
    crate::routes::api::spawn_resolve(state.clone());

    Ok(Html(render_settings_page(
        &settings,
        &doc.urls(),
        theme,
        Some("tunnels"),
        Some("Tunnel list saved."),
    )))
}

fn parse_settings_form(form: SettingsForm) -> Result<HubSettings, String> {
    let source = match form.source.trim() {
        "fixed" => BackendSource::Fixed,
        "tunnels" => BackendSource::Tunnels,
        other => return Err(format!("unknown backend source: {other}")),
    };
    let probe_timeout_ms = form
        .probe_timeout_ms
        .trim()
        .parse::<u64>()
        .map_err(|_| "probe timeout must be a whole number of milliseconds".to_string())?;

    Ok(HubSettings {
        github_user: form.github_user,
        github_repo: form.github_repo,
        source,
        fixed_url: form.fixed_url,
        probe_timeout_ms,
    })
}
