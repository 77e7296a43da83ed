use crate::services::{format_checked_at, safe_link};
use crate::views::helpers::hidden_field;
use crate::views::layout::{breadcrumb, render_layout};
use tunnelhub::resolver::StatusSnapshot;
use tunnelhub::storage::HubSettings;
use tunnelhub::theme::ThemeKey;

pub fn render_hub_page(
    settings: &HubSettings,
    snapshot: &StatusSnapshot,
    theme: ThemeKey,
) -> String {
    let repo_link = match settings.repo_url() {
        Some(url) => format!(
            r#"<a id="repoLink" class="repo-link" href="{href}" target="_blank" rel="noopener">{user}/{repo}</a>"#,
            href = html_escape::encode_double_quoted_attribute(&url),
            user = html_escape::encode_text(settings.github_user.trim()),
            repo = html_escape::encode_text(settings.github_repo.trim()),
        ),
        None => r#"<span id="repoLink" class="repo-link text-muted">Repositorio sin configurar</span>"#
            .to_string(),
    };

    let content = format!(
        r#"<div class="d-flex justify-content-between align-items-center mb-3">
          <h1 class="h3 mb-0">Tunnelhub</h1>
          {repo_link}
        </div>
        <div class="row g-3">
          <div class="col-12">
            {status_card}
          </div>
          <div class="col-12">
            {theme_section}
          </div>
        </div>"#,
        repo_link = repo_link,
        status_card = render_backend_status_card(snapshot, None),
        theme_section = render_theme_section(theme),
    );

    render_layout(
        "Tunnelhub",
        "hub",
        theme,
        vec![breadcrumb("Hub", None)],
        &content,
    )
}

pub fn render_backend_status_card(snapshot: &StatusSnapshot, message: Option<&str>) -> String {
    let notice = message
        .map(|value| {
            format!(
                "<p class=\"text-warning mb-2\">{}</p>",
                html_escape::encode_text(value)
            )
        })
        .unwrap_or_default();

    let open_button = match safe_link(snapshot.active_url.as_deref()) {
        Some(url) => format!(
            r#"<a id="openBackend" class="btn btn-sm btn-hub-primary" href="{href}" target="_blank" rel="noopener">Abrir backend</a>"#,
            href = html_escape::encode_double_quoted_attribute(url),
        ),
        None => {
            r#"<a id="openBackend" class="btn btn-sm btn-hub-primary disabled" aria-disabled="true">Abrir backend</a>"#
                .to_string()
        }
    };

    let embed = match safe_link(snapshot.active_url.as_deref()) {
        Some(url) if snapshot.status.is_online() => format!(
            r#"<iframe id="docsFrame" class="docs-frame" src="{src}" title="Backend docs"></iframe>"#,
            src = html_escape::encode_double_quoted_attribute(&format!("{url}/docs")),
        ),
        _ => {
            r#"<p id="embedHint" class="text-muted mb-0">La documentación del backend aparecerá aquí cuando esté en línea.</p>"#
                .to_string()
        }
    };

    let checked_line = match snapshot.checked_at {
        Some(seconds) => format!(
            "Última comprobación: {} · Candidatos: {}",
            format_checked_at(seconds),
            snapshot.candidates.len(),
        ),
        None => "Comprobando candidatos\u{2026}".to_string(),
    };

    format!(
        r##"<div id="backend-status-card" class="card card-body hub-status-card">
          <h2 class="h6 text-uppercase text-muted">Estado del backend</h2>
          {notice}
          <p class="mb-1"><span id="backendStatus" class="status-pill {status_class}">{status_label}</span></p>
          <p class="small text-muted mb-3">{checked_line}</p>
          <div class="d-flex flex-wrap gap-2 mb-3">
            {open_button}
            <form method="post" action="/partials/backend-status" hx-post="/partials/backend-status" hx-target="#backend-status-card" hx-swap="outerHTML">
              {retry_field}
              <button id="tryAgain" class="btn btn-sm btn-hub-secondary" type="submit">Reintentar</button>
            </form>
          </div>
          {embed}
        </div>"##,
        notice = notice,
        status_class = snapshot.status.css_class(),
        status_label = snapshot.status.label(),
        checked_line = html_escape::encode_text(&checked_line),
        open_button = open_button,
        retry_field = hidden_field("action", "retry"),
        embed = embed,
    )
}

fn render_theme_section(theme: ThemeKey) -> String {
    let mut buttons = String::new();
    for key in ThemeKey::all() {
        let active = if key == theme { " active" } else { "" };
        buttons.push_str(&format!(
            r#"<form method="post" action="/theme" class="seg-form">
              {field}
              <button class="seg{active}" type="submit" data-theme="{key}">{label}</button>
            </form>"#,
            field = hidden_field("theme", key.as_str()),
            active = active,
            key = key.as_str(),
            label = key.label(),
        ));
    }

    let mut panels = String::new();
    for key in ThemeKey::all() {
        let visible = if key == theme { " visible" } else { "" };
        panels.push_str(&format!(
            r#"<div id="{panel}" class="mock{visible}">{body}</div>"#,
            panel = key.panel_id(),
            visible = visible,
            body = mock_panel_body(key),
        ));
    }

    format!(
        r#"<section class="theme-picker card card-body">
          <h2 class="h6 text-uppercase text-muted">Vista previa de temas</h2>
          <div class="segmented">{buttons}</div>
          <div class="mocks mt-3">{panels}</div>
        </section>"#,
        buttons = buttons,
        panels = panels,
    )
}

fn mock_panel_body(theme: ThemeKey) -> &'static str {
    match theme {
        ThemeKey::Cards => {
            r#"<div class="mock-card"></div><div class="mock-card"></div><div class="mock-card"></div>"#
        }
        ThemeKey::Dark => r#"<div class="mock-row"></div><div class="mock-row"></div><div class="mock-row"></div>"#,
        ThemeKey::Steps => r#"<ol class="mock-steps"><li>Instalar</li><li>Configurar</li><li>Publicar</li></ol>"#,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunnelhub::resolver::BackendStatus;

    fn snapshot(status: BackendStatus, active_url: Option<&str>) -> StatusSnapshot {
        StatusSnapshot {
            status,
            active_url: active_url.map(str::to_string),
            candidates: vec!["https://a.trycloudflare.com".to_string()],
            checked_at: Some(1_700_000_000),
        }
    }

    #[test]
    fn online_card_links_and_embeds_the_backend() {
        let html = render_backend_status_card(
            &snapshot(BackendStatus::Online, Some("https://a.trycloudflare.com")),
            None,
        );
        assert!(html.contains("Online"));
        assert!(html.contains(r#"href="https://a.trycloudflare.com""#));
        assert!(html.contains(r#"src="https://a.trycloudflare.com/docs""#));
        assert!(!html.contains("embedHint"));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn offline_card_disables_link_and_hides_embed() {
        let html = render_backend_status_card(&snapshot(BackendStatus::Offline, None), None);
        assert!(html.contains("Offline"));
        assert!(html.contains("disabled"));
        assert!(!html.contains("docsFrame"));
        assert!(html.contains("embedHint"));
    }

    #[test]
    fn missing_configuration_shows_its_own_label() {
        let html = render_backend_status_card(&snapshot(BackendStatus::NotConfigured, None), None);
        assert!(html.contains("Sin URL configurada"));
        assert!(html.contains("status-missing"));
    }

    #[test]
    fn non_http_active_url_is_not_linked() {
        let html = render_backend_status_card(
            &snapshot(BackendStatus::Online, Some("javascript:alert(1)")),
            None,
        );
        assert!(html.contains("disabled"));
        assert!(!html.contains(r#"href="javascript"#));
        assert!(!html.contains("docsFrame"));
    }

    #[test]
    fn exactly_the_selected_mock_panel_is_visible() {
        let html = render_theme_section(ThemeKey::Dark);
        assert!(html.contains(r#"id="mock-dark" class="mock visible""#));
        assert!(html.contains(r#"id="mock-cards" class="mock""#));
        assert!(html.contains(r#"id="mock-steps" class="mock""#));
        assert_eq!(html.matches("mock visible").count(), 1);
    }

    #[test]
    fn selected_theme_button_is_active() {
        let html = render_theme_section(ThemeKey::Steps);
        assert!(html.contains(r#"class="seg active" type="submit" data-theme="steps""#));
        assert!(html.contains(r#"class="seg" type="submit" data-theme="cards""#));
    }
}
