use crate::views::layout::{breadcrumb, render_layout};
use tunnelhub::storage::{BackendSource, HubSettings};
use tunnelhub::theme::ThemeKey;

pub fn render_settings_page(
    settings: &HubSettings,
    tunnel_urls: &[String],
    theme: ThemeKey,
    tab: Option<&str>,
    message: Option<&str>,
) -> String {
    let notice = message
        .map(|value| {
            format!(
                "<p class=\"text-success\">{}</p>",
                html_escape::encode_text(value)
            )
        })
        .unwrap_or_default();
    let active_tab = tab.unwrap_or("backend");
    let tabs = format!(
        r#"<ul class="nav nav-tabs mb-3">
          <li class="nav-item"><a class="nav-link {backend_active}" href="/settings?tab=backend">Backend</a></li>
          <li class="nav-item"><a class="nav-link {tunnels_active}" href="/settings?tab=tunnels">Túneles</a></li>
        </ul>"#,
        backend_active = if active_tab == "tunnels" { "" } else { "active" },
        tunnels_active = if active_tab == "tunnels" { "active" } else { "" },
    );

    let tab_content = if active_tab == "tunnels" {
        render_tunnels_form(tunnel_urls)
    } else {
        render_backend_form(settings)
    };

    let content = format!(
        r#"<h1 class="h3 mb-3">Ajustes</h1>
        {notice}
        {tabs}
        {tab_content}"#,
        notice = notice,
        tabs = tabs,
        tab_content = tab_content,
    );

    render_layout(
        "Tunnelhub Ajustes",
        "settings",
        theme,
        vec![breadcrumb("Ajustes", None)],
        &content,
    )
}

fn render_backend_form(settings: &HubSettings) -> String {
    let fixed_selected = if settings.source == BackendSource::Fixed {
        "selected"
    } else {
        ""
    };
    let tunnels_selected = if settings.source == BackendSource::Tunnels {
        "selected"
    } else {
        ""
    };

    format!(
        r#"<form method="post" action="/settings">
          <h2 class="h5">Backend</h2>
          <div class="mb-3">
            <label class="form-label" for="github_user">GitHub user</label>
            <input class="form-control hub-input" id="github_user" name="github_user" value="{github_user}">
          </div>
          <div class="mb-3">
            <label class="form-label" for="github_repo">GitHub repository</label>
            <input class="form-control hub-input" id="github_repo" name="github_repo" value="{github_repo}">
            <div class="form-text text-muted">El enlace del encabezado apunta a <code>https://github.com/&lt;user&gt;/&lt;repo&gt;</code>.</div>
          </div>
          <div class="mb-3">
            <label class="form-label" for="source">Backend source</label>
            <select class="form-select hub-input" id="source" name="source">
              <option value="tunnels" {tunnels_selected}>Lista de túneles (tunnels.json)</option>
              <option value="fixed" {fixed_selected}>URL fija</option>
            </select>
          </div>
          <div class="mb-3">
            <label class="form-label" for="fixed_url">Fixed backend URL</label>
            <input class="form-control hub-input" id="fixed_url" name="fixed_url" value="{fixed_url}" placeholder="https://backend.example.com">
            <div class="form-text text-muted">Solo se usa cuando la fuente es <code>URL fija</code>.</div>
          </div>
          <div class="mb-3">
            <label class="form-label" for="probe_timeout_ms">Probe timeout (ms)</label>
            <input class="form-control hub-input" id="probe_timeout_ms" name="probe_timeout_ms" value="{probe_timeout_ms}">
            <div class="form-text text-muted">Cada candidato se comprueba en <code>&lt;url&gt;/health</code> con este límite.</div>
          </div>
          <button class="btn btn-hub-primary" type="submit">Save</button>
        </form>"#,
        github_user = html_escape::encode_double_quoted_attribute(&settings.github_user),
        github_repo = html_escape::encode_double_quoted_attribute(&settings.github_repo),
        tunnels_selected = tunnels_selected,
        fixed_selected = fixed_selected,
        fixed_url = html_escape::encode_double_quoted_attribute(&settings.fixed_url),
        probe_timeout_ms = settings.probe_timeout_ms,
    )
}

fn render_tunnels_form(tunnel_urls: &[String]) -> String {
    let joined = tunnel_urls.join("\n");
    format!(
        r#"<form method="post" action="/settings/tunnels">
          <h2 class="h5">Túneles</h2>
          <div class="mb-3">
            <label class="form-label" for="tunnels">Candidate URLs</label>
            <textarea class="form-control hub-input" id="tunnels" name="tunnels" rows="8" placeholder="https://abc.trycloudflare.com">{tunnels}</textarea>
            <div class="form-text text-muted">Una URL por línea, en orden de prioridad. La primera que responda a <code>/health</code> se convierte en el backend activo.</div>
          </div>
          <button class="btn btn-hub-primary" type="submit">Save</button>
        </form>"#,
        tunnels = html_escape::encode_text(&joined),
    )
}
