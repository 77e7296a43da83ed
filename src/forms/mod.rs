use serde::Deserialize;

#[derive(Deserialize)]
pub struct SettingsQuery {
    pub tab: Option<String>,
}

#[derive(Deserialize)]
pub struct SettingsForm {
    pub github_user: String,
    pub github_repo: String,
    pub source: String,
    pub fixed_url: String,
    pub probe_timeout_ms: String,
}

/// Textarea payload from the túneles tab, one candidate URL per line.
#[derive(Deserialize)]
pub struct TunnelsForm {
    pub tunnels: String,
}

#[derive(Deserialize)]
pub struct ThemeForm {
    pub theme: String,
}

#[derive(Deserialize)]
pub struct StatusActionForm {
    pub action: String,
}
