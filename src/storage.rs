use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the candidate base URLs for the backend come from.
///
/// `Fixed` pins a single URL from the settings; `Tunnels` reads the ordered
/// list published in the candidate resource (`tunnels.json`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendSource {
    Fixed,
    #[default]
    Tunnels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubSettings {
    pub github_user: String,
    pub github_repo: String,
    pub source: BackendSource,
    pub fixed_url: String,
    pub probe_timeout_ms: u64,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            github_user: String::new(),
            github_repo: String::new(),
            source: BackendSource::Tunnels,
            fixed_url: String::new(),
            probe_timeout_ms: 3500,
        }
    }
}

impl HubSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.probe_timeout_ms == 0 {
            return Err("probe_timeout_ms must be greater than zero".to_string());
        }
        if self.source == BackendSource::Fixed && self.fixed_url.trim().is_empty() {
            return Err("fixed_url must not be empty when source is fixed".to_string());
        }
        Ok(())
    }

    pub fn repo_url(&self) -> Option<String> {
        let user = self.github_user.trim();
        let repo = self.github_repo.trim();
        if user.is_empty() || repo.is_empty() {
            None
        } else {
            Some(format!("https://github.com/{user}/{repo}"))
        }
    }
}

/// The candidate resource as published on disk: `{"tunnels": [...]}`.
///
/// Entries are kept as raw JSON values so a sloppy publisher (nulls, numbers,
/// empty strings) round-trips through the API; [`CandidateDoc::urls`] is the
/// filtered view the resolver consumes.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CandidateDoc {
    pub tunnels: Vec<serde_json::Value>,
}

impl CandidateDoc {
    pub fn from_urls(urls: Vec<String>) -> Self {
        Self {
            tunnels: urls.into_iter().map(serde_json::Value::String).collect(),
        }
    }

    /// Ordered candidate URLs: non-string and empty entries are discarded.
    pub fn urls(&self) -> Vec<String> {
        self.tunnels
            .iter()
            .filter_map(|entry| entry.as_str())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }
}

pub fn base_dir() -> PathBuf {
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("tunnelhub");
    }
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("tunnelhub");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config").join("tunnelhub");
    }
    PathBuf::from("tunnelhub-data")
}

pub fn settings_path() -> PathBuf {
    base_dir().join("settings.json")
}

pub fn tunnels_path() -> PathBuf {
    base_dir().join("tunnels.json")
}

pub async fn load_settings(path: &Path) -> Result<HubSettings, String> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => serde_json::from_str(&contents)
            .map_err(|err| format!("failed to parse settings: {err}")),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HubSettings::default()),
        Err(err) => Err(format!("failed to read settings: {err}")),
    }
}

pub async fn save_settings(path: &Path, settings: &HubSettings) -> Result<(), String> {
    let data = serde_json::to_string_pretty(settings)
        .map_err(|err| format!("failed to serialize settings: {err}"))?;
    write_atomically(path, &data).await
}

/// Loads the raw candidate document. Missing or malformed resources yield the
/// empty document: a broken publisher must degrade to "not configured", not
/// to an error page.
pub async fn load_candidate_doc(path: &Path) -> CandidateDoc {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => parse_candidate_doc(&contents),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "candidate resource unavailable");
            CandidateDoc::default()
        }
    }
}

pub fn parse_candidate_doc(contents: &str) -> CandidateDoc {
    match serde_json::from_str(contents) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::debug!(error = %err, "candidate resource malformed, treating as empty");
            CandidateDoc::default()
        }
    }
}

pub async fn save_candidate_doc(path: &Path, doc: &CandidateDoc) -> Result<(), String> {
    let data = serde_json::to_string_pretty(doc)
        .map_err(|err| format!("failed to serialize tunnels: {err}"))?;
    write_atomically(path, &data).await
}

/// The ordered probe list for one resolution cycle, honoring the source mode.
pub async fn candidate_list(settings: &HubSettings, tunnels_path: &Path) -> Vec<String> {
    match settings.source {
        BackendSource::Fixed => {
            let url = settings.fixed_url.trim();
            if url.is_empty() {
                Vec::new()
            } else {
                vec![url.to_string()]
            }
        }
        BackendSource::Tunnels => load_candidate_doc(tunnels_path).await.urls(),
    }
}

async fn write_atomically(path: &Path, data: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| format!("failed to create config dir: {err}"))?;
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, data)
        .await
        .map_err(|err| format!("failed to write temp file: {err}"))?;

    if tokio::fs::metadata(path).await.is_ok() {
        tokio::fs::remove_file(path)
            .await
            .map_err(|err| format!("failed to remove old file: {err}"))?;
    }

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|err| format!("failed to move file into place: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn base_dir_prefers_appdata() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        let original = std::env::var("APPDATA").ok();
        std::env::set_var("APPDATA", "C:\\Users\\test\\AppData\\Roaming");

        let base = base_dir();
        assert!(base.to_string_lossy().contains("AppData"));
        assert!(base.to_string_lossy().ends_with("tunnelhub"));

        if let Some(value) = original {
            std::env::set_var("APPDATA", value);
        } else {
            std::env::remove_var("APPDATA");
        }
    }

    #[test]
    fn malformed_candidate_doc_is_empty() {
        let doc = parse_candidate_doc("{not json");
        assert!(doc.urls().is_empty());
    }

    #[test]
    fn candidate_doc_discards_non_string_entries() {
        let doc = parse_candidate_doc(
            r#"{"tunnels": ["https://a.trycloudflare.com", null, 7, "", "   ", false, "https://b.trycloudflare.com"]}"#,
        );
        assert_eq!(
            doc.urls(),
            vec![
                "https://a.trycloudflare.com".to_string(),
                "https://b.trycloudflare.com".to_string(),
            ]
        );
    }

    #[test]
    fn candidate_doc_without_tunnels_field_is_empty() {
        let doc = parse_candidate_doc("{}");
        assert!(doc.urls().is_empty());
    }

    #[test]
    fn settings_default_uses_tunnel_list() {
        let settings = HubSettings::default();
        assert_eq!(settings.source, BackendSource::Tunnels);
        assert_eq!(settings.probe_timeout_ms, 3500);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn fixed_source_requires_url() {
        let settings = HubSettings {
            source: BackendSource::Fixed,
            ..HubSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn repo_url_needs_both_parts() {
        let mut settings = HubSettings::default();
        assert_eq!(settings.repo_url(), None);
        settings.github_user = "camilo".to_string();
        assert_eq!(settings.repo_url(), None);
        settings.github_repo = "starlab".to_string();
        assert_eq!(
            settings.repo_url().as_deref(),
            Some("https://github.com/camilo/starlab")
        );
    }

    #[tokio::test]
    async fn missing_candidate_file_is_empty() {
        let path = std::env::temp_dir().join("tunnelhub-test-does-not-exist.json");
        let doc = load_candidate_doc(&path).await;
        assert!(doc.urls().is_empty());
    }

    #[tokio::test]
    async fn saved_settings_reload_intact() {
        let dir = std::env::temp_dir().join("tunnelhub-test-settings");
        let path = dir.join("settings.json");
        let _ = tokio::fs::remove_dir_all(&dir).await;

        let first = HubSettings {
            github_user: "camilo".to_string(),
            github_repo: "starlab".to_string(),
            probe_timeout_ms: 2000,
            ..HubSettings::default()
        };
        save_settings(&path, &first).await.expect("first save");
        assert_eq!(load_settings(&path).await.expect("first load"), first);

        // The second save finds an existing file and replaces it through the
        // same tmp-then-rename path.
        let second = HubSettings {
            source: BackendSource::Fixed,
            fixed_url: "https://backend.example.com".to_string(),
            probe_timeout_ms: 1234,
            ..first
        };
        save_settings(&path, &second).await.expect("second save");
        assert_eq!(load_settings(&path).await.expect("second load"), second);
        assert!(tokio::fs::metadata(path.with_extension("json.tmp"))
            .await
            .is_err());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
