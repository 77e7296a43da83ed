use crate::probe::HealthProbe;
use crate::storage::{self, HubSettings};
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};

/// Lifecycle of the hub's connection to its backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendStatus {
    Checking,
    Online,
    Offline,
    NotConfigured,
}

impl BackendStatus {
    /// User-facing label, matching the hub page's wording.
    pub fn label(&self) -> &'static str {
        match self {
            BackendStatus::Checking => "Verificando\u{2026}",
            BackendStatus::Online => "Online \u{2705}",
            BackendStatus::Offline => "Offline \u{26d4}",
            BackendStatus::NotConfigured => "Sin URL configurada",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            BackendStatus::Checking => "status-checking",
            BackendStatus::Online => "status-online",
            BackendStatus::Offline => "status-offline",
            BackendStatus::NotConfigured => "status-missing",
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, BackendStatus::Online)
    }
}

/// Everything a status consumer needs to render the current backend state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub status: BackendStatus,
    pub active_url: Option<String>,
    pub candidates: Vec<String>,
    pub checked_at: Option<i64>,
}

impl StatusSnapshot {
    fn initial() -> Self {
        Self {
            status: BackendStatus::Checking,
            active_url: None,
            candidates: Vec::new(),
            checked_at: None,
        }
    }
}

/// Discovers the active backend by probing candidate URLs in order.
///
/// Each call to [`resolve`](Self::resolve) is one cycle. Cycles may overlap
/// (a manual retry while a scheduled check is still probing); only the most
/// recently started cycle is allowed to touch the shared snapshot, so stale
/// cycles finish quietly without clobbering fresher results.
#[derive(Clone)]
pub struct BackendResolver {
    probe: Arc<dyn HealthProbe>,
    state: Arc<Mutex<StatusSnapshot>>,
    issued: Arc<AtomicU64>,
    updates: broadcast::Sender<StatusSnapshot>,
}

impl BackendResolver {
    pub fn new(probe: Arc<dyn HealthProbe>) -> Self {
        let (updates, _) = broadcast::channel(16);
        Self {
            probe,
            state: Arc::new(Mutex::new(StatusSnapshot::initial())),
            issued: Arc::new(AtomicU64::new(0)),
            updates,
        }
    }

    /// The most recently applied snapshot.
    pub async fn snapshot(&self) -> StatusSnapshot {
        self.state.lock().await.clone()
    }

    /// Subscribes to snapshot updates as cycles apply them.
    pub fn subscribe(&self) -> broadcast::Receiver<StatusSnapshot> {
        self.updates.subscribe()
    }

    /// Runs one discovery cycle and returns the snapshot the hub should show.
    ///
    /// Candidates come from `settings` (either the fixed URL or the tunnel
    /// list at `tunnels_path`) and are probed sequentially. The first
    /// reachable candidate wins and later ones are never probed. When this
    /// cycle has been superseded mid-flight, the fresher cycle's snapshot is
    /// returned instead of this one's.
    pub async fn resolve(&self, settings: &HubSettings, tunnels_path: &Path) -> StatusSnapshot {
        let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let candidates = storage::candidate_list(settings, tunnels_path).await;

        self.apply(
            token,
            StatusSnapshot {
                status: BackendStatus::Checking,
                active_url: None,
                candidates: candidates.clone(),
                checked_at: None,
            },
        )
        .await;

        if candidates.is_empty() {
            tracing::info!("no backend candidates configured");
            return self
                .finish(
                    token,
                    StatusSnapshot {
                        status: BackendStatus::NotConfigured,
                        active_url: None,
                        candidates,
                        checked_at: Some(epoch_seconds()),
                    },
                )
                .await;
        }

        let timeout = Duration::from_millis(settings.probe_timeout_ms);
        for base in &candidates {
            if self.is_stale(token) {
                tracing::debug!(token, "cycle superseded, stopping probe loop");
                return self.snapshot().await;
            }
            let outcome = self.probe.probe(base, timeout).await;
            if outcome.ok {
                tracing::info!(url = %outcome.url, status = outcome.status, "backend online");
                return self
                    .finish(
                        token,
                        StatusSnapshot {
                            status: BackendStatus::Online,
                            active_url: Some(outcome.url),
                            candidates,
                            checked_at: Some(epoch_seconds()),
                        },
                    )
                    .await;
            }
            tracing::debug!(url = %outcome.url, status = outcome.status, "candidate unreachable");
        }

        tracing::warn!(count = candidates.len(), "no backend candidate responded");
        self.finish(
            token,
            StatusSnapshot {
                status: BackendStatus::Offline,
                active_url: None,
                candidates,
                checked_at: Some(epoch_seconds()),
            },
        )
        .await
    }

    async fn finish(&self, token: u64, snapshot: StatusSnapshot) -> StatusSnapshot {
        if self.apply(token, snapshot.clone()).await {
            snapshot
        } else {
            self.snapshot().await
        }
    }

    /// Writes `snapshot` into shared state unless a fresher cycle has started.
    async fn apply(&self, token: u64, snapshot: StatusSnapshot) -> bool {
        let mut state = self.state.lock().await;
        if token != self.issued.load(Ordering::SeqCst) {
            tracing::debug!(token, "discarding update from superseded cycle");
            return false;
        }
        *state = snapshot.clone();
        drop(state);
        let _ = self.updates.send(snapshot);
        true
    }

    fn is_stale(&self, token: u64) -> bool {
        token != self.issued.load(Ordering::SeqCst)
    }
}

fn epoch_seconds() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_hub_wording() {
        assert_eq!(BackendStatus::Checking.label(), "Verificando…");
        assert_eq!(BackendStatus::NotConfigured.label(), "Sin URL configurada");
        assert!(BackendStatus::Online.label().starts_with("Online"));
        assert!(BackendStatus::Offline.label().starts_with("Offline"));
    }

    #[test]
    fn only_online_counts_as_online() {
        assert!(BackendStatus::Online.is_online());
        assert!(!BackendStatus::Checking.is_online());
        assert!(!BackendStatus::Offline.is_online());
        assert!(!BackendStatus::NotConfigured.is_online());
    }
}
