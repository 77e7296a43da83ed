use crate::deadline;
use serde::Serialize;
use std::time::Duration;

/// Fixed path segment appended to every candidate base URL.
pub const HEALTH_PATH: &str = "/health";

/// Outcome of one bounded-time reachability check.
///
/// `status` is the HTTP status code when the server answered, `0` when the
/// request errored or the deadline expired. `url` is the cleaned base URL
/// (trailing slashes stripped), ready to be used as the active backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    pub ok: bool,
    pub url: String,
    pub status: u16,
}

impl ProbeOutcome {
    pub fn unreachable(url: String) -> Self {
        Self {
            ok: false,
            url,
            status: 0,
        }
    }
}

#[async_trait::async_trait]
pub trait HealthProbe: Send + Sync {
    /// Probes `<base_url>/health` once, racing the request against `timeout`.
    ///
    /// `base_url` must be a non-empty string. The probe never retries and
    /// never fails loudly: every error mode collapses into an unreachable
    /// outcome.
    async fn probe(&self, base_url: &str, timeout: Duration) -> ProbeOutcome;
}

pub struct ReqwestProber {
    client: reqwest::Client,
}

impl ReqwestProber {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HealthProbe for ReqwestProber {
    async fn probe(&self, base_url: &str, timeout: Duration) -> ProbeOutcome {
        let clean = clean_base_url(base_url);
        let endpoint = format!("{clean}{HEALTH_PATH}");

        let request = self
            .client
            .get(&endpoint)
            .header(reqwest::header::CACHE_CONTROL, "no-store");

        match deadline::race(timeout, request.send()).await {
            Some(Ok(response)) => {
                let status = response.status();
                if !status.is_success() {
                    tracing::debug!(url = %clean, status = %status, "health probe: non-success status");
                }
                ProbeOutcome {
                    ok: status.is_success(),
                    url: clean.to_string(),
                    status: status.as_u16(),
                }
            }
            Some(Err(err)) => {
                tracing::debug!(url = %clean, error = %err, "health probe: request failed");
                ProbeOutcome::unreachable(clean.to_string())
            }
            None => {
                tracing::debug!(url = %clean, timeout_ms = timeout.as_millis() as u64, "health probe: timed out");
                ProbeOutcome::unreachable(clean.to_string())
            }
        }
    }
}

fn clean_base_url(base_url: &str) -> &str {
    base_url.trim().trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slashes() {
        assert_eq!(
            clean_base_url("https://demo.trycloudflare.com///"),
            "https://demo.trycloudflare.com"
        );
        assert_eq!(
            clean_base_url("  https://demo.trycloudflare.com "),
            "https://demo.trycloudflare.com"
        );
        assert_eq!(clean_base_url("http://localhost:8000"), "http://localhost:8000");
    }

    #[test]
    fn unreachable_outcome_has_zero_status() {
        let outcome = ProbeOutcome::unreachable("https://x".to_string());
        assert!(!outcome.ok);
        assert_eq!(outcome.status, 0);
    }
}
