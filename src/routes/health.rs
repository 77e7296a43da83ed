use crate::routes::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse};
use axum::Json;

/// The hub's own health endpoint, shaped like the one it probes on backends:
/// plain `ok` for machines, a small HTML page for browsers, and a JSON body
/// when asked for one.
pub async fn health(State(state): State<AppState>, headers: HeaderMap) -> axum::response::Response {
    match preferred_format(&headers) {
        Format::Html => Html(crate::views::health::health_html()).into_response(),
        Format::Json => {
            let snapshot = state.resolver.snapshot().await;
            Json(serde_json::json!({
                "status": "ok",
                "backend": snapshot.status,
            }))
            .into_response()
        }
        Format::Plain => "ok".into_response(),
    }
}

enum Format {
    Html,
    Json,
    Plain,
}

fn preferred_format(headers: &HeaderMap) -> Format {
    let accept = headers
        .get(axum::http::header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    if accept.contains("text/html") {
        Format::Html
    } else if accept.contains("application/json") {
        Format::Json
    } else {
        Format::Plain
    }
}
