use crate::routes::AppState;
use axum::response::sse::{Event, Sse};
use axum::{Json, extract::State, http::StatusCode};
use tokio_stream::{StreamExt, wrappers::BroadcastStream};
use tunnelhub::resolver::StatusSnapshot;
use tunnelhub::storage::{self, CandidateDoc, load_settings};

pub async fn status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    Json(state.resolver.snapshot().await)
}

pub async fn resolve(
    State(state): State<AppState>,
) -> Result<Json<StatusSnapshot>, (StatusCode, String)> {
    let settings = load_settings(&state.settings_path)
        .await
        .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;
    let snapshot = state.resolver.resolve(&settings, &state.tunnels_path).await;
    Ok(Json(snapshot))
}

pub async fn status_stream(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let receiver = state.resolver.subscribe();
    let stream = BroadcastStream::new(receiver)
        .filter_map(|snapshot| snapshot.ok())
        .filter_map(|snapshot| serde_json::to_string(&snapshot).ok())
        .map(|payload| Ok(Event::default().data(payload)));
    Sse::new(stream)
}

pub async fn get_tunnels(State(state): State<AppState>) -> Json<CandidateDoc> {
    Json(storage::load_candidate_doc(&state.tunnels_path).await)
}

/// Replaces the candidate list. The publisher that rotates tunnel URLs calls
/// this after bringing a new tunnel up.
pub async fn set_tunnels(
    State(state): State<AppState>,
    Json(doc): Json<CandidateDoc>,
) -> Result<Json<CandidateDoc>, (StatusCode, String)> {
    storage::save_candidate_doc(&state.tunnels_path, &doc)
        .await
        .map_err(|message| (StatusCode::INTERNAL_SERVER_ERROR, message))?;
    tracing::info!(count = doc.urls().len(), "candidate list replaced");
    spawn_resolve(state);
    Ok(Json(doc))
}

/// Kicks a resolution cycle without holding up the caller.
pub(crate) fn spawn_resolve(state: AppState) {
    tokio::spawn(async move {
        match load_settings(&state.settings_path).await {
            Ok(settings) => {
                state.resolver.resolve(&settings, &state.tunnels_path).await;
            }
            Err(message) => {
                tracing::warn!(error = %message, "skipping resolution cycle");
            }
        }
    });
}
