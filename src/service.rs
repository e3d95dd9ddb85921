//! HTTP routes over a loaded [`Vault`].
//!
//! | Route                         | Result                                          |
//! |-------------------------------|-------------------------------------------------|
//! | `GET /notes/`                 | all slugs                                       |
//! | `GET /notes/search?q=&exact=` | matching slugs with frontmatter                 |
//! | `GET /notes/:slug`            | one note                                        |
//! | `GET /notes/:slug/links`      | wiki-link targets of a note                     |
//! | `GET /notes/:slug/relevant`   | notes reachable by links, with summaries        |
//! | `POST /notes/details`         | several notes at once, 404 if any is missing    |
//!
//! Errors render as `{"detail": "..."}` with the status from [`VaultError::status_code`].

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::{future::Future, sync::Arc};
use tower_http::trace::TraceLayer;

use crate::{
    config::VaultConfig,
    note::Note,
    query::{RelevanceParams, SearchQuery},
    Vault, VaultError,
};

#[derive(Clone)]
pub struct ServiceState {
    vault: Arc<Vault>,
    config: Arc<VaultConfig>,
}

impl ServiceState {
    pub fn new(vault: Arc<Vault>, config: VaultConfig) -> Self {
        ServiceState {
            vault,
            config: Arc::new(config),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: String,
    #[serde(default)]
    exact: bool,
}

#[derive(Debug, Deserialize)]
struct RelevantParams {
    max_hops: Option<usize>,
    char_limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchGetNotesRequest {
    pub slugs: Vec<String>,
}

impl IntoResponse for VaultError {
    fn into_response(self) -> Response {
        let detail = match &self {
            VaultError::NotFound(_) => "Note not found".to_string(),
            other => other.to_string(),
        };
        if self.status_code().is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (self.status_code(), Json(json!({ "detail": detail }))).into_response()
    }
}

pub fn router(state: ServiceState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/notes/") }))
        .route("/notes", get(list_note_slugs))
        .route("/notes/", get(list_note_slugs))
        .route("/notes/search", get(search_notes))
        .route("/notes/details", post(get_notes_batch))
        .route("/notes/:slug", get(get_note))
        .route("/notes/:slug/links", get(find_note_links))
        .route("/notes/:slug/relevant", get(find_relevant_notes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `vault` on `config.server` until `shutdown_signal` resolves.
pub async fn serve(
    vault: Arc<Vault>,
    config: VaultConfig,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), VaultError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "Serving {} notes on http://{}",
        vault.len(),
        listener.local_addr()?
    );

    let app = router(ServiceState::new(vault, config));
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    tracing::info!("Vault server shut down");
    Ok(())
}

async fn list_note_slugs(State(state): State<ServiceState>) -> Json<Value> {
    Json(json!({ "results": state.vault.list_slugs() }))
}

async fn search_notes(
    State(state): State<ServiceState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, VaultError> {
    let query = SearchQuery::parse(
        params.q,
        params.exact,
        state.config.search.max_query_words,
    )?;
    let results = state.vault.run_search(&query);
    Ok(Json(json!({
        "params": { "query": query.query, "exact": query.exact },
        "results": results,
    })))
}

async fn get_note(
    State(state): State<ServiceState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, VaultError> {
    let note = state.vault.get(&slug)?;
    Ok(Json(json!({
        "params": { "slug": slug },
        "results": note,
    })))
}

async fn find_note_links(
    State(state): State<ServiceState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, VaultError> {
    let links = state.vault.links(&slug)?;
    Ok(Json(json!({
        "params": { "slug": slug },
        "links": links,
    })))
}

async fn find_relevant_notes(
    State(state): State<ServiceState>,
    Path(slug): Path<String>,
    Query(params): Query<RelevantParams>,
) -> Result<Json<Value>, VaultError> {
    let defaults = RelevanceParams::from(state.config.relevant);
    let params = RelevanceParams {
        max_hops: params.max_hops.unwrap_or(defaults.max_hops),
        char_limit: params.char_limit.unwrap_or(defaults.char_limit),
    };
    let results = state.vault.find_relevant_notes_with(&slug, params)?;
    Ok(Json(json!({
        "params": {
            "slug": slug,
            "max_hops": params.max_hops,
            "char_limit": params.char_limit,
        },
        "results": results,
    })))
}

async fn get_notes_batch(
    State(state): State<ServiceState>,
    Json(request): Json<BatchGetNotesRequest>,
) -> Result<Json<Value>, VaultError> {
    let notes: Vec<&Note> = state.vault.get_many(&request.slugs)?;
    Ok(Json(json!({
        "params": request,
        "results": notes,
    })))
}
