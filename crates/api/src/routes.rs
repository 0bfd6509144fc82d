use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::get,
};
use extract::{Annotator, ExtractError, Extraction, TitleExtractor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use store::SubmissionStore;
use tokio::sync::Semaphore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cache::{CacheStats, ResultCache};
use crate::metrics::{Metrics, MetricsSnapshot, TimedOperation};

/// Rendered in place of an unset name or title.
pub const NOT_FOUND: &str = "null";

pub struct AppState<A> {
    pub extractor: TitleExtractor,
    pub annotator: A,
    pub store: SubmissionStore,
    pub cache: Option<ResultCache>,
    pub metrics: Metrics,
    pub permits: Semaphore,
    pub request_timeout: Duration,
}

#[derive(Deserialize)]
struct ExtractRequest {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ExtractResponse {
    pub name: String,
    pub title: String,
}

impl From<Extraction> for ExtractResponse {
    fn from(extraction: Extraction) -> Self {
        Self {
            name: extraction.name.unwrap_or_else(|| NOT_FOUND.to_string()),
            title: extraction.title.unwrap_or_else(|| NOT_FOUND.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SubmitResponse {
    pub code: String,
    pub msg: String,
}

impl SubmitResponse {
    fn ok(kind: &str) -> Self {
        Self {
            code: "ok".to_string(),
            msg: format!("Succeed submit {} sample", kind),
        }
    }

    fn failed(msg: &str) -> Self {
        Self {
            code: "failed".to_string(),
            msg: msg.to_string(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    annotator: String,
    store: String,
    dictionary_size: usize,
}

#[derive(Serialize)]
struct StatsResponse {
    metrics: MetricsSnapshot,
    cache: Option<CacheStats>,
    submissions_stored: Option<usize>,
}

pub fn build_router<A: Annotator + 'static>(state: Arc<AppState<A>>) -> Router {
    Router::new()
        .route("/extract", get(extract_title::<A>).post(extract_title::<A>))
        .route("/submit", get(submit_sample::<A>).post(submit_sample::<A>))
        .route("/health", get(health_check::<A>))
        .route("/stats", get(get_stats::<A>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn extract_title<A: Annotator + 'static>(
    State(state): State<Arc<AppState<A>>>,
    body: Bytes,
) -> Json<ExtractResponse> {
    // bodies are read as JSON whatever the content type says
    let text = match serde_json::from_slice::<ExtractRequest>(&body) {
        Ok(req) => req.text,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable extract request body");
            return Json(Extraction::default().into());
        }
    };

    if let Some(cached) = state.cache.as_ref().and_then(|cache| cache.get(&text)) {
        state.metrics.record_cached(&cached);
        return Json(cached.into());
    }

    let timer = TimedOperation::start();
    match run_extraction(&state, &text).await {
        Ok(extraction) => {
            state.metrics.record_extraction(&extraction, timer.elapsed());
            if let Some(cache) = &state.cache {
                cache.insert(&text, extraction.clone());
            }
            Json(extraction.into())
        }
        Err(e) => {
            state.metrics.record_annotation_failure();
            tracing::warn!(text = %text, error = %e, "Extraction failed");
            Json(Extraction::default().into())
        }
    }
}

async fn run_extraction<A: Annotator>(
    state: &AppState<A>,
    text: &str,
) -> Result<Extraction, ExtractError> {
    let _permit = state
        .permits
        .acquire()
        .await
        .map_err(|e| ExtractError::Annotation(e.into()))?;

    tokio::time::timeout(
        state.request_timeout,
        state.extractor.extract_text(&state.annotator, text),
    )
    .await
    .map_err(|_| {
        ExtractError::Annotation(anyhow::anyhow!(
            "annotation timed out after {:?}",
            state.request_timeout
        ))
    })?
}

/// Fields of a correction submission, read leniently: anything missing or
/// not a string counts as empty.
struct SubmissionFields<'a> {
    text: &'a str,
    name: &'a str,
    title: &'a str,
    kind: &'a str,
}

impl<'a> SubmissionFields<'a> {
    fn from_value(value: &'a Value) -> Self {
        let field = move |key: &str| value.get(key).and_then(Value::as_str).unwrap_or("");
        Self {
            text: field("text"),
            name: field("name"),
            title: field("title"),
            kind: field("type"),
        }
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() || self.title.trim().is_empty() {
            return Err("Name or Title can not be empty.");
        }
        if !self.text.contains(self.name) {
            return Err("name dose not appear in the text!");
        }
        Ok(())
    }
}

async fn submit_sample<A: Annotator + 'static>(
    State(state): State<Arc<AppState<A>>>,
    body: Bytes,
) -> Json<SubmitResponse> {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable submit request body");
            state.metrics.record_submission(false);
            return Json(SubmitResponse::failed("Failed!"));
        }
    };

    let fields = SubmissionFields::from_value(&value);
    if let Err(msg) = fields.validate() {
        state.metrics.record_submission(false);
        return Json(SubmitResponse::failed(msg));
    }

    match state.store.put(fields.text, &value) {
        Ok(()) => {
            state.metrics.record_submission(true);
            tracing::info!(kind = fields.kind, "Stored submission");
            Json(SubmitResponse::ok(fields.kind))
        }
        Err(e) => {
            state.metrics.record_submission(false);
            tracing::error!(error = %e, "Failed to store submission");
            Json(SubmitResponse::failed("Failed!"))
        }
    }
}

async fn health_check<A: Annotator + 'static>(
    State(state): State<Arc<AppState<A>>>,
) -> Json<HealthResponse> {
    let annotator = match state.annotator.health().await {
        Ok(()) => "ok".to_string(),
        Err(e) => format!("error: {}", e),
    };

    let store = match state.store.ping() {
        Ok(()) => "ok".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse {
        annotator,
        store,
        dictionary_size: state.extractor.dictionary().len(),
    })
}

async fn get_stats<A: Annotator + 'static>(
    State(state): State<Arc<AppState<A>>>,
) -> Json<StatsResponse> {
    Json(StatsResponse {
        metrics: state.metrics.snapshot(),
        cache: state.cache.as_ref().map(ResultCache::stats),
        submissions_stored: state.store.count().ok(),
    })
}
