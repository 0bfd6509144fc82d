use anyhow::{Context, Result};
use extract::{AnnotatorClient, TitleDictionary, TitleExtractor};
use std::sync::Arc;
use std::time::Duration;
use store::SubmissionStore;
use tokio::sync::Semaphore;
use tracing_subscriber::EnvFilter;

mod cache;
mod config;
mod metrics;
mod retry;
mod routes;

use cache::ResultCache;
use config::AppConfig;
use metrics::Metrics;
use retry::{RetryPolicy, RetryingAnnotator};
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Title dictionary is loaded once and shared read-only
    let dictionary = TitleDictionary::load(&config.dictionary.path).await?;
    let extractor = TitleExtractor::new(Arc::new(dictionary));

    // Annotation engine client
    let client = AnnotatorClient::new(
        config.annotator.url.clone(),
        Duration::from_secs(config.annotator.timeout_secs),
    )?;
    let annotator = RetryingAnnotator::new(client, RetryPolicy::from_config(&config.retry));

    // Submission store
    if let Some(parent) = config.store.path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .context(format!("Failed to create store directory: {:?}", parent))?;
    }
    let store = SubmissionStore::open(&config.store.path)
        .context(format!("Failed to open submission store: {:?}", config.store.path))?;

    let cache = config
        .cache
        .enabled
        .then(|| ResultCache::new(config.cache.max_entries));

    let state = Arc::new(AppState {
        extractor,
        annotator,
        store,
        cache,
        metrics: Metrics::new(),
        permits: Semaphore::new(config.concurrency.max_concurrent_annotations.max(1)),
        request_timeout: Duration::from_secs(config.concurrency.request_timeout_secs),
    });

    let app = routes::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .context(format!("Failed to bind {}", config.server.bind_addr))?;

    tracing::info!(
        addr = %config.server.bind_addr,
        annotator = %config.annotator.url,
        "Server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// `RUST_LOG` selects the filter (default `info`); `LOG_FORMAT=json` switches
/// to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
