use anyhow::{Context, Result};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

use crate::doc::AnnotatedSentence;
use crate::error::EngineError;

/// The annotation engine boundary: raw text in, annotated sentence out.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> impl Future<Output = Result<AnnotatedSentence>> + Send;

    /// Report whether the engine is reachable.
    fn health(&self) -> impl Future<Output = Result<()>> + Send {
        async { Ok(()) }
    }
}

/// HTTP client for an annotation engine serving `POST /annotate`.
#[derive(Clone)]
pub struct AnnotatorClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    text: &'a str,
}

impl AnnotatorClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build annotator HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Engine failures are reported as [`EngineError`] so callers can tell
/// transient ones apart.
impl Annotator for AnnotatorClient {
    async fn annotate(&self, text: &str) -> Result<AnnotatedSentence> {
        let url = format!("{}/annotate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&AnnotateRequest { text })
            .send()
            .await
            .map_err(EngineError::Transport)?;

        if !response.status().is_success() {
            return Err(EngineError::Status(response.status().as_u16()).into());
        }

        let sentence: AnnotatedSentence = response.json().await.map_err(|e| {
            if e.is_decode() {
                EngineError::Decode(e)
            } else {
                EngineError::Transport(e)
            }
        })?;

        Ok(sentence)
    }

    async fn health(&self) -> Result<()> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .context("Failed to reach annotation engine")?;

        if !response.status().is_success() {
            anyhow::bail!("Annotation engine unhealthy: {}", response.status());
        }
        Ok(())
    }
}
