//! reqwest-backed client for the NIM embedding API.

use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{field, Instrument, Span};

use crate::{EmbeddingBackend, HealthStatus, RequestResult};

pub const HEALTH_PATH: &str = "/v1/health/ready";
pub const EMBEDDINGS_PATH: &str = "/v1/embeddings";
pub const MODEL: &str = "NV-Embed-QA";
pub const ENCODING_FORMAT: &str = "float";
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a [String],
    model: &'a str,
    encoding_format: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct HttpEmbeddingClient {
    client: reqwest::Client,
    endpoint: String,
    health_timeout: Duration,
    request_timeout: Duration,
}

impl HttpEmbeddingClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { client, endpoint, health_timeout: HEALTH_TIMEOUT, request_timeout: REQUEST_TIMEOUT }
    }

    pub fn with_timeouts(mut self, health: Duration, request: Duration) -> Self {
        self.health_timeout = health;
        self.request_timeout = request;
        self
    }

    fn url(&self, path: &str) -> String { format!("{}{}", self.endpoint, path) }
}

impl EmbeddingBackend for HttpEmbeddingClient {
    fn check_health(&self) -> impl Future<Output = HealthStatus> + Send {
        let url = self.url(HEALTH_PATH);
        let request = self.client.get(&url).timeout(self.health_timeout);
        let span = tracing::info_span!("health_check", url = %url, status = field::Empty);
        async move {
            match request.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    Span::current().record("status", status.as_u16());
                    if status == StatusCode::OK { HealthStatus::Ready } else { HealthStatus::NotReady(status.as_u16()) }
                }
                Err(e) => HealthStatus::Unreachable(describe(e)),
            }
        }
        .instrument(span)
    }

    fn embed(&self, texts: &[String]) -> impl Future<Output = RequestResult> + Send {
        let num_texts = texts.len();
        let request = self
            .client
            .post(self.url(EMBEDDINGS_PATH))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.request_timeout)
            .json(&EmbeddingRequest { input: texts, model: MODEL, encoding_format: ENCODING_FORMAT });
        let span = tracing::info_span!(
            "embedding_request",
            texts = num_texts,
            status = field::Empty,
            success = field::Empty
        );
        async move {
            let start = Instant::now();
            let result = match request.send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    match resp.text().await {
                        Ok(body) => interpret_response(num_texts, status, &body, start.elapsed()),
                        Err(e) => RequestResult {
                            status_code: Some(status),
                            ..RequestResult::failed(num_texts, describe(e), Some(start.elapsed()))
                        },
                    }
                }
                Err(e) => RequestResult::failed(num_texts, describe(e), Some(start.elapsed())),
            };
            let span = Span::current();
            if let Some(code) = result.status_code {
                span.record("status", code);
            }
            span.record("success", result.success);
            result
        }
        .instrument(span)
    }
}

/// Maps a received status and body onto a result. Only a 200 carrying a
/// parseable `data` list counts as success.
pub fn interpret_response(num_texts: usize, status: u16, body: &str, elapsed: Duration) -> RequestResult {
    if status != StatusCode::OK.as_u16() {
        return RequestResult::rejected(num_texts, status, body, elapsed);
    }
    match serde_json::from_str::<EmbeddingResponse>(body) {
        Ok(parsed) => {
            let dims = parsed.data.first().map(|d| d.embedding.len()).unwrap_or(0);
            RequestResult::succeeded(num_texts, parsed.data.len(), dims, elapsed)
        }
        Err(e) => RequestResult::rejected(num_texts, status, format!("invalid response body: {e}"), elapsed),
    }
}

/// Error text including its source chain, `outer: inner: root`.
fn describe(err: reqwest::Error) -> String {
    format!("{:#}", anyhow::Error::from(err))
}
