//! Embedding service seam: a readiness probe and a batched embed call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub mod http;

pub use http::HttpEmbeddingClient;

/// Outcome of one embed call. Failures are values, never errors.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestResult {
    pub success: bool,
    /// Wall time from send to fully-read response; `None` when nothing was sent.
    pub elapsed: Option<Duration>,
    pub num_texts: usize,
    pub num_embeddings: usize,
    /// Length of the first returned vector, 0 when none came back.
    pub embedding_dims: usize,
    pub status_code: Option<u16>,
    pub error: Option<String>,
}

impl RequestResult {
    pub fn succeeded(num_texts: usize, num_embeddings: usize, embedding_dims: usize, elapsed: Duration) -> Self {
        Self {
            success: true,
            elapsed: Some(elapsed),
            num_texts,
            num_embeddings,
            embedding_dims,
            status_code: Some(200),
            error: None,
        }
    }

    /// The service answered, but not with a usable 200.
    pub fn rejected(num_texts: usize, status_code: u16, error: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            success: false,
            elapsed: Some(elapsed),
            num_texts,
            num_embeddings: 0,
            embedding_dims: 0,
            status_code: Some(status_code),
            error: Some(error.into()),
        }
    }

    /// Transport-level failure: no status to report.
    pub fn failed(num_texts: usize, error: impl Into<String>, elapsed: Option<Duration>) -> Self {
        Self {
            success: false,
            elapsed,
            num_texts,
            num_embeddings: 0,
            embedding_dims: 0,
            status_code: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Ready,
    NotReady(u16),
    Unreachable(String),
}

pub trait EmbeddingBackend: Send + Sync {
    fn check_health(&self) -> impl Future<Output = HealthStatus> + Send;
    fn embed(&self, texts: &[String]) -> impl Future<Output = RequestResult> + Send;
}

impl<B: EmbeddingBackend> EmbeddingBackend for Arc<B> {
    fn check_health(&self) -> impl Future<Output = HealthStatus> + Send {
        (**self).check_health()
    }

    fn embed(&self, texts: &[String]) -> impl Future<Output = RequestResult> + Send {
        (**self).embed(texts)
    }
}

#[cfg(feature = "mock")]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Mutex, PoisonError};

    pub const MOCK_DIMS: usize = 4;

    /// Replays scripted results in order, then succeeds with one
    /// `MOCK_DIMS`-wide vector per text.
    pub struct MockBackend {
        health: HealthStatus,
        script: Mutex<VecDeque<RequestResult>>,
        calls: AtomicUsize,
    }

    impl Default for MockBackend {
        fn default() -> Self { Self::new() }
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self { health: HealthStatus::Ready, script: Mutex::new(VecDeque::new()), calls: AtomicUsize::new(0) }
        }

        pub fn with_health(mut self, health: HealthStatus) -> Self {
            self.health = health;
            self
        }

        pub fn with_script(self, results: impl IntoIterator<Item = RequestResult>) -> Self {
            self.script.lock().unwrap_or_else(PoisonError::into_inner).extend(results);
            self
        }

        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
    }

    impl EmbeddingBackend for MockBackend {
        fn check_health(&self) -> impl Future<Output = HealthStatus> + Send {
            let status = self.health.clone();
            async move { status }
        }

        fn embed(&self, texts: &[String]) -> impl Future<Output = RequestResult> + Send {
            let n = texts.len();
            self.calls.fetch_add(1, Ordering::SeqCst);
            let scripted = self.script.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
            async move { scripted.unwrap_or_else(|| RequestResult::succeeded(n, n, MOCK_DIMS, Duration::ZERO)) }
        }
    }
}
