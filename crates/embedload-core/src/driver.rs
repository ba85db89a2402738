use std::future::Future;
use std::time::Duration;

use embedload_backend::{EmbeddingBackend, HealthStatus, RequestResult};
use embedload_common::config::WorkloadConfig;

use crate::stats::RunStats;
use crate::textgen::TextGenerator;

/// Sequential request loop: health probe once, then generate, send, count,
/// sleep until the shutdown future resolves.
pub struct Driver<B> {
    backend: B,
    generator: TextGenerator,
    batch_size: usize,
    interval: Duration,
}

impl<B: EmbeddingBackend> Driver<B> {
    pub fn new(backend: B, config: &WorkloadConfig) -> Self {
        Self {
            backend,
            generator: TextGenerator::new(config.max_text_length, config.seed),
            batch_size: config.batch_size,
            interval: config.request_interval(),
        }
    }

    /// Probes readiness and logs the outcome. Never fatal.
    pub async fn check_health(&self) -> HealthStatus {
        let status = self.backend.check_health().await;
        match &status {
            HealthStatus::Ready => tracing::info!(target: "driver", "embedding service is ready"),
            HealthStatus::NotReady(code) => {
                tracing::warn!(target: "driver", status = code, "health check returned status {}", code)
            }
            HealthStatus::Unreachable(err) => {
                tracing::error!(target: "driver", "cannot reach embedding service: {}", err);
                tracing::info!(target: "driver", "continuing anyway, the service might still work");
            }
        }
        status
    }

    /// One generate-send-count cycle, without the trailing sleep.
    pub async fn run_iteration(&mut self, stats: &mut RunStats) -> RequestResult {
        let request_no = stats.begin_request();
        let texts = self.generator.batch(self.batch_size);
        tracing::info!(target: "driver", request = request_no, "request #{} - generated {} random texts:", request_no, texts.len());
        for (i, text) in texts.iter().enumerate() {
            tracing::info!(target: "driver", "  {}. {}", i + 1, text);
        }

        let result = self.backend.embed(&texts).await;
        log_result(&result);
        if result.success {
            stats.record_success();
        }
        tracing::info!(
            target: "driver",
            total = stats.total(),
            successful = stats.successful(),
            "stats - total: {}, successful: {}, success rate: {:.1}%",
            stats.total(),
            stats.successful(),
            stats.success_rate()
        );
        result
    }

    /// Runs until `shutdown` resolves. The shutdown future is checked before
    /// each request, while a request is in flight and during the sleep.
    pub async fn run<F>(mut self, shutdown: F) -> RunStats
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut guard = SummaryGuard::default();

        tokio::select! {
            biased;
            _ = &mut shutdown => {
                tracing::info!(target: "driver", "test workload stopped by user");
                return guard.stats;
            }
            _ = self.check_health() => {}
        }

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = self.run_iteration(&mut guard.stats) => {}
            }
            tracing::info!(target: "driver", "waiting {} seconds before next request", self.interval.as_secs());
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        tracing::info!(target: "driver", "test workload stopped by user");
        guard.stats
    }
}

fn log_result(result: &RequestResult) {
    let secs = result.elapsed.map(|d| d.as_secs_f64()).unwrap_or_default();
    if result.success {
        tracing::info!(
            target: "driver",
            "embedding request successful - texts: {}, embeddings: {}, dimensions: {}, response time: {:.2}s",
            result.num_texts,
            result.num_embeddings,
            result.embedding_dims,
            secs
        );
        return;
    }
    let error = result.error.as_deref().unwrap_or_default();
    match result.status_code {
        Some(status) => tracing::error!(target: "driver", status, "api request failed - status: {}, response: {}", status, error),
        None => tracing::error!(target: "driver", "network error: {}", error),
    }
}

/// Logs the final counters when dropped, including while unwinding from a
/// panic in the loop body.
#[derive(Default)]
struct SummaryGuard {
    stats: RunStats,
}

impl Drop for SummaryGuard {
    fn drop(&mut self) {
        tracing::info!(
            target: "driver",
            total = self.stats.total(),
            successful = self.stats.successful(),
            "final stats - total requests: {}, successful: {}",
            self.stats.total(),
            self.stats.successful()
        );
    }
}
