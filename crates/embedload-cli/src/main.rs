use anyhow::Context;
use embedload_backend::HttpEmbeddingClient;
use embedload_common::config::WorkloadConfig;
use embedload_core::Driver;
use embedload_obs::{init_tracing, install_panic_hook, shutdown_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    install_panic_hook();

    let config = WorkloadConfig::load().context("invalid workload configuration")?;
    tracing::info!("starting embedding test workload v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("endpoint: {}", config.endpoint);
    tracing::info!("request interval: {}s", config.request_interval_secs);
    tracing::info!("batch size: {}", config.batch_size);
    tracing::info!("max text length: {}", config.max_text_length);
    if let Some(seed) = config.seed {
        tracing::info!("text seed: {}", seed);
    }

    let client = HttpEmbeddingClient::new(config.endpoint.clone());
    let stats = Driver::new(client, &config).run(shutdown_signal()).await;
    tracing::debug!(total = stats.total(), successful = stats.successful(), "driver exited");

    shutdown_tracing();
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("cannot listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
