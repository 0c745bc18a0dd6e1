use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use destinations_api::server::lifecycle::wait_for_shutdown_signal;
use destinations_api::utils::logger::{self, LogFormat};
use destinations_api::utils::validation::Validate;
use destinations_api::{ApiError, DestinationStore, InMemoryStore, ServerConfig, ServerHandle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    // 初始化日誌
    let format = if config.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, config.verbose);

    tracing::info!("Starting destinations-api v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Server config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let store = match &config.seed_file {
        Some(path) => InMemoryStore::from_json_file(path)
            .with_context(|| format!("loading seed file '{}'", path))?,
        None => InMemoryStore::with_default_catalog(),
    };
    tracing::info!("📦 Catalog holds {} destinations", store.len());

    let store: Arc<dyn DestinationStore> = Arc::new(store);
    let server = match ServerHandle::start(config.bind_address(), store).await {
        Ok(server) => server,
        Err(e) => fail(&e),
    };

    println!("✅ destinations-api is running");
    println!("  HTTP API: {}/api/destinations", server.base_url());

    wait_for_shutdown_signal().await;
    server.stop().await.context("stopping server")?;

    Ok(())
}

fn fail(e: &ApiError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}
