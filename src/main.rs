use std::sync::Arc;

use anyhow::Result;

use scopelog::config::{self, Config};
use scopelog::storage::FsStorage;
use scopelog::{Component, LogContext, TracingConsole};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "scopelog=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();

    let config = Config::load()?;
    let ctx = LogContext::from_config(&config, Arc::new(TracingConsole))?;

    if config.file.enabled {
        let logs_dir = config::logs_dir();
        std::fs::create_dir_all(&logs_dir)?;
        ctx.init_file_logging(Arc::new(FsStorage::new(&logs_dir)), None)
            .await;
        tracing::info!("Logging to: {}", logs_dir.join(&config.file.path).display());
    }

    let main_log = ctx.component_logger(Component::Main);
    let ui_log = ctx.component_logger(Component::Ui);

    main_log.info("starting up", &[]);
    scopelog::trace!(ui_log, tags: ["rendering"], "drew {} cards", 3);
    ui_log.warn("slow frame", &[&serde_json::json!({ "ms": 42 })]);
    main_log.error("example failure", &[&"settings.json"]);

    if let Err(e) = ctx.disable_file_logging().await {
        tracing::warn!("Final log flush failed: {}", e);
    }
    Ok(())
}
