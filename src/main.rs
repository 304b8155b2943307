use anyhow::{Context, Result};
use std::sync::Arc;

use radio_exam_watcher::api::UkeClient;
use radio_exam_watcher::core::logging::init_logging;
use radio_exam_watcher::core::Config;
use radio_exam_watcher::notify::TelegramNotifier;
use radio_exam_watcher::scanner::{ExamChecker, Scheduler};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.monitoring.log_level);

    tracing::info!("🚀 Starting Radio SRC Exam Parser v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("⏰ Check interval: {} minutes", config.schedule.check_interval_minutes);
    tracing::info!("🔎 Search keyword: {}", config.exam_api.search_keyword);
    let timeout = config.exam_api.request_timeout;
    let source = UkeClient::new(timeout).context("Failed to build exam API client")?;
    let notifier = TelegramNotifier::new(&config.telegram, timeout)
        .context("Failed to build Telegram client")?;

    if notifier.is_configured() {
        tracing::info!("🤖 Telegram Bot: Configured");
    } else {
        tracing::warn!("🤖 Telegram Bot: Not configured");
    }
    match &config.telegram.credentials {
        Some(credentials) => tracing::info!("💬 Chat ID: {}", credentials.chat_id),
        None => tracing::warn!("💬 Chat ID: Not configured"),
    }

    let checker = Arc::new(ExamChecker::new(
        config.exam_api.clone(),
        Arc::new(source),
        Arc::new(notifier),
    ));
    let scheduler = Scheduler::new(checker, config.schedule.check_interval_minutes);

    tracing::info!("✅ Parser started successfully");

    tokio::select! {
        _ = scheduler.run() => {}
        signal = shutdown_signal() => {
            tracing::info!("🛑 Received {}, shutting down gracefully...", signal);
        }
    }

    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => tokio::select! {
            _ = tokio::signal::ctrl_c() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        },
        Err(e) => {
            tracing::warn!("Cannot listen for SIGTERM: {}", e);
            let _ = tokio::signal::ctrl_c().await;
            "SIGINT"
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    let _ = tokio::signal::ctrl_c().await;
    "Ctrl-C"
}
