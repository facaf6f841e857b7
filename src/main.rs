use std::time::Duration;

use tokio::signal;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use reviewbot::api::PracticumClient;
use reviewbot::bot;
use reviewbot::config::Config;
use reviewbot::telegram::TelegramNotifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Load config; missing credentials abort before the loop starts
    let config = Config::from_env().expect("Failed to load configuration");

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!("Starting reviewbot");

    let client = PracticumClient::new(config.endpoint.clone(), config.practicum_token.clone());
    let notifier = TelegramNotifier::new(
        config.telegram_token.clone(),
        config.telegram_chat_id.clone(),
    );

    // An unusable bot credential is a startup failure, not a cycle failure
    notifier.get_me().await?;
    tracing::info!("Telegram credentials verified");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    bot::run(
        &client,
        &notifier,
        Duration::from_secs(config.poll_interval),
        shutdown_rx,
    )
    .await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping after current cycle");
}
