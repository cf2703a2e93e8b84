use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use reviewbot::agent::{PollerConfig, ReviewPoller};
use reviewbot::channels::TelegramNotifier;
use reviewbot::config::Config;
use reviewbot::review::PracticumClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reviewbot=debug")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Cannot start: {}", e);
            return Err(e.into());
        }
    };

    let source = Arc::new(PracticumClient::new(
        config.endpoint,
        config.practicum_token,
    ));
    let notifier = Arc::new(TelegramNotifier::new(
        config.telegram_token,
        config.chat_id,
    ));

    let mut poller = ReviewPoller::new(
        PollerConfig::default().with_interval(config.retry_interval),
        source,
        notifier,
    );

    tokio::select! {
        _ = poller.run() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Received interrupt, shutting down");
        }
    }

    Ok(())
}
