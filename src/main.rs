use alert_relay::config::Config;
use alert_relay::drainer::BatchDrainer;
use alert_relay::server;
use alert_relay::state::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional; real environment variables win.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alert_relay=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting alert relay...");

    let config = Config::from_env()?;
    let state = Arc::new(AppState::new(config.clone())?);

    let drainer = BatchDrainer::new(
        Arc::clone(&state.queue),
        Arc::clone(&state.sqlite),
        config.max_batch_size,
        config.drain_interval,
        config.drain_on_start,
    );
    // Runs until the process exits; in-flight work is abandoned on shutdown.
    drainer.spawn();

    server::serve(state).await?;

    Ok(())
}
