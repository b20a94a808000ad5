use tracing_subscriber::EnvFilter;

use relink_types::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with env filter (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    // Missing required configuration is fatal before any command handling.
    let config = Config::from_env()?;

    relink_daemon::service::run(config).await
}
