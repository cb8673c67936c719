//! Tic Tac Toe player - composition root binary

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tictac_player_adapters::infrastructure::{ApiAdapter, ConnectionFactory, DesktopStorageProvider};
use tictac_player_app::application::Api;
use tictac_player_ports::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    // Logs go to stderr so they never interleave with the board on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tictac_player=debug,tictac_player_adapters=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(api = %config.api_base, ws = %config.ws_base, "Starting Tic Tac Toe player");

    let storage = match &config.storage_path {
        Some(path) => DesktopStorageProvider::with_path(path.clone()),
        None => DesktopStorageProvider::new(),
    };
    let api = Api::new(Arc::new(ApiAdapter::new(&config)));
    let connections = Arc::new(ConnectionFactory::new(config));

    tictac_player_runner::run(tictac_player_runner::RunnerDeps {
        api,
        storage,
        connections,
    })
    .await
}

fn load_dotenv() {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = std::path::Path::new(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
