use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use postboard::auth::SessionKey;
use postboard::config::{Cli, Config};
use postboard::state::AppState;
use postboard::{db, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli);
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;

    // Initialize database
    let pool = db::create_pool(&config.db_path())?;
    db::run_migrations(&pool)?;

    let key = match config.auth.token_secret.as_deref() {
        Some(secret) => SessionKey::from_secret(secret),
        None => SessionKey::load_or_create(&data_dir)?,
    };

    if !config.auth.enforce_ownership {
        tracing::warn!("Ownership checks are disabled: any caller may edit or delete any post");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(pool, config, &key);
    let app = routes::app(state);

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("GraphQL playground at http://{}/graphql/playground", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
