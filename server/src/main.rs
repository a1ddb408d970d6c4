use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use pagesmith_server::cli::Cli;
use pagesmith_server::config::Config;
use pagesmith_server::store::SqliteStore;
use pagesmith_server::{app, AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(Config::load_or_default(cli.config.as_deref())?);

    // Setup logging
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::builder().parse(&config.log_level))
        .context("invalid log level")?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let store = SqliteStore::open(&config.database_path).with_context(|| {
        format!("failed to open database at {}", config.database_path.display())
    })?;
    let state = AppState::new(Arc::new(store), config.static_dir.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    info!(
        bind = %config.bind,
        database = %config.database_path.display(),
        static_dir = %config.static_dir.display(),
        "pagesmith-server listening"
    );

    axum::serve(listener, app(state).into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
