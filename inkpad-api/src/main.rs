//! # Inkpad API Server
//!
//! The API server for inkpad, a small note-taking backend:
//! token-authenticated users and per-user CRUD over notes.
//!
//! ## Startup sequence
//!
//! 1. Initialize tracing
//! 2. Load configuration from the environment (fatal on missing secret)
//! 3. Connect the database pool and run migrations
//! 4. Build the Axum application and serve
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p inkpad-api
//! ```

use inkpad_api::{
    app::{build_router, AppState},
    config::Config,
};
use inkpad_shared::db::{migrations::run_migrations, pool::{create_pool, PoolConfig}};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkpad_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Inkpad API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
