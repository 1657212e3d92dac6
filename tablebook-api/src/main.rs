use std::net::SocketAddr;
use std::sync::Arc;

use tablebook_api::{app, state::AppState, token::TokenCodec};
use tablebook_store::{
    app_config::Config, CredentialStore, DbClient, PgCustomerRepository, PgReservationRepository,
    PgRestaurantRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tablebook_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Tablebook API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url, config.database.max_connections).await?;
    db.migrate().await?;

    let customers = Arc::new(PgCustomerRepository::new(db.pool.clone()));
    let tokens = TokenCodec::new(&config.auth.jwt_secret, config.auth.token_ttl_seconds)?;

    let app_state = AppState {
        credentials: CredentialStore::new(customers.clone(), config.auth.bcrypt_cost),
        customers,
        restaurants: Arc::new(PgRestaurantRepository::new(db.pool.clone())),
        reservations: Arc::new(PgReservationRepository::new(db.pool.clone())),
        tokens: Arc::new(tokens),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
