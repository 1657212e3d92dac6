use clap::Parser;
use tablebook_core::RestaurantRepository;
use tablebook_store::{app_config::Config, seed, DbClient, PgRestaurantRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Seeds the database with dummy restaurants
#[derive(Parser, Debug)]
#[command(name = "seed")]
struct Args {
    /// Number of restaurants to create
    #[arg(long, default_value_t = 10)]
    count: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tablebook_store=info,seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::load()?;

    let db = DbClient::new(&config.database.url, config.database.max_connections).await?;
    db.migrate().await?;

    let names = seed::restaurant_names(&mut rand::thread_rng(), args.count);
    let repo = PgRestaurantRepository::new(db.pool.clone());
    let result = repo.create_restaurants(&names).await;

    db.close().await;

    let inserted = result?;
    tracing::info!("Seeded {} restaurants", inserted);
    Ok(())
}
