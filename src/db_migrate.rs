use barberbook_api::config::parse_log_level;
use barberbook_db::{create_pool, schema::initialize_database, seed::seed_defaults};
use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let log_level = parse_log_level(&std::env::var("LOG_LEVEL").unwrap_or_default());
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;

    info!("Connecting to database...");
    let db_pool = create_pool(&database_url, 1).await?;

    info!("Initializing database schema...");
    initialize_database(&db_pool).await?;

    // Seeding is opt-in
    let seed = std::env::var("SEED_DEFAULTS")
        .map(|value| value.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if seed {
        info!("Seeding default configuration...");
        seed_defaults(&db_pool).await?;
    }

    info!("Database schema initialized successfully.");

    Ok(())
}
