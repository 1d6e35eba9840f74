//! Default seed script - fills MongoDB with fixture data
//!
//! Run with:
//! ```
//! MONGO_HOST=localhost MONGO_PORT=27017 MONGO_DB=main cargo run -p novel-test-data --bin seed
//! ```

use std::io;

use test_data::builders::ScenarioBuilder;
use test_data::config::MongoConfig;
use test_data::db::MongoStore;
use test_data::prompt::confirm_and_seed;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = MongoConfig::from_env();

    let store = match MongoStore::connect(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to connect to MongoDB at {}: {e}", config.uri());
            return Err(e.into());
        }
    };

    tracing::info!("Seeding test data into database {}", config.database);

    let mut rng = rand::thread_rng();
    let outcome = confirm_and_seed(
        ScenarioBuilder::new().with_metrics(true),
        &store,
        &mut io::stdin().lock(),
        &mut io::stdout(),
        &mut rng,
    )
    .await;

    store.shutdown().await;
    tracing::info!("Database connection closed");

    let result = outcome?;

    // Summary output
    tracing::info!("Seed completed!");
    println!("{}", result.summary());

    if let Some(metrics) = &result.metrics {
        tracing::info!(
            "Generated {} documents in {} ms, seeded in {} ms",
            metrics.document_count,
            metrics.generation_time_ms,
            metrics.seeding_time_ms
        );
    }

    Ok(())
}
