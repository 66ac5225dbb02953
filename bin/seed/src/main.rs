//! # Seed
//!
//! Wipes the campground collection and fills it with generated sample data.

mod seed_helpers;

use yc_config::DatabaseSettings;
use yc_core::traits::CampgroundRepo;
use yc_db_sqlite::SqliteCampgroundRepo;

const SEED_COUNT: usize = 50;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = DatabaseSettings::load()?;
    let repo = SqliteCampgroundRepo::connect(&settings.url, settings.max_connections)
        .await
        .inspect_err(|err| log::error!("Database connection error: {err:#}"))?;

    let removed = repo.clear_campgrounds().await?;
    log::info!("Removed {removed} existing campgrounds");

    for camp in seed_helpers::campgrounds(SEED_COUNT) {
        repo.create_campground(&camp).await?;
    }
    log::info!("Seeded {SEED_COUNT} campgrounds into {}", settings.url);

    repo.close().await;
    Ok(())
}
