use anyhow::Result;
use sqlx::{PgPool, postgres::PgPoolOptions};

pub mod models;
pub mod repositories;
pub mod store;
pub mod utils;

pub use store::{PgRosterStore, RosterStore};

/// Connects to the backend database. The schema is owned by the hosted
/// backend, so no migrations run from here.
pub async fn init_database(database_url: &str, max_connections: u32) -> Result<PgPool> {
    log::info!("Connecting to database (max {} connections)", max_connections);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    log::info!("Database connection established");
    Ok(pool)
}
