// storage/src/database.rs

use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::errors::StorageResult;

/// Opens the single shared database handle the whole server runs against.
///
/// The handle is cheap to clone; every collection engine borrows it once at
/// startup and the driver multiplexes requests over its own pool from there.
pub async fn connect(uri: &str, db_name: &str) -> StorageResult<Database> {
    let client = Client::with_uri_str(uri).await?;
    let database = client.database(db_name);

    // Fail fast at startup instead of on the first request.
    database.run_command(doc! { "ping": 1 }).await?;
    tracing::info!(db = db_name, "connected to document store");

    Ok(database)
}
