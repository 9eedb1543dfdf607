// rest_api/src/main.rs

use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use rest_api::config::load_rest_api_config;
use rest_api::{start_server, AppState};
use storage::{
    MongoAppointmentStorage, MongoDoctorStorage, MongoMedicineStorage, MongoOrderStorage,
    MongoUserStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_rest_api_config().context("Failed to load REST API configuration")?;

    let database = storage::connect(&config.db_uri, &config.db_name)
        .await
        .context("Failed to connect to the document store")?;

    let state = AppState::new(
        Arc::new(MongoUserStorage::new(&database)),
        Arc::new(MongoDoctorStorage::new(&database)),
        Arc::new(MongoAppointmentStorage::new(&database)),
        Arc::new(MongoMedicineStorage::new(&database)),
        Arc::new(MongoOrderStorage::new(&database)),
        &config.admin_token,
    );

    start_server(&config, state).await
}
