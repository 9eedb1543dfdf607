// rest_api/src/config.rs

use std::env;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default port the REST API binds when `CLINIC_REST_PORT` is not set.
pub const DEFAULT_REST_PORT: u16 = 8082;
pub const DEFAULT_REST_HOST: &str = "127.0.0.1";
pub const DEFAULT_DB_URI: &str = "mongodb://127.0.0.1:27017";
pub const DEFAULT_DB_NAME: &str = "clinic_portal";

/// Represents the configuration for the REST API server itself.
#[derive(Debug, Clone, Deserialize)]
pub struct RestApiConfig {
    pub host: String,
    pub port: u16,
    pub db_uri: String,
    pub db_name: String,
    pub admin_token: String,
}

/// Loads the REST API configuration from the environment. `main` runs a
/// dotenv pass first, so a local `.env` file works as well.
pub fn load_rest_api_config() -> Result<RestApiConfig> {
    let host = env::var("CLINIC_REST_HOST").unwrap_or_else(|_| DEFAULT_REST_HOST.to_string());

    let port = match env::var("CLINIC_REST_PORT") {
        Ok(raw) => raw
            .parse::<u16>()
            .context(format!("CLINIC_REST_PORT must be a port number, got '{raw}'"))?,
        Err(_) => DEFAULT_REST_PORT,
    };

    let db_uri = env::var("CLINIC_DB_URI").unwrap_or_else(|_| DEFAULT_DB_URI.to_string());
    let db_name = env::var("CLINIC_DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string());

    // Admin routes compare this token against the x-admin-token header.
    // There is no sensible default for it.
    let admin_token = env::var("CLINIC_ADMIN_TOKEN")
        .context("CLINIC_ADMIN_TOKEN must be set to gate the admin routes")?;
    if admin_token.trim().is_empty() {
        anyhow::bail!("CLINIC_ADMIN_TOKEN must not be empty");
    }

    Ok(RestApiConfig {
        host,
        port,
        db_uri,
        db_name,
        admin_token,
    })
}
