use std::env;
use std::net::SocketAddr;

use crate::db::cache::DEFAULT_STORAGE_KEY;
use crate::error::AppError;
use crate::remote::RemoteConfig;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://courses.db?mode=rwc";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub max_connections: u32,
    pub remote: Option<RemoteConfig>,
    pub storage_key: String,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::BadRequest(format!("BIND_ADDR is invalid: {}", e)))?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse::<u32>().map_err(|e| {
                AppError::BadRequest(format!("DATABASE_MAX_CONNECTIONS is invalid: {}", e))
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        // Unset or empty disables the remote entirely.
        let remote = env::var("COURSES_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(RemoteConfig::new);

        let storage_key = env::var("COURSES_STORAGE_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

        Ok(Self {
            bind_addr,
            database_url,
            max_connections,
            remote,
            storage_key,
        })
    }
}
