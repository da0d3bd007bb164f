// Configuration types.
// Every section has defaults except the store database name.

use serde::Deserialize;

/// Top-level configuration for the standalone server binary.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub preload: Vec<PreloadEntry>,
}

/// HTTP listener settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Store connection and routing settings.
///
/// `user` and `password` must be given together; authentication is only
/// attempted when both are present.
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    pub hostname: String,
    pub port: u16,
    pub database: String,
    pub prefix: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Echo the requested id in 404 bodies instead of the bare message.
    #[serde(default)]
    pub not_found_includes_id: bool,
}

/// Logging settings.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
}

/// A file loaded into the in-memory store at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct PreloadEntry {
    pub path: String,
    /// Content type override; guessed from the file extension when absent.
    #[serde(default)]
    pub content_type: Option<String>,
}
