//! Configuration loading.
//!
//! Defaults are applied at construction and the result is validated once;
//! nothing later in the pipeline re-checks options.

mod types;

use std::net::SocketAddr;

pub use types::{Config, GatewayConfig, LoggingConfig, PreloadEntry, ServerConfig};

/// Default port of the backing store.
pub const DEFAULT_STORE_PORT: u16 = 27017;

impl Config {
    /// Load configuration from the given file path (extension optional),
    /// with `GRIDGATE`-prefixed environment variables layered on top.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("GRIDGATE").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("gateway.hostname", "localhost")?
            .set_default("gateway.port", i64::from(DEFAULT_STORE_PORT))?
            .set_default("gateway.prefix", "gridfs")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.gateway.validate()?;
        Ok(cfg)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

impl GatewayConfig {
    /// Check the parts no default can supply.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.database.is_empty() {
            return Err(config::ConfigError::Message(
                "gateway.database must not be empty".to_string(),
            ));
        }
        if self.prefix.trim_matches('/').is_empty() {
            return Err(config::ConfigError::Message(
                "gateway.prefix must not be empty".to_string(),
            ));
        }
        if self.user.is_some() != self.password.is_some() {
            return Err(config::ConfigError::Message(
                "gateway.user and gateway.password must be set together".to_string(),
            ));
        }
        Ok(())
    }
}
