//! Startup connection to the file store.
//!
//! Connecting and authenticating happen once, before any request is
//! served. The whole attempt runs under a fixed deadline, and any fault
//! inside it (refused connection, rejected credentials, timeout) is
//! collapsed into a single [`ConnectionError`].

use std::time::Duration;

use crate::config::GatewayConfig;

use super::error::{ConnectionError, StoreFault};
use super::{StoreClient, StoreDatabase};

/// Upper bound on the connect-and-authenticate attempt.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Dial the store described by `config` and return a ready database handle.
///
/// Credentials are presented only when both user and password are set.
/// There is no reconnect once the handle is handed out; a dropped
/// connection surfaces as lookup faults on later requests.
pub async fn connect<C: StoreClient>(
    config: &GatewayConfig,
) -> Result<C::Database, ConnectionError> {
    let attempt = async {
        let client = C::connect(&config.hostname, config.port).await?;
        let db = client.database(&config.database);
        if let (Some(user), Some(password)) = (&config.user, &config.password) {
            db.authenticate(user, password).await?;
        }
        Ok::<C::Database, StoreFault>(db)
    };

    match tokio::time::timeout(CONNECT_TIMEOUT, attempt).await {
        Ok(Ok(db)) => Ok(db),
        Ok(Err(fault)) => Err(ConnectionError::new(fault.to_string())),
        Err(_) => Err(ConnectionError::new(format!(
            "no answer within {}s",
            CONNECT_TIMEOUT.as_secs()
        ))),
    }
}
