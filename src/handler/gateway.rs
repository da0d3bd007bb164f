//! Request dispatch.
//!
//! The gateway owns a configured path prefix and a handle to the file
//! store. Requests matching `/{prefix}/{id}` are answered from the store;
//! everything else is delegated untouched to the wrapped application.
//! Exactly one of the two happens per request.

use std::sync::Arc;

use async_trait::async_trait;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::config::GatewayConfig;
use crate::handler::responder;
use crate::http::Conditions;
use crate::logger;
use crate::store::{connect, ConnectionError, FileStore, StoreClient, StoreFault};

/// The application wrapped by the gateway. It sees every request the
/// gateway does not claim.
#[async_trait]
pub trait Downstream<B>: Send + Sync {
    async fn call(&self, req: Request<B>) -> Response<Full<Bytes>>;
}

/// Prefix-routing middleware in front of a wrapped application.
pub struct Gateway<A> {
    prefix: String,
    not_found_includes_id: bool,
    access_log: bool,
    store: Arc<dyn FileStore>,
    app: A,
}

impl<A> Gateway<A> {
    /// Wrap `app`, serving `/{prefix}/{id}` out of `store`.
    ///
    /// Leading and trailing slashes on the prefix are ignored.
    pub fn new(prefix: &str, store: Arc<dyn FileStore>, app: A) -> Self {
        Self {
            prefix: prefix.trim_matches('/').to_string(),
            not_found_includes_id: false,
            access_log: false,
            store,
            app,
        }
    }

    /// Connect to the store described by `config` and mount the gateway in
    /// front of `app`.
    ///
    /// Fails fast: no gateway is handed out unless the store answered
    /// within the connect deadline.
    pub async fn open<C: StoreClient>(
        config: &GatewayConfig,
        app: A,
    ) -> Result<Self, ConnectionError> {
        let db = connect::<C>(config).await?;
        Ok(Self::new(&config.prefix, Arc::new(db), app)
            .not_found_includes_id(config.not_found_includes_id))
    }

    /// Echo the requested id in 404 bodies.
    #[must_use]
    pub fn not_found_includes_id(mut self, on: bool) -> Self {
        self.not_found_includes_id = on;
        self
    }

    /// Log one line per request answered from the store.
    #[must_use]
    pub fn access_log(mut self, on: bool) -> Self {
        self.access_log = on;
        self
    }

    /// Handle one request: answer it from the store or delegate it.
    ///
    /// A delegated request comes back exactly as the wrapped application
    /// produced it. `Err` is only returned for store faults outside the
    /// mapped lookup failures.
    pub async fn handle<B>(&self, req: Request<B>) -> Result<Response<Full<Bytes>>, StoreFault>
    where
        A: Downstream<B>,
        B: Send,
    {
        let id = match file_id(&self.prefix, req.uri().path()) {
            Some(id) => id.to_string(),
            None => return Ok(self.app.call(req).await),
        };

        if self.access_log {
            logger::log_request(req.method(), req.uri(), req.version());
        }

        let is_head = *req.method() == Method::HEAD;
        let conditions = Conditions::from_headers(req.headers());
        let response = responder::respond(
            self.store.as_ref(),
            &id,
            &conditions,
            is_head,
            self.not_found_includes_id,
        )
        .await?;

        if self.access_log {
            logger::log_file_response(&id, response.status().as_u16());
        }
        Ok(response)
    }
}

/// Extract the file identifier from a path of the form `/{prefix}/{id}`.
///
/// The prefix is compared literally, character by character; bytes that
/// would be meta-characters in a pattern carry no special meaning here.
fn file_id<'a>(prefix: &str, path: &'a str) -> Option<&'a str> {
    let rest = path
        .strip_prefix('/')?
        .strip_prefix(prefix)?
        .strip_prefix('/')?;
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}
