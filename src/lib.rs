//! Serve stored files over HTTP in front of an existing application.
//!
//! `gridgate` claims requests whose path looks like `/{prefix}/{id}`,
//! resolves `id` against a content-addressed file store, and answers with
//! the stored bytes plus validation headers (`Etag`, `Last-Modified`).
//! Conditional requests short-circuit to `304 Not Modified` without
//! reading file content. Every other request is handed to the wrapped
//! application untouched.
//!
//! The store sits behind the traits in [`store`]; deployments implement
//! [`store::StoreClient`] for their backend, while tests and the bundled
//! binary use [`store::MemoryStore`].
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gridgate::handler::{Downstream, Gateway};
//! use gridgate::store::MemoryStore;
//! use http_body_util::Full;
//! use hyper::body::Bytes;
//! use hyper::{Request, Response};
//!
//! struct App;
//!
//! #[async_trait::async_trait]
//! impl Downstream<Full<Bytes>> for App {
//!     async fn call(&self, _req: Request<Full<Bytes>>) -> Response<Full<Bytes>> {
//!         Response::new(Full::new(Bytes::from("hello from the app")))
//!     }
//! }
//!
//! async fn serve() {
//!     let store = MemoryStore::new();
//!     let id = store.insert("image/png", vec![1, 2, 3]).await;
//!
//!     let gateway = Gateway::new("files", Arc::new(store), App);
//!     let req = Request::get(format!("/files/{id}"))
//!         .body(Full::new(Bytes::new()))
//!         .unwrap();
//!     let resp = gateway.handle(req).await.unwrap();
//!     assert_eq!(resp.status(), 200);
//! }
//! ```

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod store;

pub use config::{Config, GatewayConfig};
pub use handler::{Downstream, Gateway};
pub use store::{
    connect, ConnectionError, FileStore, LookupError, MemoryStore, StoreClient, StoreDatabase,
    StoreFault, StoredFile,
};
