//! File store abstraction.
//!
//! The gateway reads from a content-addressed blob store through the narrow
//! interface defined here. Everything behind it, from the wire protocol to
//! pooling, chunking, and replication, belongs to the store client
//! implementing these traits, not to this crate.

pub mod connect;
pub mod error;
pub mod memory;

pub use connect::{connect, CONNECT_TIMEOUT};
pub use error::{ConnectionError, LookupError, StoreFault};
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hyper::body::Bytes;

/// An open, read-only handle to a single stored file.
///
/// Metadata accessors are cheap; content is only transferred once
/// [`StoredFile::read_all`] is called, so a conditional hit never moves
/// payload bytes.
#[async_trait]
pub trait StoredFile: Send {
    /// Store-assigned identifier, string encoded.
    fn id(&self) -> &str;

    /// MIME type recorded when the file was uploaded.
    fn content_type(&self) -> &str;

    /// Upload timestamp recorded by the store.
    fn upload_date(&self) -> DateTime<Utc>;

    /// Read the complete file content.
    async fn read_all(&mut self) -> Result<Bytes, StoreFault>;
}

/// Identifier-keyed, read-only access to stored files.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Open the file stored under `id` for reading.
    async fn open_for_read(&self, id: &str) -> Result<Box<dyn StoredFile>, LookupError>;
}

/// A named database on an established store connection.
#[async_trait]
pub trait StoreDatabase: FileStore {
    /// Present credentials to this database.
    async fn authenticate(&self, user: &str, password: &str) -> Result<(), StoreFault>;
}

/// A client capable of dialing a store server.
#[async_trait]
pub trait StoreClient: Sized + Send {
    type Database: StoreDatabase + Send + Sync + 'static;

    /// Establish a connection to the store at `host:port`.
    async fn connect(host: &str, port: u16) -> Result<Self, StoreFault>;

    /// Select a database by name on this connection.
    fn database(&self, name: &str) -> Self::Database;
}
