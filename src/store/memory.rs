//! In-memory file store.
//!
//! Backs the standalone binary and the test suite. Identifiers follow the
//! store convention of 24 hex characters and are derived from the content,
//! so the same bytes always land under the same id.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hyper::body::Bytes;
use tokio::sync::RwLock;

use super::error::{LookupError, StoreFault};
use super::{FileStore, StoreClient, StoreDatabase, StoredFile};

const ID_LEN: usize = 24;

#[derive(Debug, Clone)]
struct Entry {
    content_type: String,
    upload_date: DateTime<Utc>,
    content: Bytes,
}

/// Shared in-memory store. Cloning yields another handle to the same files.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: Arc<RwLock<HashMap<String, Entry>>>,
    credentials: Option<(String, String)>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that only accepts the given user/password pair.
    #[must_use]
    pub fn with_credentials(user: &str, password: &str) -> Self {
        Self {
            files: Arc::default(),
            credentials: Some((user.to_string(), password.to_string())),
        }
    }

    /// Store a blob and return its assigned identifier.
    pub async fn insert(&self, content_type: &str, content: impl Into<Bytes>) -> String {
        let content = content.into();
        let id = assign_id(content_type, &content);
        let entry = Entry {
            content_type: content_type.to_string(),
            upload_date: Utc::now(),
            content,
        };
        self.files.write().await.insert(id.clone(), entry);
        id
    }
}

fn well_formed(id: &str) -> bool {
    id.len() == ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

fn assign_id(content_type: &str, content: &Bytes) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let head = hasher.finish();

    let mut hasher = DefaultHasher::new();
    content_type.hash(&mut hasher);
    content.len().hash(&mut hasher);
    let tail = hasher.finish() & 0xffff_ffff;

    format!("{head:016x}{tail:08x}")
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn open_for_read(&self, id: &str) -> Result<Box<dyn StoredFile>, LookupError> {
        if !well_formed(id) {
            return Err(LookupError::InvalidIdentifier(id.to_string()));
        }
        let files = self.files.read().await;
        match files.get(id) {
            Some(entry) => Ok(Box::new(MemoryFile {
                id: id.to_string(),
                content_type: entry.content_type.clone(),
                upload_date: entry.upload_date,
                content: entry.content.clone(),
            })),
            None => Err(LookupError::NotFound(id.to_string())),
        }
    }
}

#[async_trait]
impl StoreDatabase for MemoryStore {
    async fn authenticate(&self, user: &str, password: &str) -> Result<(), StoreFault> {
        match &self.credentials {
            None => Ok(()),
            Some((u, p)) if u == user && p == password => Ok(()),
            Some(_) => Err(StoreFault(format!(
                "authentication rejected for user {user}"
            ))),
        }
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    type Database = Self;

    async fn connect(_host: &str, _port: u16) -> Result<Self, StoreFault> {
        Ok(Self::new())
    }

    fn database(&self, _name: &str) -> Self {
        self.clone()
    }
}

struct MemoryFile {
    id: String,
    content_type: String,
    upload_date: DateTime<Utc>,
    content: Bytes,
}

#[async_trait]
impl StoredFile for MemoryFile {
    fn id(&self) -> &str {
        &self.id
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn upload_date(&self) -> DateTime<Utc> {
        self.upload_date
    }

    async fn read_all(&mut self) -> Result<Bytes, StoreFault> {
        Ok(self.content.clone())
    }
}
