use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use catalog_common::id::Id;
use tokio::sync::RwLock;

use crate::{
    author::repository::{AuthorRecordInsert, AuthorRecordOwned, AuthorRepository},
    error::AppResult,
    model::author::AuthorId,
    store::timeout::{CallClass, StoreTimeouts},
};

/// In-memory implementation of the author repository.
///
/// Calls are bounded by the same deadlines as the document store implementation.
/// An artificial latency can be injected to exercise them.
#[derive(Debug)]
pub struct MemoryAuthorRepository {
    authors: Arc<RwLock<HashMap<AuthorId, AuthorRecordOwned>>>,
    timeouts: StoreTimeouts,
    latency: Duration,
}

impl Default for MemoryAuthorRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAuthorRepository {
    /// Creates a new empty memory repository.
    pub fn new() -> Self {
        Self {
            authors: Arc::new(RwLock::new(HashMap::new())),
            timeouts: StoreTimeouts::default(),
            latency: Duration::ZERO,
        }
    }

    /// Creates a new memory repository with initial data.
    ///
    /// # Arguments
    ///
    /// * `authors` - Initial list of authors to populate the repository
    pub fn with_data(authors: Vec<AuthorRecordOwned>) -> Self {
        Self {
            authors: Arc::new(RwLock::new(
                authors
                    .into_iter()
                    .map(|author| (author.id, author))
                    .collect(),
            )),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: StoreTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Delays every call by `latency` before it touches the data.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl AuthorRepository for MemoryAuthorRepository {
    async fn insert(&self, record: AuthorRecordInsert) -> AppResult<AuthorId> {
        self.timeouts
            .bound(CallClass::Point, async move {
                self.delay().await;
                let id = AuthorId::new(Id::generate());
                self.authors
                    .write()
                    .await
                    .insert(id, AuthorRecordOwned::from_insert(id, record));
                Ok(id)
            })
            .await
    }

    async fn select(&self, id: &AuthorId) -> AppResult<Option<AuthorRecordOwned>> {
        self.timeouts
            .bound(CallClass::Point, async {
                self.delay().await;
                Ok(self.authors.read().await.get(id).cloned())
            })
            .await
    }

    async fn select_multiple(&self, ids: &[AuthorId]) -> AppResult<Vec<AuthorRecordOwned>> {
        self.timeouts
            .bound(CallClass::Scan, async {
                self.delay().await;
                let authors = self.authors.read().await;
                Ok(authors
                    .values()
                    .filter(|author| ids.contains(&author.id))
                    .cloned()
                    .collect())
            })
            .await
    }

    async fn select_all(&self) -> AppResult<Vec<AuthorRecordOwned>> {
        self.timeouts
            .bound(CallClass::Scan, async {
                self.delay().await;
                Ok(self.authors.read().await.values().cloned().collect())
            })
            .await
    }
}
