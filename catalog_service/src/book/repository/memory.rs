use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use catalog_common::id::Id;
use tokio::sync::RwLock;

use crate::{
    book::repository::{BookRecordInsert, BookRecordOwned, BookRepository},
    error::AppResult,
    model::book::BookId,
    store::timeout::{CallClass, StoreTimeouts},
};

/// In-memory implementation of the book repository.
#[derive(Debug)]
pub struct MemoryBookRepository {
    books: Arc<RwLock<HashMap<BookId, BookRecordOwned>>>,
    timeouts: StoreTimeouts,
    latency: Duration,
}

impl Default for MemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBookRepository {
    /// Creates a new empty memory book repository.
    pub fn new() -> Self {
        Self {
            books: Arc::new(RwLock::new(HashMap::new())),
            timeouts: StoreTimeouts::default(),
            latency: Duration::ZERO,
        }
    }

    /// Creates a new memory book repository with initial data.
    ///
    /// Records are taken as they are, so this can hold books whose author does
    /// not exist.
    pub fn with_data(books: Vec<BookRecordOwned>) -> Self {
        Self {
            books: Arc::new(RwLock::new(
                books.into_iter().map(|book| (book.id, book)).collect(),
            )),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: StoreTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

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
impl BookRepository for MemoryBookRepository {
    async fn insert(&self, record: BookRecordInsert) -> AppResult<BookId> {
        self.timeouts
            .bound(CallClass::Point, async move {
                self.delay().await;
                let id = BookId::new(Id::generate());
                self.books
                    .write()
                    .await
                    .insert(id, BookRecordOwned::from_insert(id, record));
                Ok(id)
            })
            .await
    }

    async fn select(&self, id: &BookId) -> AppResult<Option<BookRecordOwned>> {
        self.timeouts
            .bound(CallClass::Point, async {
                self.delay().await;
                Ok(self.books.read().await.get(id).cloned())
            })
            .await
    }

    async fn select_all(&self) -> AppResult<Vec<BookRecordOwned>> {
        self.timeouts
            .bound(CallClass::Scan, async {
                self.delay().await;
                Ok(self.books.read().await.values().cloned().collect())
            })
            .await
    }
}
