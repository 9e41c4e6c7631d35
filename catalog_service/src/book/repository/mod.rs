use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

use crate::{
    error::AppResult,
    model::{
        author::{Author, AuthorId},
        book::{Book, BookId},
    },
};

/// In-memory repository implementation.
pub mod memory;

/// Document store repository implementation.
pub mod mongo;

/// Book record for insertion operations.
///
/// The store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecordInsert {
    /// External form of the author identifier
    pub author_id: String,
    /// Title of the book
    pub title: String,
}

/// Persisted book record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecordOwned {
    /// Unique identifier for the book
    pub id: BookId,
    /// External form of the author identifier, as it was stored.
    ///
    /// The store does not enforce that it names an existing author.
    pub author_id: String,
    /// Title of the book
    pub title: String,
}

/// Repository trait for book persistence.
///
/// `insert` and `select` are point calls, `select_all` is a scan.
#[async_trait]
pub trait BookRepository: Debug {
    /// Inserts a new book record and returns its store-assigned identifier.
    async fn insert(&self, record: BookRecordInsert) -> AppResult<BookId>;

    /// Selects a book record by ID.
    async fn select(&self, id: &BookId) -> AppResult<Option<BookRecordOwned>>;

    /// Selects every book record, in the store's natural order.
    async fn select_all(&self) -> AppResult<Vec<BookRecordOwned>>;
}

/// Thread-safe shared reference to a book repository.
pub type BookRepositoryArc = Arc<dyn BookRepository + Send + Sync>;

impl BookRecordInsert {
    pub fn new(title: &str, author_id: &AuthorId) -> Self {
        Self {
            author_id: author_id.to_string(),
            title: title.to_string(),
        }
    }
}

impl BookRecordOwned {
    pub fn from_insert(id: BookId, record: BookRecordInsert) -> Self {
        Self {
            id,
            author_id: record.author_id,
            title: record.title,
        }
    }

    /// Decodes the stored author reference into a usable store key.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::InvalidIdentifier`] if the stored value is
    /// not a well-formed identifier.
    pub fn author_id(&self) -> AppResult<AuthorId> {
        self.author_id.parse()
    }

    /// Assembles the output book around its already-resolved author.
    pub fn into_book(self, author: Author) -> Book {
        Book {
            id: self.id,
            title: self.title,
            author,
        }
    }
}
