//! Catalog operations.
//!
//! [`Catalog`] is the single entry point callers use. It holds no state besides
//! the injected repositories: every read goes back to the store.

use std::sync::Arc;

use tracing::instrument;

use crate::{
    author::{
        create_author_command::CreateAuthorCommand,
        query_manager::AuthorQueryManager,
        repository::{
            AuthorRepositoryArc, memory::MemoryAuthorRepository, mongo::MongoAuthorRepository,
        },
    },
    book::{
        create_book_command::CreateBookCommand,
        query_manager::BookQueryManager,
        repository::{BookRepositoryArc, memory::MemoryBookRepository, mongo::MongoBookRepository},
    },
    error::AppResult,
    model::{
        author::{Author, AuthorId, AuthorInput},
        book::{Book, BookId, BookInput},
    },
    store::{StoreGateway, timeout::StoreTimeouts},
};

#[derive(Debug, Clone)]
pub struct Catalog {
    author_query_manager: AuthorQueryManager,
    book_query_manager: BookQueryManager,
    create_author_command: CreateAuthorCommand,
    create_book_command: CreateBookCommand,
}

impl Catalog {
    pub fn new(author_repository: AuthorRepositoryArc, book_repository: BookRepositoryArc) -> Self {
        let author_query_manager = AuthorQueryManager::new(Arc::clone(&author_repository));
        let book_query_manager =
            BookQueryManager::new(Arc::clone(&book_repository), author_query_manager.clone());

        Self {
            create_author_command: CreateAuthorCommand::new(author_repository),
            create_book_command: CreateBookCommand::new(
                book_repository,
                author_query_manager.clone(),
            ),
            author_query_manager,
            book_query_manager,
        }
    }

    /// Creates a catalog backed by the document store.
    pub fn from_gateway(gateway: &StoreGateway) -> Self {
        Self::new(
            Arc::new(MongoAuthorRepository::new(gateway.clone())),
            Arc::new(MongoBookRepository::new(gateway.clone())),
        )
    }

    /// Creates an empty catalog that lives in process memory.
    pub fn in_memory(timeouts: StoreTimeouts) -> Self {
        Self::new(
            Arc::new(MemoryAuthorRepository::new().with_timeouts(timeouts)),
            Arc::new(MemoryBookRepository::new().with_timeouts(timeouts)),
        )
    }

    #[instrument(skip(self))]
    pub async fn create_author(&self, input: &AuthorInput) -> AppResult<Author> {
        Ok(self.create_author_command.execute(input).await?.author)
    }

    #[instrument(skip(self))]
    pub async fn get_author(&self, id: &str) -> AppResult<Author> {
        let id: AuthorId = id.parse()?;
        self.author_query_manager.query_single(&id).await
    }

    #[instrument(skip(self))]
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.author_query_manager.query_all().await
    }

    #[instrument(skip(self))]
    pub async fn create_book(&self, input: &BookInput) -> AppResult<Book> {
        Ok(self.create_book_command.execute(input).await?.book)
    }

    #[instrument(skip(self))]
    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        let id: BookId = id.parse()?;
        self.book_query_manager.query_single(&id).await
    }

    #[instrument(skip(self))]
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.book_query_manager.query_list().await
    }

    #[instrument(skip(self))]
    pub async fn list_books_by_author(&self, author_id: &str) -> AppResult<Vec<Book>> {
        self.book_query_manager.query_list_by_author(author_id).await
    }
}
