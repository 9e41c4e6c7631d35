use tracing::debug;

use crate::{
    author::query_manager::AuthorQueryManager,
    book::repository::BookRepositoryArc,
    error::{AppError, AppResult, ResourceKind},
    model::{
        author::AuthorId,
        book::{Book, BookId},
    },
};

#[derive(Debug, Clone)]
pub struct BookQueryManager {
    book_repository: BookRepositoryArc,
    author_query_manager: AuthorQueryManager,
}

impl BookQueryManager {
    pub fn new(
        book_repository: BookRepositoryArc,
        author_query_manager: AuthorQueryManager,
    ) -> Self {
        BookQueryManager {
            book_repository,
            author_query_manager,
        }
    }

    pub async fn query_single(&self, id: &BookId) -> AppResult<Book> {
        let record = self
            .book_repository
            .select(id)
            .await?
            .ok_or_else(|| AppError::not_found(ResourceKind::Book, id))?;

        let author = self
            .author_query_manager
            .query_single(&record.author_id()?)
            .await?;

        Ok(record.into_book(author))
    }

    /// Lists every book with its author attached.
    ///
    /// Authors are resolved with one batch lookup for all distinct author ids
    /// rather than one lookup per book. The whole list fails if any book's author
    /// cannot be resolved.
    pub async fn query_list(&self) -> AppResult<Vec<Book>> {
        let records = self.book_repository.select_all().await?;

        let author_ids = records
            .iter()
            .map(|record| record.author_id())
            .collect::<AppResult<Vec<_>>>()?;
        let authors = self.author_query_manager.query_batch(&author_ids).await?;

        let books = records
            .into_iter()
            .zip(author_ids)
            .map(|(record, author_id)| {
                authors
                    .get(&author_id)
                    .cloned()
                    .map(|author| record.into_book(author))
                    .ok_or_else(|| AppError::not_found(ResourceKind::Author, author_id))
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(books)
    }

    /// Lists the books whose resolved author has the given id.
    ///
    /// Fails exactly when [`Self::query_list`] fails. An id that is not well-formed
    /// matches no book.
    pub async fn query_list_by_author(&self, author_id: &str) -> AppResult<Vec<Book>> {
        let books = self.query_list().await?;

        let Ok(author_id) = author_id.parse::<AuthorId>() else {
            debug!(author_id, "Malformed author id matches no books");
            return Ok(Vec::new());
        };

        Ok(books
            .into_iter()
            .filter(|book| book.author.id == author_id)
            .collect())
    }
}
