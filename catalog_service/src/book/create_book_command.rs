use tracing::info;

use crate::{
    author::query_manager::AuthorQueryManager,
    book::repository::{BookRecordInsert, BookRecordOwned, BookRepositoryArc},
    error::{AppError, AppResult},
    model::{
        author::AuthorId,
        book::{Book, BookInput},
    },
};

/// Command for creating new books.
///
/// The author must exist before the book is written. The store keeps no
/// referential constraint between the two collections.
#[derive(Debug, Clone)]
pub struct CreateBookCommand {
    book_repository: BookRepositoryArc,
    author_query_manager: AuthorQueryManager,
}

#[derive(Debug)]
pub struct CreateBookCommandResult {
    pub book: Book,
}

impl CreateBookCommand {
    pub fn new(
        book_repository: BookRepositoryArc,
        author_query_manager: AuthorQueryManager,
    ) -> Self {
        Self {
            book_repository,
            author_query_manager,
        }
    }

    /// Executes the book creation command.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidIdentifier`] for a malformed author id and
    /// [`AppError::NotFound`] if the author does not exist; in both cases nothing
    /// is written.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, input: &BookInput) -> AppResult<CreateBookCommandResult> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidArgument { field: "title" });
        }

        let author_id: AuthorId = input.author_id.parse()?;
        let author = self.author_query_manager.query_single(&author_id).await?;

        let record = BookRecordInsert::new(title, &author_id);
        let id = self.book_repository.insert(record.clone()).await?;

        info!(book_id = %id, author_id = %author_id, "Successfully created book");

        Ok(CreateBookCommandResult {
            book: BookRecordOwned::from_insert(id, record).into_book(author),
        })
    }
}
