use tracing::info;

use crate::{
    author::repository::{AuthorRecordInsert, AuthorRecordOwned, AuthorRepositoryArc},
    error::AppResult,
    model::author::{Author, AuthorInput},
};

/// Command for creating new authors.
///
/// Validates the input, maps it to a store record and inserts it. The store
/// assigns the identifier.
#[derive(Debug, Clone)]
pub struct CreateAuthorCommand {
    author_repository: AuthorRepositoryArc,
}

/// Output data from author creation.
#[derive(Debug, Clone)]
pub struct CreateAuthorCommandOutput {
    /// The created author
    pub author: Author,
}

impl CreateAuthorCommand {
    /// Creates a new `CreateAuthorCommand`.
    ///
    /// # Arguments
    ///
    /// * `author_repository` - Repository for persisting author data
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        Self { author_repository }
    }

    /// Executes the author creation command.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::InvalidDate`] if the birthdate is not
    /// `DD-MM-YYYY`, [`crate::error::AppError::InvalidArgument`] for an empty name,
    /// or a store error if the insert fails.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, input: &AuthorInput) -> AppResult<CreateAuthorCommandOutput> {
        let record = AuthorRecordInsert::try_from(input)?;

        let id = self.author_repository.insert(record.clone()).await?;

        info!(author_id = %id, "Successfully created author");

        Ok(CreateAuthorCommandOutput {
            author: AuthorRecordOwned::from_insert(id, record).try_into()?,
        })
    }
}
