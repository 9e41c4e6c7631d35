use std::collections::HashMap;

use itertools::Itertools;

use crate::{
    author::repository::AuthorRepositoryArc,
    error::{AppError, AppResult, ResourceKind},
    model::author::{Author, AuthorId},
};

#[derive(Debug, Clone)]
pub struct AuthorQueryManager {
    author_repository: AuthorRepositoryArc,
}

impl AuthorQueryManager {
    pub fn new(author_repository: AuthorRepositoryArc) -> Self {
        AuthorQueryManager { author_repository }
    }

    pub async fn query_single(&self, id: &AuthorId) -> AppResult<Author> {
        let record = self
            .author_repository
            .select(id)
            .await?
            .ok_or_else(|| AppError::not_found(ResourceKind::Author, id))?;

        record.try_into()
    }

    /// Resolves a set of authors with a single batch lookup.
    ///
    /// Duplicate IDs are looked up once.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] naming the first requested author that does
    /// not exist.
    pub async fn query_batch(&self, ids: &[AuthorId]) -> AppResult<HashMap<AuthorId, Author>> {
        let ids: Vec<AuthorId> = ids.iter().copied().unique().collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let authors: HashMap<AuthorId, Author> = self
            .author_repository
            .select_multiple(&ids)
            .await?
            .into_iter()
            .map(|record| Author::try_from(record).map(|author| (author.id, author)))
            .collect::<AppResult<_>>()?;

        if let Some(missing) = ids.iter().find(|id| !authors.contains_key(id)) {
            return Err(AppError::not_found(ResourceKind::Author, missing));
        }

        Ok(authors)
    }

    pub async fn query_all(&self) -> AppResult<Vec<Author>> {
        self.author_repository
            .select_all()
            .await?
            .into_iter()
            .map(Author::try_from)
            .collect()
    }
}
