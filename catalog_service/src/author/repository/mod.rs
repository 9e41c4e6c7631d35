use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use catalog_common::date_time::UtcDateTime;

use crate::{
    error::{AppError, AppResult},
    model::author::{Author, AuthorId, AuthorInput},
};

/// In-memory repository implementation.
pub mod memory;

/// Document store repository implementation.
pub mod mongo;

/// Author record for insertion. The store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecordInsert {
    pub name: String,
    pub birthdate: UtcDateTime,
}

/// Persisted author record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecordOwned {
    pub id: AuthorId,
    pub name: String,
    /// Midnight UTC of the birth date.
    pub birthdate: UtcDateTime,
}

/// Repository trait for author persistence.
///
/// Implementations bound every call by the deadline of its class: `insert` and
/// `select` are point calls, `select_multiple` and `select_all` are scans.
#[async_trait]
pub trait AuthorRepository: Debug {
    /// Inserts a new author record and returns its store-assigned identifier.
    async fn insert(&self, record: AuthorRecordInsert) -> AppResult<AuthorId>;

    /// Selects an author record by ID.
    async fn select(&self, id: &AuthorId) -> AppResult<Option<AuthorRecordOwned>>;

    /// Selects the author records matching any of the given IDs in one round trip.
    ///
    /// Missing IDs are skipped; the result is in no particular order.
    async fn select_multiple(&self, ids: &[AuthorId]) -> AppResult<Vec<AuthorRecordOwned>>;

    /// Selects every author record, in the store's natural order.
    async fn select_all(&self) -> AppResult<Vec<AuthorRecordOwned>>;
}

pub type AuthorRepositoryArc = Arc<dyn AuthorRepository + Send + Sync>;

impl TryFrom<&AuthorInput> for AuthorRecordInsert {
    type Error = AppError;

    fn try_from(input: &AuthorInput) -> Result<Self, Self::Error> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidArgument { field: "name" });
        }

        let birthdate = UtcDateTime::parse_date(&input.birthdate)
            .map_err(|_| AppError::InvalidDate(input.birthdate.clone()))?;

        Ok(Self {
            name: name.to_string(),
            birthdate,
        })
    }
}

impl AuthorRecordOwned {
    pub fn from_insert(id: AuthorId, record: AuthorRecordInsert) -> Self {
        Self {
            id,
            name: record.name,
            birthdate: record.birthdate,
        }
    }
}

impl TryFrom<AuthorRecordOwned> for Author {
    type Error = AppError;

    fn try_from(record: AuthorRecordOwned) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            name: record.name,
            birthdate: record.birthdate.format_date()?,
        })
    }
}
