use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use catalog_common::id::Id;
use serde::{Deserialize, Serialize};

use crate::{error::AppError, model::author::Author};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub Id);

/// A book as returned to callers, always carrying its fully resolved author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: Author,
}

/// Data needed to create a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub title: String,
    /// External identifier of an existing author.
    pub author_id: String,
}

impl BookId {
    pub fn new<T: Into<Id>>(id: T) -> Self {
        Self(id.into())
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BookId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Id::decode(s)?))
    }
}
