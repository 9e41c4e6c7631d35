use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use catalog_common::id::Id;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(pub Id);

/// An author as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    /// Calendar date formatted as `DD-MM-YYYY`.
    pub birthdate: String,
}

/// Data needed to create an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    pub name: String,
    /// Calendar date formatted as `DD-MM-YYYY`.
    pub birthdate: String,
}

impl AuthorId {
    pub fn new<T: Into<Id>>(id: T) -> Self {
        Self(id.into())
    }
}

impl Display for AuthorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AuthorId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Id::decode(s)?))
    }
}
