use std::{
    fmt::{self, Display, Formatter},
    time::Duration,
};

use catalog_common::id::ParseIdError;
use thiserror::Error;

use crate::store::timeout::CallClass;

/// Application error types.
///
/// Every failure of a catalog operation surfaces as one of these. None of them are
/// retried inside the catalog; translating them into protocol-level responses is
/// left to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    /// An external identifier is not a well-formed store identifier.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] ParseIdError),

    /// A birthdate string does not match `DD-MM-YYYY`.
    #[error("invalid date `{0}`, expected DD-MM-YYYY")]
    InvalidDate(String),

    /// A required text field is empty.
    #[error("field `{field}` must not be empty")]
    InvalidArgument { field: &'static str },

    /// A referenced entity does not exist.
    #[error("{kind} `{id}` not found")]
    NotFound { kind: ResourceKind, id: String },

    /// A store call exceeded the deadline of its call class.
    #[error("{class} store call timed out after {after:?}")]
    StoreTimeout { class: CallClass, after: Duration },

    /// Any other failure reported by the store or while decoding its documents.
    #[error("store error: {0}")]
    Store(Box<dyn std::error::Error + Send + Sync>),

    /// The store connection could not be established at process start.
    ///
    /// This is the only error the process does not survive.
    #[error("startup failure: {0}")]
    StartupFailure(Box<dyn std::error::Error + Send + Sync>),

    /// Internal application error.
    ///
    /// Configuration and other process-level faults.
    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Author,
    Book,
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Author => f.write_str("author"),
            Self::Book => f.write_str("book"),
        }
    }
}

impl AppError {
    pub fn not_found<S: ToString>(kind: ResourceKind, id: S) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn startup<E: Into<Box<dyn std::error::Error + Send + Sync>>>(err: E) -> Self {
        Self::StartupFailure(err.into())
    }
}

macro_rules! impl_internal_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                AppError::Internal(Box::new(err))
            }
        }
        )*
    };
}
impl_internal_errors!(
    config::ConfigError,
    serde_json::Error,
    tracing_subscriber::util::TryInitError,
);

macro_rules! impl_store_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                AppError::Store(Box::new(err))
            }
        }
        )*
    };
}
impl_store_errors!(
    mongodb::error::Error,
    bson::de::Error,
    bson::ser::Error,
    time::error::Format,
    catalog_common::date_time::UtcDateTimeError,
);
