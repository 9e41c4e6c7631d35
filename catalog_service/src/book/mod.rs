//! Book management module.
//!
//! Every read path that returns a book resolves its author eagerly, so a returned
//! [`crate::model::book::Book`] always carries a fully populated author.

/// Book creation command handler.
pub mod create_book_command;

/// Book query manager for data retrieval.
pub mod query_manager;

/// Book repository abstraction and implementations.
pub mod repository;
