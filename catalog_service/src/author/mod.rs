//! Author management module.
//!
//! - Command handler for author creation
//! - Query manager for retrieving and resolving authors
//! - Repository abstraction for data persistence

/// Author creation command handler.
pub mod create_author_command;

/// Author query manager for data retrieval.
pub mod query_manager;

/// Author repository abstraction and implementations.
pub mod repository;
