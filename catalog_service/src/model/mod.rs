//! External shapes of catalog entities.
//!
//! These are what callers of [`crate::catalog::Catalog`] pass in and get back.
//! They serialize with camelCase field names so a transport layer can emit them as
//! they are.

/// Author shapes and identifier.
pub mod author;
/// Book shapes and identifier.
pub mod book;
