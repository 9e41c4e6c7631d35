pub mod author;
pub mod book;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod tracing;
