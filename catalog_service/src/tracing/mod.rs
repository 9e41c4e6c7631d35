//! Tracing and observability module.

/// Tracer configuration and initialization.
pub mod tracer;
