//! Structured logging to stderr; stdout is reserved for results.

mod format;

pub use format::StructuredLogger;
