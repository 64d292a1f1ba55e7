//! Structured logging for ReviewLens.
//!
//! Console output goes to stderr so streamed summaries on stdout stay clean.
//! An optional daily-rolling NDJSON file can be enabled per run.

pub mod logger;
pub mod redact;

pub use logger::{init_logger, LogSettings};
pub use redact::redact_url;
