//! Core contracts for Scribe: the record model, the filesystem boundary, and
//! the read-side redaction policy.
//! This crate is intentionally small to keep dependency surface minimal.

pub mod fs;
pub mod record;
pub mod redact;
