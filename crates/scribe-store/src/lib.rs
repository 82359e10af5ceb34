//! Concrete storage implementations: the append-only NDJSON record store and
//! the tokio-backed filesystem it runs on in production.

pub mod record_store;
pub mod tokio_fs;
