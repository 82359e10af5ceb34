//! Durable text-file boundary used by record stores.
//!
//! Implementations must signal a missing file distinctly from an empty one,
//! so callers can tell the two apart.

mod file_system;

pub use file_system::{FileSystem, FileSystemError, InMemoryFileSystem};
