use std::path::{Path, PathBuf};

use scribe_core::{
    fs::{FileSystem, FileSystemError},
    record::Record,
    redact::RedactionPolicy,
};
use thiserror::Error;
use tracing::instrument;

/// Configuration for a [`RecordStore`]: the backing file plus the redaction
/// denylist applied on read.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    filename: PathBuf,
    redaction: RedactionPolicy,
}

impl StoreConfig {
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            redaction: RedactionPolicy::default(),
        }
    }

    pub fn with_redaction(mut self, redaction: RedactionPolicy) -> Self {
        self.redaction = redaction;
        self
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn redaction(&self) -> &RedactionPolicy {
        &self.redaction
    }
}

/// Errors produced by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected at construction, never deferred to first use.
    #[error("invalid store configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Filesystem failure, passed through unmodified. A missing backing
    /// file on read arrives here as [`FileSystemError::NotFound`].
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),

    /// A record does not serialize to a JSON object.
    #[error("record not serializable: {reason}")]
    Serialize { reason: String },

    /// A stored line is not valid JSON. The whole read aborts; a partial
    /// result would hide corruption.
    #[error("malformed record at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Append-only NDJSON record store over a [`FileSystem`].
///
/// One JSON object per line, `\n`-terminated. `create` appends a single
/// line; `read` scans the whole file and returns records in append order
/// with the configured denylist of fields stripped. The persisted file is
/// never rewritten.
///
/// Limitation: no concurrent-writer coordination. Writers appending to the
/// same file from separate processes may interleave at the byte level, and
/// a reader racing a writer may observe a partially-written last line. The
/// store assumes a single-writer discipline.
pub struct RecordStore<F: FileSystem> {
    config: StoreConfig,
    fs: F,
}

impl<F: FileSystem> RecordStore<F> {
    /// Bind a store to its backing file. An empty filename is rejected here
    /// rather than on first use.
    pub fn new(config: StoreConfig, fs: F) -> Result<Self, StoreError> {
        if config.filename.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig {
                reason: "filename must not be empty".to_string(),
            });
        }
        Ok(Self { config, fs })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Append one record as a single JSON line.
    ///
    /// The backing file is created on first append. Existing content is
    /// never read or rewritten, and no state is cached between calls.
    #[instrument(skip_all, fields(file = %self.config.filename.display()))]
    pub async fn create(&self, record: &Record) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record).map_err(|err| StoreError::Serialize {
            reason: err.to_string(),
        })?;
        line.push('\n');

        self.fs.append_text(&self.config.filename, &line).await?;
        Ok(())
    }

    /// Read every stored record in append order, redacting denied fields.
    ///
    /// An existing empty file yields an empty vec. A missing file surfaces
    /// as [`FileSystemError::NotFound`] so callers can tell "absent" from
    /// "empty". Blank lines (including the trailing one) are ignored; any
    /// other unparseable line aborts the read with its 1-based line number.
    #[instrument(skip_all, fields(file = %self.config.filename.display()))]
    pub async fn read(&self) -> Result<Vec<Record>, StoreError> {
        let contents = self.fs.read_to_string(&self.config.filename).await?;

        let mut records = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: Record =
                serde_json::from_str(line).map_err(|err| StoreError::Malformed {
                    line: index + 1,
                    reason: err.to_string(),
                })?;
            records.push(self.config.redaction.redact(record));
        }
        Ok(records)
    }
}
