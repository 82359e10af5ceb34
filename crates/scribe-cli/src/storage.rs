use std::{fs, path::PathBuf};

use color_eyre::Result;
use dirs::data_dir;
use scribe_core::redact::RedactionPolicy;
use scribe_store::{
    record_store::{RecordStore, StoreConfig},
    tokio_fs::TokioFileSystem,
};
use tracing::debug;

use crate::config::Config;

/// Resolve the default data directory for Scribe.
pub fn default_data_dir() -> Result<PathBuf> {
    let base = data_dir().ok_or_else(|| color_eyre::eyre::eyre!("no data dir available"))?;
    Ok(base.join("scribe"))
}

/// Resolve the backing file: explicit override first, then config, then the
/// default data path. The data directory is created for the default path so
/// a first append does not fail on a missing parent.
pub fn resolve_store_file(config: &Config, file: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(file) = file {
        return Ok(file);
    }
    if let Some(filename) = config.store.as_ref().and_then(|s| s.filename.clone()) {
        return Ok(filename);
    }

    let dir = match &config.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };
    fs::create_dir_all(&dir)?;
    Ok(dir.join("records.ndjson"))
}

/// Build a production store bound to the resolved backing file.
pub fn store_for(
    config: &Config,
    file: Option<PathBuf>,
) -> Result<RecordStore<TokioFileSystem>> {
    let filename = resolve_store_file(config, file)?;
    debug!(?filename, "opening record store");

    let store_config = StoreConfig::new(filename).with_redaction(redaction_from(config));
    RecordStore::new(store_config, TokioFileSystem::new())
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))
}

fn redaction_from(config: &Config) -> RedactionPolicy {
    match config.store.as_ref().and_then(|s| s.redact.clone()) {
        Some(fields) => RedactionPolicy::new(fields),
        None => RedactionPolicy::default(),
    }
}

/// Helper for tests to construct a store over the in-memory filesystem.
#[cfg(test)]
pub fn test_store(
    filename: impl Into<PathBuf>,
    fs: scribe_core::fs::InMemoryFileSystem,
) -> RecordStore<scribe_core::fs::InMemoryFileSystem> {
    RecordStore::new(StoreConfig::new(filename), fs).expect("test store")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreSettings;

    #[test]
    fn explicit_file_wins_over_config() {
        let config = Config {
            data_dir: None,
            store: Some(StoreSettings {
                filename: Some(PathBuf::from("/tmp/from-config.ndjson")),
                redact: None,
            }),
        };

        let resolved = resolve_store_file(&config, Some(PathBuf::from("cli.ndjson")))
            .expect("resolve");
        assert_eq!(resolved, PathBuf::from("cli.ndjson"));
    }

    #[test]
    fn config_filename_wins_over_default_path() {
        let config = Config {
            data_dir: None,
            store: Some(StoreSettings {
                filename: Some(PathBuf::from("/tmp/from-config.ndjson")),
                redact: None,
            }),
        };

        let resolved = resolve_store_file(&config, None).expect("resolve");
        assert_eq!(resolved, PathBuf::from("/tmp/from-config.ndjson"));
    }

    #[test]
    fn default_path_lands_in_the_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            data_dir: Some(dir.path().join("nested")),
            store: None,
        };

        let resolved = resolve_store_file(&config, None).expect("resolve");
        assert_eq!(resolved, dir.path().join("nested").join("records.ndjson"));
        assert!(dir.path().join("nested").exists());
    }

    #[test]
    fn config_redaction_overrides_the_default() {
        let config = Config {
            data_dir: None,
            store: Some(StoreSettings {
                filename: None,
                redact: Some(vec!["ssn".into()]),
            }),
        };

        let policy = redaction_from(&config);
        assert_eq!(policy.fields(), ["ssn".to_string()]);
    }
}
