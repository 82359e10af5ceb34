mod cli;
mod config;
mod storage;

use chrono::Utc;
use clap::Parser;
use color_eyre::Result;
use scribe_core::{fs::FileSystem, record::Record};
use scribe_store::{
    record_store::{RecordStore, StoreConfig},
    tokio_fs::TokioFileSystem,
};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::ConfigCommand;

/// Entry point wiring the CLI to the record store.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = cli::Cli::parse();
    let config = config::load()?;
    match cli.command.unwrap_or(cli::Command::Read { file: None }) {
        cli::Command::Append { file, fields } => run_append(file, fields, &config).await?,
        cli::Command::Read { file } => run_read(file, &config).await?,
        cli::Command::Health => run_health_check().await?,
        cli::Command::Version => print_version(),
        cli::Command::Config(ConfigCommand::Init) => init_config(&config)?,
    }

    Ok(())
}

fn init_tracing() {
    // Respect user-provided filters, default to info to avoid noisy stdout.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_version() {
    println!("scribe {}", env!("CARGO_PKG_VERSION"));
}

async fn run_append(
    file: Option<std::path::PathBuf>,
    fields: Vec<String>,
    config: &config::Config,
) -> Result<()> {
    let store = storage::store_for(config, file)?;
    let record = record_from_fields(&fields)?;
    store
        .create(&record)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    println!("Appended 1 record to {}", store.config().filename().display());
    Ok(())
}

async fn run_read(file: Option<std::path::PathBuf>, config: &config::Config) -> Result<()> {
    let store = storage::store_for(config, file)?;
    let records = store
        .read()
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    for record in &records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

/// Build a record from `FIELD=VALUE` pairs. Values that parse as JSON are
/// stored typed; everything else is stored as a string. A `created_at` UTC
/// timestamp is stamped unless the caller supplied one.
fn record_from_fields(fields: &[String]) -> Result<Record> {
    let mut record = Record::new();
    for field in fields {
        let (name, raw) = field
            .split_once('=')
            .ok_or_else(|| color_eyre::eyre::eyre!("expected FIELD=VALUE, got '{field}'"))?;
        if name.is_empty() {
            color_eyre::eyre::bail!("field name must not be empty in '{field}'");
        }
        let value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        record.insert(name, value);
    }

    if !record.contains("created_at") {
        record.insert("created_at", Utc::now().to_rfc3339());
    }
    Ok(record)
}

/// Runs a quick round-trip probe of the storage path against a throwaway
/// file, checking both persistence and read-side redaction.
async fn run_health_check() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = RecordStore::new(
        StoreConfig::new(dir.path().join("probe.ndjson")),
        TokioFileSystem::new(),
    )
    .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;

    run_store_health(&store).await?;
    println!("Storage: ok");
    Ok(())
}

async fn run_store_health<F: FileSystem>(store: &RecordStore<F>) -> Result<()> {
    let mut probe = Record::new();
    probe.insert("probe", "ok");
    probe.insert("password", "secret");
    store
        .create(&probe)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;

    let records = store
        .read()
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    let first = records
        .first()
        .ok_or_else(|| color_eyre::eyre::eyre!("storage round-trip returned no records"))?;

    if first.get("probe") != Some(&Value::String("ok".into())) || first.contains("password") {
        color_eyre::eyre::bail!("storage round-trip failed");
    }
    Ok(())
}

fn init_config(config: &config::Config) -> Result<()> {
    let path = config::write_default_if_missing(config)?;
    println!("Config initialized at {}", path.display());
    Ok(())
}
