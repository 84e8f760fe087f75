//! Snapshot file I/O
//!
//! Reads and writes a [`LedgerSnapshot`] as JSON or YAML, picked by file
//! extension. Loaded snapshots are validated before they are returned.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::LedgerSnapshot;

/// On-disk encoding of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Pick the format from a path's extension; anything but `.yaml`/`.yml`
    /// is read as JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Load and validate a snapshot file
pub fn load_snapshot(path: impl AsRef<Path>) -> EngineResult<LedgerSnapshot> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EngineError::Io(format!("File not found: {}", path.display())));
    }

    let file = File::open(path)
        .map_err(|e| EngineError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);

    let snapshot: LedgerSnapshot = match SnapshotFormat::from_path(path) {
        SnapshotFormat::Json => serde_json::from_reader(reader).map_err(|e| {
            EngineError::Json(format!("Failed to parse {}: {}", path.display(), e))
        })?,
        SnapshotFormat::Yaml => serde_yaml::from_reader(reader).map_err(|e| {
            EngineError::Yaml(format!("Failed to parse {}: {}", path.display(), e))
        })?,
    };

    snapshot.validate()?;

    debug!(
        path = %path.display(),
        transactions = snapshot.transactions.len(),
        budgets = snapshot.budgets.len(),
        subscriptions = snapshot.subscriptions.len(),
        incomes = snapshot.incomes.len(),
        "loaded snapshot"
    );

    Ok(snapshot)
}

/// Write a snapshot atomically (write to temp, then rename)
pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &LedgerSnapshot) -> EngineResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            EngineError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = path.with_extension("tmp");
    let file = File::create(&temp_path)
        .map_err(|e| EngineError::Io(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    match SnapshotFormat::from_path(path) {
        SnapshotFormat::Json => serde_json::to_writer_pretty(&mut writer, snapshot)?,
        SnapshotFormat::Yaml => serde_yaml::to_writer(&mut writer, snapshot)?,
    }

    writer.flush()?;
    writer.get_ref().sync_all()?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        EngineError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
