use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::Ledger;

use super::{LedgerRecord, LedgerRecordView, RecordError};

/// Reasons a persisted record could not be turned into a ledger.
#[derive(Error, Debug)]
pub enum StorageReadError {
    #[error("no record at {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed record in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: RecordError,
    },
}

/// File-backed store holding a single ledger record.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the record.
    pub fn load(&self) -> Result<Ledger, StorageReadError> {
        let data = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StorageReadError::NotFound(self.path.clone())
            } else {
                StorageReadError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let record: LedgerRecord =
            serde_json::from_str(&data).map_err(|source| StorageReadError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        let (ledger, skipped) = record
            .into_ledger()
            .map_err(|source| StorageReadError::Invalid {
                path: self.path.clone(),
                source,
            })?;
        for key in skipped {
            warn!(path = %self.path.display(), category = %key, "ignoring unknown category");
        }

        debug!(
            path = %self.path.display(),
            balance = ledger.balance(),
            total_expenses = ledger.total_expenses(),
            "loaded ledger"
        );
        Ok(ledger)
    }

    /// Load the record, starting from a fresh ledger when it is missing or
    /// unreadable. The cause is logged but never returned.
    pub fn load_or_default(&self) -> Ledger {
        match self.load() {
            Ok(ledger) => ledger,
            Err(StorageReadError::NotFound(path)) => {
                debug!(path = %path.display(), "no saved ledger, starting fresh");
                Ledger::new()
            }
            Err(err) => {
                warn!(error = %err, "unreadable ledger, starting fresh");
                Ledger::new()
            }
        }
    }

    /// Overwrite the record with the full ledger.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let json = serde_json::to_string(&LedgerRecordView::from(ledger))
            .context("Failed to serialize ledger")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        debug!(path = %self.path.display(), "saved ledger");
        Ok(())
    }
}
