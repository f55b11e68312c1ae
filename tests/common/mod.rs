// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use expense_tracker::application::LedgerService;
use tempfile::TempDir;

/// Helper to create a test service over a data file in a fresh temp dir
pub fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = LedgerService::open(data_path(&temp_dir));
    Ok((service, temp_dir))
}

/// Path of the data file used by [`test_service`]
pub fn data_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("data.json")
}

/// Simulate a restart: load the same data file into a new service
pub fn reopen(temp_dir: &TempDir) -> LedgerService {
    LedgerService::open(data_path(temp_dir))
}
