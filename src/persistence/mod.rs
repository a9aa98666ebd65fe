//! Snapshot sink for organization state
//!
//! Writes the full department forest as pretty JSON. Snapshots are
//! write-only; nothing in the crate reads them back.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::core::error::Result;
use crate::organization::Department;

#[derive(Serialize)]
struct Snapshot<'a> {
    timestamp: NaiveDateTime,
    departments: &'a [Department],
}

/// `simulation_state_YYYYMMDD_HHMMSS.json`
pub fn snapshot_file_name(timestamp: NaiveDateTime) -> String {
    format!("simulation_state_{}.json", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Write `departments` under `dir`, creating it if needed
///
/// Two saves with the same timestamp (to the second) overwrite each other.
pub fn save_state(
    dir: impl AsRef<Path>,
    departments: &[Department],
    timestamp: NaiveDateTime,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let path = dir.join(snapshot_file_name(timestamp));
    let json = serde_json::to_string_pretty(&Snapshot {
        timestamp,
        departments,
    })?;
    fs::write(&path, json)?;

    tracing::info!(
        path = %path.display(),
        departments = departments.len(),
        "Saved simulation state"
    );
    Ok(path)
}
