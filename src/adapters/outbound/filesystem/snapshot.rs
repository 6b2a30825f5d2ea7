use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::cost_analysis::domain::Inventory;
use crate::ports::outbound::InventorySource;
use crate::shared::{CostError, Result};

/// Inventory source backed by a JSON snapshot exported by a previous run
/// (`--export`). Allows offline re-analysis without touching ARM.
pub struct SnapshotInventorySource {
    path: PathBuf,
}

impl SnapshotInventorySource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl InventorySource for SnapshotInventorySource {
    async fn collect(&self) -> Result<Inventory> {
        read_snapshot(&self.path)
    }
}

pub fn read_snapshot(path: &Path) -> Result<Inventory> {
    let content = std::fs::read_to_string(path).map_err(|e| CostError::SnapshotError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    let inventory = serde_json::from_str(&content).map_err(|e| CostError::SnapshotError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    Ok(inventory)
}

/// Write the collected inventory as pretty JSON, the format
/// `SnapshotInventorySource` reads back.
pub fn write_snapshot(inventory: &Inventory, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(inventory)?;
    std::fs::write(path, json).map_err(|e| CostError::FileWriteError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    Ok(())
}
