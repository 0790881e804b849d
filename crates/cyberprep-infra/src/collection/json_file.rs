//! Append-only collection stored as one JSON array file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use cyberprep_core::StoreError;
use cyberprep_core::ports::Collection;

use crate::json_store::{read_lenient, write_pretty};

/// A collection persisted as a pretty-printed JSON array.
///
/// Every append reads the whole file, pushes the entry and rewrites the file.
/// A missing, corrupt or non-array file is treated as an empty collection.
///
/// Appends through the same instance are serialized by an async mutex.
/// Other processes writing the same file are not coordinated with.
pub struct JsonFileCollection {
    name: String,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileCollection {
    pub fn new(dir: impl AsRef<Path>, file_name: &str) -> Self {
        let path = dir.as_ref().join(file_name);
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());

        Self {
            name,
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Vec<Value> {
        match read_lenient(&self.path).await {
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                tracing::warn!(collection = %self.name, "Store file is not an array, starting empty");
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl Collection for JsonFileCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn append(&self, entry: Value) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await;
        entries.push(entry);
        let total = entries.len();

        write_pretty(&self.path, &Value::Array(entries)).await?;

        tracing::debug!(collection = %self.name, total, "Entry appended");
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Value>, StoreError> {
        let _guard = self.write_lock.lock().await;
        Ok(self.load().await)
    }
}
