//! Lenient JSON file helpers shared by the file-backed adapters.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tokio::fs;

use cyberprep_core::StoreError;

/// Read and parse a JSON file.
///
/// Returns `None` when the file is missing, unreadable or not valid JSON.
/// Callers treat that as "no data yet" rather than an error.
pub(crate) async fn read_lenient(path: &Path) -> Option<Value> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Unreadable store file, starting empty");
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Corrupt store file, starting empty");
            None
        }
    }
}

/// Overwrite `path` with the pretty-printed value, creating its directory first.
pub(crate) async fn write_pretty(path: &Path, value: &Value) -> Result<(), StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", dir.display())))?;
    }

    let body =
        serde_json::to_string_pretty(value).map_err(|e| StoreError::Serialization(e.to_string()))?;

    fs::write(path, body)
        .await
        .map_err(|e| StoreError::Io(format!("{}: {e}", path.display())))
}
