use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Append-only collection of submitted records.
///
/// Entries are only ever added. Implementations decide where the array lives
/// (flat file, key-value store, embedded database); validation happens before
/// `append` is called.
#[async_trait]
pub trait Collection: Send + Sync {
    /// Collection name, used for logging.
    fn name(&self) -> &str;

    /// Append one entry to the end of the collection.
    async fn append(&self, entry: Value) -> Result<(), StoreError>;

    /// Read every entry in insertion order.
    async fn read_all(&self) -> Result<Vec<Value>, StoreError>;
}
