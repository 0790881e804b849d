use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// A record with the server-assigned `createdAt` timestamp.
///
/// The record's own fields are flattened next to `createdAt`, so a stamped
/// report serializes as `{question, reason, description, createdAt}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamped<T> {
    #[serde(flatten)]
    pub record: T,
    #[serde(rename = "createdAt", serialize_with = "millis_rfc3339")]
    pub created_at: DateTime<Utc>,
}

impl<T> Stamped<T> {
    /// Stamp a record with the current time.
    pub fn now(record: T) -> Self {
        Self::at(record, Utc::now())
    }

    pub fn at(record: T, created_at: DateTime<Utc>) -> Self {
        Self { record, created_at }
    }
}

fn millis_rfc3339<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
