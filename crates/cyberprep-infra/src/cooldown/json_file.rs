//! Durable per-client cooldown backed by a JSON object file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use cyberprep_core::StoreError;
use cyberprep_core::ports::{Admission, Cooldown, RateDecision};

use crate::json_store::{read_lenient, write_pretty};

/// Cooldown state persisted as `{ "<client>": <last accepted epoch millis> }`.
///
/// Survives restarts. A missing or corrupt file means no client is cooling
/// down; entries whose value is not an integer are dropped on load.
///
/// One async mutex covers the file, so a gate holds it from the check until
/// the acceptance is recorded.
pub struct JsonFileCooldown {
    path: PathBuf,
    cooldown: Duration,
    lock: Mutex<()>,
}

impl JsonFileCooldown {
    pub fn new(dir: impl AsRef<Path>, file_name: &str, cooldown: Duration) -> Self {
        Self {
            path: dir.as_ref().join(file_name),
            cooldown,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> HashMap<String, i64> {
        match read_lenient(&self.path).await {
            Some(Value::Object(map)) => map
                .into_iter()
                .filter_map(|(client, ts)| ts.as_i64().map(|ts| (client, ts)))
                .collect(),
            _ => HashMap::new(),
        }
    }

    fn decide(&self, state: &HashMap<String, i64>, client_key: &str, now_ms: i64) -> RateDecision {
        let Some(&last) = state.get(client_key) else {
            return RateDecision::Allowed;
        };

        let cooldown_ms = i64::try_from(self.cooldown.as_millis()).unwrap_or(i64::MAX);
        let elapsed = now_ms.saturating_sub(last);
        if elapsed >= cooldown_ms {
            return RateDecision::Allowed;
        }

        // A timestamp from the future never extends the wait past one cooldown.
        let remaining = cooldown_ms.saturating_sub(elapsed).min(cooldown_ms);
        RateDecision::rejected_for(Duration::from_millis(remaining.max(0) as u64))
    }

    /// Check `client_key` against the cooldown at `now_ms` (epoch millis).
    pub async fn check_at(&self, client_key: &str, now_ms: i64) -> RateDecision {
        let _guard = self.lock.lock().await;
        let state = self.load().await;
        self.decide(&state, client_key, now_ms)
    }

    /// Gate `admit` for `client_key` at `now_ms`, recording `now_ms` as the
    /// last accepted time when it succeeds.
    ///
    /// A failure to persist the record is logged and does not undo the
    /// admitted write.
    pub async fn gate_at(
        &self,
        client_key: &str,
        now_ms: i64,
        admit: Admission<'_>,
    ) -> Result<RateDecision, StoreError> {
        let _guard = self.lock.lock().await;

        let mut state = self.load().await;
        let decision = self.decide(&state, client_key, now_ms);
        if !decision.is_allowed() {
            return Ok(decision);
        }

        admit.await?;

        state.insert(client_key.to_owned(), now_ms);
        let body: Map<String, Value> = state
            .into_iter()
            .map(|(client, ts)| (client, Value::from(ts)))
            .collect();
        if let Err(e) = write_pretty(&self.path, &Value::Object(body)).await {
            tracing::warn!(client = %client_key, error = %e, "Failed to persist cooldown");
        }

        Ok(RateDecision::Allowed)
    }
}

#[async_trait]
impl Cooldown for JsonFileCooldown {
    async fn check(&self, client_key: &str) -> RateDecision {
        self.check_at(client_key, chrono::Utc::now().timestamp_millis())
            .await
    }

    async fn gate(
        &self,
        client_key: &str,
        admit: Admission<'_>,
    ) -> Result<RateDecision, StoreError> {
        self.gate_at(client_key, chrono::Utc::now().timestamp_millis(), admit)
            .await
    }
}
