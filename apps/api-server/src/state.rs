//! Application state - shared across all handlers.

use std::sync::Arc;

use cyberprep_core::ports::{Collection, Cooldown};
use cyberprep_infra::{JsonFileCollection, JsonFileCooldown};

use crate::config::AppConfig;

pub const PROPOSALS_FILE: &str = "proposed-questions.json";
pub const REPORTS_FILE: &str = "reported-questions.json";
pub const PROPOSE_COOLDOWN_FILE: &str = "propose-cooldowns.json";

/// Shared application state.
///
/// The rate limiter is not part of it: it sits in front of the handlers as
/// middleware and is built separately in `main`.
#[derive(Clone)]
pub struct AppState {
    pub proposals: Arc<dyn Collection>,
    pub reports: Arc<dyn Collection>,
    pub propose_cooldown: Arc<dyn Cooldown>,
}

impl AppState {
    /// Build the application state with file-backed implementations.
    pub fn new(config: &AppConfig) -> Self {
        let dir = &config.data_dir;

        let state = Self {
            proposals: Arc::new(JsonFileCollection::new(dir, PROPOSALS_FILE)),
            reports: Arc::new(JsonFileCollection::new(dir, REPORTS_FILE)),
            propose_cooldown: Arc::new(JsonFileCooldown::new(
                dir,
                PROPOSE_COOLDOWN_FILE,
                config.propose_cooldown,
            )),
        };

        tracing::info!(data_dir = %dir.display(), "Application state initialized");
        state
    }
}
