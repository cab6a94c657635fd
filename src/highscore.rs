//! Best-score persistence
//!
//! A single record: the best score seen so far plus the full stat ledger of
//! the run that achieved it. Stored as one JSON envelope in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform;
use crate::sim::{GamePhase, GameState, Stats};

/// The persisted best-score record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u64,
    /// Stat ledger of the record-setting run
    pub stats: Stats,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl BestScore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "echo_pulse_best_score";

    /// Load the stored record, if any
    pub fn load() -> Option<Self> {
        let json = platform::storage_get(Self::STORAGE_KEY)?;
        match serde_json::from_str(&json) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("stored best score unreadable: {err}");
                None
            }
        }
    }

    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            platform::storage_set(Self::STORAGE_KEY, &json);
            log::info!("best score saved: {}", self.score);
        }
    }

    /// Whether a finished run beats the stored record
    pub fn qualifies(score: u64) -> bool {
        score > 0 && Self::load().is_none_or(|best| score > best.score)
    }

    /// Record a finished session if it sets a new best. Returns the new
    /// record when one was written.
    pub fn record(state: &GameState) -> Option<Self> {
        if state.phase != GamePhase::GameOver {
            return None;
        }
        if !Self::qualifies(state.stats.score) {
            return None;
        }
        let record = Self {
            score: state.stats.score,
            stats: state.stats.clone(),
            timestamp: platform::wall_clock_ms(),
        };
        record.save();
        Some(record)
    }
}
