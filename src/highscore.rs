//! Persistent high score
//!
//! A single best-score integer, persisted to LocalStorage on web. Missing or
//! corrupt stored values degrade to 0 instead of propagating a fault.

use serde::{Deserialize, Serialize};

/// High score store (JSON envelope in LocalStorage)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScoreStore {
    pub best: u32,
}

impl HighScoreStore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "obstacle_dodge_highscore";

    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `score` would beat the stored best
    pub fn improves(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished run's score. Writes through only on improvement and
    /// returns whether a new best was set.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.improves(score) {
            return false;
        }
        self.best = score;
        self.save();
        true
    }

    /// Load the stored best from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<HighScoreStore>(&json) {
                    Ok(store) => {
                        log::info!("loaded high score {}", store.best);
                        return store;
                    }
                    Err(e) => log::warn!("corrupt high score entry, resetting: {}", e),
                }
            }
        }

        log::info!("no stored high score, starting at 0");
        Self::new()
    }

    /// Save the current best to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("high score saved ({})", self.best);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_zero() {
        let store = HighScoreStore::load();
        assert_eq!(store.best, 0);
    }

    #[test]
    fn test_record_only_on_improvement() {
        let mut store = HighScoreStore { best: 100 };

        assert!(store.record(150));
        assert_eq!(store.best, 150);

        assert!(!store.record(50));
        assert_eq!(store.best, 150);

        // Equal score is not an improvement
        assert!(!store.record(150));
        assert_eq!(store.best, 150);
    }

    #[test]
    fn test_envelope_round_trip() {
        let store = HighScoreStore { best: 1230 };
        let json = serde_json::to_string(&store).unwrap();
        let back: HighScoreStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back.best, 1230);
    }

    #[test]
    fn test_corrupt_envelope_rejected() {
        assert!(serde_json::from_str::<HighScoreStore>("{\"best\":\"oops\"}").is_err());
        assert!(serde_json::from_str::<HighScoreStore>("garbage").is_err());
    }
}
