//! High score leaderboard system
//!
//! Persisted to LocalStorage, tracks top 10 runs.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Points at the end of the run
    pub points: u32,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "block_dodger_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run qualifies for the leaderboard
    pub fn qualifies(&self, points: u32) -> bool {
        if points == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if it beats the lowest entry
        self.entries.last().map(|e| points > e.points).unwrap_or(true)
    }

    /// Add a run to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, points: u32, level: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(points) {
            return None;
        }

        let entry = HighScoreEntry {
            points,
            level,
            timestamp,
        };

        // Sorted descending; ties keep the older run first
        let pos = self.entries.iter().position(|e| points > e.points);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the best points total (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.points)
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
        {
            match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
                Err(e) => log::warn!("Discarding unreadable high scores: {e}"),
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("High scores saved ({} entries)", self.entries.len());
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
    fn test_zero_points_never_qualify() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.add_score(0, 1, 0.0), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_entries_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(30, 1, 1.0), Some(1));
        assert_eq!(scores.add_score(80, 2, 2.0), Some(1));
        assert_eq!(scores.add_score(50, 2, 3.0), Some(2));
        let points: Vec<u32> = scores.entries.iter().map(|e| e.points).collect();
        assert_eq!(points, vec![80, 50, 30]);
        assert_eq!(scores.top_score(), Some(80));
    }

    #[test]
    fn test_tie_ranks_after_existing() {
        let mut scores = HighScores::new();
        scores.add_score(40, 1, 1.0);
        assert_eq!(scores.add_score(40, 1, 2.0), Some(2));
        assert_eq!(scores.entries[0].timestamp, 1.0);
    }

    #[test]
    fn test_board_capped_at_ten() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u32 {
            scores.add_score(i * 10, 1, i as f64);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add_score(5, 1, 99.0), None);
        assert_eq!(scores.add_score(55, 2, 99.0), Some(6));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.points), Some(20));
    }
}
