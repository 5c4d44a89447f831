//! High score table
//!
//! A small fixed-capacity leaderboard kept sorted descending by score.
//! Serialization is plain JSON; where it gets persisted is the shell's
//! concern, not ours.

use serde::{Deserialize, Serialize};

/// Maximum number of entries retained
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished round on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Whether the round ended in a cleared grid
    pub won: bool,
    /// Unix timestamp (ms) the round ended
    pub timestamp: f64,
}

/// The leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score on the board, if any
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Would `score` make the board?
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .map(|e| score > e.score)
            .unwrap_or(true)
    }

    /// Rank (0-based) `score` would land at, if it qualifies
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        Some(
            self.entries
                .iter()
                .position(|e| score > e.score)
                .unwrap_or(self.entries.len()),
        )
    }

    /// Insert a finished round, keeping the board sorted and capped.
    /// Returns the rank it landed at, or `None` if it did not qualify.
    pub fn add_score(&mut self, score: u32, won: bool, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank,
            HighScoreEntry {
                score,
                won,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("high score: {} at rank {}", score, rank + 1);
        Some(rank)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let scores = HighScores::new();
        assert!(scores.is_empty());
        assert_eq!(scores.top_score(), None);
        assert!(scores.qualifies(10));
        assert!(!scores.qualifies(0));
    }

    #[test]
    fn test_scores_stay_sorted() {
        let mut scores = HighScores::new();
        scores.add_score(100, false, 1.0);
        scores.add_score(300, true, 2.0);
        scores.add_score(200, false, 3.0);

        let values: Vec<u32> = scores.entries().iter().map(|e| e.score).collect();
        assert_eq!(values, vec![300, 200, 100]);
        assert_eq!(scores.top_score(), Some(300));
    }

    #[test]
    fn test_board_is_capped() {
        let mut scores = HighScores::new();
        for i in 1..=15 {
            scores.add_score(i * 10, false, i as f64);
        }
        assert_eq!(scores.entries().len(), MAX_HIGH_SCORES);
        // Lowest surviving score is 60 (150 down to 60)
        assert_eq!(scores.entries().last().map(|e| e.score), Some(60));
        assert!(!scores.qualifies(50));
        assert!(scores.qualifies(70));
    }

    #[test]
    fn test_potential_rank() {
        let mut scores = HighScores::new();
        scores.add_score(300, true, 1.0);
        scores.add_score(100, false, 2.0);

        assert_eq!(scores.potential_rank(400), Some(0));
        assert_eq!(scores.potential_rank(200), Some(1));
        assert_eq!(scores.potential_rank(50), Some(2));
        assert_eq!(scores.potential_rank(0), None);

        assert_eq!(scores.add_score(200, false, 3.0), Some(1));
    }

    #[test]
    fn test_equal_score_does_not_displace() {
        let mut scores = HighScores::new();
        for i in 0..MAX_HIGH_SCORES {
            scores.add_score(100, false, i as f64);
        }
        // Full board of 100s: another 100 does not qualify
        assert!(!scores.qualifies(100));
        assert_eq!(scores.add_score(100, false, 99.0), None);
    }

    #[test]
    fn test_json_round_trip() {
        let mut scores = HighScores::new();
        scores.add_score(250, true, 1_700_000_000_000.0);
        scores.add_score(80, false, 1_700_000_100_000.0);

        let json = scores.to_json().unwrap();
        let back = HighScores::from_json(&json).unwrap();
        assert_eq!(back.entries(), scores.entries());
    }
}
