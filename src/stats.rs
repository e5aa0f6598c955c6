//! Per-episode bookkeeping
//!
//! Keeps a window of recent episodes and a leaderboard of the best returns.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Maximum number of best episodes to keep
pub const MAX_BEST_EPISODES: usize = 10;
/// Size of the recent-episode window
pub const RECENT_WINDOW: usize = 100;

/// Summary of one finished episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// 1-based episode number on this worker
    pub episode: u64,
    /// Actions taken before termination
    pub steps: u32,
    /// Sum of rewards, including the scaled terminal reward
    pub total_reward: f32,
    /// Reward of the terminal step (after scaling)
    pub final_reward: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpisodeLog {
    recent: VecDeque<EpisodeRecord>,
    /// Sorted descending by total reward
    best: Vec<EpisodeRecord>,
}

impl EpisodeLog {
    pub fn new() -> Self {
        Self {
            recent: VecDeque::with_capacity(RECENT_WINDOW),
            best: Vec::new(),
        }
    }

    /// Record a finished episode.
    /// Returns the leaderboard rank achieved (1-indexed), if any.
    pub fn record(&mut self, record: EpisodeRecord) -> Option<usize> {
        if self.recent.len() == RECENT_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(record);

        // Ties keep the earlier episode ahead
        let pos = self
            .best
            .iter()
            .position(|e| record.total_reward > e.total_reward)
            .unwrap_or(self.best.len());
        if pos >= MAX_BEST_EPISODES {
            return None;
        }
        self.best.insert(pos, record);
        self.best.truncate(MAX_BEST_EPISODES);
        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    /// Most recent episodes, oldest first
    pub fn recent(&self) -> impl Iterator<Item = &EpisodeRecord> {
        self.recent.iter()
    }

    pub fn last(&self) -> Option<&EpisodeRecord> {
        self.recent.back()
    }

    pub fn best(&self) -> &[EpisodeRecord] {
        &self.best
    }

    pub fn mean_recent_return(&self) -> Option<f32> {
        if self.recent.is_empty() {
            return None;
        }
        let sum: f32 = self.recent.iter().map(|r| r.total_reward).sum();
        Some(sum / self.recent.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(episode: u64, total_reward: f32) -> EpisodeRecord {
        EpisodeRecord {
            episode,
            steps: 13,
            total_reward,
            final_reward: 75.0,
        }
    }

    #[test]
    fn test_empty_log() {
        let log = EpisodeLog::new();
        assert!(log.is_empty());
        assert_eq!(log.mean_recent_return(), None);
        assert!(log.best().is_empty());
    }

    #[test]
    fn test_leaderboard_ranks() {
        let mut log = EpisodeLog::new();
        assert_eq!(log.record(rec(1, 100.0)), Some(1));
        assert_eq!(log.record(rec(2, 300.0)), Some(1));
        assert_eq!(log.record(rec(3, 200.0)), Some(2));
        assert_eq!(log.record(rec(4, 200.0)), Some(3));

        let order: Vec<u64> = log.best().iter().map(|r| r.episode).collect();
        assert_eq!(order, vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_leaderboard_is_bounded() {
        let mut log = EpisodeLog::new();
        for i in 0..MAX_BEST_EPISODES as u64 {
            log.record(rec(i + 1, 1000.0 - i as f32));
        }
        assert_eq!(log.record(rec(99, -5.0)), None);
        assert_eq!(log.best().len(), MAX_BEST_EPISODES);
        // Still counted in the recent window
        assert_eq!(log.last().map(|r| r.episode), Some(99));
    }

    #[test]
    fn test_recent_window_rolls() {
        let mut log = EpisodeLog::new();
        for i in 0..(RECENT_WINDOW as u64 + 5) {
            log.record(rec(i + 1, 10.0));
        }
        assert_eq!(log.recent().count(), RECENT_WINDOW);
        assert_eq!(log.recent().next().map(|r| r.episode), Some(6));
        assert_eq!(log.mean_recent_return(), Some(10.0));
    }
}
