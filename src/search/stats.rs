//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one beam search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Beam rounds completed.
    pub rounds: u32,

    /// Children produced by applying actions.
    pub generated: u64,

    /// Children dropped because their hash was already seen.
    pub deduped: u64,

    /// Actions that were legal at enumeration but illegal at application.
    pub illegal: u64,

    /// Boards projected and scored.
    pub scored: u64,

    /// Closure passes that improved the best result.
    pub closure_improvements: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Children generated per second.
    #[must_use]
    pub fn generated_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.generated as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Share of generated children that were duplicates.
    #[must_use]
    pub fn dedup_ratio(&self) -> f64 {
        if self.generated == 0 {
            0.0
        } else {
            self.deduped as f64 / self.generated as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SearchStats::new();
        assert_eq!(stats.rounds, 0);
        assert_eq!(stats.generated, 0);
    }

    #[test]
    fn test_stats_rates() {
        let mut stats = SearchStats::new();
        stats.generated = 2000;
        stats.deduped = 500;
        stats.time_us = 1_000_000;

        assert_eq!(stats.generated_per_second(), 2000.0);
        assert_eq!(stats.dedup_ratio(), 0.25);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SearchStats::new();
        stats.rounds = 7;
        stats.illegal = 3;

        stats.reset();

        assert_eq!(stats.rounds, 0);
        assert_eq!(stats.illegal, 0);
    }

    #[test]
    fn test_stats_serialization() {
        let mut stats = SearchStats::new();
        stats.scored = 42;

        let json = serde_json::to_string(&stats).unwrap();
        let back: SearchStats = serde_json::from_str(&json).unwrap();

        assert_eq!(stats.scored, back.scored);
    }
}
