//! Engine performance counters

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache occupancy and hit-rate snapshot, reported in the manager state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    /// hits / (hits + misses); 0.0 before any lookup.
    pub hit_rate: f64,
}

/// Rolling analysis counters, updated after every completed analysis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineStats {
    pub analysis_count: u64,
    /// Running mean over all completed analyses, in milliseconds.
    pub average_analysis_time_ms: f64,
    pub cache_hit_rate: f64,
}

impl EngineStats {
    /// Fold one completed analysis into the running mean.
    pub fn record_analysis(&mut self, elapsed: Duration) {
        self.analysis_count += 1;
        let ms = elapsed.as_secs_f64() * 1000.0;
        self.average_analysis_time_ms +=
            (ms - self.average_analysis_time_ms) / self.analysis_count as f64;
    }

    pub fn set_cache_hit_rate(&mut self, rate: f64) {
        self.cache_hit_rate = rate.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_analysis_running_mean() {
        let mut stats = EngineStats::default();
        stats.record_analysis(Duration::from_millis(10));
        stats.record_analysis(Duration::from_millis(30));
        assert_eq!(stats.analysis_count, 2);
        assert!((stats.average_analysis_time_ms - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_counters_stay_non_negative() {
        let mut stats = EngineStats::default();
        stats.record_analysis(Duration::ZERO);
        assert!(stats.average_analysis_time_ms >= 0.0);
        stats.set_cache_hit_rate(-0.5);
        assert_eq!(stats.cache_hit_rate, 0.0);
        stats.set_cache_hit_rate(1.5);
        assert_eq!(stats.cache_hit_rate, 1.0);
    }
}
