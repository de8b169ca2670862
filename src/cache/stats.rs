//! Cache Statistics Module
//!
//! Per-store counters for hits, misses, expirations and swallowed errors.

use serde::Serialize;

// == Cache Stats ==
/// Counters for one store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Reads that returned a fresh payload
    pub hits: u64,
    /// Reads that found nothing usable (absent, expired or undecodable)
    pub misses: u64,
    /// Records removed because they outlived the store window
    pub expired: u64,
    /// Backend failures that were logged and swallowed
    pub errors: u64,
    /// Records currently held by the backend, fresh or not
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_expired(&mut self, count: u64) {
        self.expired += count;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }

    /// Adds another store's counters into this one.
    pub fn absorb(&mut self, other: &CacheStats) {
        self.hits += other.hits;
        self.misses += other.misses;
        self.expired += other.expired;
        self.errors += other.errors;
        self.total_entries += other.total_entries;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_absorb_sums_counters() {
        let mut total = CacheStats::new();
        let mut posts = CacheStats::new();
        posts.record_hit();
        posts.record_expired(2);
        posts.set_total_entries(5);
        let mut images = CacheStats::new();
        images.record_error();
        images.set_total_entries(1);

        total.absorb(&posts);
        total.absorb(&images);

        assert_eq!(total.hits, 1);
        assert_eq!(total.expired, 2);
        assert_eq!(total.errors, 1);
        assert_eq!(total.total_entries, 6);
    }
}
