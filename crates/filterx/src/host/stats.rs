//! The statistics boundary: eval counters and error
//! counters are reported through here rather than baked into a global.

use std::sync::atomic::{AtomicU64, Ordering};

/// A counter registry FilterX reports eval-site activity to. Implementors
/// typically wire each named counter to whatever the host's own metrics
/// system exposes.
pub trait StatsRegistry {
    fn increment(&self, counter: &str, amount: u64);
}

/// An in-process registry backed by atomics, for tests and for embedding
/// FilterX without a fuller metrics layer on hand.
#[derive(Debug, Default)]
pub struct InMemoryStatsRegistry {
    counters: ahash::AHashMap<&'static str, AtomicU64>,
}

impl InMemoryStatsRegistry {
    #[must_use]
    pub fn new(counter_names: &[&'static str]) -> Self {
        let counters = counter_names.iter().map(|&name| (name, AtomicU64::new(0))).collect();
        Self { counters }
    }

    #[must_use]
    pub fn value(&self, counter: &str) -> u64 {
        self.counters.get(counter).map_or(0, |c| c.load(Ordering::Relaxed))
    }
}

impl StatsRegistry for InMemoryStatsRegistry {
    fn increment(&self, counter: &str, amount: u64) {
        if let Some(c) = self.counters.get(counter) {
            c.fetch_add(amount, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_accumulates() {
        let stats = InMemoryStatsRegistry::new(&["eval_count"]);
        stats.increment("eval_count", 1);
        stats.increment("eval_count", 2);
        assert_eq!(stats.value("eval_count"), 3);
    }

    #[test]
    fn unregistered_counter_reads_as_zero() {
        let stats = InMemoryStatsRegistry::new(&["eval_count"]);
        assert_eq!(stats.value("unknown"), 0);
    }
}
