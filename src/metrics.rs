//! Passive per-instance operation counters (feature `metrics`).
//!
//! Each policy core embeds a [`PolicyMetrics`] block and bumps it on the hot
//! paths; [`MetricsSnapshot`] is the caller-facing copy taken on demand. The
//! counters are plain integers behind the instance's existing synchronization
//! — no atomics, no exporters, no background collection.
//!
//! | Counter             | Bumped when                                      |
//! |---------------------|--------------------------------------------------|
//! | `get_calls`         | every `get`                                      |
//! | `get_hits`          | `get` found the key                              |
//! | `get_misses`        | `get` did not find the key                       |
//! | `insert_calls`      | every `insert`                                   |
//! | `insert_updates`    | `insert` overwrote an existing entry             |
//! | `insert_admissions` | `insert` created a new entry                     |
//! | `evictions`         | a victim was removed to make room                |

/// Operation counters embedded in a policy core.
#[derive(Debug, Default, Clone)]
pub struct PolicyMetrics {
    pub(crate) get_calls: u64,
    pub(crate) get_hits: u64,
    pub(crate) get_misses: u64,
    pub(crate) insert_calls: u64,
    pub(crate) insert_updates: u64,
    pub(crate) insert_admissions: u64,
    pub(crate) evictions: u64,
}

impl PolicyMetrics {
    #[inline]
    pub(crate) fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    #[inline]
    pub(crate) fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    #[inline]
    pub(crate) fn record_insert_update(&mut self) {
        self.insert_calls += 1;
        self.insert_updates += 1;
    }

    #[inline]
    pub(crate) fn record_insert_admission(&mut self) {
        self.insert_calls += 1;
        self.insert_admissions += 1;
    }

    #[inline]
    pub(crate) fn record_insert_rejected(&mut self) {
        self.insert_calls += 1;
    }

    #[inline]
    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn snapshot(&self, len: usize, capacity: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_admissions: self.insert_admissions,
            evictions: self.evictions,
            len,
            capacity,
        }
    }
}

/// Point-in-time copy of a policy's counters plus its current occupancy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_admissions: u64,
    pub evictions: u64,
    pub len: usize,
    pub capacity: usize,
}

impl MetricsSnapshot {
    /// Hit fraction over all `get` calls, or `None` before the first `get`.
    pub fn hit_rate(&self) -> Option<f64> {
        if self.get_calls == 0 {
            None
        } else {
            Some(self.get_hits as f64 / self.get_calls as f64)
        }
    }
}
