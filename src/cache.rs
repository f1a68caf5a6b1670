/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Symmetric pair-distance table over jet slots.
//!
//! Slots are the finder's arena positions, fixed at seeding time. A slot is
//! live until the jet in it is merged away; after that its row and column are
//! ignored and never written again.
//!
//! Storage is the strict upper triangle of an `n × n` matrix, row-major, so a
//! table over `n` slots holds `n·(n−1)/2` entries and no diagonal.
//!
//! # Invariants
//!
//! - `get(i, j) == get(j, i)` for all `i != j`.
//! - Scans visit pairs in the fixed order `(0,1), (0,2), …, (1,2), …`; the
//!   first strict minimum wins, which makes tie-breaks deterministic.

/// Pair-distance cache with slot liveness.
#[derive(Clone, Debug, Default)]
pub struct DistanceCache {
    /// Number of slots the table was built for.
    slots: usize,
    /// Upper-triangular distances, row-major.
    table: Vec<f64>,
    /// `live[i]` is false once slot `i` has been released.
    live: Vec<bool>,
    /// Number of live slots.
    live_count: usize,
}

impl DistanceCache {
    /// Table over `slots` live slots with every distance set to 0.
    pub fn new(slots: usize) -> Self {
        Self {
            slots,
            table: vec![0.0; slots * slots.saturating_sub(1) / 2],
            live: vec![true; slots],
            live_count: slots,
        }
    }

    /// Build a full table by evaluating `f(i, j)` for every pair `i < j`.
    pub fn build<F>(slots: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut cache = Self::new(slots);
        for i in 0..slots {
            for j in (i + 1)..slots {
                let k = cache.offset(i, j);
                cache.table[k] = f(i, j);
            }
        }
        cache
    }

    /// Number of slots the table spans, live or not.
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Number of live slots.
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Whether slot `i` is still live.
    pub fn is_live(&self, i: usize) -> bool {
        self.live.get(i).copied().unwrap_or(false)
    }

    /// Cached distance between slots `i` and `j` (`i != j`).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let (lo, hi) = ordered(i, j);
        self.table[self.offset(lo, hi)]
    }

    /// Store the distance between slots `i` and `j` (`i != j`).
    pub fn set(&mut self, i: usize, j: usize, y: f64) {
        let (lo, hi) = ordered(i, j);
        let k = self.offset(lo, hi);
        self.table[k] = y;
    }

    /// Recompute every entry between live slot `i` and the other live slots.
    pub fn refresh_row<F>(&mut self, i: usize, mut f: F)
    where
        F: FnMut(usize) -> f64,
    {
        for k in 0..self.slots {
            if k != i && self.live[k] {
                let y = f(k);
                self.set(i, k, y);
            }
        }
    }

    /// Mark slot `i` as merged away. Its entries are no longer read.
    pub fn release(&mut self, i: usize) {
        if self.live[i] {
            self.live[i] = false;
            self.live_count -= 1;
        }
    }

    /// Smallest live-pair distance as `(i, j, y)` with `i < j`.
    ///
    /// Returns `None` with fewer than two live slots. NaN entries never win.
    pub fn min_pair(&self) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..self.slots {
            if !self.live[i] {
                continue;
            }
            let row = self.offset_row(i);
            for j in (i + 1)..self.slots {
                if !self.live[j] {
                    continue;
                }
                let y = self.table[row + (j - i - 1)];
                if y.is_nan() {
                    continue;
                }
                if best.map_or(true, |(_, _, b)| y < b) {
                    best = Some((i, j, y));
                }
            }
        }
        best
    }

    /// Largest live-pair distance, or `None` with fewer than two live slots.
    pub fn max_distance(&self) -> Option<f64> {
        let mut best: Option<f64> = None;
        for i in 0..self.slots {
            if !self.live[i] {
                continue;
            }
            for j in (i + 1)..self.slots {
                if self.live[j] {
                    let y = self.get(i, j);
                    if best.map_or(true, |b| y > b) {
                        best = Some(y);
                    }
                }
            }
        }
        best
    }

    // ── Internal helpers ───────────────────────────────────────────────────

    /// Offset of the first entry of row `i`, i.e. of pair `(i, i + 1)`.
    fn offset_row(&self, i: usize) -> usize {
        i * (2 * self.slots - i - 1) / 2
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < j && j < self.slots, "pair ({i}, {j}) out of range");
        self.offset_row(i) + (j - i - 1)
    }
}

fn ordered(i: usize, j: usize) -> (usize, usize) {
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size_is_pair_count() {
        assert_eq!(DistanceCache::new(0).table.len(), 0);
        assert_eq!(DistanceCache::new(1).table.len(), 0);
        assert_eq!(DistanceCache::new(5).table.len(), 10);
    }

    #[test]
    fn test_symmetric_access() {
        let cache = DistanceCache::build(4, |i, j| (10 * i + j) as f64);
        assert_eq!(cache.get(1, 3), 13.0);
        assert_eq!(cache.get(3, 1), 13.0);
        assert_eq!(cache.get(2, 3), 23.0);
        assert_eq!(cache.get(0, 1), 1.0);
    }

    #[test]
    fn test_min_pair_first_of_ties_wins() {
        let mut cache = DistanceCache::new(4);
        for i in 0..4 {
            for j in (i + 1)..4 {
                cache.set(i, j, 5.0);
            }
        }
        cache.set(1, 3, 2.0);
        cache.set(2, 3, 2.0);
        assert_eq!(cache.min_pair(), Some((1, 3, 2.0)));
    }

    #[test]
    fn test_released_slots_are_skipped() {
        let mut cache = DistanceCache::build(3, |i, j| (i + j) as f64);
        assert_eq!(cache.min_pair(), Some((0, 1, 1.0)));
        cache.release(0);
        assert_eq!(cache.live_count(), 2);
        assert!(!cache.is_live(0));
        assert_eq!(cache.min_pair(), Some((1, 2, 3.0)));
        cache.release(0);
        assert_eq!(cache.live_count(), 2);
        cache.release(2);
        assert_eq!(cache.min_pair(), None);
        assert_eq!(cache.max_distance(), None);
    }

    #[test]
    fn test_refresh_row_touches_only_live_pairs() {
        let mut cache = DistanceCache::build(4, |_, _| 1.0);
        cache.release(3);
        cache.refresh_row(1, |k| 100.0 + k as f64);
        assert_eq!(cache.get(1, 0), 100.0);
        assert_eq!(cache.get(1, 2), 102.0);
        assert_eq!(cache.get(1, 3), 1.0);
        assert_eq!(cache.get(0, 2), 1.0);
        assert_eq!(cache.max_distance(), Some(102.0));
    }
}
