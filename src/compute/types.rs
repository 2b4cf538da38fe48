//! Data model shared by the engines and the aggregator.

use serde::{Deserialize, Serialize};

/// In-place marker for elements ruled out as composite. The loader only
/// admits non-negative values, so this can never collide with real input.
pub const SENTINEL: i64 = -1;

/// Contiguous index range `[start, start + len)` of the input list owned by
/// exactly one worker. Partitions for a run never overlap and cover the
/// whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub start: usize,
    pub len: usize,
}

impl Partition {
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// One worker's private result, consumed exactly once by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalResult {
    /// Primes this worker found in its share of the list.
    pub count: usize,
    pub outcome: Outcome,
}

/// How the worker reports which of its elements survived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Sentinel-patched copy of the partition, same length as assigned.
    /// Produced by cluster ranks.
    Patched {
        partition: Partition,
        values: Vec<i64>,
    },
    /// Indices found prime, in claim order. Produced by pool threads.
    Flagged { positions: Vec<usize> },
}

/// Merged result for the whole run, handed to the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalResult {
    /// Total primes across all workers.
    pub count: usize,
    /// Retained prime values in input order.
    pub primes: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_range_covers_start_to_end() {
        let part = Partition { start: 3, len: 4 };
        assert_eq!(part.range(), 3..7);
        assert!(!part.is_empty());
        assert!(Partition { start: 9, len: 0 }.is_empty());
    }
}
