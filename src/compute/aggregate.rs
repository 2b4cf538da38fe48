//! Merging per-worker results into the global outcome.

use crate::compute::types::{GlobalResult, LocalResult, Outcome, SENTINEL};

/// Merge every worker's result into the global count and the retained
/// primes, in input order.
///
/// Patched sub-lists are copied back into place by partition range; flagged
/// positions restore the original value at each index. Whatever is still
/// sentinel afterwards is dropped from the retained list. The count is the
/// sum of the workers' local counts, never a recount.
pub fn merge(list: &[i64], locals: &[LocalResult]) -> GlobalResult {
    let mut merged = vec![SENTINEL; list.len()];
    let mut count = 0;
    for local in locals {
        count += local.count;
        match &local.outcome {
            Outcome::Patched { partition, values } => {
                merged[partition.range()].copy_from_slice(values);
            }
            Outcome::Flagged { positions } => {
                for &pos in positions {
                    merged[pos] = list[pos];
                }
            }
        }
    }
    let primes = merged.into_iter().filter(|&v| v != SENTINEL).collect();
    GlobalResult { count, primes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::types::Partition;

    #[test]
    fn test_patched_chunks_merge_in_partition_order() {
        let list = vec![4, 7, 10, 13, 9];
        let locals = vec![
            LocalResult {
                count: 1,
                outcome: Outcome::Patched {
                    partition: Partition { start: 0, len: 3 },
                    values: vec![SENTINEL, 7, SENTINEL],
                },
            },
            LocalResult {
                count: 1,
                outcome: Outcome::Patched {
                    partition: Partition { start: 3, len: 2 },
                    values: vec![13, SENTINEL],
                },
            },
        ];
        let result = merge(&list, &locals);
        assert_eq!(result.count, 2);
        assert_eq!(result.primes, vec![7, 13]);
    }

    #[test]
    fn test_flagged_positions_keep_input_order() {
        let list = vec![2, 3, 4, 5, 6, 7];
        // Positions arrive in whatever order the threads claimed them.
        let locals = vec![
            LocalResult {
                count: 2,
                outcome: Outcome::Flagged {
                    positions: vec![5, 0],
                },
            },
            LocalResult {
                count: 2,
                outcome: Outcome::Flagged {
                    positions: vec![3, 1],
                },
            },
        ];
        let result = merge(&list, &locals);
        assert_eq!(result.count, 4);
        assert_eq!(result.primes, vec![2, 3, 5, 7]);
    }

    #[test]
    fn test_mixed_outcomes_merge_consistently() {
        let list = vec![11, 12, 13];
        let locals = vec![
            LocalResult {
                count: 1,
                outcome: Outcome::Patched {
                    partition: Partition { start: 0, len: 2 },
                    values: vec![11, SENTINEL],
                },
            },
            LocalResult {
                count: 1,
                outcome: Outcome::Flagged { positions: vec![2] },
            },
        ];
        let result = merge(&list, &locals);
        assert_eq!(result.count, 2);
        assert_eq!(result.primes, vec![11, 13]);
    }

    #[test]
    fn test_no_workers_means_nothing_retained() {
        let result = merge(&[], &[]);
        assert_eq!(result.count, 0);
        assert!(result.primes.is_empty());
    }
}
