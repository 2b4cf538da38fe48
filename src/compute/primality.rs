//! Trial-division primality evaluation.

use crate::compute::types::SENTINEL;

/// Returns true iff `n` is prime, by trial division over every integer in
/// `[2, n)`. Values of 1 and below are not prime.
///
/// The full divisor scan is intentional: per-element cost stays O(n), which
/// is the unit of work the engines distribute.
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    for divisor in 2..n {
        if n % divisor == 0 {
            return false;
        }
    }
    true
}

/// Overwrite every composite in `values` with the sentinel, in place, and
/// return how many primes survived. Cluster ranks run this over their
/// scattered chunk.
pub fn patch_composites(values: &mut [i64]) -> usize {
    let mut count = 0;
    for value in values.iter_mut() {
        if is_prime(*value) {
            count += 1;
        } else {
            *value = SENTINEL;
        }
    }
    count
}
