//! Contiguous list partitioning across workers.

use anyhow::Result;

use crate::compute::types::Partition;
use crate::error::PipelineError;

/// Split `len` items across `workers` contiguous partitions.
///
/// Every index lands in exactly one partition and nothing is dropped: the
/// first `len % workers` partitions take one extra item, so partition sizes
/// differ by at most one. More workers than items is legal and leaves the
/// trailing partitions empty.
pub fn split(len: usize, workers: usize) -> Result<Vec<Partition>> {
    if workers == 0 {
        return Err(PipelineError::Usage("worker count must be at least 1".into()).into());
    }
    let base = len / workers;
    let extra = len % workers;
    let mut partitions = Vec::with_capacity(workers);
    let mut start = 0;
    for rank in 0..workers {
        let size = if rank < extra { base + 1 } else { base };
        partitions.push(Partition { start, len: size });
        start += size;
    }
    Ok(partitions)
}
