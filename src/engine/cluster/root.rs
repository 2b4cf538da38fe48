//! Root-side orchestration of the collective pipeline.

use anyhow::{Result, bail};

use crate::compute::types::{GlobalResult, LocalResult, Outcome, Partition, SENTINEL};
use crate::compute::{aggregate, partition, primality};
use crate::engine::cluster::group::ProcessGroup;

/// Run the whole collective pipeline over `list` with `workers` ranks, the
/// root included. Spawns the non-root ranks, drives every collective, and
/// reaps the children before returning.
pub fn run(list: &[i64], workers: usize) -> Result<GlobalResult> {
    let partitions = partition::split(list.len(), workers)?;
    let mut group = ProcessGroup::spawn(workers)?;
    match execute(list, &mut group, &partitions) {
        Ok(result) => {
            group.shutdown()?;
            Ok(result)
        }
        Err(err) => {
            // Dropping the group closes every stream; ranks blocked on a
            // read fail it and exit on their own, so waiting is unsafe here.
            drop(group);
            Err(err)
        }
    }
}

/// The collective sequence itself, over an already-connected group.
fn execute(
    list: &[i64],
    group: &mut ProcessGroup,
    partitions: &[Partition],
) -> Result<GlobalResult> {
    group.broadcast(list.len())?;

    let (own_partition, mut own_values) = group.scatter(list, partitions)?;
    let own_count = primality::patch_composites(&mut own_values);
    tracing::debug!(count = own_count, len = own_partition.len, "root chunk done");

    let total = group.reduce_counts(own_count)?;
    let chunks = group.gather(own_values, partitions)?;
    group.barrier()?;

    let locals: Vec<LocalResult> = partitions
        .iter()
        .zip(chunks)
        .map(|(&partition, values)| LocalResult {
            count: values.iter().filter(|&&v| v != SENTINEL).count(),
            outcome: Outcome::Patched { partition, values },
        })
        .collect();
    let merged = aggregate::merge(list, &locals);

    // The reduce total is authoritative; the gathered chunks must agree.
    if merged.count != total {
        bail!(
            "reduce total {total} disagrees with the gathered chunks ({})",
            merged.count
        );
    }
    Ok(merged)
}
