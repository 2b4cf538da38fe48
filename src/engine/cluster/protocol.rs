//! Wire format between the root and its ranks.
//!
//! One frame per collective step: a little-endian u32 length prefix followed
//! by the bincode-encoded message, over a blocking TCP stream.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::compute::types::Partition;

/// Protocol messages, in the order a run exchanges them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Worker to root, right after connecting.
    Hello { rank: usize },
    /// Root to all ranks: the agreed list length.
    Broadcast { list_len: usize },
    /// Root to one rank: its contiguous chunk.
    Scatter {
        partition: Partition,
        values: Vec<i64>,
    },
    /// Worker to root: local prime count.
    Reduce { count: usize },
    /// Worker to root: sentinel-patched chunk, same length as scattered.
    Gather { values: Vec<i64> },
    /// Worker to root: finished, waiting at the barrier.
    BarrierArrive { rank: usize },
    /// Root to all ranks: everyone arrived, safe to exit.
    BarrierRelease,
}

/// Write one length-prefixed frame.
pub fn write_frame<W: Write>(writer: &mut W, msg: &Message) -> Result<()> {
    let payload = bincode::serialize(msg).context("failed to encode protocol frame")?;
    let len = u32::try_from(payload.len()).context("protocol frame too large")?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}

/// Read one length-prefixed frame, blocking until it is complete.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Message> {
    let mut len_buf = [0u8; 4];
    reader
        .read_exact(&mut len_buf)
        .context("connection closed while reading frame length")?;
    let len = u32::from_le_bytes(len_buf) as usize;
    let mut payload = vec![0u8; len];
    reader
        .read_exact(&mut payload)
        .context("connection closed mid frame")?;
    bincode::deserialize(&payload).context("failed to decode protocol frame")
}
