//! Worker-side protocol loop, one instance per spawned rank.

use anyhow::{Context, Result, bail};
use std::net::TcpStream;

use crate::compute::primality;
use crate::engine::cluster::protocol::{self, Message};

/// A non-root rank's connection back to the root.
pub struct RootLink {
    stream: TcpStream,
    rank: usize,
}

impl RootLink {
    /// Dial the root's rendezvous socket and check in with our rank.
    pub fn connect(addr: &str, rank: usize) -> Result<Self> {
        let mut stream = TcpStream::connect(addr)
            .with_context(|| format!("rank {rank} failed to reach the root at {addr}"))?;
        protocol::write_frame(&mut stream, &Message::Hello { rank })?;
        Ok(Self { stream, rank })
    }

    /// Serve one full run: receive the broadcast and our scatter chunk,
    /// compute in isolation, then send reduce, gather, and the barrier
    /// arrival before waiting for the release.
    pub fn serve(mut self) -> Result<()> {
        let list_len = match protocol::read_frame(&mut self.stream)? {
            Message::Broadcast { list_len } => list_len,
            other => bail!("expected broadcast, got {other:?}"),
        };
        tracing::debug!(rank = self.rank, list_len, "joined run");

        let (partition, mut values) = match protocol::read_frame(&mut self.stream)? {
            Message::Scatter { partition, values } => (partition, values),
            other => bail!("expected scatter, got {other:?}"),
        };
        if values.len() != partition.len {
            bail!(
                "scatter for rank {} carried {} values, partition says {}",
                self.rank,
                values.len(),
                partition.len
            );
        }

        let count = primality::patch_composites(&mut values);
        tracing::debug!(rank = self.rank, count, len = partition.len, "chunk done");

        protocol::write_frame(&mut self.stream, &Message::Reduce { count })?;
        protocol::write_frame(&mut self.stream, &Message::Gather { values })?;
        protocol::write_frame(&mut self.stream, &Message::BarrierArrive { rank: self.rank })?;
        match protocol::read_frame(&mut self.stream)? {
            Message::BarrierRelease => Ok(()),
            other => bail!("expected barrier release, got {other:?}"),
        }
    }
}
