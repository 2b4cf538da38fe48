//! The root's side of the process group.

use anyhow::{Context, Result, bail};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};

use crate::compute::types::Partition;
use crate::engine::cluster::protocol::{self, Message};

/// One connected rank, plus its process handle when we spawned it.
struct Peer {
    rank: usize,
    stream: TcpStream,
    child: Option<Child>,
}

/// Explicit communicator for one run: rank 0 (this process) plus every
/// spawned rank, fixed for the run's lifetime.
pub struct ProcessGroup {
    peers: Vec<Peer>,
}

impl ProcessGroup {
    /// World size, the root included.
    pub fn world(&self) -> usize {
        self.peers.len() + 1
    }

    /// Spawn `world - 1` copies of the current executable as cluster workers
    /// and wait for every rank to check in over loopback TCP. Ranks may
    /// connect in any order; the hello frame slots each one.
    pub fn spawn(world: usize) -> Result<Self> {
        let listener =
            TcpListener::bind("127.0.0.1:0").context("failed to bind rendezvous socket")?;
        let addr = listener.local_addr()?;
        let exe = std::env::current_exe().context("cannot locate own executable")?;

        let mut children = Vec::with_capacity(world.saturating_sub(1));
        for rank in 1..world {
            let child = Command::new(&exe)
                .arg("worker")
                .arg("--connect")
                .arg(addr.to_string())
                .arg("--rank")
                .arg(rank.to_string())
                .stdin(Stdio::null())
                .spawn()
                .with_context(|| format!("failed to spawn cluster worker rank {rank}"))?;
            children.push((rank, child));
            tracing::debug!(rank, "spawned cluster worker");
        }

        let mut slots: Vec<Option<TcpStream>> = Vec::new();
        slots.resize_with(world, || None);
        for _ in 1..world {
            let (mut stream, _) = listener
                .accept()
                .context("worker failed to connect back")?;
            match protocol::read_frame(&mut stream)? {
                Message::Hello { rank } if rank >= 1 && rank < world => {
                    if slots[rank].is_some() {
                        bail!("duplicate hello from rank {rank}");
                    }
                    slots[rank] = Some(stream);
                }
                other => bail!("unexpected handshake message: {other:?}"),
            }
        }

        let mut peers = Vec::with_capacity(children.len());
        for (rank, child) in children {
            let stream = slots[rank]
                .take()
                .with_context(|| format!("rank {rank} never completed the handshake"))?;
            peers.push(Peer {
                rank,
                stream,
                child: Some(child),
            });
        }
        Ok(Self { peers })
    }

    /// Build a group over already-handshaked streams, one per non-root rank
    /// in rank order. Lets tests stand in for spawned ranks with threads.
    #[cfg(test)]
    pub(crate) fn from_streams(streams: Vec<TcpStream>) -> Self {
        let peers = streams
            .into_iter()
            .enumerate()
            .map(|(i, stream)| Peer {
                rank: i + 1,
                stream,
                child: None,
            })
            .collect();
        Self { peers }
    }

    /// Send the agreed list length to every rank.
    pub fn broadcast(&mut self, list_len: usize) -> Result<()> {
        for peer in &mut self.peers {
            protocol::write_frame(&mut peer.stream, &Message::Broadcast { list_len })
                .with_context(|| format!("broadcast to rank {} failed", peer.rank))?;
        }
        Ok(())
    }

    /// Ship each rank its chunk; the root keeps partition 0 for itself.
    /// `partitions` must hold one entry per rank, root first.
    pub fn scatter(
        &mut self,
        list: &[i64],
        partitions: &[Partition],
    ) -> Result<(Partition, Vec<i64>)> {
        debug_assert_eq!(partitions.len(), self.world());
        for peer in &mut self.peers {
            let partition = partitions[peer.rank];
            let values = list[partition.range()].to_vec();
            protocol::write_frame(&mut peer.stream, &Message::Scatter { partition, values })
                .with_context(|| format!("scatter to rank {} failed", peer.rank))?;
        }
        let own = partitions[0];
        Ok((own, list[own.range()].to_vec()))
    }

    /// Sum local prime counts across the group, the root's included.
    pub fn reduce_counts(&mut self, own: usize) -> Result<usize> {
        let mut total = own;
        for peer in &mut self.peers {
            match protocol::read_frame(&mut peer.stream)
                .with_context(|| format!("reduce from rank {} failed", peer.rank))?
            {
                Message::Reduce { count } => total += count,
                other => bail!("rank {} sent {other:?} during reduce", peer.rank),
            }
        }
        Ok(total)
    }

    /// Collect the patched chunks back in rank order, the root's first.
    /// Each chunk must match the length scattered to that rank.
    pub fn gather(&mut self, own: Vec<i64>, partitions: &[Partition]) -> Result<Vec<Vec<i64>>> {
        let mut chunks = Vec::with_capacity(self.world());
        chunks.push(own);
        for peer in &mut self.peers {
            match protocol::read_frame(&mut peer.stream)
                .with_context(|| format!("gather from rank {} failed", peer.rank))?
            {
                Message::Gather { values } => {
                    let expected = partitions[peer.rank].len;
                    if values.len() != expected {
                        bail!(
                            "rank {} returned {} values for a partition of {expected}",
                            peer.rank,
                            values.len()
                        );
                    }
                    chunks.push(values);
                }
                other => bail!("rank {} sent {other:?} during gather", peer.rank),
            }
        }
        Ok(chunks)
    }

    /// Block until every rank has arrived, then release the group.
    pub fn barrier(&mut self) -> Result<()> {
        for peer in &mut self.peers {
            match protocol::read_frame(&mut peer.stream)
                .with_context(|| format!("barrier wait on rank {} failed", peer.rank))?
            {
                Message::BarrierArrive { rank } if rank == peer.rank => {}
                other => bail!("rank {} sent {other:?} at the barrier", peer.rank),
            }
        }
        for peer in &mut self.peers {
            protocol::write_frame(&mut peer.stream, &Message::BarrierRelease)
                .with_context(|| format!("barrier release to rank {} failed", peer.rank))?;
        }
        Ok(())
    }

    /// Reap every spawned rank, failing on the first nonzero exit.
    pub fn shutdown(self) -> Result<()> {
        for peer in self.peers {
            if let Some(mut child) = peer.child {
                let status = child
                    .wait()
                    .with_context(|| format!("waiting on cluster worker rank {}", peer.rank))?;
                if !status.success() {
                    bail!("cluster worker rank {} exited with {status}", peer.rank);
                }
                tracing::debug!(rank = peer.rank, "cluster worker reaped");
            }
        }
        Ok(())
    }
}
