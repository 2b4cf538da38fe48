use anyhow::Result;
use clap::Args;

use crate::engine::cluster::worker::RootLink;

#[derive(Args, Debug)]
pub struct WorkerArgs {
    /// Root rendezvous address (host:port)
    #[arg(long)]
    pub connect: String,

    /// Rank assigned by the root
    #[arg(long)]
    pub rank: usize,
}

/// Dial the root and serve one run. Never invoked by users directly.
pub fn execute(args: WorkerArgs) -> Result<()> {
    RootLink::connect(&args.connect, args.rank)?.serve()
}
