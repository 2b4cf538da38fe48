//! Shared-memory engine: a fixed thread pool claiming elements dynamically.
//!
//! A producer feeds `(index, value)` pairs into a bounded channel and each
//! worker pulls the next pair whenever it comes free, so slow elements never
//! stall a statically assigned chunk. Workers accumulate privately and
//! submit one result each when the channel drains; the only shared mutable
//! state during compute is the progress counter.

use anyhow::Result;
use crossbeam::channel::{Receiver, Sender, bounded};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::compute::types::{GlobalResult, LocalResult, Outcome};
use crate::compute::{aggregate, primality};

/// Tuning knobs for the thread pool.
#[derive(Debug, Clone)]
pub struct ThreadConfig {
    /// Exact pool size when nonzero; 0 sizes the pool from the CPU count
    pub max_workers: usize,
    /// Percentage of CPU cores to use in auto mode (1-100)
    pub thread_percentage: u8,
    /// Channel buffer size multiplier (buffer = workers * multiplier)
    pub channel_multiplier: usize,
    /// Progress update frequency (every N items)
    pub progress_frequency: usize,
}

impl Default for ThreadConfig {
    fn default() -> Self {
        Self {
            max_workers: 0,
            thread_percentage: 75,
            channel_multiplier: 2,
            progress_frequency: 5,
        }
    }
}

/// Shared-memory execution context for one run.
pub struct ThreadEngine {
    config: ThreadConfig,
}

impl ThreadEngine {
    pub fn new(config: ThreadConfig) -> Self {
        Self { config }
    }

    /// Pool size for `work_count` items: an explicit `max_workers` wins,
    /// otherwise a percentage of the CPU count. Never more workers than
    /// items, never zero.
    pub fn pool_size(&self, work_count: usize) -> usize {
        let workers = if self.config.max_workers > 0 {
            self.config.max_workers
        } else {
            let cpu_cores = num_cpus::get();
            std::cmp::max(1, (cpu_cores * self.config.thread_percentage as usize) / 100)
        };
        std::cmp::min(workers, work_count.max(1))
    }

    /// Evaluate the whole list and merge the per-worker results.
    ///
    /// `progress_label` enables the in-place progress line; pass `None` for
    /// quiet runs.
    pub fn run(&self, list: &[i64], progress_label: Option<&str>) -> Result<GlobalResult> {
        let locals = self.evaluate(list, progress_label)?;
        Ok(aggregate::merge(list, &locals))
    }

    /// Dynamic-claim evaluation returning one `LocalResult` per worker.
    fn evaluate(&self, list: &[i64], progress_label: Option<&str>) -> Result<Vec<LocalResult>> {
        let work_count = list.len();
        if work_count == 0 {
            return Ok(Vec::new());
        }

        let workers = self.pool_size(work_count);
        let frequency = self.config.progress_frequency.max(1);

        let (work_tx, work_rx): (Sender<(usize, i64)>, Receiver<(usize, i64)>) =
            bounded(workers * self.config.channel_multiplier.max(1));
        let (result_tx, result_rx): (Sender<LocalResult>, Receiver<LocalResult>) =
            bounded(workers);

        let progress = AtomicUsize::new(0);
        let progress = &progress;

        let locals = crossbeam::thread::scope(|s| {
            for worker_id in 0..workers {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();

                s.spawn(move |_| {
                    let mut count = 0;
                    let mut positions = Vec::new();
                    while let Ok((index, value)) = work_rx.recv() {
                        if primality::is_prime(value) {
                            count += 1;
                            positions.push(index);
                        }

                        // Shared counter is display only; results stay local.
                        let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
                        if let Some(label) = progress_label {
                            if done % frequency == 0 || done == work_count {
                                print!(
                                    "\r⚡ {}: {}/{} items ({:.1}%) [worker-{}]",
                                    label,
                                    done,
                                    work_count,
                                    done as f64 / work_count as f64 * 100.0,
                                    worker_id
                                );
                                std::io::Write::flush(&mut std::io::stdout()).ok();
                            }
                        }
                    }
                    // One submission per worker, after the channel drains.
                    let _ = result_tx.send(LocalResult {
                        count,
                        outcome: Outcome::Flagged { positions },
                    });
                });
            }

            // Producer: offer indices in order; workers claim on demand.
            s.spawn(move |_| {
                for (index, &value) in list.iter().enumerate() {
                    if work_tx.send((index, value)).is_err() {
                        break; // Workers dropped
                    }
                }
            });

            // Drop the original sender so workers see the channel close.
            drop(result_tx);

            let mut locals = Vec::with_capacity(workers);
            while let Ok(local) = result_rx.recv() {
                locals.push(local);
            }
            locals
        })
        .map_err(|_| anyhow::anyhow!("thread panic during parallel evaluation"))?;

        // Clear the progress line
        if progress_label.is_some() {
            print!("\r");
            std::io::Write::flush(&mut std::io::stdout()).ok();
        }

        Ok(locals)
    }
}
