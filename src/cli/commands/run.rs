use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Output;
use crate::config::Settings;
use crate::engine::threads::{ThreadConfig, ThreadEngine};
use crate::engine::{Engine, cluster};
use crate::error::PipelineError;
use crate::list::{loader, writer};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input list file (list_len=<N> header plus one value per line)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Execution engine
    #[arg(short, long, value_enum)]
    pub engine: Option<Engine>,

    /// Worker count (threads: pool size, cluster: process count)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Output file for the retained primes
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Load the list, run the selected engine, write the result.
pub fn execute(args: RunArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let input = args.input.ok_or_else(|| {
        PipelineError::Usage("missing input file operand, expected: primeherd <FILE>".into())
    })?;

    let settings = Settings::load(config_path)?;
    let engine = args.engine.unwrap_or(settings.run.engine);
    let out_path = args.output.unwrap_or_else(|| settings.run.output.clone());

    // Argument problems come before any file is touched.
    if args.workers == Some(0) {
        return Err(PipelineError::Usage("worker count must be at least 1".into()).into());
    }

    output.step(&format!("Loading {}", input.display()));
    let list = loader::load(&input)?;
    output.verbose(&format!("parsed {} values", list.len()));
    if list.is_empty() {
        output.info("input declares 0 values, the result will be empty");
    }

    // Open the sink up front; every categorized failure aborts the run
    // before the parallel phase starts.
    let mut sink = writer::create(&out_path)?;

    let started = Instant::now();
    let (result, workers_used) = match engine {
        Engine::Threads => {
            let mut config = ThreadConfig::from(settings.threads.clone());
            if let Some(workers) = args.workers {
                config.max_workers = workers;
            }
            let pool = ThreadEngine::new(config);
            let workers_used = pool.pool_size(list.len());
            let label = if output.is_quiet() {
                None
            } else {
                Some("checking")
            };
            (pool.run(&list.values, label)?, workers_used)
        }
        Engine::Cluster => {
            let workers = args.workers.unwrap_or(settings.cluster.workers);
            if workers > list.len().max(1) {
                output.warning(&format!(
                    "{} workers for {} values, some ranks will idle",
                    workers,
                    list.len()
                ));
            }
            (cluster::run(&list.values, workers)?, workers)
        }
    };
    let elapsed = started.elapsed();

    writer::persist(&mut sink, &result, engine.tag())?;

    output.success(&format!(
        "{} primes among {} values",
        result.count,
        list.len()
    ));
    output.key_value("Engine:", engine.tag(), false);
    output.key_value("Workers:", &workers_used.to_string(), false);
    output.key_value("Output:", &out_path.display().to_string(), false);
    output.key_value("Elapsed:", &format!("{:.3}s", elapsed.as_secs_f64()), false);
    Ok(())
}
