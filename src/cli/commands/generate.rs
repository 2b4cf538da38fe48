use anyhow::Result;
use clap::Args;
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::cli::Output;
use crate::error::PipelineError;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// How many values to generate
    pub count: usize,

    /// Upper bound (inclusive) for generated values
    #[arg(long, default_value_t = 10_000)]
    pub max: i64,

    /// Where to write the list
    #[arg(short, long, default_value = "list.txt")]
    pub output: PathBuf,
}

/// Write a `list_len=<count>` header plus `count` uniform values in [1, max].
pub fn execute(args: GenerateArgs, output: &Output) -> Result<()> {
    if args.max < 1 {
        return Err(PipelineError::Usage("--max must be at least 1".into()).into());
    }

    let file = File::create(&args.output).map_err(|source| PipelineError::OpenOutput {
        path: args.output.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let mut rng = rand::thread_rng();

    writeln!(writer, "list_len={}", args.count).map_err(PipelineError::OutputIo)?;
    for _ in 0..args.count {
        let value: i64 = rng.gen_range(1..=args.max);
        writeln!(writer, "{value}").map_err(PipelineError::OutputIo)?;
    }
    writer.flush().map_err(PipelineError::OutputIo)?;

    output.success(&format!(
        "wrote {} values in [1, {}] to {}",
        args.count,
        args.max,
        args.output.display()
    ));
    Ok(())
}
