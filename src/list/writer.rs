//! Output list rendering.

use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::compute::types::GlobalResult;
use crate::error::PipelineError;

/// Create the output file, truncating any previous result. The run command
/// opens the sink before the parallel phase starts, never after.
pub fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| PipelineError::OpenOutput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

/// Render `primes_found=<count>(<tag>)` plus one retained value per line
/// into the open sink.
///
/// The buffer is flushed explicitly so a failing close surfaces as a
/// categorized error instead of vanishing in Drop.
pub fn persist<W: Write>(writer: &mut W, result: &GlobalResult, engine_tag: &str) -> Result<()> {
    render(writer, result, engine_tag).map_err(PipelineError::OutputIo)?;
    writer.flush().map_err(PipelineError::OutputIo)?;
    Ok(())
}

/// Render the output format into any writer.
pub fn render<W: Write>(writer: &mut W, result: &GlobalResult, engine_tag: &str) -> std::io::Result<()> {
    writeln!(writer, "primes_found={}({})", result.count, engine_tag)?;
    for value in &result.primes {
        writeln!(writer, "{value}")?;
    }
    Ok(())
}
