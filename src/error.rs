//! Error taxonomy for the primality pipeline.
//!
//! Every failure a user can cause or fix has a category here, and every
//! category has its own process exit code. Anything uncategorized (a crashed
//! worker rank, a mid-read I/O error) exits 1.

use std::fmt;
use std::path::PathBuf;

/// Categorized pipeline failure, detected before the parallel phase starts.
#[derive(Debug)]
pub enum PipelineError {
    /// Wrong argument count or an unusable argument value.
    Usage(String),

    /// Input list file could not be opened.
    OpenInput {
        /// Path as given on the command line.
        path: PathBuf,
        source: std::io::Error,
    },

    /// First line of the input does not match `list_len=<N>`.
    Header {
        /// The offending line, as read.
        line: String,
    },

    /// The declared length or a list element is not a decimal integer, or
    /// the body ends before the declared length.
    Value(String),

    /// Output file could not be created.
    OpenOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing or flushing the output file failed.
    OutputIo(std::io::Error),
}

impl PipelineError {
    /// Process exit code for this category.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Usage(_) => 1,
            PipelineError::OpenInput { .. } => 2,
            PipelineError::Header { .. } => 3,
            PipelineError::Value(_) => 4,
            PipelineError::OpenOutput { .. } => 5,
            PipelineError::OutputIo(_) => 6,
        }
    }
}

// Category message only; the io cause lives in `source()` and is appended
// by anyhow's alternate format, not embedded here.
impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Usage(msg) => write!(f, "{msg}"),
            PipelineError::OpenInput { path, .. } => {
                write!(f, "cannot open input file {}", path.display())
            }
            PipelineError::Header { line } => {
                write!(f, "malformed header line {line:?}, expected list_len=<N>")
            }
            PipelineError::Value(msg) => write!(f, "{msg}"),
            PipelineError::OpenOutput { path, .. } => {
                write!(f, "cannot create output file {}", path.display())
            }
            PipelineError::OutputIo(_) => {
                write!(f, "writing output file failed")
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::OpenInput { source, .. }
            | PipelineError::OpenOutput { source, .. }
            | PipelineError::OutputIo(source) => Some(source),
            _ => None,
        }
    }
}
