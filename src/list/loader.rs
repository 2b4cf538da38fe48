//! Input list parsing.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::PipelineError;

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

const HEADER_PREFIX: &str = "list_len=";

/// The input list as loaded, read-only from this point on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerList {
    pub values: Vec<i64>,
}

impl IntegerList {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Open and parse an input list file.
pub fn load(path: &Path) -> Result<IntegerList> {
    let file = File::open(path).map_err(|source| PipelineError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    parse(BufReader::new(file))
}

/// Parse `list_len=<N>` plus exactly N decimal lines. A trailing `\r` per
/// line is tolerated, lines past the declared N are ignored, and a body
/// shorter than N fails instead of reading past the end.
pub fn parse<R: BufRead>(reader: R) -> Result<IntegerList> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line.context("failed reading input")?,
        None => return Err(PipelineError::Header { line: String::new() }.into()),
    };
    let header = header.trim_end_matches('\r');
    let digits = match header.strip_prefix(HEADER_PREFIX) {
        // `list_len=` with nothing after it is a header problem, not a bad value.
        Some(digits) if !digits.is_empty() => digits,
        _ => {
            return Err(PipelineError::Header {
                line: header.to_string(),
            }
            .into());
        }
    };
    if !NUMBER.is_match(digits) {
        return Err(PipelineError::Value(format!(
            "list length {digits:?} is not a number"
        ))
        .into());
    }
    let declared: usize = digits.parse().map_err(|_| {
        PipelineError::Value(format!("list length {digits:?} is out of range"))
    })?;

    let mut values = Vec::with_capacity(declared);
    for index in 0..declared {
        let line = match lines.next() {
            Some(line) => line.context("failed reading input")?,
            None => {
                return Err(PipelineError::Value(format!(
                    "input ends after {index} of {declared} values"
                ))
                .into());
            }
        };
        let token = line.trim_end_matches('\r');
        if !NUMBER.is_match(token) {
            return Err(PipelineError::Value(format!(
                "line {}: {token:?} is not a number",
                index + 2
            ))
            .into());
        }
        let value: i64 = token.parse().map_err(|_| {
            PipelineError::Value(format!("line {}: {token:?} is out of range", index + 2))
        })?;
        values.push(value);
    }

    Ok(IntegerList { values })
}
