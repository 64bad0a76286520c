use super::Format;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("cannot infer a structure format from '{}'", .0.display())]
    UnknownFormat(PathBuf),

    #[error("{format} structure contains no atoms")]
    EmptyStructure { format: Format },

    #[error("atom index {index} is out of range (structure has {count} atoms)")]
    AtomIndexOutOfRange { index: usize, count: usize },
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }
}
