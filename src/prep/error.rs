//! Error types for fragment-library preparation.
//!
//! Library-level errors abort a run. Per-fragment errors
//! ([`NoAttachmentAtom`](Error::NoAttachmentAtom), structure parse failures,
//! [`AtomIndexOutOfRange`](Error::AtomIndexOutOfRange)) are reported by the
//! instruction builder and the offending fragment is skipped.

use crate::chem::ValenceError;
use crate::io::Format;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while preparing instruction files.
#[derive(Debug, Error)]
pub enum Error {
    /// The library path does not exist.
    #[error("fragment library '{}' does not exist", .0.display())]
    LibraryNotFound(PathBuf),

    /// The library path exists but is not a directory.
    #[error("fragment library '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The library directory holds no fragment files.
    #[error("fragment library '{}' contains no fragment files", .0.display())]
    EmptyLibrary(PathBuf),

    /// A library entry has an extension that maps to no structure format.
    #[error("cannot recognize the format of library file '{}'", .0.display())]
    UnrecognizedFile(PathBuf),

    /// The library mixes structure formats.
    #[error(
        "fragment library mixes formats: '{}' is {found}, expected {expected}",
        path.display()
    )]
    MixedFormats {
        /// The first file whose format disagrees.
        path: PathBuf,
        /// Format established by the first fragment.
        expected: Format,
        /// Format of `path`.
        found: Format,
    },

    /// No heavy atom of the fragment carries a hydrogen.
    #[error("no heavy atom bearing a hydrogen among {atoms} atoms")]
    NoAttachmentAtom {
        /// Number of atoms inspected.
        atoms: usize,
    },

    /// A selected index does not point into the structure.
    #[error("atom index {index} is out of range (structure has {count} atoms)")]
    AtomIndexOutOfRange { index: usize, count: usize },

    /// The global-library template could not be read.
    #[error("failed to read template '{}': {source}", path.display())]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The instruction file could not be written.
    #[error("failed to write '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A custom valence table was rejected.
    #[error(transparent)]
    Valence(#[from] ValenceError),

    /// Reading or parsing a structure file failed.
    #[error(transparent)]
    Structure(#[from] crate::io::Error),

    /// Any other I/O failure (e.g. listing the library directory).
    #[error("I/O operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for errors that only concern a single fragment.
    pub fn is_per_fragment(&self) -> bool {
        matches!(
            self,
            Error::NoAttachmentAtom { .. }
                | Error::AtomIndexOutOfRange { .. }
                | Error::Structure(_)
        )
    }
}
