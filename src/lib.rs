//! Preparation of fragment-growing instruction files from libraries of small
//! fragment structures.
//!
//! A fragment library is a directory of PDB or MOL2 files. For each fragment
//! the crate picks an attachment atom (the first heavy atom carrying at least
//! one hydrogen, explicit or implied by valence) and pairs its name with a
//! heavy atom of the scaffold the fragments are grown onto. The resulting
//! lines form a *serie file*:
//!
//! ```text
//! /abs/path/to/fragment.pdb   <scaffold atom>  <fragment atom>
//! ```
//!
//! # Features
//!
//! - **Library validation**: one directory, one format, sorted and
//!   deterministic enumeration
//! - **Hydrogen perception**: explicit hydrogens plus implicit ones derived
//!   from a configurable valence table
//! - **Fault-tolerant batches**: unreadable fragments are logged and skipped
//! - **Global-library templates**: `$ATOM` / `$PATH` substitution
//!
//! # Quick Start
//!
//! ```
//! use std::io::Cursor;
//! use frag_prep::io::{Format, StructureReader};
//! use frag_prep::{PrepConfig, PrepError, ValenceTable, select_attachment_atom};
//!
//! // Acetaldehyde heavy atoms: the carbonyl oxygen comes first.
//! let pdb = "\
//! HETATM    1  O1  ACE A   1       0.000   1.210   0.000  1.00  0.00           O
//! HETATM    2  C1  ACE A   1       0.000   0.000   0.000  1.00  0.00           C
//! HETATM    3  C2  ACE A   1       1.500   0.000   0.000  1.00  0.00           C
//! CONECT    1    2    2
//! CONECT    2    1    1    3
//! CONECT    3    2
//! END
//! ";
//!
//! let system = StructureReader::new(Cursor::new(pdb), Format::Pdb).read()?;
//! let config = PrepConfig::default();
//! let index = select_attachment_atom(&system, config.mode, ValenceTable::default_table())?;
//!
//! // O1 is saturated by its double bond; the aldehyde carbon carries one H.
//! assert_eq!(index, 2);
//! assert_eq!(system.atom_name(index), Some("C1"));
//! # Ok::<(), PrepError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`]: PDB and MOL2 readers
//! - [`chem`]: Valence table and hydrogen counting
//! - [`prepare`] / [`prepare_global`]: End-to-end pipelines
//!
//! # Data Types
//!
//! - [`System`]: Parsed structure with atoms, bonds, and per-atom labels
//! - [`Atom`]: Element, Cartesian coordinates, and formal charge
//! - [`Bond`]: Bond between two atoms with bond order
//! - [`AtomLabel`]: Atom name and residue fields as written in the file
//! - [`Library`]: Validated fragment directory
//! - [`Instruction`] / [`InstructionSet`]: Serie file lines

mod model;
mod prep;

pub mod chem;
pub mod io;

pub use model::atom::Atom;
pub use model::metadata::{AtomLabel, AtomLabelBuilder};
pub use model::system::{Bond, System};
pub use model::types::{BondOrder, Element, ParseBondOrderError, ParseElementError};

pub use chem::{ValenceError, ValenceTable};

pub use prep::{
    BuildReport, DEFAULT_LIBRARY_DIR, DEFAULT_TEMPLATE, Instruction, InstructionSet, Library,
    Outcome, PrepConfig, SERIE_FILE_PREFIX, SelectionMode, Skipped, build_instruction,
    build_instructions, build_instructions_with, check_scaffold, default_library_dir,
    default_output_path,
    load_template, prepare, prepare_global, render_global, resolve_atom_name, safe_substitute,
    select_attachment_atom, write_output,
};

pub use prep::Error as PrepError;
