//! Structure file input.
//!
//! Fragment libraries and scaffolds are read into a [`System`] through
//! [`StructureReader`], or through the path-based helpers [`read_structure`]
//! and [`read_atom_name`] which infer the [`Format`] from the file extension.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub mod error;
pub mod util;

mod mol2;
mod pdb;

pub use error::Error;

use crate::model::system::System;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Pdb,
    Mol2,
}

impl Format {
    /// Infers the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pdb" | "ent" => Some(Format::Pdb),
            "mol2" => Some(Format::Mol2),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pdb => write!(f, "PDB"),
            Format::Mol2 => write!(f, "MOL2"),
        }
    }
}

/// Options that affect how bonds are established while reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadConfig {
    /// Perceive bonds from interatomic distances when the file carries no
    /// explicit connectivity (PDB without `CONECT` records).
    pub proximity_bonding: bool,
    /// Tolerance added to the sum of covalent radii, in Ångströms.
    pub bond_tolerance: f64,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            proximity_bonding: true,
            bond_tolerance: util::DEFAULT_BOND_TOLERANCE,
        }
    }
}

pub struct StructureReader<R: BufRead> {
    reader: R,
    format: Format,
    config: ReadConfig,
}

impl<R: BufRead> StructureReader<R> {
    pub fn new(reader: R, format: Format) -> Self {
        Self {
            reader,
            format,
            config: ReadConfig::default(),
        }
    }

    pub fn config(mut self, config: ReadConfig) -> Self {
        self.config = config;
        self
    }

    pub fn read(self) -> Result<System, Error> {
        let system = match self.format {
            Format::Pdb => pdb::reader::read(self.reader, &self.config)?,
            Format::Mol2 => mol2::reader::read(self.reader)?,
        };

        if system.is_empty() {
            return Err(Error::EmptyStructure {
                format: self.format,
            });
        }

        Ok(system)
    }
}

/// Reads the structure stored at `path`, inferring its format from the extension.
pub fn read_structure(path: &Path) -> Result<System, Error> {
    let format = Format::from_path(path).ok_or_else(|| Error::UnknownFormat(path.to_path_buf()))?;
    read_structure_as(path, format)
}

/// Reads the structure stored at `path` using an explicit `format`.
pub fn read_structure_as(path: &Path, format: Format) -> Result<System, Error> {
    let file = File::open(path)?;
    StructureReader::new(BufReader::new(file), format).read()
}

/// Returns the trimmed name of the atom at 1-based position `index` in `path`.
pub fn read_atom_name(path: &Path, index: usize) -> Result<String, Error> {
    let system = read_structure(path)?;
    system
        .atom_name(index)
        .map(str::to_string)
        .ok_or(Error::AtomIndexOutOfRange {
            index,
            count: system.atom_count(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::path::PathBuf;

    const ETHANOL_PDB: &str = "\
HETATM    1  C1  EOH A   1       0.000   0.000   0.000  1.00  0.00           C
HETATM    2  C2  EOH A   1       1.520   0.000   0.000  1.00  0.00           C
HETATM    3  O1  EOH A   1       2.030   1.350   0.000  1.00  0.00           O
END
";

    #[test]
    fn format_is_inferred_from_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.pdb")), Some(Format::Pdb));
        assert_eq!(Format::from_path(Path::new("a/b.PDB")), Some(Format::Pdb));
        assert_eq!(Format::from_path(Path::new("b.ent")), Some(Format::Pdb));
        assert_eq!(Format::from_path(Path::new("b.mol2")), Some(Format::Mol2));
        assert_eq!(Format::from_path(Path::new("b.sdf")), None);
        assert_eq!(Format::from_path(Path::new("README")), None);
    }

    #[test]
    fn format_display_names() {
        assert_eq!(Format::Pdb.to_string(), "PDB");
        assert_eq!(Format::Mol2.to_string(), "MOL2");
    }

    #[test]
    fn reader_rejects_structures_without_atoms() {
        let err = StructureReader::new(Cursor::new("REMARK nothing here\nEND\n"), Format::Pdb)
            .read()
            .unwrap_err();
        assert!(matches!(err, Error::EmptyStructure { format: Format::Pdb }));
    }

    #[test]
    fn reader_can_disable_proximity_bonding() {
        let system = StructureReader::new(Cursor::new(ETHANOL_PDB), Format::Pdb)
            .config(ReadConfig {
                proximity_bonding: false,
                ..ReadConfig::default()
            })
            .read()
            .expect("read pdb");
        assert_eq!(system.atom_count(), 3);
        assert_eq!(system.bond_count(), 0);
    }

    #[test]
    fn read_atom_name_resolves_one_based_index() {
        let mut file = tempfile::Builder::new().suffix(".pdb").tempfile().unwrap();
        file.write_all(ETHANOL_PDB.as_bytes()).unwrap();

        assert_eq!(read_atom_name(file.path(), 3).unwrap(), "O1");
        let err = read_atom_name(file.path(), 4).unwrap_err();
        assert!(matches!(
            err,
            Error::AtomIndexOutOfRange { index: 4, count: 3 }
        ));
    }

    #[test]
    fn read_structure_rejects_unknown_extension() {
        let err = read_structure(Path::new("fragment.xyz")).unwrap_err();
        assert!(matches!(err, Error::UnknownFormat(p) if p == PathBuf::from("fragment.xyz")));
    }
}
