/// Per-atom labels as recorded in the source structure file.
///
/// Only the atom name is consumed downstream; the residue fields are kept so
/// that diagnostics can point at the exact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomLabel {
    /// Serial number from the file (PDB columns 7-11, MOL2 atom id).
    pub serial: i64,
    /// Atom name, trimmed of surrounding whitespace.
    pub name: String,
    pub residue_name: String,
    pub residue_id: i32,
    pub chain_id: char,
    /// `true` for PDB `HETATM` records.
    pub hetero: bool,
}

impl AtomLabel {
    pub fn builder(name: impl Into<String>, residue_name: impl Into<String>) -> AtomLabelBuilder {
        AtomLabelBuilder::new(name, residue_name)
    }
}

#[derive(Debug, Clone)]
pub struct AtomLabelBuilder {
    serial: i64,
    name: String,
    residue_name: String,
    residue_id: i32,
    chain_id: char,
    hetero: bool,
}

impl AtomLabelBuilder {
    pub fn new(name: impl Into<String>, residue_name: impl Into<String>) -> Self {
        Self {
            serial: 0,
            name: name.into(),
            residue_name: residue_name.into(),
            residue_id: 1,
            chain_id: ' ',
            hetero: false,
        }
    }

    pub fn serial(mut self, serial: i64) -> Self {
        self.serial = serial;
        self
    }

    pub fn residue_id(mut self, residue_id: i32) -> Self {
        self.residue_id = residue_id;
        self
    }

    pub fn chain_id(mut self, chain_id: char) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn hetero(mut self, hetero: bool) -> Self {
        self.hetero = hetero;
        self
    }

    pub fn build(self) -> AtomLabel {
        AtomLabel {
            serial: self.serial,
            name: self.name.trim().to_string(),
            residue_name: self.residue_name.trim().to_string(),
            residue_id: self.residue_id,
            chain_id: self.chain_id,
            hetero: self.hetero,
        }
    }
}
