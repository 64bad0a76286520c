use super::config::SelectionMode;
use super::error::Error;
use crate::chem::{ValenceTable, total_hydrogens};
use crate::model::system::System;
use log::info;

/// Returns the 1-based index of the attachment atom chosen by `mode`.
///
/// Hydrogens count towards the numbering, so the index matches the atom's
/// position among the file's atom records.
pub fn select_attachment_atom(
    system: &System,
    mode: SelectionMode,
    table: &ValenceTable,
) -> Result<usize, Error> {
    let index = match mode {
        SelectionMode::FirstOccurrence => first_occurrence(system, table),
    }
    .ok_or(Error::NoAttachmentAtom {
        atoms: system.atom_count(),
    })?;

    info!("Atom {index} found");
    Ok(index)
}

fn first_occurrence(system: &System, table: &ValenceTable) -> Option<usize> {
    system
        .atoms
        .iter()
        .enumerate()
        .find(|(idx, atom)| !atom.element.is_hydrogen() && total_hydrogens(system, *idx, table) > 0)
        .map(|(idx, _)| idx + 1)
}

/// Trimmed name of the atom at 1-based `index`.
pub fn resolve_atom_name(system: &System, index: usize) -> Result<&str, Error> {
    system.atom_name(index).ok_or(Error::AtomIndexOutOfRange {
        index,
        count: system.atom_count(),
    })
}
