use crate::io::{Format, error::Error, util};
use crate::model::{
    atom::Atom,
    metadata::AtomLabel,
    system::{Bond, System},
};
use std::collections::HashMap;
use std::io::BufRead;

const SECTION_PREFIX: &str = "@<TRIPOS>";

/// Non-blank, non-comment lines of one `@<TRIPOS>` section.
struct Section {
    header_line: usize,
    lines: Vec<(usize, String)>,
}

/// Reads the first molecule of a MOL2 stream.
pub fn read<R: BufRead>(reader: R) -> Result<System, Error> {
    let sections = split_sections(reader)?;

    let molecule = sections
        .get("MOLECULE")
        .ok_or_else(|| Error::parse(Format::Mol2, 1, "missing @<TRIPOS>MOLECULE section"))?;
    let molecule_name = molecule
        .lines
        .first()
        .map(|(_, name)| name.trim().to_string())
        .unwrap_or_else(|| "UNL".to_string());
    let (atom_count, bond_count) = match molecule.lines.get(1) {
        Some((line_no, counts)) => parse_counts(counts, *line_no)?,
        None => {
            return Err(Error::parse(
                Format::Mol2,
                molecule.header_line,
                "missing counts line",
            ));
        }
    };

    let atom_section = sections.get("ATOM").ok_or_else(|| {
        Error::parse(
            Format::Mol2,
            molecule.header_line,
            "missing @<TRIPOS>ATOM section",
        )
    })?;
    if atom_section.lines.len() < atom_count {
        return Err(Error::parse(
            Format::Mol2,
            atom_section.header_line,
            format!(
                "ATOM section ended before expected atom count ({} of {atom_count})",
                atom_section.lines.len()
            ),
        ));
    }

    let mut system = System::new();
    let mut id_map = HashMap::with_capacity(atom_count);
    for (line_no, line) in &atom_section.lines[..atom_count] {
        let (id, atom, label) = parse_atom(line, *line_no, &molecule_name)?;
        id_map.insert(id, system.atoms.len());
        system.atoms.push(atom);
        system.labels.push(label);
    }

    if bond_count > 0 {
        let bond_section = sections.get("BOND").ok_or_else(|| {
            Error::parse(
                Format::Mol2,
                atom_section.header_line,
                "missing @<TRIPOS>BOND section",
            )
        })?;
        for (line_no, line) in bond_section.lines.iter().take(bond_count) {
            if let Some(bond) = parse_bond(line, *line_no, &id_map)? {
                system.bonds.push(bond);
            }
        }
    }

    Ok(system)
}

/// Groups lines by section name, stopping at a second `MOLECULE` header.
fn split_sections<R: BufRead>(reader: R) -> Result<HashMap<String, Section>, Error> {
    let mut sections: HashMap<String, Section> = HashMap::new();
    let mut current: Option<String> = None;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let trimmed = line.trim();

        if let Some(name) = trimmed.strip_prefix(SECTION_PREFIX) {
            let name = name.trim().to_ascii_uppercase();
            if sections.contains_key(&name) {
                if name == "MOLECULE" {
                    break;
                }
                return Err(Error::parse(
                    Format::Mol2,
                    line_no,
                    format!("duplicate @<TRIPOS>{name} section"),
                ));
            }
            sections.insert(
                name.clone(),
                Section {
                    header_line: line_no,
                    lines: Vec::new(),
                },
            );
            current = Some(name);
            continue;
        }

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some(section) = current.as_ref().and_then(|name| sections.get_mut(name)) {
            section.lines.push((line_no, line));
        }
    }

    Ok(sections)
}

fn parse_counts(line: &str, line_no: usize) -> Result<(usize, usize), Error> {
    let mut fields = line.split_whitespace();
    let atoms = fields
        .next()
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(|| Error::parse(Format::Mol2, line_no, "invalid atom count in counts line"))?;
    let bonds = match fields.next() {
        Some(token) => token.parse::<usize>().map_err(|_| {
            Error::parse(Format::Mol2, line_no, "invalid bond count in counts line")
        })?,
        None => 0,
    };
    Ok((atoms, bonds))
}

fn parse_atom(
    line: &str,
    line_no: usize,
    molecule_name: &str,
) -> Result<(usize, Atom, AtomLabel), Error> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [id, name, x, y, z, atom_type, rest @ ..] = fields.as_slice() else {
        return Err(Error::parse(
            Format::Mol2,
            line_no,
            "ATOM line needs id, name, x, y, z and type",
        ));
    };

    let id = id
        .parse::<usize>()
        .map_err(|_| Error::parse(Format::Mol2, line_no, format!("invalid atom id '{id}'")))?;
    let mut position = [0.0; 3];
    for (slot, (axis, token)) in position.iter_mut().zip([("x", x), ("y", y), ("z", z)]) {
        *slot = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                Error::parse(
                    Format::Mol2,
                    line_no,
                    format!("invalid {axis} coordinate '{token}'"),
                )
            })?;
    }

    let element = util::guess_element_symbol(atom_type)
        .or_else(|| util::element_from_atom_name(name))
        .ok_or_else(|| {
            Error::parse(
                Format::Mol2,
                line_no,
                format!("cannot infer element from type '{atom_type}' or name '{name}'"),
            )
        })?;

    let residue_id = rest
        .first()
        .and_then(|t| t.parse::<i32>().ok())
        .unwrap_or(1);
    let residue_name = rest.get(1).copied().unwrap_or(molecule_name);

    let label = AtomLabel::builder(*name, residue_name)
        .serial(id as i64)
        .residue_id(residue_id)
        .hetero(true)
        .build();

    Ok((id, Atom::new(element, position), label))
}

/// Parses one BOND line; `nc` (not connected) entries yield `None`.
fn parse_bond(
    line: &str,
    line_no: usize,
    id_map: &HashMap<usize, usize>,
) -> Result<Option<Bond>, Error> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [_, origin, target, bond_type, ..] = fields.as_slice() else {
        return Err(Error::parse(
            Format::Mol2,
            line_no,
            "BOND line needs id, origin, target and type",
        ));
    };

    let resolve = |token: &str| -> Result<usize, Error> {
        let id = token.parse::<usize>().map_err(|_| {
            Error::parse(Format::Mol2, line_no, format!("invalid atom id '{token}'"))
        })?;
        id_map.get(&id).copied().ok_or_else(|| {
            Error::parse(
                Format::Mol2,
                line_no,
                format!("bond references unknown atom id {id}"),
            )
        })
    };

    if bond_type.eq_ignore_ascii_case("nc") {
        return Ok(None);
    }

    let order = util::bond_order_from_mol2(bond_type).ok_or_else(|| {
        Error::parse(
            Format::Mol2,
            line_no,
            format!("unsupported bond type '{bond_type}'"),
        )
    })?;

    Ok(Some(Bond::new(resolve(*origin)?, resolve(*target)?, order)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{BondOrder, Element};
    use std::io::Cursor;

    const METHYLAMINE: &str = "\
@<TRIPOS>MOLECULE
MEA
 3 2 1 0 0
SMALL
NO_CHARGES

@<TRIPOS>ATOM
      1 C1          0.0000    0.0000    0.0000 C.3     1  MEA1        0.0000
      2 N1          1.4700    0.0000    0.0000 N.3     1  MEA1        0.0000
      3 H1         -0.3600    1.0300    0.0000 H       1  MEA1        0.0000
@<TRIPOS>BOND
     1     1     2    1
     2     1     3    1
";

    #[test]
    fn reads_names_elements_and_bonds() {
        let system = read(Cursor::new(METHYLAMINE)).expect("parse mol2");

        assert_eq!(system.atom_count(), 3);
        assert_eq!(system.atoms[1].element, Element::N);
        assert_eq!(system.atoms[2].element, Element::H);
        assert_eq!(system.atom_name(2), Some("N1"));
        assert_eq!(system.labels[0].residue_name, "MEA1");
        assert_eq!(system.labels[2].serial, 3);
        assert_eq!(
            system.bonds,
            vec![
                Bond::new(0, 1, BondOrder::Single),
                Bond::new(0, 2, BondOrder::Single),
            ]
        );
    }

    #[test]
    fn residue_falls_back_to_molecule_name() {
        let text = "\
@<TRIPOS>MOLECULE
ACN
 2 1
@<TRIPOS>ATOM
 1 N1 1.16 0.0 0.0 N.1
 2 C1 0.0 0.0 0.0 C.1
@<TRIPOS>BOND
 1 1 2 3
";
        let system = read(Cursor::new(text)).unwrap();
        assert_eq!(system.labels[1].residue_name, "ACN");
        assert_eq!(system.bonds[0].order, BondOrder::Triple);
    }

    #[test]
    fn only_first_molecule_is_read() {
        let mut text = METHYLAMINE.to_string();
        text.push_str("@<TRIPOS>MOLECULE\nSECOND\n 1 0\n@<TRIPOS>ATOM\n 1 O1 0 0 0 O.3\n");
        let system = read(Cursor::new(text)).unwrap();
        assert_eq!(system.atom_count(), 3);
    }

    #[test]
    fn missing_molecule_section_is_an_error() {
        let err = read(Cursor::new("@<TRIPOS>ATOM\n")).unwrap_err();
        assert!(matches!(err, Error::Parse { format: Format::Mol2, .. }));
    }

    #[test]
    fn truncated_atom_section_is_an_error() {
        let text = "@<TRIPOS>MOLECULE\nX\n 2 0\n@<TRIPOS>ATOM\n 1 C1 0.0 0.0 0.0 C.3\n";
        let err = read(Cursor::new(text)).unwrap_err();
        assert!(err.to_string().contains("ATOM section ended"));
    }

    #[test]
    fn bad_coordinate_names_the_axis() {
        let text = "@<TRIPOS>MOLECULE\nX\n 1 0\n@<TRIPOS>ATOM\n 1 C1 0.0 oops 0.0 C.3\n";
        let err = read(Cursor::new(text)).unwrap_err();
        assert!(err.to_string().contains("invalid y coordinate 'oops'"));
    }

    #[test]
    fn dummy_bonds_are_single_and_nc_bonds_are_dropped() {
        let text = "\
@<TRIPOS>MOLECULE
X
 3 2
@<TRIPOS>ATOM
 1 C1 0.0 0.0 0.0 C.3
 2 O1 1.4 0.0 0.0 O.3
 3 N1 9.0 0.0 0.0 N.3
@<TRIPOS>BOND
 1 1 2 du
 2 1 3 nc
";
        let system = read(Cursor::new(text)).unwrap();
        assert_eq!(system.bonds, vec![Bond::new(0, 1, BondOrder::Single)]);
    }

    #[test]
    fn non_finite_coordinate_is_an_error() {
        let text = "@<TRIPOS>MOLECULE\nX\n 1 0\n@<TRIPOS>ATOM\n 1 C1 NaN 0.0 0.0 C.3\n";
        let err = read(Cursor::new(text)).unwrap_err();
        assert!(err.to_string().contains("invalid x coordinate 'NaN'"));
    }

    #[test]
    fn bond_to_unknown_atom_is_an_error() {
        let text = "\
@<TRIPOS>MOLECULE
X
 1 1
@<TRIPOS>ATOM
 1 C1 0.0 0.0 0.0 C.3
@<TRIPOS>BOND
 1 1 5 1
";
        let err = read(Cursor::new(text)).unwrap_err();
        assert!(err.to_string().contains("unknown atom id"));
    }
}
