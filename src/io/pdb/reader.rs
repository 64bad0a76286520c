use crate::io::{Format, ReadConfig, error::Error, util};
use crate::model::{
    atom::Atom,
    metadata::AtomLabel,
    system::{Bond, System},
    types::BondOrder,
};
use std::collections::{BTreeMap, HashMap};
use std::io::BufRead;

const RECORD_WIDTH: usize = 80;
const MIN_ATOM_RECORD: usize = 54;

#[derive(Default)]
struct Connectivity {
    /// Directed `CONECT` pair counts; a pair listed twice from the same atom
    /// is a double bond.
    counts: HashMap<(usize, usize), u8>,
}

impl Connectivity {
    fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn add(&mut self, from: usize, to: usize) {
        *self.counts.entry((from, to)).or_insert(0) += 1;
    }

    fn into_bonds(self) -> Vec<Bond> {
        let mut merged: BTreeMap<(usize, usize), u8> = BTreeMap::new();
        for ((from, to), count) in self.counts {
            let key = (from.min(to), from.max(to));
            let entry = merged.entry(key).or_insert(0);
            *entry = (*entry).max(count);
        }

        merged
            .into_iter()
            .map(|((i, j), count)| {
                let order = (1..count).fold(BondOrder::Single, |order, _| order.promoted());
                Bond::new(i, j, order)
            })
            .collect()
    }
}

pub fn read<R: BufRead>(reader: R, config: &ReadConfig) -> Result<System, Error> {
    let mut system = System::new();
    let mut serial_map: HashMap<i64, usize> = HashMap::new();
    let mut skipped_serials: Vec<i64> = Vec::new();
    let mut connectivity = Connectivity::default();
    let mut alt_loc: Option<char> = None;
    // Set once the first model closes; later coordinates are ignored but
    // CONECT records, which follow the last model, are still read.
    let mut model_closed = false;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;

        if line.trim_end() == "END" {
            break;
        }
        if line.starts_with("ENDMDL") {
            model_closed = true;
            continue;
        }

        if line.starts_with("ATOM  ") || line.starts_with("HETATM") {
            if model_closed {
                continue;
            }
            let record = parse_atom_record(&line, line_no)?;

            if record.alt_loc != ' ' {
                match alt_loc {
                    None => alt_loc = Some(record.alt_loc),
                    Some(kept) if kept != record.alt_loc => {
                        skipped_serials.push(record.serial);
                        continue;
                    }
                    Some(_) => {}
                }
            }

            serial_map.insert(record.serial, system.atoms.len());
            system.atoms.push(record.atom);
            system.labels.push(record.label);
        } else if line.starts_with("CONECT") {
            parse_conect_record(
                &line,
                line_no,
                &serial_map,
                &skipped_serials,
                model_closed,
                &mut connectivity,
            )?;
        }
    }

    system.bonds = if !connectivity.is_empty() {
        connectivity.into_bonds()
    } else if config.proximity_bonding {
        util::perceive_bonds(&system.atoms, config.bond_tolerance)
    } else {
        Vec::new()
    };

    Ok(system)
}

struct AtomRecord {
    serial: i64,
    alt_loc: char,
    atom: Atom,
    label: AtomLabel,
}

fn parse_atom_record(line: &str, line_no: usize) -> Result<AtomRecord, Error> {
    if !line.is_ascii() {
        return Err(Error::parse(
            Format::Pdb,
            line_no,
            "atom record contains non-ASCII characters",
        ));
    }
    if line.trim_end().len() < MIN_ATOM_RECORD {
        return Err(Error::parse(Format::Pdb, line_no, "atom record too short"));
    }

    let padded = format!("{line:<RECORD_WIDTH$}");
    let field = |start: usize, end: usize| &padded[start..end];
    let column = |idx: usize| padded.as_bytes()[idx] as char;

    let hetero = line.starts_with("HETATM");
    let serial = field(6, 11).trim().parse::<i64>().ok();
    let name = field(12, 16).trim();
    let alt_loc = column(16);
    let residue_name = field(17, 20);
    let chain_id = column(21);
    let residue_id = field(22, 26).trim().parse::<i32>().unwrap_or(1);

    let coord = |start: usize, end: usize, axis: &str| {
        field(start, end)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                Error::parse(
                    Format::Pdb,
                    line_no,
                    format!("invalid {axis} coordinate in atom record"),
                )
            })
    };
    let position = [coord(30, 38, "x")?, coord(38, 46, "y")?, coord(46, 54, "z")?];

    let element_field = field(76, 78).trim();
    let element = if element_field.is_empty() {
        util::element_from_atom_name(name)
    } else {
        util::guess_element_symbol(element_field)
    }
    .ok_or_else(|| {
        Error::parse(
            Format::Pdb,
            line_no,
            format!("unable to infer element for atom '{name}'"),
        )
    })?;

    let formal_charge = util::parse_pdb_charge(field(78, 80))
        .ok_or_else(|| Error::parse(Format::Pdb, line_no, "invalid formal charge field"))?;

    // Serial numbers may overflow into hybrid-36 in large files; fall back to
    // the record's line number so CONECT-less files still load.
    let serial = serial.unwrap_or(line_no as i64);

    Ok(AtomRecord {
        serial,
        alt_loc,
        atom: Atom::new(element, position).with_charge(formal_charge),
        label: AtomLabel::builder(name, residue_name)
            .serial(serial)
            .residue_id(residue_id)
            .chain_id(chain_id)
            .hetero(hetero)
            .build(),
    })
}

fn parse_conect_record(
    line: &str,
    line_no: usize,
    serial_map: &HashMap<i64, usize>,
    skipped_serials: &[i64],
    lenient: bool,
    connectivity: &mut Connectivity,
) -> Result<(), Error> {
    let padded = format!("{line:<31}");
    if !padded.is_ascii() {
        return Err(Error::parse(
            Format::Pdb,
            line_no,
            "CONECT record contains non-ASCII characters",
        ));
    }

    let mut serials = [6usize, 11, 16, 21, 26]
        .into_iter()
        .map(|start| padded[start..start + 5].trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| Error::parse(Format::Pdb, line_no, "invalid serial in CONECT record"))
        });

    let Some(origin) = serials.next().transpose()? else {
        return Ok(());
    };

    let resolve = |serial: i64| -> Result<Option<usize>, Error> {
        if skipped_serials.contains(&serial) {
            return Ok(None);
        }
        // Serials outside the first model are dropped, not rejected.
        if lenient && !serial_map.contains_key(&serial) {
            return Ok(None);
        }
        serial_map.get(&serial).copied().map(Some).ok_or_else(|| {
            Error::parse(
                Format::Pdb,
                line_no,
                format!("CONECT references unknown atom serial {serial}"),
            )
        })
    };

    let Some(from) = resolve(origin)? else {
        return Ok(());
    };

    for serial in serials {
        if let Some(to) = resolve(serial?)? {
            if to != from {
                connectivity.add(from, to);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Element;
    use std::io::Cursor;

    fn read_str(text: &str) -> Result<System, Error> {
        read(Cursor::new(text), &ReadConfig::default())
    }

    const FORMALDEHYDE_CONECT: &str = "\
HETATM    1  C1  FOR A   1       0.000   0.000   0.000  1.00  0.00           C
HETATM    2  O1  FOR A   1       1.210   0.000   0.000  1.00  0.00           O
HETATM    3  H1  FOR A   1      -0.550   0.940   0.000  1.00  0.00           H
HETATM    4  H2  FOR A   1      -0.550  -0.940   0.000  1.00  0.00           H
CONECT    1    2    2    3    4
CONECT    2    1    1
CONECT    3    1
CONECT    4    1
END
";

    #[test]
    fn reads_atoms_labels_and_conect_bond_orders() {
        let system = read_str(FORMALDEHYDE_CONECT).expect("parse");

        assert_eq!(system.atom_count(), 4);
        assert_eq!(system.atoms[0].element, Element::C);
        assert_eq!(system.atoms[1].element, Element::O);
        assert_eq!(system.labels[2].name, "H1");
        assert_eq!(system.labels[0].residue_name, "FOR");
        assert_eq!(system.labels[0].chain_id, 'A');
        assert!(system.labels[0].hetero);
        assert_eq!(system.labels[3].serial, 4);

        assert_eq!(
            system.bonds,
            vec![
                Bond::new(0, 1, BondOrder::Double),
                Bond::new(0, 2, BondOrder::Single),
                Bond::new(0, 3, BondOrder::Single),
            ]
        );
    }

    #[test]
    fn perceives_bonds_when_conect_is_absent() {
        let text = "\
ATOM      1  N1  LIG     1       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  C1  LIG     1       1.470   0.000   0.000  1.00  0.00           C
ATOM      3  C2  LIG     1       5.000   0.000   0.000  1.00  0.00           C
";
        let system = read_str(text).expect("parse");
        assert_eq!(system.bonds, vec![Bond::new(0, 1, BondOrder::Single)]);
        assert!(!system.labels[0].hetero);
    }

    #[test]
    fn element_falls_back_to_atom_name_and_reads_charge() {
        let text = "\
HETATM    1 CL1  LIG A   1       0.000   0.000   0.000  1.00  0.00
HETATM    2  N1  LIG A   1       3.000   0.000   0.000  1.00  0.00           N1+
";
        let system = read_str(text).expect("parse");
        assert_eq!(system.atoms[0].element, Element::Cl);
        assert_eq!(system.atoms[1].formal_charge, 1);
        assert_eq!(system.labels[0].name, "CL1");
    }

    #[test]
    fn keeps_only_first_alternate_location() {
        let text = "\
HETATM    1  C1 ALIG A   1       0.000   0.000   0.000  0.60  0.00           C
HETATM    2  C1 BLIG A   1       0.100   0.000   0.000  0.40  0.00           C
HETATM    3  O1  LIG A   1       1.400   0.000   0.000  1.00  0.00           O
CONECT    1    3
CONECT    2    3
";
        let system = read_str(text).expect("parse");
        assert_eq!(system.atom_count(), 2);
        assert_eq!(system.labels[1].name, "O1");
        assert_eq!(system.bonds, vec![Bond::new(0, 1, BondOrder::Single)]);
    }

    #[test]
    fn stops_at_first_model_end() {
        let text = "\
MODEL        1
HETATM    1  C1  LIG A   1       0.000   0.000   0.000  1.00  0.00           C
ENDMDL
MODEL        2
HETATM    1  C1  LIG A   1       9.000   0.000   0.000  1.00  0.00           C
ENDMDL
";
        let system = read_str(text).expect("parse");
        assert_eq!(system.atom_count(), 1);
        assert_eq!(system.atoms[0].position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn conect_after_last_model_keeps_bond_orders() {
        let text = "\
MODEL        1
HETATM    1  N1  ACN A   1       1.160   0.000   0.000  1.00  0.00           N
HETATM    2  C1  ACN A   1       0.000   0.000   0.000  1.00  0.00           C
HETATM    3  C2  ACN A   1      -1.460   0.000   0.000  1.00  0.00           C
ENDMDL
MODEL        2
HETATM    1  N1  ACN A   1       1.160   0.000   0.000  1.00  0.00           N
HETATM    2  C1  ACN A   1       0.000   0.000   0.000  1.00  0.00           C
HETATM    3  C2  ACN A   1      -1.460   0.000   0.000  1.00  0.00           C
HETATM    4  O1  ACN A   1      -1.460   5.000   0.000  1.00  0.00           O
ENDMDL
CONECT    1    2    2    2
CONECT    2    1    1    1    3
CONECT    3    2
CONECT    4    3
END
";
        let system = read_str(text).expect("parse");
        assert_eq!(system.atom_count(), 3);
        assert_eq!(
            system.bonds,
            vec![
                Bond::new(0, 1, BondOrder::Triple),
                Bond::new(1, 2, BondOrder::Single),
            ]
        );
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let err = read_str(
            "HETATM    1  C1  LIG A   1         NaN   0.000   0.000  1.00  0.00           C\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid x coordinate"));

        let err = read_str(
            "HETATM    1  C1  LIG A   1       0.000     inf   0.000  1.00  0.00           C\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid y coordinate"));
    }

    #[test]
    fn rejects_short_and_malformed_records() {
        let err = read_str("HETATM    1  C1  LIG A   1       0.000\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));

        let err = read_str(
            "HETATM    1  C1  LIG A   1       abc     0.000   0.000  1.00  0.00           C\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid x coordinate"));
    }

    #[test]
    fn rejects_conect_to_unknown_serial() {
        let text = "\
HETATM    1  C1  LIG A   1       0.000   0.000   0.000  1.00  0.00           C
CONECT    1    9
";
        let err = read_str(text).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }
}
