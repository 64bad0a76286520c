use crate::model::{
    atom::Atom,
    system::Bond,
    types::{BondOrder, Element},
};
use std::str::FromStr;

/// Slack added to the sum of covalent radii when perceiving bonds by distance.
pub const DEFAULT_BOND_TOLERANCE: f64 = 0.45;

/// Pairs closer than this are treated as overlapping records, not bonds.
const MIN_BOND_DISTANCE: f64 = 0.4;

/// Parses an element symbol regardless of case (`CL`, `cl`, `Cl`).
///
/// Digits and charge markers around the symbol are ignored, so MOL2 atom
/// types such as `C.ar` or `N.pl3` resolve to their element as well.
pub fn guess_element_symbol(token: &str) -> Option<Element> {
    let letters: String = token
        .trim()
        .split('.')
        .next()?
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();
    if letters.is_empty() || letters.len() > 2 {
        return None;
    }
    Element::from_str(&normalize_symbol(&letters)).ok()
}

/// Falls back to the leading letters of a PDB atom name (`CL1` → Cl, `C12` → C).
///
/// Two-letter matches are preferred only for halogens and common metals,
/// since names like `CA` or `HG1` almost always mean carbon and hydrogen in
/// small-molecule files.
pub fn element_from_atom_name(name: &str) -> Option<Element> {
    let letters: String = name
        .trim()
        .chars()
        .skip_while(|c| c.is_ascii_digit())
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    if letters.is_empty() {
        return None;
    }

    if letters.len() >= 2 {
        let pair = normalize_symbol(&letters[..2]);
        if matches!(pair.as_str(), "Cl" | "Br" | "Na" | "Mg" | "Zn" | "Fe" | "Si" | "Se") {
            return Element::from_str(&pair).ok();
        }
    }

    Element::from_str(&normalize_symbol(&letters[..1])).ok()
}

/// Parses the PDB formal charge columns (`2+`, `1-`, blank).
pub fn parse_pdb_charge(field: &str) -> Option<i8> {
    let field = field.trim();
    if field.is_empty() {
        return Some(0);
    }
    if !field.is_ascii() {
        return None;
    }
    let (digits, sign) = field.split_at(field.len() - 1);
    let magnitude: i8 = if digits.is_empty() {
        1
    } else {
        digits.parse().ok()?
    };
    match sign {
        "+" => Some(magnitude),
        "-" => Some(-magnitude),
        _ => None,
    }
}

pub fn bond_order_from_mol2(token: &str) -> Option<BondOrder> {
    match token.to_ascii_lowercase().as_str() {
        "1" | "am" | "du" | "un" => Some(BondOrder::Single),
        "2" => Some(BondOrder::Double),
        "3" => Some(BondOrder::Triple),
        "ar" => Some(BondOrder::Aromatic),
        _ => None,
    }
}

/// Connects atoms whose separation is within the sum of their covalent radii
/// plus `tolerance`. Each hydrogen keeps only its nearest partner.
pub fn perceive_bonds(atoms: &[Atom], tolerance: f64) -> Vec<Bond> {
    let mut bonds = Vec::new();
    let mut hydrogen_partner: Vec<Option<(usize, f64)>> = vec![None; atoms.len()];

    for i in 0..atoms.len() {
        for j in (i + 1)..atoms.len() {
            let (a, b) = (&atoms[i], &atoms[j]);
            if a.element.is_hydrogen() && b.element.is_hydrogen() {
                continue;
            }

            let distance = a.distance_to(b);
            let cutoff = a.element.covalent_radius() + b.element.covalent_radius() + tolerance;
            if !(MIN_BOND_DISTANCE..=cutoff).contains(&distance) {
                continue;
            }

            if a.element.is_hydrogen() || b.element.is_hydrogen() {
                let (h, partner) = if a.element.is_hydrogen() { (i, j) } else { (j, i) };
                match hydrogen_partner[h] {
                    Some((_, best)) if best <= distance => {}
                    _ => hydrogen_partner[h] = Some((partner, distance)),
                }
                continue;
            }

            bonds.push(Bond::new(i, j, BondOrder::Single));
        }
    }

    for (h, partner) in hydrogen_partner.into_iter().enumerate() {
        if let Some((heavy, _)) = partner {
            bonds.push(Bond::new(h, heavy, BondOrder::Single));
        }
    }

    bonds.sort_by_key(|b| (b.i, b.j));
    bonds
}

fn normalize_symbol(letters: &str) -> String {
    let mut chars = letters.chars();
    match chars.next() {
        Some(first) => std::iter::once(first.to_ascii_uppercase())
            .chain(chars.map(|c| c.to_ascii_lowercase()))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_symbols_ignoring_case_and_mol2_suffixes() {
        assert_eq!(guess_element_symbol("C"), Some(Element::C));
        assert_eq!(guess_element_symbol("CL"), Some(Element::Cl));
        assert_eq!(guess_element_symbol(" br "), Some(Element::Br));
        assert_eq!(guess_element_symbol("C.ar"), Some(Element::C));
        assert_eq!(guess_element_symbol("N.pl3"), Some(Element::N));
        assert_eq!(guess_element_symbol("Du"), None);
        assert_eq!(guess_element_symbol(""), None);
    }

    #[test]
    fn element_from_atom_name_prefers_single_letters() {
        assert_eq!(element_from_atom_name("C12"), Some(Element::C));
        assert_eq!(element_from_atom_name("CA"), Some(Element::C));
        assert_eq!(element_from_atom_name("CL1"), Some(Element::Cl));
        assert_eq!(element_from_atom_name("Br"), Some(Element::Br));
        assert_eq!(element_from_atom_name("1HB"), Some(Element::H));
        assert_eq!(element_from_atom_name("HO2"), Some(Element::H));
        assert_eq!(element_from_atom_name("  "), None);
    }

    #[test]
    fn parses_pdb_charge_fields() {
        assert_eq!(parse_pdb_charge("  "), Some(0));
        assert_eq!(parse_pdb_charge("1+"), Some(1));
        assert_eq!(parse_pdb_charge("2-"), Some(-2));
        assert_eq!(parse_pdb_charge("+"), Some(1));
        assert_eq!(parse_pdb_charge("x"), None);
    }

    #[test]
    fn mol2_bond_types() {
        assert_eq!(bond_order_from_mol2("1"), Some(BondOrder::Single));
        assert_eq!(bond_order_from_mol2("am"), Some(BondOrder::Single));
        assert_eq!(bond_order_from_mol2("AR"), Some(BondOrder::Aromatic));
        assert_eq!(bond_order_from_mol2("du"), Some(BondOrder::Single));
        assert_eq!(bond_order_from_mol2("un"), Some(BondOrder::Single));
        assert_eq!(bond_order_from_mol2("nc"), None);
        assert_eq!(bond_order_from_mol2("4"), None);
    }

    #[test]
    fn perceives_bonds_and_binds_each_hydrogen_once() {
        // Water plus a carbon too far away to bond.
        let atoms = vec![
            Atom::new(Element::O, [0.0, 0.0, 0.0]),
            Atom::new(Element::H, [0.96, 0.0, 0.0]),
            Atom::new(Element::H, [-0.24, 0.93, 0.0]),
            Atom::new(Element::C, [5.0, 0.0, 0.0]),
        ];
        let bonds = perceive_bonds(&atoms, DEFAULT_BOND_TOLERANCE);
        assert_eq!(
            bonds,
            vec![
                Bond::new(0, 1, BondOrder::Single),
                Bond::new(0, 2, BondOrder::Single),
            ]
        );
    }

    #[test]
    fn non_finite_positions_never_bond() {
        let atoms = vec![
            Atom::new(Element::C, [f64::NAN, 0.0, 0.0]),
            Atom::new(Element::C, [50.0, 0.0, 0.0]),
            Atom::new(Element::C, [51.5, 0.0, 0.0]),
        ];
        let bonds = perceive_bonds(&atoms, DEFAULT_BOND_TOLERANCE);
        assert_eq!(bonds, vec![Bond::new(1, 2, BondOrder::Single)]);
    }

    #[test]
    fn hydrogen_keeps_nearest_partner_only() {
        let atoms = vec![
            Atom::new(Element::C, [0.0, 0.0, 0.0]),
            Atom::new(Element::H, [1.05, 0.0, 0.0]),
            Atom::new(Element::N, [2.2, 0.0, 0.0]),
        ];
        let bonds = perceive_bonds(&atoms, DEFAULT_BOND_TOLERANCE);
        assert!(bonds.contains(&Bond::new(0, 1, BondOrder::Single)));
        assert!(!bonds.contains(&Bond::new(1, 2, BondOrder::Single)));
        assert!(!bonds.contains(&Bond::new(0, 2, BondOrder::Single)));
    }
}
