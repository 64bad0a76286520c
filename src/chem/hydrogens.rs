use super::valence::ValenceTable;
use crate::model::system::System;

/// Number of hydrogen atoms bonded to the 0-based atom `idx`.
pub fn explicit_hydrogens(system: &System, idx: usize) -> usize {
    system
        .bonds_of(idx)
        .filter(|(n, _)| system.atoms[*n].element.is_hydrogen())
        .count()
}

/// Sum of bond orders around `idx`, aromatic bonds counting 1.5.
pub fn explicit_valence(system: &System, idx: usize) -> i32 {
    let total: f64 = system.bonds_of(idx).map(|(_, b)| b.order.value()).sum();
    total.round() as i32
}

/// Hydrogens needed to reach the smallest allowed valence not below the
/// explicit valence. Zero for elements absent from `table` or when every
/// allowed valence is already exceeded.
pub fn implicit_hydrogens(system: &System, idx: usize, table: &ValenceTable) -> usize {
    let atom = &system.atoms[idx];
    let Some(entry) = table.get(atom.element) else {
        return 0;
    };

    let explicit = explicit_valence(system, idx);
    entry
        .allowed(atom.formal_charge)
        .find(|&v| v >= explicit)
        .map(|v| (v - explicit) as usize)
        .unwrap_or(0)
}

/// Explicit plus implicit hydrogen count of the 0-based atom `idx`.
pub fn total_hydrogens(system: &System, idx: usize, table: &ValenceTable) -> usize {
    explicit_hydrogens(system, idx) + implicit_hydrogens(system, idx, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        atom::Atom,
        metadata::AtomLabel,
        system::Bond,
        types::{BondOrder, Element},
    };

    fn build(atoms: Vec<Atom>, bonds: Vec<Bond>) -> System {
        let labels = (0..atoms.len())
            .map(|i| AtomLabel::builder(format!("A{}", i + 1), "LIG").build())
            .collect();
        System {
            atoms,
            bonds,
            labels,
        }
    }

    fn table() -> &'static ValenceTable {
        ValenceTable::default_table()
    }

    #[test]
    fn heavy_atom_only_methanol_gets_implicit_hydrogens() {
        let system = build(
            vec![
                Atom::new(Element::C, [0.0; 3]),
                Atom::new(Element::O, [1.4, 0.0, 0.0]),
            ],
            vec![Bond::new(0, 1, BondOrder::Single)],
        );
        assert_eq!(total_hydrogens(&system, 0, table()), 3);
        assert_eq!(total_hydrogens(&system, 1, table()), 1);
        assert_eq!(explicit_hydrogens(&system, 0), 0);
    }

    #[test]
    fn explicit_hydrogens_are_counted_once() {
        // Water written with both hydrogens.
        let system = build(
            vec![
                Atom::new(Element::O, [0.0; 3]),
                Atom::new(Element::H, [0.96, 0.0, 0.0]),
                Atom::new(Element::H, [-0.24, 0.93, 0.0]),
            ],
            vec![
                Bond::new(0, 1, BondOrder::Single),
                Bond::new(0, 2, BondOrder::Single),
            ],
        );
        assert_eq!(explicit_hydrogens(&system, 0), 2);
        assert_eq!(implicit_hydrogens(&system, 0, table()), 0);
        assert_eq!(total_hydrogens(&system, 0, table()), 2);
    }

    #[test]
    fn saturated_atoms_have_no_hydrogens() {
        // Carbonyl oxygen and a quaternary-like carbon in CO2.
        let system = build(
            vec![
                Atom::new(Element::O, [0.0; 3]),
                Atom::new(Element::C, [1.16, 0.0, 0.0]),
                Atom::new(Element::O, [2.32, 0.0, 0.0]),
            ],
            vec![
                Bond::new(0, 1, BondOrder::Double),
                Bond::new(1, 2, BondOrder::Double),
            ],
        );
        for idx in 0..3 {
            assert_eq!(total_hydrogens(&system, idx, table()), 0);
        }
    }

    #[test]
    fn aromatic_bonds_count_one_and_a_half() {
        let system = build(
            vec![
                Atom::new(Element::C, [0.0; 3]),
                Atom::new(Element::C, [1.39, 0.0, 0.0]),
                Atom::new(Element::C, [-1.39, 0.0, 0.0]),
            ],
            vec![
                Bond::new(0, 1, BondOrder::Aromatic),
                Bond::new(0, 2, BondOrder::Aromatic),
            ],
        );
        assert_eq!(explicit_valence(&system, 0), 3);
        assert_eq!(implicit_hydrogens(&system, 0, table()), 1);
    }

    #[test]
    fn formal_charge_adjusts_implicit_count() {
        let ammonium = build(vec![Atom::new(Element::N, [0.0; 3]).with_charge(1)], vec![]);
        assert_eq!(total_hydrogens(&ammonium, 0, table()), 4);

        let hydroxide = build(vec![Atom::new(Element::O, [0.0; 3]).with_charge(-1)], vec![]);
        assert_eq!(total_hydrogens(&hydroxide, 0, table()), 1);
    }

    #[test]
    fn hypervalent_sulfur_picks_next_valence() {
        // S with three single bonds: smallest allowed valence >= 3 is 4.
        let system = build(
            vec![
                Atom::new(Element::S, [0.0; 3]),
                Atom::new(Element::C, [1.8, 0.0, 0.0]),
                Atom::new(Element::C, [-1.8, 0.0, 0.0]),
                Atom::new(Element::C, [0.0, 1.8, 0.0]),
            ],
            vec![
                Bond::new(0, 1, BondOrder::Single),
                Bond::new(0, 2, BondOrder::Single),
                Bond::new(0, 3, BondOrder::Single),
            ],
        );
        assert_eq!(implicit_hydrogens(&system, 0, table()), 1);
    }

    #[test]
    fn unlisted_elements_never_get_implicit_hydrogens() {
        let system = build(vec![Atom::new(Element::Fe, [0.0; 3])], vec![]);
        assert_eq!(total_hydrogens(&system, 0, table()), 0);
    }
}
