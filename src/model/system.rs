use super::atom::Atom;
use super::metadata::AtomLabel;
use super::types::BondOrder;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize, order: BondOrder) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2, order }
        } else {
            Self { i: idx2, j: idx1, order }
        }
    }

    /// Returns the partner of `idx` if this bond touches it.
    #[inline]
    pub fn other(&self, idx: usize) -> Option<usize> {
        if self.i == idx {
            Some(self.j)
        } else if self.j == idx {
            Some(self.i)
        } else {
            None
        }
    }
}

/// A parsed structure file: atoms in file order, bonds, and the labels that
/// line up one-to-one with `atoms`.
#[derive(Debug, Clone, Default)]
pub struct System {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    pub labels: Vec<AtomLabel>,
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Name of the atom at the 1-based file position `index`.
    pub fn atom_name(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.labels.get(i))
            .map(|label| label.name.as_str())
    }

    /// 1-based position of the first atom named `name`.
    pub fn find_atom(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.labels
            .iter()
            .position(|label| label.name == name)
            .map(|i| i + 1)
    }

    /// Bonds incident to the 0-based atom `idx`, paired with the neighbor index.
    pub fn bonds_of(&self, idx: usize) -> impl Iterator<Item = (usize, &Bond)> + '_ {
        self.bonds
            .iter()
            .filter_map(move |bond| bond.other(idx).map(|n| (n, bond)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Element;

    fn methanol() -> System {
        let atoms = vec![
            Atom::new(Element::C, [0.0, 0.0, 0.0]),
            Atom::new(Element::O, [1.4, 0.0, 0.0]),
        ];
        let labels = vec![
            AtomLabel::builder("C1", "MOH").serial(1).build(),
            AtomLabel::builder("O1", "MOH").serial(2).build(),
        ];
        System {
            atoms,
            bonds: vec![Bond::new(1, 0, BondOrder::Single)],
            labels,
        }
    }

    #[test]
    fn bond_new_normalizes_indices() {
        let bond = Bond::new(5, 2, BondOrder::Double);
        assert_eq!((bond.i, bond.j), (2, 5));
        assert_eq!(bond.other(2), Some(5));
        assert_eq!(bond.other(5), Some(2));
        assert_eq!(bond.other(3), None);
    }

    #[test]
    fn atom_name_is_one_based() {
        let system = methanol();
        assert_eq!(system.atom_name(1), Some("C1"));
        assert_eq!(system.atom_name(2), Some("O1"));
        assert_eq!(system.atom_name(0), None);
        assert_eq!(system.atom_name(3), None);
    }

    #[test]
    fn find_atom_returns_one_based_position() {
        let system = methanol();
        assert_eq!(system.find_atom("O1"), Some(2));
        assert_eq!(system.find_atom(" C1 "), Some(1));
        assert_eq!(system.find_atom("N1"), None);
    }

    #[test]
    fn bonds_of_yields_neighbors() {
        let system = methanol();
        let neighbors: Vec<usize> = system.bonds_of(0).map(|(n, _)| n).collect();
        assert_eq!(neighbors, vec![1]);
        assert_eq!(system.atom_count(), 2);
        assert_eq!(system.bond_count(), 1);
        assert!(!system.is_empty());
    }
}
