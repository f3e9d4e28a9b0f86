use glam::Vec3;

use super::element::Element;
use super::view::MoleculeView;
use super::Molecule;

/// Plain atom/bond arrays without identity tracking, e.g. an imported
/// trajectory frame.
///
/// Scene plugins render it like any other view, but it offers no unique
/// ids, so persistent references built from its atoms are always invalid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    elements: Vec<Element>,
    positions: Vec<Vec3>,
    bonds: Vec<([usize; 2], u8)>,
}

impl Structure {
    /// Create an empty structure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an atom and return its index.
    pub fn push_atom(&mut self, element: Element, position: Vec3) -> usize {
        self.elements.push(element);
        self.positions.push(position);
        self.elements.len() - 1
    }

    /// Append a bond. Out-of-range endpoints are stored as given and simply
    /// never resolve.
    pub fn push_bond(&mut self, a: usize, b: usize, order: u8) -> usize {
        self.bonds.push(([a, b], order));
        self.bonds.len() - 1
    }
}

impl From<&Molecule> for Structure {
    fn from(molecule: &Molecule) -> Self {
        Self {
            elements: molecule.elements().to_vec(),
            positions: molecule.positions().to_vec(),
            bonds: molecule
                .bonds()
                .filter_map(|b| {
                    Some((molecule.bond_atoms(b.index())?, b.order()))
                })
                .collect(),
        }
    }
}

impl MoleculeView for Structure {
    fn as_view(&self) -> &dyn MoleculeView {
        self
    }

    fn atom_count(&self) -> usize {
        self.elements.len()
    }

    fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    fn element(&self, atom: usize) -> Option<Element> {
        self.elements.get(atom).copied()
    }

    fn position(&self, atom: usize) -> Option<Vec3> {
        self.positions.get(atom).copied()
    }

    fn bond_atoms(&self, bond: usize) -> Option<[usize; 2]> {
        self.bonds.get(bond).map(|&(pair, _)| pair)
    }

    fn bond_order(&self, bond: usize) -> Option<u8> {
        self.bonds.get(bond).map(|&(_, order)| order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::UniqueId;

    #[test]
    fn snapshot_copies_topology_without_ids() {
        let mut mol = Molecule::new();
        let c = mol.add_atom(Element::C, Vec3::ZERO);
        let o = mol.add_atom(Element::O, Vec3::new(1.2, 0.0, 0.0));
        let _ = mol.add_bond(c, o, 2).unwrap();

        let frame = Structure::from(&mol);
        assert_eq!(frame.atom_count(), 2);
        assert_eq!(frame.bond_atoms(0), Some([c, o]));
        assert_eq!(frame.bond_order(0), Some(2));
        assert!(frame.unique_ids().is_none());
        let atom = frame.atom(1).unwrap();
        assert_eq!(atom.unique_id(), UniqueId::INVALID);
    }
}
