//! Molecule storage with unique-id registries.
//!
//! [`Molecule`] keeps atoms and bonds in flat arrays (swap-remove on
//! deletion, so indices shift) and pairs each array with a
//! [`UniqueIdRegistry`] so external code can hold stable handles.
//! [`Structure`] is the plain variant without registries, and
//! [`EditableMolecule`] wraps a [`Molecule`] with undo/redo.

mod editable;
pub mod element;
mod structure;
pub mod unique_id;
mod view;

use std::sync::atomic::{AtomicU64, Ordering};

pub use editable::{EditCommand, EditableMolecule};
pub use element::Element;
use glam::Vec3;
pub use structure::Structure;
pub use unique_id::{UniqueId, UniqueIdRegistry};
pub use view::{Atom, Atoms, Bond, Bonds, MoleculeView, UniqueIdSource};

use crate::error::MolsceneError;

/// Highest bond order a molecule accepts.
pub const MAX_BOND_ORDER: u8 = 4;

static NEXT_MOLECULE_ID: AtomicU64 = AtomicU64::new(0);

/// Liveness token identifying one molecule instance.
///
/// Tokens are never reused within a process, so a token stored by a
/// persistent reference cannot match a molecule created later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoleculeId(u64);

impl MoleculeId {
    fn next() -> Self {
        Self(NEXT_MOLECULE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw token value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// An atom taken out of a molecule, with everything needed to put it back
/// under the same unique id.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedAtom {
    /// Id the atom carried.
    pub unique_id: UniqueId,
    /// Element of the atom.
    pub element: Element,
    /// Position of the atom.
    pub position: Vec3,
    /// Bonds that were removed along with the atom.
    pub bonds: Vec<RemovedBond>,
}

/// A bond taken out of a molecule. Endpoints are stored by unique id so the
/// bond can be restored after its atoms have moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedBond {
    /// Id the bond carried.
    pub unique_id: UniqueId,
    /// Unique ids of the endpoint atoms.
    pub atoms: [UniqueId; 2],
    /// Bond order.
    pub order: u8,
}

/// A molecule whose atoms and bonds carry stable unique ids.
#[derive(Debug)]
pub struct Molecule {
    id: MoleculeId,
    elements: Vec<Element>,
    positions: Vec<Vec3>,
    bond_pairs: Vec<[usize; 2]>,
    bond_orders: Vec<u8>,
    atom_ids: UniqueIdRegistry,
    bond_ids: UniqueIdRegistry,
}

impl Molecule {
    /// Create an empty molecule with a fresh liveness token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: MoleculeId::next(),
            elements: Vec::new(),
            positions: Vec::new(),
            bond_pairs: Vec::new(),
            bond_orders: Vec::new(),
            atom_ids: UniqueIdRegistry::new(),
            bond_ids: UniqueIdRegistry::new(),
        }
    }

    /// Liveness token of this instance.
    #[must_use]
    pub fn id(&self) -> MoleculeId {
        self.id
    }

    /// Whether the molecule has no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Atom positions in storage order.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Atom elements in storage order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    // -- Identity --

    /// Unique id of the atom at `index`, or [`UniqueId::INVALID`].
    #[must_use]
    pub fn atom_unique_id(&self, index: usize) -> UniqueId {
        self.atom_ids.id_at(index)
    }

    /// Unique id of the bond at `index`, or [`UniqueId::INVALID`].
    #[must_use]
    pub fn bond_unique_id(&self, index: usize) -> UniqueId {
        self.bond_ids.id_at(index)
    }

    /// Current index of the atom carrying `id`.
    #[must_use]
    pub fn atom_index(&self, id: UniqueId) -> Option<usize> {
        self.atom_ids.index_of(id)
    }

    /// Current index of the bond carrying `id`.
    #[must_use]
    pub fn bond_index(&self, id: UniqueId) -> Option<usize> {
        self.bond_ids.index_of(id)
    }

    /// The live atom carrying `id`, if any.
    #[must_use]
    pub fn atom_by_unique_id(&self, id: UniqueId) -> Option<Atom<'_>> {
        self.atom(self.atom_ids.index_of(id)?)
    }

    /// The live bond carrying `id`, if any.
    #[must_use]
    pub fn bond_by_unique_id(&self, id: UniqueId) -> Option<Bond<'_>> {
        self.bond(self.bond_ids.index_of(id)?)
    }

    // -- Editing --

    /// Append an atom and return its index.
    pub fn add_atom(&mut self, element: Element, position: Vec3) -> usize {
        self.elements.push(element);
        self.positions.push(position);
        let _ = self.atom_ids.push();
        self.elements.len() - 1
    }

    /// Remove the atom at `index` together with its bonds.
    ///
    /// The last atom moves into `index`; its unique id follows it.
    pub fn remove_atom(&mut self, index: usize) -> Option<RemovedAtom> {
        if index >= self.elements.len() {
            return None;
        }
        let unique_id = self.atom_ids.id_at(index);

        let mut incident: Vec<usize> = (0..self.bond_pairs.len())
            .filter(|&b| self.bond_pairs[b].contains(&index))
            .collect();
        incident.sort_unstable_by(|a, b| b.cmp(a));
        let bonds = incident
            .into_iter()
            .filter_map(|b| self.remove_bond(b))
            .collect();

        let last = self.elements.len() - 1;
        let element = self.elements.swap_remove(index);
        let position = self.positions.swap_remove(index);
        let _ = self.atom_ids.swap_remove(index);
        if index != last {
            for pair in &mut self.bond_pairs {
                for end in pair.iter_mut() {
                    if *end == last {
                        *end = index;
                    }
                }
            }
        }

        Some(RemovedAtom {
            unique_id,
            element,
            position,
            bonds,
        })
    }

    /// Put a removed atom (and its bonds) back under its original ids.
    ///
    /// Returns the new index, or `None` if the id is already live.
    pub fn restore_atom(&mut self, removed: &RemovedAtom) -> Option<usize> {
        if !self.atom_ids.restore(removed.unique_id) {
            return None;
        }
        self.elements.push(removed.element);
        self.positions.push(removed.position);
        let index = self.elements.len() - 1;
        for bond in removed.bonds.iter().rev() {
            let _ = self.restore_bond(bond);
        }
        Some(index)
    }

    /// Join atoms `a` and `b` and return the new bond index.
    pub fn add_bond(
        &mut self,
        a: usize,
        b: usize,
        order: u8,
    ) -> Result<usize, MolsceneError> {
        for atom in [a, b] {
            if atom >= self.elements.len() {
                return Err(MolsceneError::UnknownAtom(atom));
            }
        }
        if a == b {
            return Err(MolsceneError::InvalidBond(format!(
                "atom {a} cannot bond to itself"
            )));
        }
        validate_order(order)?;
        if self.bond_between(a, b).is_some() {
            return Err(MolsceneError::InvalidBond(format!(
                "atoms {a} and {b} are already bonded"
            )));
        }
        self.bond_pairs.push([a, b]);
        self.bond_orders.push(order);
        let _ = self.bond_ids.push();
        Ok(self.bond_pairs.len() - 1)
    }

    /// Remove the bond at `index`. The last bond moves into `index`.
    pub fn remove_bond(&mut self, index: usize) -> Option<RemovedBond> {
        if index >= self.bond_pairs.len() {
            return None;
        }
        let [a, b] = self.bond_pairs.swap_remove(index);
        let order = self.bond_orders.swap_remove(index);
        let unique_id = self.bond_ids.swap_remove(index);
        Some(RemovedBond {
            unique_id,
            atoms: [self.atom_ids.id_at(a), self.atom_ids.id_at(b)],
            order,
        })
    }

    /// Put a removed bond back under its original id.
    ///
    /// Returns `None` if either endpoint is gone or the id is already live.
    pub fn restore_bond(&mut self, removed: &RemovedBond) -> Option<usize> {
        let a = self.atom_ids.index_of(removed.atoms[0])?;
        let b = self.atom_ids.index_of(removed.atoms[1])?;
        if !self.bond_ids.restore(removed.unique_id) {
            return None;
        }
        self.bond_pairs.push([a, b]);
        self.bond_orders.push(removed.order);
        Some(self.bond_pairs.len() - 1)
    }

    /// Move an atom. Returns `false` if `index` is out of range.
    pub fn set_atom_position(&mut self, index: usize, position: Vec3) -> bool {
        match self.positions.get_mut(index) {
            Some(p) => {
                *p = position;
                true
            }
            None => false,
        }
    }

    /// Change an atom's element. Returns `false` if `index` is out of range.
    pub fn set_atomic_element(&mut self, index: usize, element: Element) -> bool {
        match self.elements.get_mut(index) {
            Some(e) => {
                *e = element;
                true
            }
            None => false,
        }
    }

    /// Change a bond's order.
    pub fn set_bond_order(
        &mut self,
        index: usize,
        order: u8,
    ) -> Result<(), MolsceneError> {
        validate_order(order)?;
        let slot = self
            .bond_orders
            .get_mut(index)
            .ok_or(MolsceneError::UnknownBond(index))?;
        *slot = order;
        Ok(())
    }

    /// Index of the bond joining `a` and `b`, in either direction.
    #[must_use]
    pub fn bond_between(&self, a: usize, b: usize) -> Option<usize> {
        self.bond_pairs
            .iter()
            .position(|&[x, y]| (x == a && y == b) || (x == b && y == a))
    }

    /// Remove every atom and bond. Ids keep counting up afterwards.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.positions.clear();
        self.bond_pairs.clear();
        self.bond_orders.clear();
        self.atom_ids.clear();
        self.bond_ids.clear();
    }
}

fn validate_order(order: u8) -> Result<(), MolsceneError> {
    if order == 0 || order > MAX_BOND_ORDER {
        return Err(MolsceneError::InvalidBond(format!(
            "bond order {order} outside 1..={MAX_BOND_ORDER}"
        )));
    }
    Ok(())
}

impl Default for Molecule {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a distinct instance: it gets a fresh liveness token, so
/// references taken on the original do not resolve against the copy.
impl Clone for Molecule {
    fn clone(&self) -> Self {
        Self {
            id: MoleculeId::next(),
            elements: self.elements.clone(),
            positions: self.positions.clone(),
            bond_pairs: self.bond_pairs.clone(),
            bond_orders: self.bond_orders.clone(),
            atom_ids: self.atom_ids.clone(),
            bond_ids: self.bond_ids.clone(),
        }
    }
}

impl MoleculeView for Molecule {
    fn as_view(&self) -> &dyn MoleculeView {
        self
    }

    fn atom_count(&self) -> usize {
        self.elements.len()
    }

    fn bond_count(&self) -> usize {
        self.bond_pairs.len()
    }

    fn element(&self, atom: usize) -> Option<Element> {
        self.elements.get(atom).copied()
    }

    fn position(&self, atom: usize) -> Option<Vec3> {
        self.positions.get(atom).copied()
    }

    fn bond_atoms(&self, bond: usize) -> Option<[usize; 2]> {
        self.bond_pairs.get(bond).copied()
    }

    fn bond_order(&self, bond: usize) -> Option<u8> {
        self.bond_orders.get(bond).copied()
    }

    fn unique_ids(&self) -> Option<&dyn UniqueIdSource> {
        Some(self)
    }
}

impl UniqueIdSource for Molecule {
    fn molecule_id(&self) -> MoleculeId {
        self.id
    }

    fn atom_unique_id(&self, index: usize) -> UniqueId {
        self.atom_ids.id_at(index)
    }

    fn bond_unique_id(&self, index: usize) -> UniqueId {
        self.bond_ids.id_at(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Molecule {
        let mut mol = Molecule::new();
        let h1 = mol.add_atom(Element::H, Vec3::new(-0.76, 0.59, 0.0));
        let o = mol.add_atom(Element::O, Vec3::ZERO);
        let h2 = mol.add_atom(Element::H, Vec3::new(0.76, 0.59, 0.0));
        let _ = mol.add_bond(o, h1, 1).unwrap();
        let _ = mol.add_bond(o, h2, 1).unwrap();
        mol
    }

    #[test]
    fn remove_atom_reindexes_last_atom() {
        let mut mol = water();
        let last_id = mol.atom_unique_id(2);

        let removed = mol.remove_atom(0).unwrap();
        assert_eq!(removed.element, Element::H);
        assert_eq!(removed.bonds.len(), 1);
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 1);

        // The second hydrogen moved into slot 0 and kept its id.
        assert_eq!(mol.atom_index(last_id), Some(0));
        assert_eq!(mol.element(0), Some(Element::H));
        let [a, b] = mol.bond_atoms(0).unwrap();
        assert_eq!(mol.element(a), Some(Element::O));
        assert_eq!(b, 0);
    }

    #[test]
    fn restore_atom_brings_back_ids_and_bonds() {
        let mut mol = water();
        let o_id = mol.atom_unique_id(1);
        let bond_ids: Vec<UniqueId> =
            (0..2).map(|b| mol.bond_unique_id(b)).collect();

        let removed = mol.remove_atom(1).unwrap();
        assert_eq!(mol.bond_count(), 0);

        let index = mol.restore_atom(&removed).unwrap();
        assert_eq!(mol.atom_index(o_id), Some(index));
        assert_eq!(mol.bond_count(), 2);
        for id in bond_ids {
            let bond = mol.bond_by_unique_id(id).unwrap();
            let [a, b] = bond.atoms().unwrap();
            assert!(a.index() == index || b.index() == index);
        }
        assert!(mol.restore_atom(&removed).is_none());
    }

    #[test]
    fn add_bond_rejects_bad_input() {
        let mut mol = water();
        assert!(matches!(
            mol.add_bond(0, 9, 1),
            Err(MolsceneError::UnknownAtom(9))
        ));
        assert!(matches!(
            mol.add_bond(1, 1, 1),
            Err(MolsceneError::InvalidBond(_))
        ));
        assert!(matches!(
            mol.add_bond(0, 1, 1),
            Err(MolsceneError::InvalidBond(_))
        ));
        assert!(matches!(
            mol.add_bond(0, 2, 0),
            Err(MolsceneError::InvalidBond(_))
        ));
        assert!(mol.add_bond(0, 2, 1).is_ok());
    }

    #[test]
    fn set_bond_order_validates() {
        let mut mol = water();
        assert!(mol.set_bond_order(0, 2).is_ok());
        assert_eq!(mol.bond_order(0), Some(2));
        assert!(mol.set_bond_order(0, 9).is_err());
        assert!(matches!(
            mol.set_bond_order(7, 1),
            Err(MolsceneError::UnknownBond(7))
        ));
    }

    #[test]
    fn clone_gets_fresh_token_and_same_ids() {
        let mol = water();
        let copy = mol.clone();
        assert_ne!(mol.id(), copy.id());
        assert_eq!(mol.atom_unique_id(1), copy.atom_unique_id(1));
    }

    #[test]
    fn clear_empties_but_does_not_recycle_ids() {
        let mut mol = water();
        let old = mol.atom_unique_id(0);
        mol.clear();
        assert!(mol.is_empty());
        assert_eq!(mol.bond_count(), 0);
        let _ = mol.add_atom(Element::C, Vec3::ZERO);
        assert_ne!(mol.atom_unique_id(0), old);
        assert!(mol.atom_by_unique_id(old).is_none());
    }

    #[test]
    fn view_iterates_in_storage_order() {
        let mol = water();
        let elements: Vec<Element> =
            mol.atoms().map(|a| a.element()).collect();
        assert_eq!(elements, vec![Element::H, Element::O, Element::H]);
        assert_eq!(mol.bonds().len(), 2);
        assert!(mol.unique_ids().is_some());
    }
}
