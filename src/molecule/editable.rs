//! Molecule under live edit, with an undo/redo history.
//!
//! Edits are recorded by unique id rather than index, so a history entry
//! stays meaningful after later edits reshuffle storage. Undoing a deletion
//! puts the entity back under its original id: persistent references taken
//! before the deletion resolve again.

use glam::Vec3;

use super::element::Element;
use super::unique_id::UniqueId;
use super::view::{MoleculeView, UniqueIdSource};
use super::{Molecule, RemovedAtom, RemovedBond};
use crate::error::MolsceneError;

/// One recorded edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// An atom was appended.
    AddAtom {
        /// Id assigned to the new atom.
        unique_id: UniqueId,
        /// Element of the new atom.
        element: Element,
        /// Position of the new atom.
        position: Vec3,
    },
    /// An atom (and its bonds) was removed.
    RemoveAtom(RemovedAtom),
    /// A bond was added.
    AddBond(RemovedBond),
    /// A bond was removed.
    RemoveBond(RemovedBond),
    /// An atom was moved.
    MoveAtom {
        /// Atom that moved.
        atom: UniqueId,
        /// Position before the edit.
        from: Vec3,
        /// Position after the edit.
        to: Vec3,
    },
    /// An atom's element changed.
    SetElement {
        /// Atom that changed.
        atom: UniqueId,
        /// Element before the edit.
        from: Element,
        /// Element after the edit.
        to: Element,
    },
    /// A bond's order changed.
    SetBondOrder {
        /// Bond that changed.
        bond: UniqueId,
        /// Order before the edit.
        from: u8,
        /// Order after the edit.
        to: u8,
    },
}

/// A [`Molecule`] plus the history of edits applied to it.
///
/// Shares the wrapped molecule's liveness token, so persistent references
/// resolve against [`EditableMolecule::molecule`].
#[derive(Debug, Clone, Default)]
pub struct EditableMolecule {
    molecule: Molecule,
    undo: Vec<Vec<EditCommand>>,
    redo: Vec<Vec<EditCommand>>,
    /// Open group while an interactive edit (e.g. a drag) is running.
    interactive: Option<Vec<EditCommand>>,
}

impl EditableMolecule {
    /// Start editing `molecule` with an empty history.
    #[must_use]
    pub fn new(molecule: Molecule) -> Self {
        Self {
            molecule,
            undo: Vec::new(),
            redo: Vec::new(),
            interactive: None,
        }
    }

    /// The molecule in its current edited state.
    #[must_use]
    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    /// Commit: drop the history and hand back the molecule.
    #[must_use]
    pub fn into_molecule(self) -> Molecule {
        self.molecule
    }

    /// Whether any edit is recorded.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        !self.undo.is_empty()
            || self.interactive.as_ref().is_some_and(|g| !g.is_empty())
    }

    /// Whether [`EditableMolecule::undo`] would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether [`EditableMolecule::redo`] would do anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    // -- Interactive grouping --

    /// Start grouping edits into one history entry. Consecutive moves of
    /// the same atom collapse into one.
    pub fn begin_interactive(&mut self) {
        if self.interactive.is_none() {
            self.interactive = Some(Vec::new());
        }
    }

    /// Close the open group and push it onto the history.
    pub fn end_interactive(&mut self) {
        if let Some(group) = self.interactive.take() {
            if !group.is_empty() {
                self.undo.push(group);
            }
        }
    }

    /// Whether an interactive group is open.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive.is_some()
    }

    // -- Edits --

    /// Append an atom and return its index.
    pub fn add_atom(&mut self, element: Element, position: Vec3) -> usize {
        let index = self.molecule.add_atom(element, position);
        self.record(EditCommand::AddAtom {
            unique_id: self.molecule.atom_unique_id(index),
            element,
            position,
        });
        index
    }

    /// Remove an atom and its bonds. Returns `false` if `index` is out of
    /// range.
    pub fn remove_atom(&mut self, index: usize) -> bool {
        match self.molecule.remove_atom(index) {
            Some(removed) => {
                self.record(EditCommand::RemoveAtom(removed));
                true
            }
            None => false,
        }
    }

    /// Join two atoms and return the new bond index.
    pub fn add_bond(
        &mut self,
        a: usize,
        b: usize,
        order: u8,
    ) -> Result<usize, MolsceneError> {
        let index = self.molecule.add_bond(a, b, order)?;
        self.record(EditCommand::AddBond(RemovedBond {
            unique_id: self.molecule.bond_unique_id(index),
            atoms: [
                self.molecule.atom_unique_id(a),
                self.molecule.atom_unique_id(b),
            ],
            order,
        }));
        Ok(index)
    }

    /// Remove a bond. Returns `false` if `index` is out of range.
    pub fn remove_bond(&mut self, index: usize) -> bool {
        match self.molecule.remove_bond(index) {
            Some(removed) => {
                self.record(EditCommand::RemoveBond(removed));
                true
            }
            None => false,
        }
    }

    /// Move an atom. Returns `false` if `index` is out of range.
    pub fn set_atom_position(&mut self, index: usize, position: Vec3) -> bool {
        let Some(from) = self.molecule.position(index) else {
            return false;
        };
        let _ = self.molecule.set_atom_position(index, position);
        self.record(EditCommand::MoveAtom {
            atom: self.molecule.atom_unique_id(index),
            from,
            to: position,
        });
        true
    }

    /// Change an atom's element. Returns `false` if `index` is out of range.
    pub fn set_atomic_element(&mut self, index: usize, element: Element) -> bool {
        let Some(from) = self.molecule.element(index) else {
            return false;
        };
        let _ = self.molecule.set_atomic_element(index, element);
        self.record(EditCommand::SetElement {
            atom: self.molecule.atom_unique_id(index),
            from,
            to: element,
        });
        true
    }

    /// Change a bond's order.
    pub fn set_bond_order(
        &mut self,
        index: usize,
        order: u8,
    ) -> Result<(), MolsceneError> {
        let from = self
            .molecule
            .bond_order(index)
            .ok_or(MolsceneError::UnknownBond(index))?;
        self.molecule.set_bond_order(index, order)?;
        self.record(EditCommand::SetBondOrder {
            bond: self.molecule.bond_unique_id(index),
            from,
            to: order,
        });
        Ok(())
    }

    // -- History --

    /// Revert the most recent history entry.
    pub fn undo(&mut self) -> Result<(), MolsceneError> {
        self.end_interactive();
        let mut group = self.undo.pop().ok_or(MolsceneError::NothingToUndo)?;
        for command in group.iter_mut().rev() {
            if !revert(&mut self.molecule, command) {
                log::warn!("undo could not revert {command:?}");
            }
        }
        self.redo.push(group);
        Ok(())
    }

    /// Re-apply the most recently undone entry.
    pub fn redo(&mut self) -> Result<(), MolsceneError> {
        let mut group = self.redo.pop().ok_or(MolsceneError::NothingToRedo)?;
        for command in &mut group {
            if !reapply(&mut self.molecule, command) {
                log::warn!("redo could not reapply {command:?}");
            }
        }
        self.undo.push(group);
        Ok(())
    }

    fn record(&mut self, command: EditCommand) {
        self.redo.clear();
        let Some(group) = self.interactive.as_mut() else {
            self.undo.push(vec![command]);
            return;
        };
        if let (
            Some(EditCommand::MoveAtom { atom: prev, to: prev_to, .. }),
            EditCommand::MoveAtom { atom, to, .. },
        ) = (group.last_mut(), &command)
        {
            if prev == atom {
                *prev_to = *to;
                return;
            }
        }
        group.push(command);
    }
}

impl From<Molecule> for EditableMolecule {
    fn from(molecule: Molecule) -> Self {
        Self::new(molecule)
    }
}

/// Undo one command. `RemoveAtom` is refreshed on the way back so a later
/// redo removes exactly what is live.
fn revert(molecule: &mut Molecule, command: &mut EditCommand) -> bool {
    match command {
        EditCommand::AddAtom { unique_id, .. } => molecule
            .atom_index(*unique_id)
            .and_then(|i| molecule.remove_atom(i))
            .is_some(),
        EditCommand::RemoveAtom(removed) => {
            molecule.restore_atom(removed).is_some()
        }
        EditCommand::AddBond(bond) => molecule
            .bond_index(bond.unique_id)
            .and_then(|i| molecule.remove_bond(i))
            .is_some(),
        EditCommand::RemoveBond(bond) => molecule.restore_bond(bond).is_some(),
        EditCommand::MoveAtom { atom, from, .. } => molecule
            .atom_index(*atom)
            .is_some_and(|i| molecule.set_atom_position(i, *from)),
        EditCommand::SetElement { atom, from, .. } => molecule
            .atom_index(*atom)
            .is_some_and(|i| molecule.set_atomic_element(i, *from)),
        EditCommand::SetBondOrder { bond, from, .. } => molecule
            .bond_index(*bond)
            .is_some_and(|i| molecule.set_bond_order(i, *from).is_ok()),
    }
}

/// Redo one command.
fn reapply(molecule: &mut Molecule, command: &mut EditCommand) -> bool {
    match command {
        EditCommand::AddAtom {
            unique_id,
            element,
            position,
        } => molecule
            .restore_atom(&RemovedAtom {
                unique_id: *unique_id,
                element: *element,
                position: *position,
                bonds: Vec::new(),
            })
            .is_some(),
        EditCommand::RemoveAtom(removed) => {
            match molecule
                .atom_index(removed.unique_id)
                .and_then(|i| molecule.remove_atom(i))
            {
                Some(fresh) => {
                    *removed = fresh;
                    true
                }
                None => false,
            }
        }
        EditCommand::AddBond(bond) => molecule.restore_bond(bond).is_some(),
        EditCommand::RemoveBond(bond) => molecule
            .bond_index(bond.unique_id)
            .and_then(|i| molecule.remove_bond(i))
            .is_some(),
        EditCommand::MoveAtom { atom, to, .. } => molecule
            .atom_index(*atom)
            .is_some_and(|i| molecule.set_atom_position(i, *to)),
        EditCommand::SetElement { atom, to, .. } => molecule
            .atom_index(*atom)
            .is_some_and(|i| molecule.set_atomic_element(i, *to)),
        EditCommand::SetBondOrder { bond, to, .. } => molecule
            .bond_index(*bond)
            .is_some_and(|i| molecule.set_bond_order(i, *to).is_ok()),
    }
}

impl MoleculeView for EditableMolecule {
    fn as_view(&self) -> &dyn MoleculeView {
        self
    }

    fn atom_count(&self) -> usize {
        self.molecule.atom_count()
    }

    fn bond_count(&self) -> usize {
        self.molecule.bond_count()
    }

    fn element(&self, atom: usize) -> Option<Element> {
        self.molecule.element(atom)
    }

    fn position(&self, atom: usize) -> Option<Vec3> {
        self.molecule.position(atom)
    }

    fn bond_atoms(&self, bond: usize) -> Option<[usize; 2]> {
        self.molecule.bond_atoms(bond)
    }

    fn bond_order(&self, bond: usize) -> Option<u8> {
        self.molecule.bond_order(bond)
    }

    fn unique_ids(&self) -> Option<&dyn UniqueIdSource> {
        Some(&self.molecule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ethene() -> EditableMolecule {
        let mut mol = Molecule::new();
        let a = mol.add_atom(Element::C, Vec3::ZERO);
        let b = mol.add_atom(Element::C, Vec3::new(1.33, 0.0, 0.0));
        let _ = mol.add_bond(a, b, 2).unwrap();
        EditableMolecule::new(mol)
    }

    #[test]
    fn undo_remove_atom_restores_ids() {
        let mut edit = ethene();
        let id = edit.molecule().atom_unique_id(0);
        let bond_id = edit.molecule().bond_unique_id(0);

        assert!(edit.remove_atom(0));
        assert!(edit.molecule().atom_by_unique_id(id).is_none());
        assert!(edit.molecule().bond_by_unique_id(bond_id).is_none());

        edit.undo().unwrap();
        assert!(edit.molecule().atom_by_unique_id(id).is_some());
        let bond = edit.molecule().bond_by_unique_id(bond_id).unwrap();
        assert_eq!(bond.order(), 2);

        edit.redo().unwrap();
        assert!(edit.molecule().atom_by_unique_id(id).is_none());
        assert_eq!(edit.atom_count(), 1);
    }

    #[test]
    fn undo_add_atom_then_redo_keeps_id() {
        let mut edit = ethene();
        let index = edit.add_atom(Element::H, Vec3::Y);
        let id = edit.molecule().atom_unique_id(index);

        edit.undo().unwrap();
        assert_eq!(edit.atom_count(), 2);
        edit.redo().unwrap();
        assert_eq!(edit.molecule().atom_index(id), Some(2));
    }

    #[test]
    fn interactive_moves_collapse() {
        let mut edit = ethene();
        edit.begin_interactive();
        for step in 1..=5 {
            assert!(edit.set_atom_position(1, Vec3::splat(step as f32)));
        }
        edit.end_interactive();
        assert_eq!(edit.undo.len(), 1);
        assert_eq!(edit.undo[0].len(), 1);

        edit.undo().unwrap();
        assert_eq!(edit.position(1), Some(Vec3::new(1.33, 0.0, 0.0)));
        assert!(!edit.can_undo());
        assert!(edit.can_redo());
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut edit = ethene();
        edit.set_bond_order(0, 1).unwrap();
        edit.undo().unwrap();
        assert_eq!(edit.bond_order(0), Some(2));
        assert!(edit.can_redo());
        let _ = edit.add_atom(Element::O, Vec3::Z);
        assert!(!edit.can_redo());
    }

    #[test]
    fn empty_history_errors() {
        let mut edit = ethene();
        assert!(!edit.is_modified());
        assert!(matches!(edit.undo(), Err(MolsceneError::NothingToUndo)));
        assert!(matches!(edit.redo(), Err(MolsceneError::NothingToRedo)));
    }

    #[test]
    fn shares_token_with_wrapped_molecule() {
        let edit = ethene();
        let token = edit.molecule().id();
        let ids = edit.unique_ids().unwrap();
        assert_eq!(ids.molecule_id(), token);
        assert_eq!(edit.into_molecule().id(), token);
    }
}
