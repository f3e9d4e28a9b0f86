//! Persistent references to atoms and bonds.
//!
//! A [`PersistentRef`] pairs a molecule's liveness token with an entity's
//! unique id. It never caches a storage index: every resolution asks the
//! molecule's registry again, so the handle follows its entity through
//! insertions, deletions and reindexing, and resolves to `None` once the
//! entity is gone or when resolved against a different molecule.
//!
//! ```
//! use glam::Vec3;
//! use molscene::molecule::{Element, Molecule, MoleculeView};
//! use molscene::persistent::PersistentAtom;
//!
//! let mut mol = Molecule::new();
//! let _ = mol.add_atom(Element::H, Vec3::ZERO);
//! let o = mol.add_atom(Element::O, Vec3::X);
//! let picked = PersistentAtom::from_atom(&mol.atom(o).unwrap());
//!
//! let _ = mol.remove_atom(0); // oxygen moves to index 0
//! assert_eq!(picked.atom(&mol).unwrap().index(), 0);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::molecule::{
    Atom, Bond, Molecule, MoleculeId, MoleculeView, UniqueId, UniqueIdSource,
};

/// The kind of entity a [`PersistentRef`] points at.
pub trait EntityKind {
    /// Live handle the reference resolves to.
    type Entity<'m>;

    /// Human-readable kind name.
    const NAME: &'static str;

    /// Molecule view and current index of a live handle.
    fn locate<'m>(entity: &Self::Entity<'m>) -> (&'m dyn MoleculeView, usize);

    /// Unique id of the entity at `index` in `source`.
    fn unique_id(source: &dyn UniqueIdSource, index: usize) -> UniqueId;

    /// Live entity carrying `id`, if any.
    fn lookup(molecule: &Molecule, id: UniqueId) -> Option<Self::Entity<'_>>;
}

/// Marker for atom references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {}

/// Marker for bond references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondKind {}

impl EntityKind for AtomKind {
    type Entity<'m> = Atom<'m>;

    const NAME: &'static str = "atom";

    fn locate<'m>(
        entity: &Self::Entity<'m>,
    ) -> (&'m dyn MoleculeView, usize) {
        (entity.molecule(), entity.index())
    }

    fn unique_id(source: &dyn UniqueIdSource, index: usize) -> UniqueId {
        source.atom_unique_id(index)
    }

    fn lookup(molecule: &Molecule, id: UniqueId) -> Option<Self::Entity<'_>> {
        molecule.atom_by_unique_id(id)
    }
}

impl EntityKind for BondKind {
    type Entity<'m> = Bond<'m>;

    const NAME: &'static str = "bond";

    fn locate<'m>(
        entity: &Self::Entity<'m>,
    ) -> (&'m dyn MoleculeView, usize) {
        (entity.molecule(), entity.index())
    }

    fn unique_id(source: &dyn UniqueIdSource, index: usize) -> UniqueId {
        source.bond_unique_id(index)
    }

    fn lookup(molecule: &Molecule, id: UniqueId) -> Option<Self::Entity<'_>> {
        molecule.bond_by_unique_id(id)
    }
}

/// Stable handle to an atom or bond: `(molecule token, unique id)`.
pub struct PersistentRef<K> {
    molecule: Option<MoleculeId>,
    unique_id: UniqueId,
    kind: PhantomData<fn() -> K>,
}

/// Persistent reference to an atom.
pub type PersistentAtom = PersistentRef<AtomKind>;

/// Persistent reference to a bond.
pub type PersistentBond = PersistentRef<BondKind>;

impl<K: EntityKind> PersistentRef<K> {
    /// Store `molecule` and `unique_id` verbatim. Never validates.
    #[must_use]
    pub const fn new(molecule: Option<MoleculeId>, unique_id: UniqueId) -> Self {
        Self {
            molecule,
            unique_id,
            kind: PhantomData,
        }
    }

    /// Reference the entity behind a live handle.
    ///
    /// If the handle's molecule keeps no unique ids the result is an empty
    /// reference.
    #[must_use]
    pub fn from_entity(entity: &K::Entity<'_>) -> Self {
        let mut reference = Self::default();
        reference.set_entity(entity);
        reference
    }

    /// Point at `unique_id` in `molecule`.
    pub fn set(&mut self, molecule: Option<MoleculeId>, unique_id: UniqueId) {
        self.molecule = molecule;
        self.unique_id = unique_id;
    }

    /// Point at the entity behind a live handle.
    pub fn set_entity(&mut self, entity: &K::Entity<'_>) {
        let (view, index) = K::locate(entity);
        match view.unique_ids() {
            Some(source) => {
                let id = K::unique_id(source, index);
                self.set(Some(source.molecule_id()), id);
            }
            None => self.reset(),
        }
    }

    /// Make the reference empty.
    pub fn reset(&mut self) {
        self.set(None, UniqueId::INVALID);
    }

    /// Whether no molecule or no id is stored. An empty reference never
    /// resolves; a non-empty one may still fail to.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.molecule.is_none() || !self.unique_id.is_valid()
    }

    /// Whether the reference currently resolves in `molecule`.
    #[must_use]
    pub fn is_valid(&self, molecule: &Molecule) -> bool {
        self.resolve(molecule).is_some()
    }

    /// The live entity currently carrying the stored id.
    ///
    /// `None` if the reference is empty, belongs to another molecule, or
    /// the entity has been deleted.
    #[must_use]
    pub fn resolve<'m>(&self, molecule: &'m Molecule) -> Option<K::Entity<'m>> {
        if self.is_empty() || self.molecule != Some(molecule.id()) {
            return None;
        }
        K::lookup(molecule, self.unique_id)
    }

    /// Token of the molecule the reference belongs to.
    #[must_use]
    pub fn molecule(&self) -> Option<MoleculeId> {
        self.molecule
    }

    /// The stored unique id.
    #[must_use]
    pub fn unique_identifier(&self) -> UniqueId {
        self.unique_id
    }
}

impl PersistentAtom {
    /// Reference the given atom.
    #[must_use]
    pub fn from_atom(atom: &Atom<'_>) -> Self {
        Self::from_entity(atom)
    }

    /// Point at the given atom.
    pub fn set_atom(&mut self, atom: &Atom<'_>) {
        self.set_entity(atom);
    }

    /// Resolve to the live atom.
    #[must_use]
    pub fn atom<'m>(&self, molecule: &'m Molecule) -> Option<Atom<'m>> {
        self.resolve(molecule)
    }
}

impl PersistentBond {
    /// Reference the given bond.
    #[must_use]
    pub fn from_bond(bond: &Bond<'_>) -> Self {
        Self::from_entity(bond)
    }

    /// Point at the given bond.
    pub fn set_bond(&mut self, bond: &Bond<'_>) {
        self.set_entity(bond);
    }

    /// Resolve to the live bond.
    #[must_use]
    pub fn bond<'m>(&self, molecule: &'m Molecule) -> Option<Bond<'m>> {
        self.resolve(molecule)
    }
}

impl<K> Default for PersistentRef<K> {
    fn default() -> Self {
        Self {
            molecule: None,
            unique_id: UniqueId::INVALID,
            kind: PhantomData,
        }
    }
}

impl<K> Clone for PersistentRef<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for PersistentRef<K> {}

impl<K> PartialEq for PersistentRef<K> {
    fn eq(&self, other: &Self) -> bool {
        self.molecule == other.molecule && self.unique_id == other.unique_id
    }
}

impl<K> Eq for PersistentRef<K> {}

impl<K> Hash for PersistentRef<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.molecule.hash(state);
        self.unique_id.hash(state);
    }
}

impl<K: EntityKind> fmt::Debug for PersistentRef<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentRef")
            .field("kind", &K::NAME)
            .field("molecule", &self.molecule)
            .field("unique_id", &self.unique_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::molecule::{EditableMolecule, Element, Structure};

    fn chain(n: usize) -> Molecule {
        let mut mol = Molecule::new();
        for i in 0..n {
            let _ = mol.add_atom(Element::C, Vec3::new(i as f32, 0.0, 0.0));
            if i > 0 {
                let _ = mol.add_bond(i - 1, i, 1).unwrap();
            }
        }
        mol
    }

    #[test]
    fn default_reference_is_invalid() {
        let mol = chain(3);
        let reference = PersistentAtom::default();
        assert!(reference.is_empty());
        assert!(!reference.is_valid(&mol));
        assert!(reference.molecule().is_none());
        assert_eq!(reference.unique_identifier(), UniqueId::INVALID);
    }

    #[test]
    fn sentinel_id_never_falls_back_to_index_zero() {
        let mol = chain(3);
        let reference = PersistentAtom::new(Some(mol.id()), UniqueId::INVALID);
        assert!(reference.atom(&mol).is_none());
    }

    #[test]
    fn follows_atom_through_random_edits() {
        let mut mol = chain(20);
        let marker = Vec3::new(100.0, 0.0, 0.0);
        assert!(mol.set_atom_position(5, marker));
        assert!(mol.set_atomic_element(5, Element::N));
        let reference = PersistentAtom::from_atom(&mol.atom(5).unwrap());

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..300 {
            let n = mol.atom_count();
            let target = reference.atom(&mol).unwrap().index();
            match rng.random_range(0..4) {
                0 => {
                    let _ = mol.add_atom(Element::O, Vec3::splat(rng.random()));
                }
                1 if n > 1 => {
                    let victim = rng.random_range(0..n);
                    if victim != target {
                        let _ = mol.remove_atom(victim);
                    }
                }
                2 if n > 1 => {
                    let _ = mol.add_bond(
                        rng.random_range(0..n),
                        rng.random_range(0..n),
                        1,
                    );
                }
                _ if mol.bond_count() > 0 => {
                    let bond = rng.random_range(0..mol.bond_count());
                    let _ = mol.remove_bond(bond);
                }
                _ => {}
            }

            let atom = reference.atom(&mol).unwrap();
            assert_eq!(atom.position(), marker);
            assert_eq!(atom.element(), Element::N);
        }
    }

    #[test]
    fn deletion_invalidates_for_good() {
        let mut mol = chain(10);
        let id = mol.atom_unique_id(7);
        assert_eq!(id, UniqueId::new(7));
        let reference = PersistentAtom::from_atom(&mol.atom(7).unwrap());

        let _ = mol.remove_atom(7);
        assert!(!reference.is_valid(&mol));

        // Later atoms never receive the released id.
        for _ in 0..20 {
            let index = mol.add_atom(Element::S, Vec3::ZERO);
            assert_ne!(mol.atom_unique_id(index), id);
            assert!(!reference.is_valid(&mol));
        }
    }

    #[test]
    fn bond_reference_survives_reindexing() {
        let mut mol = chain(4);
        let reference = PersistentBond::from_bond(&mol.bond(2).unwrap());
        let _ = mol.remove_bond(0);
        let bond = reference.bond(&mol).unwrap();
        assert_eq!(bond.index(), 0);
        let [a, b] = bond.atoms().unwrap();
        assert_eq!((a.index(), b.index()), (2, 3));

        let _ = mol.remove_atom(3);
        assert!(reference.bond(&mol).is_none());
    }

    #[test]
    fn other_molecule_does_not_resolve() {
        let mol = chain(3);
        let reference = PersistentAtom::from_atom(&mol.atom(0).unwrap());
        let copy = mol.clone();
        assert!(reference.is_valid(&mol));
        assert!(!reference.is_valid(&copy));

        drop(mol);
        let fresh = chain(3);
        assert!(!reference.is_valid(&fresh));
    }

    #[test]
    fn structure_atoms_give_empty_references() {
        let frame = Structure::from(&chain(2));
        let atom = frame.atom(1).unwrap();
        let reference = PersistentAtom::from_atom(&atom);
        assert!(reference.is_empty());
        assert_eq!(reference, PersistentAtom::default());
    }

    #[test]
    fn set_and_reset_reuse_the_handle() {
        let mol = chain(3);
        let mut reference = PersistentAtom::default();
        reference.set_atom(&mol.atom(2).unwrap());
        assert_eq!(reference.atom(&mol).unwrap().index(), 2);

        reference.set(Some(mol.id()), mol.atom_unique_id(0));
        assert_eq!(reference.atom(&mol).unwrap().index(), 0);

        reference.reset();
        assert!(!reference.is_valid(&mol));
    }

    #[test]
    fn undo_revives_reference() {
        let mut edit = EditableMolecule::new(chain(3));
        let reference =
            PersistentAtom::from_atom(&edit.molecule().atom(1).unwrap());
        assert!(edit.remove_atom(1));
        assert!(!reference.is_valid(edit.molecule()));
        edit.undo().unwrap();
        assert!(reference.is_valid(edit.molecule()));
    }

    #[test]
    fn locate_reports_view_and_index() {
        let mol = chain(3);
        let atom = mol.atom(2).unwrap();
        let (view, index) = AtomKind::locate(&atom);
        assert_eq!(index, 2);
        assert_eq!(view.atom_count(), 3);

        let bond = mol.bond(1).unwrap();
        let (view, index) = BondKind::locate(&bond);
        assert_eq!(index, 1);
        assert_eq!(view.bond_count(), 2);
    }

    #[test]
    fn references_hash_by_identity() {
        use rustc_hash::FxHashSet;

        let mol = chain(3);
        let mut set = FxHashSet::default();
        for atom in mol.atoms() {
            let _ = set.insert(PersistentAtom::from_atom(&atom));
        }
        let _ = set.insert(PersistentAtom::from_atom(&mol.atom(0).unwrap()));
        assert_eq!(set.len(), 3);
    }
}
