//! Read-only molecule surface shared by every molecule representation.
//!
//! Scene plugins and persistent references only talk to molecules through
//! [`MoleculeView`]. Whether a view can hand out stable identities is a
//! capability query ([`MoleculeView::unique_ids`]), not a type check.

use std::fmt;

use glam::Vec3;

use super::element::Element;
use super::unique_id::UniqueId;
use super::MoleculeId;

/// Read-only topology and geometry of a molecule.
pub trait MoleculeView {
    /// Upcast to a trait object. Implementations return `self`.
    fn as_view(&self) -> &dyn MoleculeView;

    /// Number of atoms.
    fn atom_count(&self) -> usize;

    /// Number of bonds.
    fn bond_count(&self) -> usize;

    /// Element of the atom at `atom`.
    fn element(&self, atom: usize) -> Option<Element>;

    /// Position of the atom at `atom`, in angstroms.
    fn position(&self, atom: usize) -> Option<Vec3>;

    /// Atom indices joined by the bond at `bond`.
    fn bond_atoms(&self, bond: usize) -> Option<[usize; 2]>;

    /// Order (multiplicity) of the bond at `bond`.
    fn bond_order(&self, bond: usize) -> Option<u8>;

    /// Identity registry, if this view supports persistent references.
    fn unique_ids(&self) -> Option<&dyn UniqueIdSource> {
        None
    }

    /// Atom handle for `index`.
    fn atom(&self, index: usize) -> Option<Atom<'_>> {
        Atom::new(self.as_view(), index)
    }

    /// Bond handle for `index`.
    fn bond(&self, index: usize) -> Option<Bond<'_>> {
        Bond::new(self.as_view(), index)
    }

    /// Atoms in storage order.
    fn atoms(&self) -> Atoms<'_> {
        Atoms {
            molecule: self.as_view(),
            next: 0,
            end: self.atom_count(),
        }
    }

    /// Bonds in storage order.
    fn bonds(&self) -> Bonds<'_> {
        Bonds {
            molecule: self.as_view(),
            next: 0,
            end: self.bond_count(),
        }
    }
}

/// Identity lookups offered by molecules that keep unique-id registries.
pub trait UniqueIdSource {
    /// Liveness token of the molecule instance.
    fn molecule_id(&self) -> MoleculeId;

    /// Unique id of the atom at `index`, or [`UniqueId::INVALID`].
    fn atom_unique_id(&self, index: usize) -> UniqueId;

    /// Unique id of the bond at `index`, or [`UniqueId::INVALID`].
    fn bond_unique_id(&self, index: usize) -> UniqueId;
}

/// Borrowed handle to a live atom.
#[derive(Clone, Copy)]
pub struct Atom<'m> {
    molecule: &'m dyn MoleculeView,
    index: usize,
}

impl<'m> Atom<'m> {
    /// Handle for `index`, or `None` if out of range.
    #[must_use]
    pub fn new(molecule: &'m dyn MoleculeView, index: usize) -> Option<Self> {
        (index < molecule.atom_count()).then_some(Self { molecule, index })
    }

    /// Molecule the atom lives in.
    #[must_use]
    pub fn molecule(&self) -> &'m dyn MoleculeView {
        self.molecule
    }

    /// Current storage index. Not stable across edits.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Element of the atom.
    #[must_use]
    pub fn element(&self) -> Element {
        self.molecule.element(self.index).unwrap_or_default()
    }

    /// Position of the atom.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.molecule.position(self.index).unwrap_or(Vec3::NAN)
    }

    /// Unique id, or [`UniqueId::INVALID`] if the molecule has no registry.
    #[must_use]
    pub fn unique_id(&self) -> UniqueId {
        self.molecule
            .unique_ids()
            .map_or(UniqueId::INVALID, |ids| ids.atom_unique_id(self.index))
    }
}

impl PartialEq for Atom<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.molecule, other.molecule)
            && self.index == other.index
    }
}

impl Eq for Atom<'_> {}

impl fmt::Debug for Atom<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Atom")
            .field("index", &self.index)
            .field("element", &self.element())
            .field("unique_id", &self.unique_id())
            .finish()
    }
}

/// Borrowed handle to a live bond.
#[derive(Clone, Copy)]
pub struct Bond<'m> {
    molecule: &'m dyn MoleculeView,
    index: usize,
}

impl<'m> Bond<'m> {
    /// Handle for `index`, or `None` if out of range.
    #[must_use]
    pub fn new(molecule: &'m dyn MoleculeView, index: usize) -> Option<Self> {
        (index < molecule.bond_count()).then_some(Self { molecule, index })
    }

    /// Molecule the bond lives in.
    #[must_use]
    pub fn molecule(&self) -> &'m dyn MoleculeView {
        self.molecule
    }

    /// Current storage index. Not stable across edits.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Both endpoint atoms.
    #[must_use]
    pub fn atoms(&self) -> Option<[Atom<'m>; 2]> {
        let [a, b] = self.molecule.bond_atoms(self.index)?;
        Some([Atom::new(self.molecule, a)?, Atom::new(self.molecule, b)?])
    }

    /// Bond order (1 = single, 2 = double, 3 = triple).
    #[must_use]
    pub fn order(&self) -> u8 {
        self.molecule.bond_order(self.index).unwrap_or(1)
    }

    /// Unique id, or [`UniqueId::INVALID`] if the molecule has no registry.
    #[must_use]
    pub fn unique_id(&self) -> UniqueId {
        self.molecule
            .unique_ids()
            .map_or(UniqueId::INVALID, |ids| ids.bond_unique_id(self.index))
    }
}

impl PartialEq for Bond<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.molecule, other.molecule)
            && self.index == other.index
    }
}

impl Eq for Bond<'_> {}

impl fmt::Debug for Bond<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bond")
            .field("index", &self.index)
            .field("atoms", &self.molecule.bond_atoms(self.index))
            .field("order", &self.order())
            .field("unique_id", &self.unique_id())
            .finish()
    }
}

/// Iterator over the atoms of a view.
pub struct Atoms<'m> {
    molecule: &'m dyn MoleculeView,
    next: usize,
    end: usize,
}

impl<'m> Iterator for Atoms<'m> {
    type Item = Atom<'m>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let atom = Atom {
            molecule: self.molecule,
            index: self.next,
        };
        self.next += 1;
        Some(atom)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end.saturating_sub(self.next);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Atoms<'_> {}

/// Iterator over the bonds of a view.
pub struct Bonds<'m> {
    molecule: &'m dyn MoleculeView,
    next: usize,
    end: usize,
}

impl<'m> Iterator for Bonds<'m> {
    type Item = Bond<'m>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let bond = Bond {
            molecule: self.molecule,
            index: self.next,
        };
        self.next += 1;
        Some(bond)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end.saturating_sub(self.next);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Bonds<'_> {}
