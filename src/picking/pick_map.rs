//! Typed pick-target resolution from raw GPU pick IDs.

use crate::molecule::{MoleculeId, UniqueId};
use crate::persistent::{PersistentAtom, PersistentBond};
use crate::scene::{EntityTag, GroupNode};

/// A typed pick target resolved from a raw GPU pick ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickTarget {
    /// No target (background click, or a primitive without identity).
    None,
    /// An atom, identified by its molecule and unique id.
    Atom {
        /// Owning molecule.
        molecule: MoleculeId,
        /// Unique id of the atom.
        unique_id: UniqueId,
    },
    /// A bond, identified by its molecule and unique id.
    Bond {
        /// Owning molecule.
        molecule: MoleculeId,
        /// Unique id of the bond.
        unique_id: UniqueId,
    },
}

impl PickTarget {
    /// Returns `true` if this target is `None`.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Persistent reference to the picked atom. Empty unless this is an atom.
    #[must_use]
    pub fn to_persistent_atom(&self) -> PersistentAtom {
        match *self {
            Self::Atom {
                molecule,
                unique_id,
            } => PersistentAtom::new(Some(molecule), unique_id),
            _ => PersistentAtom::default(),
        }
    }

    /// Persistent reference to the picked bond. Empty unless this is a bond.
    #[must_use]
    pub fn to_persistent_bond(&self) -> PersistentBond {
        match *self {
            Self::Bond {
                molecule,
                unique_id,
            } => PersistentBond::new(Some(molecule), unique_id),
            _ => PersistentBond::default(),
        }
    }

    fn from_tag(molecule: Option<MoleculeId>, tag: EntityTag) -> Self {
        let Some(molecule) = molecule else {
            return Self::None;
        };
        match tag {
            EntityTag::Atom(unique_id) if unique_id.is_valid() => Self::Atom {
                molecule,
                unique_id,
            },
            EntityTag::Bond(unique_id) if unique_id.is_valid() => Self::Bond {
                molecule,
                unique_id,
            },
            _ => Self::None,
        }
    }
}

/// Maps raw GPU pick IDs to typed [`PickTarget`] values.
///
/// Pick IDs are contiguous and 1-based, in the depth-first primitive order
/// of the scene (see [`crate::scene::PreparedInstances::from_root`]):
/// - `0` → no hit
/// - `n` → the `n`-th primitive
#[derive(Debug, Clone, Default)]
pub struct PickMap {
    entries: Vec<PickTarget>,
}

impl PickMap {
    /// Build the map for the current scene.
    #[must_use]
    pub fn from_root(root: &GroupNode) -> Self {
        Self {
            entries: root
                .primitives()
                .map(|(molecule, p)| PickTarget::from_tag(molecule, p.tag()))
                .collect(),
        }
    }

    /// Resolve a raw pick ID (as read from the GPU picking buffer) to a typed
    /// target.
    #[must_use]
    pub fn resolve(&self, raw_id: u32) -> PickTarget {
        if raw_id == 0 {
            return PickTarget::None;
        }
        let idx = (raw_id - 1) as usize; // pick IDs are 1-based
        self.entries.get(idx).copied().unwrap_or(PickTarget::None)
    }

    /// Number of pickable slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
