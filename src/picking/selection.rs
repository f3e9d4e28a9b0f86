use rustc_hash::FxHashSet;

use super::PickTarget;
use crate::molecule::Molecule;
use crate::persistent::{PersistentAtom, PersistentBond};

/// How a click combines with the existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectMode {
    /// Replace the selection with the target.
    #[default]
    Replace,
    /// Add the target.
    Add,
    /// Add the target if absent, remove it otherwise.
    Toggle,
}

/// Selected atoms and bonds, held as persistent references so the selection
/// survives edits that reindex the molecule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    atoms: FxHashSet<PersistentAtom>,
    bonds: FxHashSet<PersistentBond>,
}

impl Selection {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a pick. Picking nothing in [`SelectMode::Replace`] clears the
    /// selection; in the other modes it is a no-op.
    pub fn select(&mut self, target: PickTarget, mode: SelectMode) {
        if mode == SelectMode::Replace {
            self.clear();
        }
        match target {
            PickTarget::None => {}
            PickTarget::Atom { .. } => {
                toggle_or_insert(
                    &mut self.atoms,
                    target.to_persistent_atom(),
                    mode,
                );
            }
            PickTarget::Bond { .. } => {
                toggle_or_insert(
                    &mut self.bonds,
                    target.to_persistent_bond(),
                    mode,
                );
            }
        }
    }

    /// Whether `atom` is selected.
    #[must_use]
    pub fn contains_atom(&self, atom: &PersistentAtom) -> bool {
        self.atoms.contains(atom)
    }

    /// Whether `bond` is selected.
    #[must_use]
    pub fn contains_bond(&self, bond: &PersistentBond) -> bool {
        self.bonds.contains(bond)
    }

    /// Selected atom references, in no particular order.
    pub fn atoms(&self) -> impl Iterator<Item = &PersistentAtom> {
        self.atoms.iter()
    }

    /// Selected bond references, in no particular order.
    pub fn bonds(&self) -> impl Iterator<Item = &PersistentBond> {
        self.bonds.iter()
    }

    /// Number of selected entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len() + self.bonds.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.bonds.is_empty()
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.atoms.clear();
        self.bonds.clear();
    }

    /// Drop entries that no longer resolve in `molecule`. Returns how many
    /// were dropped.
    pub fn prune(&mut self, molecule: &Molecule) -> usize {
        let before = self.len();
        self.atoms.retain(|a| a.is_valid(molecule));
        self.bonds.retain(|b| b.is_valid(molecule));
        let dropped = before - self.len();
        if dropped > 0 {
            log::debug!("Selection pruned {dropped} stale entries");
        }
        dropped
    }

    /// Current indices of the selected atoms that resolve in `molecule`,
    /// sorted ascending.
    #[must_use]
    pub fn atom_indices(&self, molecule: &Molecule) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .atoms
            .iter()
            .filter_map(|a| a.atom(molecule))
            .map(|a| a.index())
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Current indices of the selected bonds that resolve in `molecule`,
    /// sorted ascending.
    #[must_use]
    pub fn bond_indices(&self, molecule: &Molecule) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .bonds
            .iter()
            .filter_map(|b| b.bond(molecule))
            .map(|b| b.index())
            .collect();
        indices.sort_unstable();
        indices
    }
}

fn toggle_or_insert<T: Eq + std::hash::Hash>(
    set: &mut FxHashSet<T>,
    value: T,
    mode: SelectMode,
) {
    if mode == SelectMode::Toggle && set.remove(&value) {
        return;
    }
    let _ = set.insert(value);
}
