//! Stable per-entity identifiers, independent of storage position.
//!
//! Ids are handed out monotonically and never reassigned to a different
//! entity while the registry lives. A released id can only come back through
//! [`UniqueIdRegistry::restore`], which undo uses to reinstate the same
//! logical entity.

use std::fmt;

/// Opaque identifier for an atom or bond, scoped to a single molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniqueId(u32);

impl UniqueId {
    /// Sentinel meaning "no entity".
    pub const INVALID: Self = Self(u32::MAX);

    /// Wrap a raw id value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this is anything other than [`UniqueId::INVALID`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl Default for UniqueId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#invalid")
        }
    }
}

/// Two-way map between unique ids and storage indices.
///
/// Storage is expected to use swap-remove: removing index `i` moves the
/// last entry into `i`, and [`UniqueIdRegistry::swap_remove`] mirrors that.
#[derive(Debug, Clone, Default)]
pub struct UniqueIdRegistry {
    /// Indexed by raw id; `None` once the entity is gone.
    index_of: Vec<Option<usize>>,
    /// Indexed by storage position.
    ids: Vec<UniqueId>,
}

impl UniqueIdRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no entity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Register the entity just appended at the end of storage and return
    /// its fresh id.
    ///
    /// Once the id space is exhausted the entity is still tracked by index
    /// but gets [`UniqueId::INVALID`], so no issued id is ever handed out
    /// twice.
    pub fn push(&mut self) -> UniqueId {
        let Some(raw) = next_raw_id(self.index_of.len()) else {
            log::warn!("Unique id space exhausted; entity has no id");
            self.ids.push(UniqueId::INVALID);
            return UniqueId::INVALID;
        };
        let id = UniqueId(raw);
        self.index_of.push(Some(self.ids.len()));
        self.ids.push(id);
        id
    }

    /// Re-register a previously released id for the entity just appended at
    /// the end of storage.
    ///
    /// Returns `false` (and registers nothing) if `id` was never issued or
    /// is still live.
    pub fn restore(&mut self, id: UniqueId) -> bool {
        let Some(slot) = self.index_of.get_mut(id.0 as usize) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(self.ids.len());
        self.ids.push(id);
        true
    }

    /// Release the id at `index`, mirroring `Vec::swap_remove` on storage.
    ///
    /// Returns the released id, or [`UniqueId::INVALID`] if `index` is out
    /// of range.
    pub fn swap_remove(&mut self, index: usize) -> UniqueId {
        if index >= self.ids.len() {
            return UniqueId::INVALID;
        }
        let removed = self.ids.swap_remove(index);
        if let Some(slot) = self.index_of.get_mut(removed.0 as usize) {
            *slot = None;
        }
        if let Some(&moved) = self.ids.get(index) {
            if let Some(slot) = self.index_of.get_mut(moved.0 as usize) {
                *slot = Some(index);
            }
        }
        removed
    }

    /// Release every live id. The id space keeps growing afterwards.
    pub fn clear(&mut self) {
        for id in self.ids.drain(..) {
            if let Some(slot) = self.index_of.get_mut(id.0 as usize) {
                *slot = None;
            }
        }
    }

    /// Storage index currently carrying `id`.
    #[must_use]
    pub fn index_of(&self, id: UniqueId) -> Option<usize> {
        self.index_of.get(id.0 as usize).copied().flatten()
    }

    /// Id carried by storage `index`, or [`UniqueId::INVALID`].
    #[must_use]
    pub fn id_at(&self, index: usize) -> UniqueId {
        self.ids.get(index).copied().unwrap_or(UniqueId::INVALID)
    }

    /// Number of ids ever issued.
    #[must_use]
    pub fn issued(&self) -> usize {
        self.index_of.len()
    }
}

/// Raw value of the next id after `issued` ids, or `None` once the next one
/// would collide with [`UniqueId::INVALID`].
fn next_raw_id(issued: usize) -> Option<u32> {
    u32::try_from(issued).ok().filter(|&raw| raw != u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_swap_remove() {
        let mut reg = UniqueIdRegistry::new();
        let a = reg.push();
        let b = reg.push();
        let c = reg.push();

        assert_eq!(reg.swap_remove(0), a);
        assert_eq!(reg.index_of(a), None);
        assert_eq!(reg.index_of(c), Some(0));
        assert_eq!(reg.index_of(b), Some(1));
        assert_eq!(reg.id_at(0), c);
    }

    #[test]
    fn released_ids_are_not_reissued() {
        let mut reg = UniqueIdRegistry::new();
        let a = reg.push();
        let _ = reg.swap_remove(0);
        let b = reg.push();
        assert_ne!(a, b);
        assert_eq!(reg.index_of(a), None);
    }

    #[test]
    fn restore_only_accepts_released_ids() {
        let mut reg = UniqueIdRegistry::new();
        let a = reg.push();
        assert!(!reg.restore(a));
        let _ = reg.swap_remove(0);
        assert!(reg.restore(a));
        assert_eq!(reg.index_of(a), Some(0));
        assert!(!reg.restore(UniqueId::new(42)));
    }

    #[test]
    fn clear_keeps_id_space_growing() {
        let mut reg = UniqueIdRegistry::new();
        let _ = reg.push();
        let _ = reg.push();
        reg.clear();
        assert!(reg.is_empty());
        assert_eq!(reg.push(), UniqueId::new(2));
        assert_eq!(reg.issued(), 3);
    }

    #[test]
    fn id_space_stops_short_of_sentinel() {
        assert_eq!(next_raw_id(0), Some(0));
        assert_eq!(next_raw_id(u32::MAX as usize - 1), Some(u32::MAX - 1));
        assert_eq!(next_raw_id(u32::MAX as usize), None);
    }

    #[test]
    fn entities_without_ids_keep_indices_aligned() {
        let mut reg = UniqueIdRegistry::new();
        let a = reg.push();
        reg.ids.push(UniqueId::INVALID);
        let b = reg.push();

        assert_eq!(reg.swap_remove(1), UniqueId::INVALID);
        assert_eq!(reg.index_of(b), Some(1));
        assert_eq!(reg.index_of(a), Some(0));
        reg.clear();
        assert!(reg.is_empty());
    }

    #[test]
    fn sentinel_lookups_fail() {
        let reg = UniqueIdRegistry::new();
        assert_eq!(reg.index_of(UniqueId::INVALID), None);
        assert_eq!(reg.id_at(0), UniqueId::INVALID);
        assert!(!UniqueId::default().is_valid());
    }
}
