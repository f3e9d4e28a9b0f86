//! Crate-level error types.

use std::fmt;

/// Errors produced by the molscene crate.
///
/// Resolution and scene generation never fail; these cover editing
/// operations on the molecule and options I/O.
#[derive(Debug)]
pub enum MolsceneError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// An atom index did not name a live atom.
    UnknownAtom(usize),
    /// A bond index did not name a live bond.
    UnknownBond(usize),
    /// A bond could not be created or changed.
    InvalidBond(String),
    /// Undo requested with an empty history.
    NothingToUndo,
    /// Redo requested with nothing undone.
    NothingToRedo,
}

impl fmt::Display for MolsceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::UnknownAtom(index) => write!(f, "no atom at index {index}"),
            Self::UnknownBond(index) => write!(f, "no bond at index {index}"),
            Self::InvalidBond(msg) => write!(f, "invalid bond: {msg}"),
            Self::NothingToUndo => f.write_str("nothing to undo"),
            Self::NothingToRedo => f.write_str("nothing to redo"),
        }
    }
}

impl std::error::Error for MolsceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MolsceneError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
