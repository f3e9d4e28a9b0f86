// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![warn(unused_results)]
#![warn(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Graphics math: casts and float compares are intentional
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

//! Persistent atom/bond references and ball-and-stick scene generation for
//! molecular editors.
//!
//! Molscene keeps molecules in flat, index-addressed arrays that reshuffle
//! on every deletion, and gives the code around them handles that do not:
//! a [`persistent::PersistentAtom`] survives insertions, deletions and
//! undo/redo and resolves to `None` once its atom is gone. On the display
//! side, scene plugins turn a molecule into a tree of tagged spheres and
//! cylinders that a renderer can upload as-is and pick from.
//!
//! # Key entry points
//!
//! - [`molecule::Molecule`] - atom/bond storage with unique-id registries
//! - [`molecule::EditableMolecule`] - the same with undo/redo
//! - [`persistent::PersistentAtom`] / [`persistent::PersistentBond`] -
//!   stable handles
//! - [`plugin::PluginHost`] - runs [`plugin::ScenePlugin`]s and owns the
//!   [`scene::GroupNode`] root
//! - [`plugin::BallAndStickPlugin`] - the built-in generator
//! - [`picking::PickMap`] - raw GPU pick id to typed target
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! On every repaint or edit the host asks each enabled plugin to process
//! the molecule. Each plugin returns a freshly built
//! [`scene::GeometryNode`], which the host installs in the plugin's slot of
//! the root group, replacing the previous contents wholesale. Primitives
//! carry the unique id of their atom or bond, so a click read back from the
//! pick buffer becomes a persistent reference.

pub mod error;
pub mod molecule;
pub mod options;
pub mod persistent;
pub mod picking;
pub mod plugin;
pub mod scene;

pub use error::MolsceneError;
pub use molecule::{EditableMolecule, Element, Molecule, MoleculeView};
pub use options::Options;
pub use persistent::{PersistentAtom, PersistentBond};
pub use plugin::{BallAndStickPlugin, PluginHost, ScenePlugin};
