//! Scene plugins: pluggable generators that turn a molecule into geometry.
//!
//! A plugin never touches the scene graph. Each pass it returns a freshly
//! built [`GeometryNode`], and the [`PluginHost`] installs it in the
//! plugin's own child slot of the root group.

pub mod ball_and_stick;
mod host;

pub use ball_and_stick::BallAndStickPlugin;
pub use host::PluginHost;

use crate::molecule::{EditableMolecule, Molecule};
use crate::scene::GeometryNode;

/// A scene generator the host can enable, configure and run.
pub trait ScenePlugin {
    /// Unique, human-readable name. Also the plugin's slot in the root group.
    fn name(&self) -> &'static str;

    /// One-line description for UI listings.
    fn description(&self) -> &'static str;

    /// Whether the host should run this plugin.
    fn is_enabled(&self) -> bool;

    /// Enable or disable the plugin. Takes effect on the next pass.
    fn set_enabled(&mut self, enabled: bool);

    /// Build geometry for a finalized molecule.
    ///
    /// Must be idempotent: the same molecule and configuration always give
    /// the same node.
    fn process(&self, molecule: &Molecule) -> GeometryNode;

    /// Build geometry for a molecule that is being edited.
    fn process_editable(&self, molecule: &EditableMolecule) -> GeometryNode {
        self.process(molecule.molecule())
    }

    /// JSON Schema of the options a UI may present for this plugin.
    fn setup_schema(&self) -> Option<schemars::Schema> {
        None
    }

    /// Apply one option by key/value from the UI.
    /// Returns true if the option was recognized and applied.
    fn apply_option(&mut self, key: &str, value: &serde_json::Value) -> bool {
        let _ = value;
        log::debug!("Unhandled option for plugin '{}': {key}", self.name());
        false
    }
}
