use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Toggles for the ball-and-stick scene plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Ball and Stick", inline)]
#[serde(default)]
pub struct BallAndStickOptions {
    /// Whether the plugin contributes geometry at all.
    #[schemars(title = "Enabled")]
    pub enabled: bool,
    /// Draw double and triple bonds as parallel cylinders.
    #[schemars(title = "Show Multiple Bonds")]
    pub multi_bonds: bool,
    /// Whether to render hydrogen atoms and their bonds.
    #[schemars(title = "Show Hydrogens")]
    pub show_hydrogens: bool,
}

impl Default for BallAndStickOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            multi_bonds: true,
            show_hydrogens: true,
        }
    }
}
