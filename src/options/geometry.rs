use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
/// Sizes of ball-and-stick primitives, in angstroms.
pub struct GeometryOptions {
    /// Fraction of the van der Waals radius used for atom spheres.
    #[schemars(title = "Atom Scale", range(min = 0.05, max = 1.0), extend("step" = 0.01))]
    pub atom_radius_scale: f32,
    /// Bond cylinder radius.
    #[schemars(title = "Bond Radius", range(min = 0.02, max = 0.5), extend("step" = 0.01))]
    pub bond_radius: f32,
    /// Distance between the parallel cylinders of a multiple bond.
    #[schemars(title = "Multi-Bond Spacing", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub multi_bond_spacing: f32,
    /// Radius factor for each cylinder of a multiple bond.
    #[schemars(skip)]
    pub multi_bond_radius_scale: f32,
}

impl GeometryOptions {
    /// Spacing used when the configured one is unusable.
    pub const DEFAULT_MULTI_BOND_SPACING: f32 = 0.1;

    /// Radius of one cylinder of a multiple bond.
    #[must_use]
    pub fn multi_bond_radius(&self) -> f32 {
        self.bond_radius * self.multi_bond_radius_scale
    }
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            atom_radius_scale: 0.3,
            bond_radius: 0.1,
            multi_bond_spacing: Self::DEFAULT_MULTI_BOND_SPACING,
            multi_bond_radius_scale: 0.7,
        }
    }
}
