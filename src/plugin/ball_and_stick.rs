//! Ball-and-stick scene plugin.
//!
//! Atoms become spheres scaled from their van der Waals radius, bonds
//! become split-colored cylinders. Multiple bonds fan out into parallel
//! thinner cylinders. Hydrogens can be hidden, and degenerate atoms or
//! bonds are left out rather than producing NaN geometry.

use glam::Vec3;

use super::ScenePlugin;
use crate::molecule::{EditableMolecule, Molecule, MoleculeView};
use crate::options::{
    BallAndStickOptions, ColorOptions, GeometryOptions, Options,
};
use crate::scene::{Cylinder, EntityTag, GeometryNode, Sphere};

/// Bonds shorter than this are not drawn.
const MIN_BOND_LENGTH: f32 = 1e-4;

/// Renders atoms as spheres and bonds as cylinders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BallAndStickPlugin {
    toggles: BallAndStickOptions,
    geometry: GeometryOptions,
    colors: ColorOptions,
}

/// Primitives left out of one pass.
#[derive(Debug, Default)]
struct Skipped {
    atoms: usize,
    bonds: usize,
}

impl BallAndStickPlugin {
    /// Name of the plugin and its scene slot.
    pub const NAME: &'static str = "Ball and Stick";

    /// Plugin with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plugin configured from the relevant sections of `options`.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self {
            toggles: options.ball_and_stick.clone(),
            geometry: options.geometry.clone(),
            colors: options.colors.clone(),
        }
    }

    /// Whether double and triple bonds are drawn as parallel cylinders.
    #[must_use]
    pub fn multi_bonds(&self) -> bool {
        self.toggles.multi_bonds
    }

    /// Toggle multiple-bond rendering.
    pub fn set_multi_bonds(&mut self, show: bool) {
        self.toggles.multi_bonds = show;
    }

    /// Whether hydrogen atoms are drawn.
    #[must_use]
    pub fn show_hydrogens(&self) -> bool {
        self.toggles.show_hydrogens
    }

    /// Toggle hydrogen rendering.
    pub fn set_show_hydrogens(&mut self, show: bool) {
        self.toggles.show_hydrogens = show;
    }

    /// Current toggles.
    #[must_use]
    pub fn toggles(&self) -> &BallAndStickOptions {
        &self.toggles
    }

    /// Current primitive sizes.
    #[must_use]
    pub fn geometry(&self) -> &GeometryOptions {
        &self.geometry
    }

    /// Replace primitive sizes.
    pub fn set_geometry(&mut self, geometry: GeometryOptions) {
        self.geometry = geometry;
    }

    /// Replace the color palette.
    pub fn set_colors(&mut self, colors: ColorOptions) {
        self.colors = colors;
    }

    /// Build geometry for any molecule view.
    ///
    /// Views without unique ids produce untagged (unpickable) geometry.
    #[must_use]
    pub fn build(&self, molecule: &dyn MoleculeView) -> GeometryNode {
        let owner = molecule.unique_ids().map(|ids| ids.molecule_id());
        let mut node = GeometryNode::new(owner);
        let mut skipped = Skipped::default();

        let rendered = self.emit_atoms(molecule, &mut node, &mut skipped);
        self.emit_bonds(molecule, &rendered, &mut node, &mut skipped);

        log::debug!(
            "Ball and stick: {} spheres, {} cylinders ({} atoms, {} bonds skipped)",
            node.spheres().len(),
            node.cylinders().len(),
            skipped.atoms,
            skipped.bonds,
        );
        node
    }

    /// Emit atom spheres. Returns which atoms were drawn, by index.
    fn emit_atoms(
        &self,
        molecule: &dyn MoleculeView,
        node: &mut GeometryNode,
        skipped: &mut Skipped,
    ) -> Vec<bool> {
        let mut rendered = vec![false; molecule.atom_count()];
        for atom in molecule.atoms() {
            let element = atom.element();
            if element.is_hydrogen() && !self.toggles.show_hydrogens {
                continue;
            }
            let center = atom.position();
            let radius = element.vdw_radius() * self.geometry.atom_radius_scale;
            if !center.is_finite() || !is_positive(radius) {
                skipped.atoms += 1;
                continue;
            }
            node.add_sphere(Sphere {
                center,
                radius,
                color: self.colors.atom_color(element),
                tag: EntityTag::Atom(atom.unique_id()),
            });
            rendered[atom.index()] = true;
        }
        rendered
    }

    fn emit_bonds(
        &self,
        molecule: &dyn MoleculeView,
        rendered: &[bool],
        node: &mut GeometryNode,
        skipped: &mut Skipped,
    ) {
        let spacing = if is_positive(self.geometry.multi_bond_spacing) {
            self.geometry.multi_bond_spacing
        } else {
            GeometryOptions::DEFAULT_MULTI_BOND_SPACING
        };
        for bond in molecule.bonds() {
            let Some([a, b]) = bond.atoms() else {
                skipped.bonds += 1;
                continue;
            };
            let drawn = |i: usize| rendered.get(i).copied().unwrap_or(false);
            if !drawn(a.index()) || !drawn(b.index()) {
                continue;
            }

            let (pos_a, pos_b) = (a.position(), b.position());
            if pos_a.distance(pos_b) < MIN_BOND_LENGTH {
                skipped.bonds += 1;
                continue;
            }

            let colors = [
                self.colors.atom_color(a.element()),
                self.colors.atom_color(b.element()),
            ];
            let tag = EntityTag::Bond(bond.unique_id());
            let order = bond.order();
            let single = !self.toggles.multi_bonds || order <= 1;
            let radius = if single {
                self.geometry.bond_radius
            } else {
                self.geometry.multi_bond_radius()
            };
            if !is_positive(radius) {
                skipped.bonds += 1;
                continue;
            }

            if single {
                node.add_cylinder(Cylinder {
                    endpoints: [pos_a, pos_b],
                    radius,
                    colors,
                    tag,
                });
                continue;
            }

            let axis = (pos_b - pos_a).normalize_or_zero();
            let perp = find_perpendicular(axis);
            for offset in fan_offsets(order, spacing) {
                let shift = perp * offset;
                node.add_cylinder(Cylinder {
                    endpoints: [pos_a + shift, pos_b + shift],
                    radius,
                    colors,
                    tag,
                });
            }
        }
    }
}

impl ScenePlugin for BallAndStickPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Atoms as spheres, bonds as cylinders"
    }

    fn is_enabled(&self) -> bool {
        self.toggles.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.toggles.enabled = enabled;
    }

    fn process(&self, molecule: &Molecule) -> GeometryNode {
        self.build(molecule)
    }

    fn process_editable(&self, molecule: &EditableMolecule) -> GeometryNode {
        self.build(molecule)
    }

    fn setup_schema(&self) -> Option<schemars::Schema> {
        Some(schemars::schema_for!(BallAndStickOptions))
    }

    fn apply_option(&mut self, key: &str, value: &serde_json::Value) -> bool {
        match key {
            "enabled" => set_bool(value, |v| self.toggles.enabled = v),
            "multi_bonds" => set_bool(value, |v| self.toggles.multi_bonds = v),
            "show_hydrogens" => {
                set_bool(value, |v| self.toggles.show_hydrogens = v)
            }
            "geometry.atom_radius_scale" => {
                set_f32(value, |v| self.geometry.atom_radius_scale = v)
            }
            "geometry.bond_radius" => {
                set_f32(value, |v| self.geometry.bond_radius = v)
            }
            "geometry.multi_bond_spacing" => {
                set_f32(value, |v| self.geometry.multi_bond_spacing = v)
            }
            _ => {
                log::debug!("Unhandled ball and stick option: {key}");
                false
            }
        }
    }
}

/// Helper: extract a bool from a JSON value and apply a mutation.
fn set_bool(value: &serde_json::Value, apply: impl FnOnce(bool)) -> bool {
    if let Some(v) = value.as_bool() {
        apply(v);
        true
    } else {
        false
    }
}

/// Helper: extract a positive f32 from a JSON value and apply a mutation.
fn set_f32(value: &serde_json::Value, apply: impl FnOnce(f32)) -> bool {
    match value.as_f64().map(|v| v as f32) {
        Some(v) if is_positive(v) => {
            apply(v);
            true
        }
        _ => false,
    }
}

fn is_positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

/// Perpendicular offsets of the `order` cylinders of a multiple bond,
/// centered on the bond axis.
fn fan_offsets(order: u8, spacing: f32) -> impl Iterator<Item = f32> {
    let center = f32::from(order.saturating_sub(1)) * 0.5;
    (0..order).map(move |i| (f32::from(i) - center) * spacing)
}

/// Unit vector perpendicular to `v`.
fn find_perpendicular(v: Vec3) -> Vec3 {
    if v.length_squared() < 1e-8 {
        return Vec3::X;
    }
    let candidate = if v.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    v.cross(candidate).normalize()
}
