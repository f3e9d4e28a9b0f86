use glam::Vec3;

use crate::molecule::{MoleculeId, UniqueId};

/// Identity of the entity a primitive was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTag {
    /// Primitive drawn for an atom.
    Atom(UniqueId),
    /// Primitive drawn for a bond.
    Bond(UniqueId),
}

/// Sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center in angstroms.
    pub center: Vec3,
    /// Radius in angstroms.
    pub radius: f32,
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Owning entity.
    pub tag: EntityTag,
}

/// Cylinder primitive, colored per half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    /// Endpoint A and endpoint B.
    pub endpoints: [Vec3; 2],
    /// Radius in angstroms.
    pub radius: f32,
    /// Color of the half at A and the half at B.
    pub colors: [[f32; 3]; 2],
    /// Owning entity.
    pub tag: EntityTag,
}

impl Cylinder {
    /// Distance between the endpoints.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.endpoints[0].distance(self.endpoints[1])
    }
}

/// Leaf node holding drawable primitives generated from one molecule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryNode {
    molecule: Option<MoleculeId>,
    spheres: Vec<Sphere>,
    cylinders: Vec<Cylinder>,
}

impl GeometryNode {
    /// Empty node for primitives of `molecule` (`None` for views without
    /// identity).
    #[must_use]
    pub fn new(molecule: Option<MoleculeId>) -> Self {
        Self {
            molecule,
            spheres: Vec::new(),
            cylinders: Vec::new(),
        }
    }

    /// Token of the molecule the tags refer to.
    #[must_use]
    pub fn molecule(&self) -> Option<MoleculeId> {
        self.molecule
    }

    /// Append a sphere.
    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Append a cylinder.
    pub fn add_cylinder(&mut self, cylinder: Cylinder) {
        self.cylinders.push(cylinder);
    }

    /// Spheres in emission order.
    #[must_use]
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Cylinders in emission order.
    #[must_use]
    pub fn cylinders(&self) -> &[Cylinder] {
        &self.cylinders
    }

    /// Total number of primitives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spheres.len() + self.cylinders.len()
    }

    /// Whether the node holds no primitives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty() && self.cylinders.is_empty()
    }

    /// Drop every primitive.
    pub fn clear(&mut self) {
        self.spheres.clear();
        self.cylinders.clear();
    }

    /// Axis-aligned bounds over sphere surfaces and cylinder endpoints.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let sphere_extents = self.spheres.iter().flat_map(|s| {
            [s.center - Vec3::splat(s.radius), s.center + Vec3::splat(s.radius)]
        });
        let cylinder_ends =
            self.cylinders.iter().flat_map(|c| c.endpoints.into_iter());
        sphere_extents.chain(cylinder_ends).fold(None, |acc, p| {
            Some(acc.map_or((p, p), |(lo, hi): (Vec3, Vec3)| {
                (lo.min(p), hi.max(p))
            }))
        })
    }
}
