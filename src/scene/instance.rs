//! GPU-ready instance data for the scene graph.
//!
//! Layouts match the sphere and capsule impostor instance structs a
//! renderer consumes: four `vec4<f32>` lanes, pick id packed as a float.

use super::{GroupNode, Primitive};

/// Per-instance data for a sphere impostor.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereInstance {
    /// xyz = position, w = radius
    pub center: [f32; 4],
    /// xyz = RGB color, w = pick id (packed as float)
    pub color: [f32; 4],
}

/// Per-instance data for a cylinder (capsule) impostor.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CylinderInstance {
    /// Endpoint A position (xyz), radius (w)
    pub endpoint_a: [f32; 4],
    /// Endpoint B position (xyz), pick id (w) - packed as float
    pub endpoint_b: [f32; 4],
    /// Color at endpoint A (RGB), w unused
    pub color_a: [f32; 4],
    /// Color at endpoint B (RGB), w unused
    pub color_b: [f32; 4],
}

/// Instance arrays for a whole scene, numbered the same way as
/// [`crate::picking::PickMap::from_root`].
#[derive(Debug, Clone, Default)]
pub struct PreparedInstances {
    /// Sphere instances.
    pub spheres: Vec<SphereInstance>,
    /// Cylinder instances.
    pub cylinders: Vec<CylinderInstance>,
}

impl PreparedInstances {
    /// Flatten `root` depth-first. Pick ids start at 1; 0 means background.
    #[must_use]
    pub fn from_root(root: &GroupNode) -> Self {
        let mut out = Self::default();
        for (i, (_, primitive)) in root.primitives().enumerate() {
            let pick_id = (i + 1) as f32;
            match primitive {
                Primitive::Sphere(s) => out.spheres.push(SphereInstance {
                    center: [s.center.x, s.center.y, s.center.z, s.radius],
                    color: [s.color[0], s.color[1], s.color[2], pick_id],
                }),
                Primitive::Cylinder(c) => {
                    let [a, b] = c.endpoints;
                    let [ca, cb] = c.colors;
                    out.cylinders.push(CylinderInstance {
                        endpoint_a: [a.x, a.y, a.z, c.radius],
                        endpoint_b: [b.x, b.y, b.z, pick_id],
                        color_a: [ca[0], ca[1], ca[2], 0.0],
                        color_b: [cb[0], cb[1], cb[2], 0.0],
                    });
                }
            }
        }
        out
    }

    /// Raw bytes of the sphere instances, ready for buffer upload.
    #[must_use]
    pub fn sphere_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.spheres)
    }

    /// Raw bytes of the cylinder instances, ready for buffer upload.
    #[must_use]
    pub fn cylinder_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cylinders)
    }
}
