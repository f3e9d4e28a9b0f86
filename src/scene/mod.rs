//! Scene graph produced by scene plugins.
//!
//! The graph is a tree of [`GroupNode`]s whose leaves are
//! [`GeometryNode`]s holding tagged spheres and cylinders. The tree is a
//! plain value: plugins build leaves, the host owns the root and installs
//! each plugin's output in a named child slot.

mod geometry;
mod instance;

pub use geometry::{Cylinder, EntityTag, GeometryNode, Sphere};
pub use instance::{CylinderInstance, PreparedInstances, SphereInstance};

use crate::molecule::MoleculeId;

/// A node in the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Interior node.
    Group(GroupNode),
    /// Leaf with primitives.
    Geometry(GeometryNode),
}

impl From<GroupNode> for Node {
    fn from(group: GroupNode) -> Self {
        Self::Group(group)
    }
}

impl From<GeometryNode> for Node {
    fn from(geometry: GeometryNode) -> Self {
        Self::Geometry(geometry)
    }
}

/// Borrowed primitive yielded by [`GroupNode::primitives`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive<'a> {
    /// A sphere.
    Sphere(&'a Sphere),
    /// A cylinder.
    Cylinder(&'a Cylinder),
}

impl Primitive<'_> {
    /// Entity the primitive was generated for.
    #[must_use]
    pub fn tag(&self) -> EntityTag {
        match self {
            Self::Sphere(s) => s.tag,
            Self::Cylinder(c) => c.tag,
        }
    }
}

/// Interior node with children addressed by slot name.
///
/// Slot names are unique within a group; children keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupNode {
    children: Vec<(String, Node)>,
}

impl GroupNode {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `node` in slot `name`, returning what the slot held before.
    ///
    /// A replaced child keeps its position in the child order.
    pub fn replace_child(
        &mut self,
        name: &str,
        node: impl Into<Node>,
    ) -> Option<Node> {
        let node = node.into();
        if let Some((_, slot)) = self.children.iter_mut().find(|(n, _)| n == name)
        {
            return Some(std::mem::replace(slot, node));
        }
        self.children.push((name.to_owned(), node));
        None
    }

    /// Remove the child in slot `name`.
    pub fn remove_child(&mut self, name: &str) -> Option<Node> {
        let index = self.children.iter().position(|(n, _)| n == name)?;
        Some(self.children.remove(index).1)
    }

    /// Child in slot `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find_map(|(n, node)| (n == name).then_some(node))
    }

    /// Children with their slot names, in order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(n, node)| (n.as_str(), node))
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the group has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Remove every child.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Geometry leaves, depth-first in child order.
    #[must_use]
    pub fn geometries(&self) -> Vec<&GeometryNode> {
        let mut out = Vec::new();
        collect_geometries(self, &mut out);
        out
    }

    /// Every primitive with its owning molecule, depth-first. Within a leaf
    /// spheres come before cylinders.
    pub fn primitives(
        &self,
    ) -> impl Iterator<Item = (Option<MoleculeId>, Primitive<'_>)> {
        self.geometries().into_iter().flat_map(|g| {
            let molecule = g.molecule();
            let spheres =
                g.spheres().iter().map(move |s| (molecule, Primitive::Sphere(s)));
            let cylinders = g
                .cylinders()
                .iter()
                .map(move |c| (molecule, Primitive::Cylinder(c)));
            spheres.chain(cylinders)
        })
    }

    /// Total sphere count across all leaves.
    #[must_use]
    pub fn sphere_count(&self) -> usize {
        self.geometries().iter().map(|g| g.spheres().len()).sum()
    }

    /// Total cylinder count across all leaves.
    #[must_use]
    pub fn cylinder_count(&self) -> usize {
        self.geometries().iter().map(|g| g.cylinders().len()).sum()
    }
}

fn collect_geometries<'a>(group: &'a GroupNode, out: &mut Vec<&'a GeometryNode>) {
    for (_, node) in &group.children {
        match node {
            Node::Group(inner) => collect_geometries(inner, out),
            Node::Geometry(g) => out.push(g),
        }
    }
}
