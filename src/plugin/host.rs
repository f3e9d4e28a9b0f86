use super::{BallAndStickPlugin, ScenePlugin};
use crate::molecule::{EditableMolecule, Molecule};
use crate::options::Options;
use crate::picking::PickMap;
use crate::scene::{GeometryNode, GroupNode, PreparedInstances};

/// Owns the registered plugins and the scene graph root they populate.
#[derive(Default)]
pub struct PluginHost {
    plugins: Vec<Box<dyn ScenePlugin>>,
    root: GroupNode,
}

impl PluginHost {
    /// Host with no plugins.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with the built-in plugins configured from `options`.
    #[must_use]
    pub fn with_default_plugins(options: &Options) -> Self {
        let mut host = Self::new();
        let _ = host
            .register(Box::new(BallAndStickPlugin::from_options(options)));
        host
    }

    /// Add a plugin. Rejected (returns false) if a plugin with the same
    /// name is already registered.
    pub fn register(&mut self, plugin: Box<dyn ScenePlugin>) -> bool {
        let name = plugin.name();
        if self.plugins.iter().any(|p| p.name() == name) {
            log::warn!("Plugin '{name}' is already registered");
            return false;
        }
        log::debug!("Registered scene plugin '{name}'");
        self.plugins.push(plugin);
        true
    }

    /// Remove a plugin together with its geometry.
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn ScenePlugin>> {
        let index = self.plugins.iter().position(|p| p.name() == name)?;
        let _ = self.root.remove_child(name);
        Some(self.plugins.remove(index))
    }

    /// Registered plugins in registration order.
    pub fn plugins(
        &self,
    ) -> impl Iterator<Item = &(dyn ScenePlugin + 'static)> {
        self.plugins.iter().map(Box::as_ref)
    }

    /// Plugin called `name`.
    #[must_use]
    pub fn plugin(&self, name: &str) -> Option<&dyn ScenePlugin> {
        self.plugins
            .iter()
            .find(|p| p.name() == name)
            .map(Box::as_ref)
    }

    /// Mutable access to the plugin called `name`.
    pub fn plugin_mut(
        &mut self,
        name: &str,
    ) -> Option<&mut (dyn ScenePlugin + 'static)> {
        self.plugins
            .iter_mut()
            .find(|p| p.name() == name)
            .map(Box::as_mut)
    }

    /// Enable or disable a plugin. Disabling drops its geometry right away.
    /// Returns false if no such plugin exists.
    pub fn set_plugin_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let Some(plugin) = self.plugin_mut(name) else {
            return false;
        };
        plugin.set_enabled(enabled);
        if !enabled {
            let _ = self.root.remove_child(name);
        }
        true
    }

    /// Forward a UI option to the plugin called `name`. A plugin that ends
    /// up disabled loses its geometry right away.
    pub fn apply_option(
        &mut self,
        name: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> bool {
        let Some(plugin) = self.plugin_mut(name) else {
            log::debug!("Option '{key}' for unknown plugin '{name}'");
            return false;
        };
        let applied = plugin.apply_option(key, value);
        if !plugin.is_enabled() {
            let _ = self.root.remove_child(name);
        }
        applied
    }

    /// Rebuild the scene for a finalized molecule.
    pub fn process(&mut self, molecule: &Molecule) {
        self.run(|plugin| plugin.process(molecule));
    }

    /// Rebuild the scene for a molecule being edited.
    pub fn process_editable(&mut self, molecule: &EditableMolecule) {
        self.run(|plugin| plugin.process_editable(molecule));
    }

    fn run(&mut self, build: impl Fn(&dyn ScenePlugin) -> GeometryNode) {
        for plugin in &self.plugins {
            let name = plugin.name();
            if plugin.is_enabled() {
                let node = build(&**plugin);
                log::debug!(
                    "Plugin '{name}': {} spheres, {} cylinders",
                    node.spheres().len(),
                    node.cylinders().len()
                );
                let _ = self.root.replace_child(name, node);
            } else {
                let _ = self.root.remove_child(name);
            }
        }
    }

    /// The scene graph root.
    #[must_use]
    pub fn root(&self) -> &GroupNode {
        &self.root
    }

    /// Pick map over the current scene.
    #[must_use]
    pub fn pick_map(&self) -> PickMap {
        PickMap::from_root(&self.root)
    }

    /// Instance arrays for the current scene, numbered like
    /// [`Self::pick_map`].
    #[must_use]
    pub fn prepared_instances(&self) -> PreparedInstances {
        PreparedInstances::from_root(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::molecule::{Element, MoleculeView};
    use crate::picking::PickTarget;
    use crate::scene::{EntityTag, Sphere};

    /// Emits one sphere per atom at the origin.
    struct Dots {
        enabled: bool,
    }

    impl ScenePlugin for Dots {
        fn name(&self) -> &'static str {
            "dots"
        }

        fn description(&self) -> &'static str {
            "test dots"
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }

        fn process(&self, molecule: &Molecule) -> GeometryNode {
            let mut node = GeometryNode::new(Some(molecule.id()));
            for atom in molecule.atoms() {
                node.add_sphere(Sphere {
                    center: Vec3::ZERO,
                    radius: 1.0,
                    color: [1.0; 3],
                    tag: EntityTag::Atom(atom.unique_id()),
                });
            }
            node
        }
    }

    fn water() -> Molecule {
        let mut mol = Molecule::new();
        let o = mol.add_atom(Element::O, Vec3::ZERO);
        let h1 = mol.add_atom(Element::H, Vec3::new(0.96, 0.0, 0.0));
        let h2 = mol.add_atom(Element::H, Vec3::new(-0.24, 0.93, 0.0));
        let _ = mol.add_bond(o, h1, 1).unwrap();
        let _ = mol.add_bond(o, h2, 1).unwrap();
        mol
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut host = PluginHost::new();
        assert!(host.register(Box::new(Dots { enabled: true })));
        assert!(!host.register(Box::new(Dots { enabled: true })));
        assert_eq!(host.plugins().count(), 1);
        assert_eq!(host.plugin("dots").unwrap().description(), "test dots");
    }

    #[test]
    fn each_plugin_gets_its_own_slot() {
        let mol = water();
        let mut host = PluginHost::with_default_plugins(&Options::default());
        let _ = host.register(Box::new(Dots { enabled: true }));
        host.process(&mol);

        let names: Vec<_> = host.root().children().map(|(n, _)| n).collect();
        assert_eq!(names, [BallAndStickPlugin::NAME, "dots"]);
        assert_eq!(host.root().sphere_count(), 6);

        // A second pass replaces instead of accumulating.
        host.process(&mol);
        assert_eq!(host.root().len(), 2);
        assert_eq!(host.root().sphere_count(), 6);
    }

    #[test]
    fn disabling_drops_geometry_immediately() {
        let mol = water();
        let mut host = PluginHost::new();
        let _ = host.register(Box::new(Dots { enabled: true }));
        host.process(&mol);
        assert!(host.root().child("dots").is_some());

        assert!(host.set_plugin_enabled("dots", false));
        assert!(host.root().child("dots").is_none());
        host.process(&mol);
        assert!(host.root().is_empty());

        assert!(host.set_plugin_enabled("dots", true));
        host.process(&mol);
        assert_eq!(host.root().sphere_count(), 3);
        assert!(!host.set_plugin_enabled("nope", true));
    }

    #[test]
    fn pick_map_resolves_to_live_atoms() {
        let mut mol = water();
        let mut host = PluginHost::new();
        let _ = host.register(Box::new(Dots { enabled: true }));
        host.process(&mol);

        let map = host.pick_map();
        let target = map.resolve(3);
        assert!(matches!(target, PickTarget::Atom { .. }));
        let picked = target.to_persistent_atom();

        let _ = mol.remove_atom(0);
        let atom = picked.atom(&mol).unwrap();
        assert_eq!(atom.index(), 0);
        assert_eq!(atom.element(), Element::H);
        assert_eq!(host.prepared_instances().spheres.len(), 3);
    }

    #[test]
    fn options_route_to_the_named_plugin() {
        let mut host = PluginHost::with_default_plugins(&Options::default());
        let off = serde_json::Value::Bool(false);
        assert!(host.apply_option(BallAndStickPlugin::NAME, "show_hydrogens", &off));
        assert!(!host.apply_option("dots", "show_hydrogens", &off));
        assert!(!host.apply_option(BallAndStickPlugin::NAME, "bogus", &off));
    }

    #[test]
    fn disabling_through_options_drops_geometry() {
        let mol = water();
        let mut host = PluginHost::with_default_plugins(&Options::default());
        host.process(&mol);
        assert_eq!(host.root().sphere_count(), 3);

        let off = serde_json::Value::Bool(false);
        assert!(host.apply_option(BallAndStickPlugin::NAME, "enabled", &off));
        assert_eq!(host.root().sphere_count(), 0);
        assert!(host.pick_map().is_empty());

        let on = serde_json::Value::Bool(true);
        assert!(host.apply_option(BallAndStickPlugin::NAME, "enabled", &on));
        host.process(&mol);
        assert_eq!(host.root().sphere_count(), 3);
    }

    #[test]
    fn unregister_removes_slot() {
        let mol = water();
        let mut host = PluginHost::new();
        let _ = host.register(Box::new(Dots { enabled: true }));
        host.process(&mol);
        assert!(host.unregister("dots").is_some());
        assert!(host.root().is_empty());
        assert!(host.unregister("dots").is_none());
    }
}
