use serde::{Deserialize, Serialize};

use crate::molecule::Element;

/// Color palette options for atom and bond coloring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// RGB color replacing CPK gray for carbon atoms, if set.
    pub carbon_tint: Option<[f32; 3]>,
    /// RGB color for atoms of unknown element.
    pub unknown_color: [f32; 3],
}

impl ColorOptions {
    /// Color for an atom: the carbon tint for carbon when one is set, the
    /// unknown color for unknown elements, CPK otherwise.
    #[must_use]
    pub fn atom_color(&self, element: Element) -> [f32; 3] {
        match (element, self.carbon_tint) {
            (Element::C, Some(tint)) => tint,
            (Element::Unknown, _) => self.unknown_color,
            _ => element.cpk_color(),
        }
    }
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            carbon_tint: None,
            unknown_color: Element::Unknown.cpk_color(),
        }
    }
}
