//! Per-element radius and color tables.
//!
//! Covalent radii follow Cordero et al. (2008), van der Waals radii follow
//! Bondi / Alvarez, colors are the Jmol CPK palette. Elements outside the
//! table map to [`Element::Unknown`], which carries neutral fallback values.

use std::fmt;

/// A chemical element.
///
/// Only the elements a molecular editor commonly places are tabulated;
/// everything else is [`Element::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Element {
    /// Unrecognized or dummy element.
    #[default]
    Unknown,
    H,
    He,
    Li,
    Be,
    B,
    C,
    N,
    O,
    F,
    Ne,
    Na,
    Mg,
    Al,
    Si,
    P,
    S,
    Cl,
    Ar,
    K,
    Ca,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,
    Se,
    Br,
    I,
}

struct ElementData {
    symbol: &'static str,
    atomic_number: u8,
    covalent: f32,
    vdw: f32,
    color: [f32; 3],
}

const fn data(
    symbol: &'static str,
    atomic_number: u8,
    covalent: f32,
    vdw: f32,
    color: [f32; 3],
) -> ElementData {
    ElementData {
        symbol,
        atomic_number,
        covalent,
        vdw,
        color,
    }
}

// Order must match the `Element` discriminants.
static ELEMENT_DATA: [ElementData; 30] = [
    data("Xx", 0, 0.75, 1.50, [1.0, 0.08, 0.58]),
    data("H", 1, 0.31, 1.20, [1.0, 1.0, 1.0]),
    data("He", 2, 0.28, 1.40, [0.85, 1.0, 1.0]),
    data("Li", 3, 1.28, 1.82, [0.8, 0.5, 1.0]),
    data("Be", 4, 0.96, 1.53, [0.76, 1.0, 0.0]),
    data("B", 5, 0.84, 1.92, [1.0, 0.71, 0.71]),
    data("C", 6, 0.76, 1.70, [0.56, 0.56, 0.56]),
    data("N", 7, 0.71, 1.55, [0.19, 0.31, 0.97]),
    data("O", 8, 0.66, 1.52, [1.0, 0.05, 0.05]),
    data("F", 9, 0.57, 1.47, [0.56, 0.88, 0.31]),
    data("Ne", 10, 0.58, 1.54, [0.7, 0.89, 0.96]),
    data("Na", 11, 1.66, 2.27, [0.67, 0.36, 0.95]),
    data("Mg", 12, 1.41, 1.73, [0.54, 1.0, 0.0]),
    data("Al", 13, 1.21, 1.84, [0.75, 0.65, 0.65]),
    data("Si", 14, 1.11, 2.10, [0.94, 0.78, 0.63]),
    data("P", 15, 1.07, 1.80, [1.0, 0.5, 0.0]),
    data("S", 16, 1.05, 1.80, [1.0, 1.0, 0.19]),
    data("Cl", 17, 1.02, 1.75, [0.12, 0.94, 0.12]),
    data("Ar", 18, 1.06, 1.88, [0.5, 0.82, 0.89]),
    data("K", 19, 2.03, 2.75, [0.56, 0.25, 0.83]),
    data("Ca", 20, 1.76, 2.31, [0.24, 1.0, 0.0]),
    data("Mn", 25, 1.39, 2.05, [0.61, 0.48, 0.78]),
    data("Fe", 26, 1.32, 2.00, [0.88, 0.4, 0.2]),
    data("Co", 27, 1.26, 2.00, [0.94, 0.56, 0.63]),
    data("Ni", 28, 1.24, 1.63, [0.31, 0.82, 0.31]),
    data("Cu", 29, 1.32, 1.40, [0.78, 0.5, 0.2]),
    data("Zn", 30, 1.22, 1.39, [0.49, 0.5, 0.69]),
    data("Se", 34, 1.20, 1.90, [1.0, 0.63, 0.0]),
    data("Br", 35, 1.20, 1.85, [0.65, 0.16, 0.16]),
    data("I", 53, 1.39, 1.98, [0.58, 0.0, 0.58]),
];

/// Every tabulated element, in discriminant order.
pub const ALL_ELEMENTS: [Element; 30] = [
    Element::Unknown,
    Element::H,
    Element::He,
    Element::Li,
    Element::Be,
    Element::B,
    Element::C,
    Element::N,
    Element::O,
    Element::F,
    Element::Ne,
    Element::Na,
    Element::Mg,
    Element::Al,
    Element::Si,
    Element::P,
    Element::S,
    Element::Cl,
    Element::Ar,
    Element::K,
    Element::Ca,
    Element::Mn,
    Element::Fe,
    Element::Co,
    Element::Ni,
    Element::Cu,
    Element::Zn,
    Element::Se,
    Element::Br,
    Element::I,
];

impl Element {
    fn data(self) -> &'static ElementData {
        &ELEMENT_DATA[self as usize]
    }

    /// Look up an element by atomic number. Untabulated numbers map to
    /// `None`.
    #[must_use]
    pub fn from_atomic_number(n: u8) -> Option<Self> {
        if n == 0 {
            return None;
        }
        ALL_ELEMENTS
            .iter()
            .copied()
            .find(|e| e.atomic_number() == n)
    }

    /// Look up an element by symbol (case-insensitive, `D` is hydrogen).
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim();
        if symbol.eq_ignore_ascii_case("D") {
            return Some(Self::H);
        }
        ALL_ELEMENTS[1..]
            .iter()
            .copied()
            .find(|e| e.symbol().eq_ignore_ascii_case(symbol))
    }

    /// Element symbol (`"Xx"` for unknown).
    #[must_use]
    pub fn symbol(self) -> &'static str {
        self.data().symbol
    }

    /// Atomic number (0 for unknown).
    #[must_use]
    pub fn atomic_number(self) -> u8 {
        self.data().atomic_number
    }

    /// Single-bond covalent radius in angstroms.
    #[must_use]
    pub fn covalent_radius(self) -> f32 {
        self.data().covalent
    }

    /// Van der Waals radius in angstroms.
    #[must_use]
    pub fn vdw_radius(self) -> f32 {
        self.data().vdw
    }

    /// CPK color as linear RGB.
    #[must_use]
    pub fn cpk_color(self) -> [f32; 3] {
        self.data().color
    }

    /// Whether this is hydrogen (including deuterium).
    #[must_use]
    pub fn is_hydrogen(self) -> bool {
        self == Self::H
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_discriminants() {
        for (i, elem) in ALL_ELEMENTS.iter().enumerate() {
            assert_eq!(*elem as usize, i);
        }
    }

    #[test]
    fn symbol_lookup_is_case_insensitive() {
        assert_eq!(Element::from_symbol("cl"), Some(Element::Cl));
        assert_eq!(Element::from_symbol(" O "), Some(Element::O));
        assert_eq!(Element::from_symbol("D"), Some(Element::H));
        assert_eq!(Element::from_symbol("Xx"), None);
        assert_eq!(Element::from_symbol(""), None);
    }

    #[test]
    fn atomic_number_lookup() {
        assert_eq!(Element::from_atomic_number(8), Some(Element::O));
        assert_eq!(Element::from_atomic_number(26), Some(Element::Fe));
        assert_eq!(Element::from_atomic_number(0), None);
        assert_eq!(Element::from_atomic_number(92), None);
    }

    #[test]
    fn radii_are_positive() {
        for elem in ALL_ELEMENTS {
            assert!(elem.covalent_radius() > 0.0, "{elem}");
            assert!(elem.vdw_radius() > elem.covalent_radius(), "{elem}");
        }
    }
}
