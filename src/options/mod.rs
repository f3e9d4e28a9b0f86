//! Scene generation options with TOML preset support.
//!
//! Plugin toggles, primitive sizes and the color palette live here. Options
//! serialize to/from TOML so view presets can be stored next to the
//! application.

mod ball_and_stick;
mod colors;
mod geometry;

use std::path::Path;

pub use ball_and_stick::BallAndStickOptions;
pub use colors::ColorOptions;
pub use geometry::GeometryOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MolsceneError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[geometry]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Ball-and-stick plugin toggles.
    pub ball_and_stick: BallAndStickOptions,
    /// Primitive sizes.
    pub geometry: GeometryOptions,
    /// Color palette options.
    #[schemars(skip)]
    pub colors: ColorOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MolsceneError> {
        let content =
            std::fs::read_to_string(path).map_err(MolsceneError::Io)?;
        toml::from_str(&content)
            .map_err(|e| MolsceneError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MolsceneError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolsceneError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolsceneError::Io)?;
        }
        std::fs::write(path, content).map_err(MolsceneError::Io)
    }

    /// Load the preset `name` from `dir`, logging the outcome.
    #[must_use]
    pub fn load_preset(dir: &Path, name: &str) -> Option<Self> {
        let path = dir.join(format!("{name}.toml"));
        match Self::load(&path) {
            Ok(opts) => {
                log::info!("Loaded view preset '{name}'");
                Some(opts)
            }
            Err(e) => {
                log::error!("Failed to load view preset '{name}': {e}");
                None
            }
        }
    }

    /// Save these options as preset `name` in `dir`. Returns true on
    /// success.
    pub fn save_preset(&self, dir: &Path, name: &str) -> bool {
        let path = dir.join(format!("{name}.toml"));
        match self.save(&path) {
            Ok(()) => {
                log::info!("Saved view preset '{name}'");
                true
            }
            Err(e) => {
                log::error!("Failed to save view preset '{name}': {e}");
                false
            }
        }
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
