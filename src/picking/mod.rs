//! Pick-id resolution and selection state.
//!
//! A renderer writes the pick id of each primitive into an offscreen
//! buffer and reads back the pixel under the cursor. [`PickMap`] turns that
//! raw id into a typed [`PickTarget`], and [`Selection`] keeps the picked
//! entities as persistent references.

mod pick_map;
mod selection;

pub use pick_map::{PickMap, PickTarget};
pub use selection::{SelectMode, Selection};
