//! # fxregion
//!
//! Box layout for resizable regions, with backgrounds and borders resolved
//! from `-fx-*` CSS declarations.
//!
//! A region is a node with padding, a layered [`background::Background`], a
//! layered [`border::Border`] and children. Its min, pref and max sizes come
//! from its children unless overridden, and its layout kind decides where the
//! children go.
//!
//! ## Architecture
//!
//! ```text
//! Input (scene JSON / API)
//!       ↓
//!   [css]        declaration text → Background, Border, padding, sizes
//!       ↓
//!   [layout]     measure → clamp → position, per region kind
//!       ↓
//!   [scene]      LayoutInfo snapshot (JSON)
//! ```
//!
//! [`background`], [`border`], [`paint`], [`image`] and [`geometry`] hold the
//! immutable value types the other modules share.

pub mod background;
pub mod border;
pub mod css;
pub mod error;
pub mod geometry;
pub mod image;
pub mod layout;
pub mod paint;
pub mod scene;

pub use error::RegionError;
pub use scene::{LayoutInfo, Scene};

/// Build, size and lay out a scene.
pub fn layout_scene(scene: &Scene) -> Result<LayoutInfo, RegionError> {
    scene.layout()
}

/// Lay out a scene described as JSON.
pub fn layout_json(json: &str) -> Result<LayoutInfo, RegionError> {
    let scene: Scene = serde_json::from_str(json)?;
    layout_scene(&scene)
}
