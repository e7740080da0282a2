//! Coordinate types shared by the renderer and samples.
//!
//! Quad geometry lives directly in normalized device coordinates:
//! - origin at the surface center
//! - +X right, +Y up
//! - the visible area spans `[-1, 1]` on both axes

mod vec2;

pub use vec2::Vec2;
