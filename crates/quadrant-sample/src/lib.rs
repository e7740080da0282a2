//! Quad rendering samples.
//!
//! One configurable frame controller ([`QuadSample`]) covers the three
//! variants: textured + bouncing, textured + static, and flat-colored.
//! Everything that does not need a GPU (bounce physics, vertex generation,
//! texture-load completion) lives in [`QuadState`] so it can be tested
//! headless.

mod bounce;
mod mesh;
mod sample;
mod state;

pub use bounce::{Bounce, BOUNCE_BOUND, START_VELOCITY};
pub use mesh::QuadMesh;
pub use sample::{run, QuadSample, SampleConfig, TEXTURE_PATH};
pub use state::{QuadState, TextureSlot};
