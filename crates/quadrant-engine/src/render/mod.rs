//! GPU rendering subsystem.
//!
//! The quad renderer owns its pipeline and buffers; textures are created
//! separately once their pixels are available and attached through
//! [`QuadBindings`].
//!
//! Convention:
//! - geometry is given directly in NDC (center origin, +Y up)
//! - one pass per frame, cleared according to a [`PassAction`]

mod ctx;
mod pass;
mod quad;
mod texture;

pub use ctx::RenderCtx;
pub use pass::PassAction;
pub use quad::{DrawCall, QuadBindings, QuadRenderer, QuadStyle, Vertex, QUAD_INDICES};
pub use texture::{decode_image, DecodeError, DecodedImage, Texture};
