use quadrant_engine::fetch::FetchResponse;
use quadrant_engine::paint::Color;
use quadrant_engine::render::{decode_image, DecodedImage, PassAction};

use crate::bounce::Bounce;
use crate::mesh::QuadMesh;

/// Progress of the quad's texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureSlot {
    /// The variant draws without a texture.
    Unused,
    /// Fetch submitted, nothing uploaded yet.
    Pending,
    /// Pixels uploaded; textured draws go through.
    Ready { width: u32, height: u32 },
    /// Fetch or decode failed; textured draws stay dropped.
    Failed,
}

impl TextureSlot {
    pub fn is_ready(self) -> bool {
        matches!(self, TextureSlot::Ready { .. })
    }
}

/// GPU-independent half of the frame controller.
///
/// Owns the pass action, the CPU mesh, the optional bounce animation and
/// the texture progress. [`QuadSample`](crate::QuadSample) mirrors the
/// results onto the GPU.
#[derive(Debug, Clone)]
pub struct QuadState {
    pub pass: PassAction,
    pub mesh: QuadMesh,
    pub bounce: Option<Bounce>,
    pub texture: TextureSlot,
}

impl QuadState {
    pub fn new(quad_color: Color, animated: bool, textured: bool) -> Self {
        Self {
            pass: PassAction::clear(Color::BLACK),
            mesh: QuadMesh::new(quad_color),
            bounce: animated.then(Bounce::default),
            texture: if textured {
                TextureSlot::Pending
            } else {
                TextureSlot::Unused
            },
        }
    }

    /// Advances the bounce one step and recenters the mesh.
    ///
    /// Returns `true` when the vertices changed and need re-uploading.
    pub fn update(&mut self) -> bool {
        let Some(bounce) = self.bounce.as_mut() else {
            return false;
        };
        let center = bounce.step();
        self.mesh.set_center(center);
        true
    }

    /// Handles a finished texture fetch.
    ///
    /// Returns decoded pixels ready for upload; the caller reports the upload
    /// through [`texture_uploaded`](Self::texture_uploaded). A failed fetch
    /// turns the clear color red. A fetch that succeeded but does not decode
    /// only marks the texture failed.
    pub fn on_fetch(&mut self, response: FetchResponse) -> Option<DecodedImage> {
        let bytes = match response.result {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("texture fetch failed: {e}");
                self.pass.clear_color = Color::RED;
                self.texture = TextureSlot::Failed;
                return None;
            }
        };

        match decode_image(&bytes) {
            Ok(image) => {
                log::info!(
                    "loaded {} ({}x{}, {} bytes)",
                    response.path.display(),
                    image.width,
                    image.height,
                    bytes.len()
                );
                Some(image)
            }
            Err(e) => {
                log::warn!("{}: {e}", response.path.display());
                self.texture = TextureSlot::Failed;
                None
            }
        }
    }

    /// Marks the texture as uploaded and bindable.
    pub fn texture_uploaded(&mut self, width: u32, height: u32) {
        self.texture = TextureSlot::Ready { width, height };
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::{Duration, Instant};

    use quadrant_engine::coords::Vec2;
    use quadrant_engine::fetch::{FetchDesc, FetchError, FetchQueue, FetchRequest};

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 128, 255, 255]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    /// Runs a real fetch so the response carries a genuine handle; `None`
    /// fetches a path that does not exist.
    fn response_for(bytes: Option<&[u8]>) -> FetchResponse {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uv_test.png");
        if let Some(b) = bytes {
            std::fs::write(&path, b).unwrap();
        }

        let mut queue = FetchQueue::new(FetchDesc::default()).unwrap();
        queue.send(FetchRequest::new(&path)).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(resp) = queue.do_work().pop() {
                return resp;
            }
            assert!(Instant::now() < deadline, "fetch never completed");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    fn textured() -> QuadState {
        QuadState::new(Color::WHITE, true, true)
    }

    // ── initial state ─────────────────────────────────────────────────────

    #[test]
    fn starts_black_with_pending_texture() {
        let s = textured();
        assert_eq!(s.pass.clear_color, Color::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(s.texture, TextureSlot::Pending);
        assert_eq!(s.bounce, Some(Bounce::default()));
    }

    #[test]
    fn flat_variant_has_no_texture_or_animation() {
        let s = QuadState::new(Color::WHITE, false, false);
        assert_eq!(s.texture, TextureSlot::Unused);
        assert!(s.bounce.is_none());
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn update_moves_mesh_with_bounce() {
        let mut s = textured();
        assert!(s.update());

        let center = s.bounce.unwrap().position;
        let mut expected = QuadMesh::new(Color::WHITE);
        expected.set_center(center);
        assert_eq!(s.mesh, expected);
        assert_eq!(center, Vec2::new(0.0025, 0.004));
    }

    #[test]
    fn static_variant_never_moves() {
        let mut s = QuadState::new(Color::WHITE, false, true);
        let before = s.mesh.clone();
        for _ in 0..10 {
            assert!(!s.update());
        }
        assert_eq!(s.mesh, before);
    }

    // ── fetch completion ──────────────────────────────────────────────────

    #[test]
    fn successful_fetch_yields_pixels_and_keeps_clear_color() {
        let mut s = textured();
        let image = s.on_fetch(response_for(Some(png_bytes(4, 2).as_slice()))).unwrap();
        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(image.pixels.len(), 4 * 2 * 4);

        s.texture_uploaded(image.width, image.height);
        assert!(s.texture.is_ready());
        assert_eq!(s.texture, TextureSlot::Ready { width: 4, height: 2 });
        assert_eq!(s.pass.clear_color, Color::BLACK);
    }

    #[test]
    fn failed_fetch_turns_clear_color_red() {
        let mut s = textured();
        let response = response_for(None);
        assert!(matches!(response.result, Err(FetchError::NotFound { .. })));

        assert!(s.on_fetch(response).is_none());
        assert_eq!(s.pass.clear_color, Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(s.texture, TextureSlot::Failed);
    }

    #[test]
    fn undecodable_bytes_fail_without_recoloring() {
        let mut s = textured();
        assert!(s.on_fetch(response_for(Some(&b"not a png"[..]))).is_none());
        assert_eq!(s.texture, TextureSlot::Failed);
        assert_eq!(s.pass.clear_color, Color::BLACK);
    }
}
