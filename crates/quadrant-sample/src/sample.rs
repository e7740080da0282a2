use std::path::PathBuf;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use quadrant_engine::core::{App, AppControl, FrameCtx};
use quadrant_engine::device::GpuInit;
use quadrant_engine::fetch::{resource_path, FetchDesc, FetchQueue, FetchRequest};
use quadrant_engine::paint::Color;
use quadrant_engine::render::{
    DrawCall, QuadBindings, QuadRenderer, QuadStyle, RenderCtx, Texture,
};
use quadrant_engine::window::{Runtime, RuntimeConfig};

use crate::state::QuadState;

/// Texture loaded by the textured variants, relative to the working
/// directory or the executable.
pub const TEXTURE_PATH: &str = "resources/uv_test.png";

/// Which sample to run.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub title: String,
    /// Texture to fetch; `None` draws a flat-colored quad.
    pub texture_path: Option<PathBuf>,
    /// Bounce the quad around the window.
    pub animated: bool,
    /// Vertex color; multiplies the texture when one is bound.
    pub quad_color: Color,
}

impl SampleConfig {
    /// Textured quad bouncing inside the window.
    pub fn textured_bounce() -> Self {
        Self {
            title: "quadrant".to_string(),
            texture_path: Some(PathBuf::from(TEXTURE_PATH)),
            animated: true,
            quad_color: Color::WHITE,
        }
    }

    /// Textured quad at rest in the center.
    pub fn textured_static() -> Self {
        Self {
            title: "quadrant (static)".to_string(),
            animated: false,
            ..Self::textured_bounce()
        }
    }

    /// Untextured quad in a single color.
    pub fn flat() -> Self {
        Self {
            title: "quadrant (flat)".to_string(),
            texture_path: None,
            animated: false,
            quad_color: Color::new(0.2, 0.6, 1.0, 1.0),
        }
    }

    pub fn textured(&self) -> bool {
        self.texture_path.is_some()
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self::textured_bounce()
    }
}

/// Frame controller: one quad, optionally textured and animated.
///
/// GPU resources are created in `init`, updated and drawn in `frame`, and
/// released in `cleanup` in reverse order of creation.
pub struct QuadSample {
    config: SampleConfig,
    state: QuadState,

    fetch: Option<FetchQueue>,
    renderer: Option<QuadRenderer>,
    bindings: QuadBindings,
    texture: Option<Texture>,
    last_draw: Option<DrawCall>,
}

impl QuadSample {
    pub fn new(config: SampleConfig) -> Self {
        let state = QuadState::new(config.quad_color, config.animated, config.textured());
        Self {
            config,
            state,
            fetch: None,
            renderer: None,
            bindings: QuadBindings::default(),
            texture: None,
            last_draw: None,
        }
    }

    pub fn state(&self) -> &QuadState {
        &self.state
    }

    /// Draw issued by the most recent frame; `None` before the first frame.
    pub fn last_draw(&self) -> Option<DrawCall> {
        self.last_draw
    }

    /// Drains finished fetches and uploads any decoded texture.
    fn pump_fetches(&mut self, ctx: &RenderCtx<'_>) {
        let (Some(fetch), Some(renderer)) = (self.fetch.as_mut(), self.renderer.as_ref()) else {
            return;
        };

        for response in fetch.do_work() {
            let Some(image) = self.state.on_fetch(response) else {
                continue;
            };

            let texture = Texture::from_image(ctx, &image, "quad-texture");
            renderer.attach_texture(ctx, &mut self.bindings, &texture);
            self.state.texture_uploaded(texture.width, texture.height);
            self.texture = Some(texture);
        }
    }
}

impl App for QuadSample {
    fn init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        if self.config.textured() {
            self.fetch = Some(
                FetchQueue::new(FetchDesc::default()).context("failed to start fetch queue")?,
            );
        }

        let style = if self.config.textured() {
            QuadStyle::Textured
        } else {
            QuadStyle::Flat
        };
        self.renderer = Some(QuadRenderer::new(ctx, style, self.state.mesh.vertices()));

        if let (Some(fetch), Some(path)) = (self.fetch.as_mut(), self.config.texture_path.as_ref()) {
            let path = resource_path(path);
            fetch
                .send(FetchRequest::new(&path))
                .with_context(|| format!("failed to request {}", path.display()))?;
        }

        log::debug!(
            "sample ready (textured: {}, animated: {})",
            self.config.textured(),
            self.config.animated
        );
        Ok(())
    }

    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = self.renderer.as_ref() else {
            return AppControl::Continue;
        };

        if self.state.update() {
            renderer.update_vertices(ctx.gpu.queue(), self.state.mesh.vertices());
        }

        self.pump_fetches(&ctx.render_ctx());

        let Some(renderer) = self.renderer.as_ref() else {
            return AppControl::Continue;
        };
        let bindings = &self.bindings;
        let mut issued = None;
        let control = ctx.render(&self.state.pass, |rpass| {
            issued = Some(renderer.draw(rpass, bindings));
        });

        if let Some(call) = issued {
            if self.last_draw.is_none() {
                log::debug!(
                    "first draw: {} indices x {} instance(s), texture {:?}",
                    call.index_count,
                    call.instance_count,
                    self.state.texture
                );
            }
            self.last_draw = Some(call);
        }
        control
    }

    fn cleanup(&mut self) {
        self.bindings = QuadBindings::default();
        self.texture = None;
        self.renderer = None;
        if let Some(mut fetch) = self.fetch.take() {
            fetch.shutdown();
        }
        log::debug!("sample resources released");
    }
}

/// Opens the 640x360 sample window and runs `config` until it is closed.
pub fn run(config: SampleConfig) -> Result<()> {
    let runtime = RuntimeConfig {
        title: config.title.clone(),
        initial_size: LogicalSize::new(640.0, 360.0),
        resizable: true,
    };
    Runtime::run(runtime, GpuInit::default(), QuadSample::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TextureSlot;

    #[test]
    fn variants_cover_texture_and_animation_combinations() {
        let bounce = SampleConfig::textured_bounce();
        assert!(bounce.textured() && bounce.animated);

        let still = SampleConfig::textured_static();
        assert!(still.textured() && !still.animated);
        assert_eq!(still.texture_path, bounce.texture_path);

        let flat = SampleConfig::flat();
        assert!(!flat.textured() && !flat.animated);
    }

    #[test]
    fn textured_variants_load_the_uv_test_image() {
        assert_eq!(
            SampleConfig::default().texture_path.as_deref(),
            Some(std::path::Path::new("resources/uv_test.png"))
        );
    }

    #[test]
    fn new_sample_reflects_config_before_init() {
        let sample = QuadSample::new(SampleConfig::flat());
        assert_eq!(sample.state().texture, TextureSlot::Unused);
        assert!(sample.state().bounce.is_none());

        let sample = QuadSample::new(SampleConfig::textured_bounce());
        assert_eq!(sample.state().texture, TextureSlot::Pending);
        assert!(sample.state().bounce.is_some());
    }

    #[test]
    fn cleanup_before_init_is_harmless() {
        let mut sample = QuadSample::new(SampleConfig::default());
        sample.cleanup();
        assert!(sample.fetch.is_none());
        assert!(sample.renderer.is_none());
        assert_eq!(sample.last_draw(), None);
    }
}
