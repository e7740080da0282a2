use crate::paint::Color;

/// How the frame's single render pass starts.
///
/// Color and depth are always cleared; only the clear values are
/// configurable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PassAction {
    pub clear_color: Color,
    pub clear_depth: f32,
}

impl PassAction {
    /// Clears color to `color` and depth to the far plane.
    pub const fn clear(color: Color) -> Self {
        Self {
            clear_color: color,
            clear_depth: 1.0,
        }
    }

    /// Begins a render pass on `encoder` targeting `color_view` and `depth_view`.
    pub(crate) fn begin<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
    ) -> wgpu::RenderPass<'e> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("quadrant frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_depth),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

impl Default for PassAction {
    fn default() -> Self {
        Self::clear(Color::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_clears_to_opaque_black_and_far_depth() {
        let pass = PassAction::default();
        assert_eq!(pass.clear_color, Color::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(pass.clear_depth, 1.0);
    }
}
