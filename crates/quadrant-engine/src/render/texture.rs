use std::fmt;

use super::RenderCtx;

/// RGBA8 pixels decoded from an encoded image file.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed rows, 4 bytes per pixel.
    pub pixels: Vec<u8>,
}

/// Failure to turn fetched bytes into pixels.
#[derive(Debug)]
pub enum DecodeError {
    /// The decoder rejected the data.
    Image(image::ImageError),
    /// The image decoded but has no pixels.
    Empty,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Image(e) => write!(f, "image decode failed: {e}"),
            DecodeError::Empty => f.write_str("image has zero width or height"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Image(e) => Some(e),
            DecodeError::Empty => None,
        }
    }
}

impl From<image::ImageError> for DecodeError {
    fn from(e: image::ImageError) -> Self {
        DecodeError::Image(e)
    }
}

/// Decodes PNG (or any enabled format) bytes into RGBA8, expanding grey and
/// RGB sources to four channels.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::Empty);
    }

    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// A sampled 2D texture and its default view.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Creates an sRGB texture and uploads `image` into mip level 0.
    pub fn from_image(ctx: &RenderCtx<'_>, image: &DecodedImage, label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.width * 4),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            width: image.width,
            height: image.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(img: image::DynamicImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_rgba_png() {
        let mut img = image::RgbaImage::new(2, 3);
        img.put_pixel(1, 2, image::Rgba([10, 20, 30, 40]));
        let bytes = encode_png(image::DynamicImage::ImageRgba8(img));

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (2, 3));
        assert_eq!(decoded.pixels.len(), 2 * 3 * 4);
        let last = &decoded.pixels[decoded.pixels.len() - 4..];
        assert_eq!(last, &[10u8, 20, 30, 40]);
    }

    #[test]
    fn rgb_png_expands_to_four_channels() {
        let img = image::RgbImage::from_pixel(4, 1, image::Rgb([255, 0, 0]));
        let bytes = encode_png(image::DynamicImage::ImageRgb8(img));

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.pixels, [255u8, 0, 0, 255].repeat(4));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_image(b"definitely not a png").unwrap_err();
        assert!(matches!(err, DecodeError::Image(_)));
    }
}
