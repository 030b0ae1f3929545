use crate::core::color::ColorRGB;
use crate::error::RenderError;
use image::RgbImage;
use log::info;
use nalgebra::{Vector2, Vector3};
use std::path::Path;

/// A decoded 2D texture map. Immutable after load.
#[derive(Debug, Clone)]
pub struct Texture {
    image: RgbImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Decodes an image file into RGB8.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref).map_err(|e| RenderError::TextureLoad {
            path: path_ref.display().to_string(),
            reason: e.to_string(),
        })?;
        let texture = Self::from_image(img.to_rgb8());
        info!(
            "Loaded texture: {:?} ({}x{})",
            path_ref, texture.width, texture.height
        );
        Ok(texture)
    }

    /// Builds a texture from raw RGB8 bytes, row-major from the top-left.
    pub fn from_rgb8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RenderError> {
        let image = RgbImage::from_raw(width, height, pixels).ok_or_else(|| {
            RenderError::TextureLoad {
                path: "<memory>".to_string(),
                reason: format!("buffer does not hold {}x{} RGB pixels", width, height),
            }
        })?;
        Ok(Self::from_image(image))
    }

    /// A 1x1 texture of a single color.
    pub fn solid(color: [u8; 3]) -> Self {
        Self::from_image(RgbImage::from_pixel(1, 1, image::Rgb(color)))
    }

    fn from_image(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            image,
            width,
            height,
        }
    }

    /// Nearest-neighbor lookup. UV origin is the top-left texel.
    ///
    /// Callers are expected to reject UVs outside [0, 1]; coordinates at or
    /// past the edge are clamped to the last texel.
    pub fn sample(&self, uv: Vector2<f32>) -> ColorRGB {
        if self.width == 0 || self.height == 0 {
            return Vector3::zeros();
        }
        let x = ((uv.x * self.width as f32).max(0.0) as u32).min(self.width - 1);
        let y = ((uv.y * self.height as f32).max(0.0) as u32).min(self.height - 1);

        let pixel = self.image.get_pixel(x, y);
        Vector3::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        )
    }
}
