use nalgebra::Vector3;

/// Linear RGB color. Channels are nominally in [0, 1] but shading may exceed 1.
pub type ColorRGB = Vector3<f32>;

pub const WHITE: ColorRGB = Vector3::new(1.0, 1.0, 1.0);
pub const BLACK: ColorRGB = Vector3::new(0.0, 0.0, 0.0);

/// "Max-to-one" tone mapping.
/// If the brightest channel exceeds 1, every channel is divided by it so the
/// hue is kept and nothing saturates.
#[inline]
pub fn max_to_one(color: ColorRGB) -> ColorRGB {
    let max = color.x.max(color.y).max(color.z);
    if max > 1.0 { color / max } else { color }
}

/// Packs a linear color into an opaque `0xFFRRGGBB` pixel.
/// Channels are clamped to [0, 1] and truncated to 8 bits.
#[inline]
pub fn pack_rgb(color: ColorRGB) -> u32 {
    let r = (color.x.clamp(0.0, 1.0) * 255.0) as u32;
    let g = (color.y.clamp(0.0, 1.0) * 255.0) as u32;
    let b = (color.z.clamp(0.0, 1.0) * 255.0) as u32;
    (255 << 24) | (r << 16) | (g << 8) | b
}

/// Splits a packed pixel into its 8-bit channels.
#[inline]
pub fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    ]
}

/// Maps `value` from `[min, max]` to `[0, 1]`, clamping outside the range.
#[inline]
pub fn remap(value: f32, min: f32, max: f32) -> f32 {
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}
