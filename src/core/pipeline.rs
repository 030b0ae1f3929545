use crate::core::color::ColorRGB;
use crate::core::geometry::VertexOut;
use crate::core::rasterizer::CullMode;
use crate::pipeline::shading::ShadingMode;
use log::info;
use nalgebra::Vector3;
use serde::Deserialize;
use std::ops::{Add, Mul};

/// Trait for types that can be linearly interpolated across a triangle's surface.
///
/// Requirements:
/// - Copy + Clone: cheaply duplicable values for per-vertex storage and interpolation.
/// - Add + Mul<f32>: support linear combination (a + b * t) used by barycentric interpolation.
/// - Send + Sync: safe to use from multiple threads during parallel rasterization.
pub trait Interpolatable:
    Copy + Clone + Add<Output = Self> + Mul<f32, Output = Self> + Send + Sync
{
}

impl Interpolatable for f32 {}
impl Interpolatable for Vector3<f32> {}

/// The programmable pixel stage.
///
/// Implementations must be thread-safe because fragments of different
/// triangles are shaded concurrently. A shader must not keep state between
/// calls; everything it branches on is read from its own fields.
pub trait FragmentShader: Sync {
    /// Computes the linear RGB color for one fully interpolated vertex.
    /// The result may exceed 1; the rasterizer tone maps before packing.
    fn shade(&self, vertex: &VertexOut) -> ColorRGB;
}

/// Every runtime toggle of the software pipeline in one place.
///
/// Owned by the caller (input handling, tests) and passed by reference into
/// each frame, so the state is inspectable and injectable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub cull_mode: CullMode,
    pub shading_mode: ShadingMode,
    pub use_normal_map: bool,
    pub show_depth_buffer: bool,
    pub show_bounding_box: bool,
    pub rotate: bool,
    /// Draw meshes flagged transparent. Only a hardware `FrameRenderer`
    /// reads this; the software path never draws them.
    pub show_transparent: bool,
    pub uniform_clear_color: bool,
    pub scene_color: [f32; 3],
    pub uniform_color: [f32; 3],
    pub ambient: [f32; 3],
    pub shininess: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::Back,
            shading_mode: ShadingMode::Combined,
            use_normal_map: true,
            show_depth_buffer: false,
            show_bounding_box: false,
            rotate: true,
            show_transparent: true,
            uniform_clear_color: false,
            scene_color: [0.39, 0.39, 0.39],
            uniform_color: [0.1, 0.1, 0.1],
            ambient: [0.025, 0.025, 0.025],
            shininess: 25.0,
        }
    }
}

impl RenderConfig {
    /// The color the frame is cleared to.
    pub fn clear_color(&self) -> ColorRGB {
        if self.uniform_clear_color {
            Vector3::from(self.uniform_color)
        } else {
            Vector3::from(self.scene_color)
        }
    }

    pub fn cycle_cull_mode(&mut self) {
        self.cull_mode = self.cull_mode.next();
        info!("Cull mode set to {:?}", self.cull_mode);
    }

    pub fn cycle_shading_mode(&mut self) {
        self.shading_mode = self.shading_mode.next();
        info!("Shading mode set to {:?}", self.shading_mode);
    }

    pub fn toggle_normal_map(&mut self) {
        self.use_normal_map = !self.use_normal_map;
        info!("Normal map: {}", on_off(self.use_normal_map));
    }

    pub fn toggle_depth_buffer(&mut self) {
        self.show_depth_buffer = !self.show_depth_buffer;
        info!("Depth buffer visualization: {}", on_off(self.show_depth_buffer));
    }

    pub fn toggle_bounding_box(&mut self) {
        self.show_bounding_box = !self.show_bounding_box;
        info!("Bounding box overlay: {}", on_off(self.show_bounding_box));
    }

    pub fn toggle_rotation(&mut self) {
        self.rotate = !self.rotate;
        info!("Rotation: {}", on_off(self.rotate));
    }

    pub fn toggle_transparent(&mut self) {
        self.show_transparent = !self.show_transparent;
        info!("Transparent meshes: {}", on_off(self.show_transparent));
    }

    pub fn toggle_clear_color(&mut self) {
        self.uniform_clear_color = !self.uniform_clear_color;
        info!("Uniform clear color: {}", on_off(self.uniform_clear_color));
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_follows_toggle() {
        let mut config = RenderConfig::default();
        assert_eq!(config.clear_color(), Vector3::new(0.39, 0.39, 0.39));
        config.toggle_clear_color();
        assert_eq!(config.clear_color(), Vector3::new(0.1, 0.1, 0.1));
    }

    #[test]
    fn cull_mode_cycles_through_all_three() {
        let mut config = RenderConfig::default();
        config.cycle_cull_mode();
        assert_eq!(config.cull_mode, CullMode::Front);
        config.cycle_cull_mode();
        assert_eq!(config.cull_mode, CullMode::None);
        config.cycle_cull_mode();
        assert_eq!(config.cull_mode, CullMode::Back);
    }

    #[test]
    fn parses_partial_render_section() {
        let config: RenderConfig =
            toml::from_str("cull_mode = \"none\"\nshading_mode = \"diffuse\"").unwrap();
        assert_eq!(config.cull_mode, CullMode::None);
        assert_eq!(config.shading_mode, ShadingMode::Diffuse);
        assert!(config.use_normal_map);
    }
}
