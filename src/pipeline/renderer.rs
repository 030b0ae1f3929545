use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::RenderConfig;
use crate::core::rasterizer::Rasterizer;
use crate::error::RenderError;
use crate::pipeline::shading::PixelShader;
use crate::pipeline::vertex::transform_vertices;
use crate::scene::camera::Camera;
use crate::scene::context::Scene;
use log::debug;
use std::f32::consts::FRAC_PI_4;

/// Mesh yaw speed while rotation is enabled, radians per second.
pub const ROTATION_SPEED: f32 = FRAC_PI_4;

/// One way of turning a scene into a packed `0xFFRRGGBB` frame.
pub trait FrameRenderer {
    fn name(&self) -> &'static str;

    /// Advances per-frame animation by `dt` seconds.
    fn update(&mut self, scene: &mut Scene, config: &RenderConfig, dt: f32);

    /// Draws one complete frame.
    fn render(&mut self, scene: &Scene, camera: &Camera, config: &RenderConfig);

    /// The last finished frame, row-major.
    fn frame(&self) -> &[u32];
}

/// Rotates every mesh around Y when rotation is enabled.
pub fn animate_scene(scene: &mut Scene, config: &RenderConfig, dt: f32) {
    if !config.rotate {
        return;
    }
    for mesh in scene.meshes.iter_mut() {
        mesh.rotate_y(ROTATION_SPEED * dt);
    }
}

/// The CPU pipeline: vertex stage, rasterizer and pixel shader.
pub struct SoftwareRenderer {
    framebuffer: FrameBuffer,
    frame: Vec<u32>,
}

impl SoftwareRenderer {
    /// Allocates the color and depth buffers at a fixed resolution.
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        let framebuffer = FrameBuffer::new(width, height)?;
        let mut frame = Vec::new();
        frame
            .try_reserve_exact(width * height)
            .map_err(|_| RenderError::BufferAllocation {
                what: "presentation buffer",
                pixels: width * height,
            })?;
        frame.resize(width * height, 0);
        Ok(Self { framebuffer, frame })
    }

    pub fn width(&self) -> usize {
        self.framebuffer.width
    }

    pub fn height(&self) -> usize {
        self.framebuffer.height
    }

    /// Read access to the color and depth buffers of the last frame.
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }
}

impl FrameRenderer for SoftwareRenderer {
    fn name(&self) -> &'static str {
        "software"
    }

    fn update(&mut self, scene: &mut Scene, config: &RenderConfig, dt: f32) {
        animate_scene(scene, config, dt);
    }

    fn render(&mut self, scene: &Scene, camera: &Camera, config: &RenderConfig) {
        self.framebuffer.clear(config.clear_color());

        let rasterizer = Rasterizer::from_config(config);
        for mesh in scene.meshes.iter().filter(|m| !m.transparent) {
            let vertices = transform_vertices(mesh, camera);
            let shader = PixelShader::new(&scene.lights, scene.resolve_maps(&mesh.maps), config);
            rasterizer.draw_mesh(
                &self.framebuffer,
                &shader,
                &vertices,
                &mesh.indices,
                mesh.topology,
            );
        }

        self.framebuffer.copy_pixels_to(&mut self.frame);
        debug!("Software frame done ({} meshes)", scene.meshes.len());
    }

    fn frame(&self) -> &[u32] {
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::pack_rgb;
    use crate::scene::mesh::Mesh;
    use nalgebra::Point3;

    #[test]
    fn construction_fails_on_empty_resolution() {
        assert!(SoftwareRenderer::new(0, 0).is_err());
    }

    #[test]
    fn rotation_respects_toggle() {
        let mut scene = Scene::new();
        scene.add_mesh(Mesh::create_test_triangle());
        let mut config = RenderConfig::default();

        animate_scene(&mut scene, &config, 2.0);
        assert!((scene.meshes[0].total_yaw() - FRAC_PI_4 * 2.0).abs() < 1e-6);

        config.rotate = false;
        animate_scene(&mut scene, &config, 2.0);
        assert!((scene.meshes[0].total_yaw() - FRAC_PI_4 * 2.0).abs() < 1e-6);
    }

    #[test]
    fn transparent_meshes_are_skipped() {
        let mut scene = Scene::new();
        scene.add_mesh(Mesh::create_test_triangle().with_transparent(true));
        let camera = Camera::new(Point3::new(0.0, 0.0, -2.0), 90.0, 1.0);
        let config = RenderConfig::default();
        let mut renderer = SoftwareRenderer::new(32, 32).unwrap();
        renderer.render(&scene, &camera, &config);
        let clear = pack_rgb(config.clear_color());
        assert!(renderer.frame().iter().all(|&p| p == clear));
    }
}
