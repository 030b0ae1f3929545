use crate::core::geometry::Vertex;
use crate::core::math::transform::TransformFactory;
use crate::scene::context::TextureId;
use nalgebra::{Matrix4, Point3, Vector2, Vector3};
use serde::Deserialize;

/// How the index list is grouped into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveTopology {
    /// Every three indices form one triangle.
    #[default]
    TriangleList,
    /// Each window of three indices forms a triangle, sliding by one.
    TriangleStrip,
}

/// The four texture slots a lit mesh samples from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterialMaps {
    pub diffuse: Option<TextureId>,
    pub normal: Option<TextureId>,
    pub specular: Option<TextureId>,
    pub glossiness: Option<TextureId>,
}

/// A collection of vertices and indices representing a 3D object, plus its
/// placement in the world.
///
/// The world matrix is private: it is recomputed by every transform mutator
/// and can only be read.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Object-space vertices.
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: PrimitiveTopology,
    pub maps: MaterialMaps,
    /// Drawn only by the hardware path.
    pub transparent: bool,

    translation: Matrix4<f32>,
    rotation: Matrix4<f32>,
    scale: Matrix4<f32>,
    total_yaw: f32,
    world: Matrix4<f32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, topology: PrimitiveTopology) -> Self {
        Self {
            vertices,
            indices,
            topology,
            maps: MaterialMaps::default(),
            transparent: false,
            translation: Matrix4::identity(),
            rotation: Matrix4::identity(),
            scale: Matrix4::identity(),
            total_yaw: 0.0,
            world: Matrix4::identity(),
        }
    }

    pub fn with_maps(mut self, maps: MaterialMaps) -> Self {
        self.maps = maps;
        self
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Places the mesh at `offset` (absolute, not cumulative).
    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.translation = TransformFactory::translation(&offset);
        self.update_world_matrix();
    }

    /// Adds `yaw` radians to the accumulated rotation around Y.
    pub fn rotate_y(&mut self, yaw: f32) {
        self.total_yaw += yaw;
        self.rotation = TransformFactory::rotation_y(self.total_yaw);
        self.update_world_matrix();
    }

    /// Sets the per-axis scale (absolute, not cumulative).
    pub fn scale(&mut self, scale: Vector3<f32>) {
        self.scale = TransformFactory::scaling_nonuniform(&scale);
        self.update_world_matrix();
    }

    pub fn total_yaw(&self) -> f32 {
        self.total_yaw
    }

    #[inline]
    pub fn world_matrix(&self) -> &Matrix4<f32> {
        &self.world
    }

    // Scale first, then rotate, then translate.
    fn update_world_matrix(&mut self) {
        self.world = self.translation * self.rotation * self.scale;
    }

    /// Creates a simple triangle mesh for testing purposes.
    ///
    /// Vertices run counter-clockwise when seen from -Z, the side a default
    /// camera looks from.
    pub fn create_test_triangle() -> Self {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 0.5, 0.0), normal, Vector2::new(0.5, 0.0)),
            Vertex::new(Point3::new(-0.5, -0.5, 0.0), normal, Vector2::new(0.0, 1.0)),
            Vertex::new(Point3::new(0.5, -0.5, 0.0), normal, Vector2::new(1.0, 1.0)),
        ];
        Self::new(vertices, vec![0, 1, 2], PrimitiveTopology::TriangleList)
    }
}
