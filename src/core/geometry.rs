use crate::core::color::{ColorRGB, WHITE};
use crate::core::pipeline::Interpolatable;
use nalgebra::{Point3, Vector2, Vector3, Vector4};
use std::ops::{Add, Mul};

/// A mesh vertex in object space. Immutable once the mesh is loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Base color.
    pub color: ColorRGB,
    /// Texture coordinates (UV), origin at the top-left of the image.
    pub texcoord: Vector2<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
    /// Tangent vector (xyz) for Normal Mapping.
    pub tangent: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, texcoord: Vector2<f32>) -> Self {
        Self {
            position,
            color: WHITE,
            texcoord,
            normal,
            tangent: Vector3::zeros(),
        }
    }
}

/// A vertex after the transformation stage.
///
/// Produced fresh every frame and never persisted.
#[derive(Debug, Clone, Copy)]
pub struct VertexOut {
    /// `x`, `y`, `z` after the perspective divide (NDC); `w` is the
    /// pre-divide clip-space w, kept for perspective-correct interpolation.
    pub position: Vector4<f32>,
    pub color: ColorRGB,
    pub uv: Vector2<f32>,
    /// World-space normal.
    pub normal: Vector3<f32>,
    /// World-space tangent.
    pub tangent: Vector3<f32>,
    /// `camera origin - world position`, normalized only after interpolation.
    pub view_direction: Vector3<f32>,
    /// World-space position, needed for point-light falloff.
    pub world_position: Point3<f32>,
}

impl VertexOut {
    /// Two vertices coincide if both position and color match.
    /// Triangle strips use this to skip zero-area triangles.
    #[inline]
    pub fn coincides_with(&self, other: &VertexOut) -> bool {
        self.position == other.position && self.color == other.color
    }
}

impl Add for VertexOut {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            position: self.position + other.position,
            color: self.color + other.color,
            uv: self.uv + other.uv,
            normal: self.normal + other.normal,
            tangent: self.tangent + other.tangent,
            view_direction: self.view_direction + other.view_direction,
            world_position: Point3::from(self.world_position.coords + other.world_position.coords),
        }
    }
}

impl Mul<f32> for VertexOut {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            position: self.position * scalar,
            color: self.color * scalar,
            uv: self.uv * scalar,
            normal: self.normal * scalar,
            tangent: self.tangent * scalar,
            view_direction: self.view_direction * scalar,
            world_position: Point3::from(self.world_position.coords * scalar),
        }
    }
}

impl Interpolatable for VertexOut {}
