use crate::core::geometry::{Vertex, VertexOut};
use crate::core::math::transform::apply_perspective_division;
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Point3, Vector3};
use rayon::prelude::*;

/// Transforms every vertex of `mesh` into NDC, one output per input in the
/// same order.
///
/// Vertices are independent, so the work is split across the rayon pool.
pub fn transform_vertices(mesh: &Mesh, camera: &Camera) -> Vec<VertexOut> {
    let world = mesh.world_matrix();
    let world_view_projection = camera.projection_matrix() * camera.view_matrix() * world;
    let camera_origin = camera.origin;

    mesh.vertices
        .par_iter()
        .map(|v| transform_vertex(v, world, &world_view_projection, &camera_origin))
        .collect()
}

/// Runs a single vertex through the transformation stage.
pub fn transform_vertex(
    vertex: &Vertex,
    world: &Matrix4<f32>,
    world_view_projection: &Matrix4<f32>,
    camera_origin: &Point3<f32>,
) -> VertexOut {
    let clip = world_view_projection * vertex.position.to_homogeneous();
    let world_position = world.transform_point(&vertex.position);

    VertexOut {
        position: apply_perspective_division(&clip),
        color: vertex.color,
        uv: vertex.texcoord,
        normal: normalize_or_zero(world.transform_vector(&vertex.normal)),
        tangent: normalize_or_zero(world.transform_vector(&vertex.tangent)),
        view_direction: camera_origin - world_position,
        world_position,
    }
}

#[inline]
fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}
