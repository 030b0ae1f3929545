use crate::core::color::{WHITE, max_to_one, pack_rgb};
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::VertexOut;
use crate::core::math::interpolation::{
    barycentric_weights, edge_function, edge_values, perspective_correct_depth,
    perspective_correct_interpolate,
};
use crate::core::math::transform::{is_inside_ndc, ndc_to_raster};
use crate::core::pipeline::{FragmentShader, RenderConfig};
use crate::scene::mesh::PrimitiveTopology;
use nalgebra::{Point2, Vector3};
use rayon::prelude::*;
use serde::Deserialize;

const AREA_EPSILON: f32 = 1e-6;

/// Which triangle winding survives the inside test.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CullMode {
    /// Keep triangles whose edge values are all non-negative.
    Back,
    /// Keep triangles whose edge values are all non-positive.
    Front,
    /// Keep both windings.
    None,
}

impl CullMode {
    /// Back -> Front -> None -> Back.
    pub fn next(self) -> Self {
        match self {
            CullMode::Back => CullMode::Front,
            CullMode::Front => CullMode::None,
            CullMode::None => CullMode::Back,
        }
    }

    /// Inside test for one pixel given its three edge values.
    #[inline(always)]
    pub fn accepts(self, edges: Vector3<f32>) -> bool {
        let all_positive = edges.x >= 0.0 && edges.y >= 0.0 && edges.z >= 0.0;
        let all_negative = edges.x <= 0.0 && edges.y <= 0.0 && edges.z <= 0.0;
        match self {
            CullMode::Back => all_positive,
            CullMode::Front => all_negative,
            CullMode::None => all_positive || all_negative,
        }
    }
}

/// The Rasterizer is responsible for drawing transformed triangles onto the FrameBuffer.
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer {
    pub cull_mode: CullMode,
    /// Paint every bounding-box pixel white instead of shading.
    pub show_bounding_box: bool,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::Back,
            show_bounding_box: false,
        }
    }
}

impl Rasterizer {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            cull_mode: config.cull_mode,
            show_bounding_box: config.show_bounding_box,
        }
    }

    /// Draws every triangle of one mesh.
    ///
    /// `vertices` are the mesh's transformed vertices, index-aligned with its
    /// input vertices. Triangles are fanned out over the rayon pool; the
    /// framebuffer's depth discipline makes the result independent of the
    /// order in which they finish.
    pub fn draw_mesh<S: FragmentShader>(
        &self,
        framebuffer: &FrameBuffer,
        shader: &S,
        vertices: &[VertexOut],
        indices: &[u32],
        topology: PrimitiveTopology,
    ) {
        match topology {
            PrimitiveTopology::TriangleList => {
                indices.par_chunks_exact(3).for_each(|tri| {
                    if let Some(triangle) = fetch_triangle(vertices, tri[0], tri[1], tri[2]) {
                        self.draw_triangle(framebuffer, shader, triangle);
                    }
                });
            }
            PrimitiveTopology::TriangleStrip => {
                let count = indices.len().saturating_sub(2);
                (0..count).into_par_iter().for_each(|i| {
                    // Odd windows swap their last two vertices to keep the winding.
                    let (a, b, c) = if i % 2 == 1 {
                        (indices[i], indices[i + 2], indices[i + 1])
                    } else {
                        (indices[i], indices[i + 1], indices[i + 2])
                    };
                    let Some(triangle) = fetch_triangle(vertices, a, b, c) else {
                        return;
                    };
                    let [v0, v1, v2] = &triangle;
                    if v0.coincides_with(v1)
                        || v0.coincides_with(v2)
                        || v1.coincides_with(v2)
                    {
                        return;
                    }
                    self.draw_triangle(framebuffer, shader, triangle);
                });
            }
        }
    }

    /// Culls, converts to raster space and rasterizes a single triangle.
    ///
    /// The triangle is dropped entirely when any vertex falls outside the
    /// NDC square or behind the camera (`w <= 0`); there is no clipping.
    pub fn draw_triangle<S: FragmentShader>(
        &self,
        framebuffer: &FrameBuffer,
        shader: &S,
        mut triangle: [VertexOut; 3],
    ) {
        if triangle
            .iter()
            .any(|v| !is_inside_ndc(&v.position) || v.position.w <= 0.0)
        {
            return;
        }

        let width = framebuffer.width as f32;
        let height = framebuffer.height as f32;
        for v in triangle.iter_mut() {
            let raster = ndc_to_raster(v.position.x, v.position.y, width, height);
            v.position.x = raster.x;
            v.position.y = raster.y;
        }

        self.rasterize(framebuffer, shader, &triangle);
    }

    fn rasterize<S: FragmentShader>(
        &self,
        framebuffer: &FrameBuffer,
        shader: &S,
        triangle: &[VertexOut; 3],
    ) {
        let screen = [
            Point2::new(triangle[0].position.x, triangle[0].position.y),
            Point2::new(triangle[1].position.x, triangle[1].position.y),
            Point2::new(triangle[2].position.x, triangle[2].position.y),
        ];
        let (min_x, min_y, max_x, max_y) =
            compute_bounding_box(&screen, framebuffer.width, framebuffer.height);

        if self.show_bounding_box {
            let white = pack_rgb(WHITE);
            for y in min_y..max_y {
                for x in min_x..max_x {
                    framebuffer.write_color_unchecked(x, y, white);
                }
            }
            return;
        }

        if edge_function(screen[0], screen[1], screen[2]).abs() < AREA_EPSILON {
            return;
        }

        let z = [
            triangle[0].position.z,
            triangle[1].position.z,
            triangle[2].position.z,
        ];
        let original_w = [
            triangle[0].position.w,
            triangle[1].position.w,
            triangle[2].position.w,
        ];

        for y in min_y..max_y {
            for x in min_x..max_x {
                let pixel_center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                let edges = edge_values(pixel_center, screen[0], screen[1], screen[2]);
                if !self.cull_mode.accepts(edges) {
                    continue;
                }
                let Some(weights) = barycentric_weights(edges) else {
                    continue;
                };

                let depth = perspective_correct_depth(weights, z);
                if !(0.0..=1.0).contains(&depth) {
                    continue;
                }

                if !framebuffer.depth_test_and_update(x, y, depth) {
                    continue;
                }

                let mut vertex = perspective_correct_interpolate(*triangle, weights, original_w);
                vertex.normal = normalize_or_zero(vertex.normal);
                vertex.tangent = normalize_or_zero(vertex.tangent);
                vertex.view_direction = normalize_or_zero(vertex.view_direction);

                let color = max_to_one(shader.shade(&vertex));
                framebuffer.write_color_at_depth(x, y, depth, pack_rgb(color));
            }
        }
    }
}

/// Integer pixel bounding box of a raster-space triangle, clamped to the
/// target. Returned as half-open ranges `[min_x, max_x) x [min_y, max_y)`.
pub fn compute_bounding_box(
    points: &[Point2<f32>; 3],
    width: usize,
    height: usize,
) -> (usize, usize, usize, usize) {
    let clamp_x = |v: f32| v.clamp(0.0, width as f32) as usize;
    let clamp_y = |v: f32| v.clamp(0.0, height as f32) as usize;
    let min_x = clamp_x(points[0].x.min(points[1].x).min(points[2].x).floor());
    let min_y = clamp_y(points[0].y.min(points[1].y).min(points[2].y).floor());
    let max_x = clamp_x(points[0].x.max(points[1].x).max(points[2].x).ceil());
    let max_y = clamp_y(points[0].y.max(points[1].y).max(points[2].y).ceil());
    (min_x, min_y, max_x, max_y)
}

#[inline]
fn fetch_triangle(vertices: &[VertexOut], a: u32, b: u32, c: u32) -> Option<[VertexOut; 3]> {
    Some([
        *vertices.get(a as usize)?,
        *vertices.get(b as usize)?,
        *vertices.get(c as usize)?,
    ])
}

#[inline]
fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cull_modes_never_share_a_winding() {
        let ccw = Vector3::new(1.0, 2.0, 3.0);
        let cw = -ccw;
        assert!(CullMode::Back.accepts(ccw) && !CullMode::Back.accepts(cw));
        assert!(CullMode::Front.accepts(cw) && !CullMode::Front.accepts(ccw));
        assert!(CullMode::None.accepts(ccw) && CullMode::None.accepts(cw));
        assert!(!CullMode::None.accepts(Vector3::new(1.0, -1.0, 1.0)));
    }

    #[test]
    fn bounding_box_is_clamped_to_target() {
        let points = [
            Point2::new(-5.0, 2.5),
            Point2::new(30.2, 7.0),
            Point2::new(4.0, 12.9),
        ];
        assert_eq!(compute_bounding_box(&points, 20, 10), (0, 2, 20, 10));
    }

    #[test]
    fn out_of_range_index_is_skipped() {
        let v = VertexOut {
            position: nalgebra::Vector4::new(0.0, 0.0, 0.5, 1.0),
            color: WHITE,
            uv: nalgebra::Vector2::zeros(),
            normal: Vector3::z(),
            tangent: Vector3::x(),
            view_direction: Vector3::z(),
            world_position: nalgebra::Point3::origin(),
        };
        assert!(fetch_triangle(&[v, v], 0, 1, 2).is_none());
        assert!(fetch_triangle(&[v, v, v], 0, 1, 2).is_some());
    }
}
