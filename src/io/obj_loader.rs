use crate::core::geometry::Vertex;
use crate::error::RenderError;
use crate::scene::mesh::{Mesh, PrimitiveTopology};
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file and returns a unified triangle-list Mesh.
///
/// All sub-models are merged. UVs are flipped to a top-left origin and
/// per-vertex tangents are derived from the UV layout.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, RenderError> {
    let path_obj = path.as_ref();
    let mesh_error = |reason: String| RenderError::MeshLoad {
        path: path_obj.display().to_string(),
        reason,
    };

    if !path_obj.exists() {
        return Err(mesh_error("file not found".to_string()));
    }

    info!("Loading OBJ file: {}", path_obj.display());

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true, // Important: Unifies indices for Position/Normal/UV
        ..Default::default()
    };

    let (models, _materials) =
        tobj::load_obj(path_obj, &load_options).map_err(|e| mesh_error(e.to_string()))?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut index_offset = 0u32;

    for model in models {
        let mesh = &model.mesh;
        let num_vertices = mesh.positions.len() / 3;

        let has_normals = !mesh.normals.is_empty();
        let has_texcoords = !mesh.texcoords.is_empty();

        if !has_normals {
            warn!(
                "Mesh '{}' is missing normals. Using default (0, 1, 0).",
                model.name
            );
        }

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            );

            let normal = if has_normals {
                Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2],
                )
            } else {
                Vector3::y()
            };

            // OBJ puts v = 0 at the bottom of the image.
            let texcoord = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };

            vertices.push(Vertex::new(position, normal, texcoord));
        }

        indices.extend(mesh.indices.iter().map(|index| index + index_offset));
        index_offset += num_vertices as u32;
    }

    compute_tangents(&mut vertices, &indices);

    info!(
        "OBJ loaded successfully. Total vertices: {}, Total indices: {}",
        vertices.len(),
        indices.len()
    );

    Ok(Mesh::new(vertices, indices, PrimitiveTopology::TriangleList))
}

/// Accumulates per-triangle tangents from UV derivatives, then
/// Gram-Schmidt orthogonalizes each against its vertex normal.
pub fn compute_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accumulated = vec![Vector3::<f32>::zeros(); vertices.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(v0), Some(v1), Some(v2)) = (vertices.get(i0), vertices.get(i1), vertices.get(i2))
        else {
            continue;
        };

        let edge0 = v1.position - v0.position;
        let edge1 = v2.position - v0.position;
        let diff_x = Vector2::new(v1.texcoord.x - v0.texcoord.x, v2.texcoord.x - v0.texcoord.x);
        let diff_y = Vector2::new(v1.texcoord.y - v0.texcoord.y, v2.texcoord.y - v0.texcoord.y);

        let det = diff_x.x * diff_y.y - diff_y.x * diff_x.y;
        if det.abs() < 1e-12 {
            continue;
        }
        let tangent = (edge0 * diff_y.y - edge1 * diff_y.x) / det;

        accumulated[i0] += tangent;
        accumulated[i1] += tangent;
        accumulated[i2] += tangent;
    }

    for (vertex, tangent) in vertices.iter_mut().zip(accumulated) {
        let n = vertex.normal;
        let orthogonal = tangent - n * n.dot(&tangent);
        vertex.tangent = orthogonal
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros);
    }
}
