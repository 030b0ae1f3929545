use crate::core::color::{BLACK, ColorRGB, remap};
use crate::core::geometry::VertexOut;
use crate::core::pipeline::{FragmentShader, RenderConfig};
use crate::scene::context::MeshTextures;
use crate::scene::light::Light;
use nalgebra::{Matrix3, Vector3};
use serde::Deserialize;
use std::f32::consts::PI;

/// Near edge of the depth range shown by the depth visualization.
const DEPTH_VIEW_MIN: f32 = 0.985;

/// Which lighting terms end up in the pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    /// Ambient, diffuse and specular, all scaled by the observed area.
    Combined,
    /// The cosine term alone, as grayscale.
    ObservedArea,
    Diffuse,
    Specular,
}

impl ShadingMode {
    /// Combined -> ObservedArea -> Diffuse -> Specular -> Combined.
    pub fn next(self) -> Self {
        match self {
            ShadingMode::Combined => ShadingMode::ObservedArea,
            ShadingMode::ObservedArea => ShadingMode::Diffuse,
            ShadingMode::Diffuse => ShadingMode::Specular,
            ShadingMode::Specular => ShadingMode::Combined,
        }
    }
}

/// Textured Lambert + Phong shader with optional tangent-space normal
/// mapping.
///
/// Built per mesh per frame; holds only borrows, so shading one pixel never
/// affects another.
pub struct PixelShader<'a> {
    pub lights: &'a [Light],
    pub textures: MeshTextures<'a>,
    pub config: &'a RenderConfig,
}

impl<'a> PixelShader<'a> {
    pub fn new(lights: &'a [Light], textures: MeshTextures<'a>, config: &'a RenderConfig) -> Self {
        Self {
            lights,
            textures,
            config,
        }
    }
}

impl FragmentShader for PixelShader<'_> {
    fn shade(&self, vertex: &VertexOut) -> ColorRGB {
        if self.config.show_depth_buffer {
            let depth = remap(vertex.position.z, DEPTH_VIEW_MIN, 1.0);
            return Vector3::new(depth, depth, depth);
        }

        let (Some(diffuse_map), Some(normal_map), Some(specular_map), Some(gloss_map)) = (
            self.textures.diffuse,
            self.textures.normal,
            self.textures.specular,
            self.textures.glossiness,
        ) else {
            return BLACK;
        };

        let uv = vertex.uv;
        // No wrapping: outside the unit square nothing is lit.
        if !(0.0..=1.0).contains(&uv.x) || !(0.0..=1.0).contains(&uv.y) {
            return BLACK;
        }

        let normal = if self.config.use_normal_map {
            let bitangent = vertex.tangent.cross(&vertex.normal);
            let tangent_space = Matrix3::from_columns(&[vertex.tangent, bitangent, vertex.normal]);
            let sampled = normal_map.sample(uv) * 2.0 - Vector3::repeat(1.0);
            (tangent_space * sampled)
                .try_normalize(f32::EPSILON)
                .unwrap_or(vertex.normal)
        } else {
            vertex.normal
        };

        // Texture samples do not depend on the light.
        let lambert_diffuse = diffuse_map.sample(uv) / PI;
        let specular_color = specular_map.sample(uv);
        let gloss_exponent = gloss_map.sample(uv).x * self.config.shininess;
        let ambient = Vector3::from(self.config.ambient);

        let mut final_color = BLACK;
        for light in self.lights {
            let to_light = light.direction_to_light(&vertex.world_position);
            let observed_area = normal.dot(&to_light);
            if observed_area <= 0.0 {
                continue;
            }

            let incident = -to_light;
            let reflected = incident - normal * (2.0 * normal.dot(&incident));
            let cos_alpha = reflected.dot(&vertex.view_direction).max(0.0);
            let phong = specular_color * cos_alpha.powf(gloss_exponent);

            let radiance = light.radiance(&vertex.world_position);

            final_color += match self.config.shading_mode {
                ShadingMode::ObservedArea => Vector3::repeat(observed_area),
                ShadingMode::Diffuse => radiance.component_mul(&lambert_diffuse) * observed_area,
                ShadingMode::Specular => phong * observed_area,
                ShadingMode::Combined => {
                    (ambient + radiance.component_mul(&lambert_diffuse) + phong) * observed_area
                }
            };
        }
        final_color
    }
}
