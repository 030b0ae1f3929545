//! Pixel shading model on single interpolated vertices.

use dual_rasterizer::core::color::{ColorRGB, WHITE};
use dual_rasterizer::core::geometry::VertexOut;
use dual_rasterizer::core::pipeline::{FragmentShader, RenderConfig};
use dual_rasterizer::pipeline::shading::{PixelShader, ShadingMode};
use dual_rasterizer::scene::context::MeshTextures;
use dual_rasterizer::scene::light::Light;
use dual_rasterizer::scene::texture::Texture;
use nalgebra::{Point3, Vector2, Vector3, Vector4};
use std::f32::consts::PI;

struct Maps {
    diffuse: Texture,
    normal: Texture,
    specular: Texture,
    gloss: Texture,
}

impl Maps {
    fn new() -> Self {
        Self {
            diffuse: Texture::solid([255, 255, 255]),
            // Tangent-space "straight up".
            normal: Texture::solid([128, 128, 255]),
            specular: Texture::solid([255, 255, 255]),
            gloss: Texture::solid([255, 255, 255]),
        }
    }

    fn all(&self) -> MeshTextures<'_> {
        MeshTextures {
            diffuse: Some(&self.diffuse),
            normal: Some(&self.normal),
            specular: Some(&self.specular),
            glossiness: Some(&self.gloss),
        }
    }
}

/// A surface facing -Z, seen head-on.
fn surface(uv: Vector2<f32>) -> VertexOut {
    VertexOut {
        position: Vector4::new(0.0, 0.0, 0.99, 10.0),
        color: WHITE,
        uv,
        normal: Vector3::new(0.0, 0.0, -1.0),
        tangent: Vector3::x(),
        view_direction: Vector3::new(0.0, 0.0, -1.0),
        world_position: Point3::origin(),
    }
}

/// A white directional light whose observed area on `surface` is `area`.
fn light_with_area(area: f32, intensity: f32) -> Light {
    let side = (1.0 - area * area).sqrt();
    Light::new_directional(Vector3::new(-side, 0.0, area), WHITE, intensity)
}

fn config(mode: ShadingMode, normal_map: bool) -> RenderConfig {
    RenderConfig {
        shading_mode: mode,
        use_normal_map: normal_map,
        ..RenderConfig::default()
    }
}

fn assert_color(actual: ColorRGB, expected: ColorRGB, tolerance: f32) {
    assert!(
        (actual - expected).abs().max() < tolerance,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

mod modes {
    use super::*;

    #[test]
    fn observed_area_is_reported_as_grayscale() {
        let maps = Maps::new();
        let lights = [light_with_area(0.8, 7.0)];
        let config = config(ShadingMode::ObservedArea, false);
        let shader = PixelShader::new(&lights, maps.all(), &config);

        let color = shader.shade(&surface(Vector2::new(0.5, 0.5)));
        assert_color(color, Vector3::repeat(0.8), 1e-5);
    }

    #[test]
    fn diffuse_is_lambert_times_radiance() {
        let maps = Maps::new();
        let lights = [light_with_area(1.0, 7.0)];
        let config = config(ShadingMode::Diffuse, false);
        let shader = PixelShader::new(&lights, maps.all(), &config);

        let color = shader.shade(&surface(Vector2::new(0.5, 0.5)));
        assert_color(color, Vector3::repeat(7.0 / PI), 1e-4);
    }

    #[test]
    fn specular_peaks_along_the_mirror_direction() {
        let maps = Maps::new();
        let lights = [light_with_area(1.0, 1.0)];
        let config = config(ShadingMode::Specular, false);
        let shader = PixelShader::new(&lights, maps.all(), &config);

        let head_on = shader.shade(&surface(Vector2::new(0.5, 0.5)));
        assert_color(head_on, Vector3::repeat(1.0), 1e-4);

        let mut grazing = surface(Vector2::new(0.5, 0.5));
        grazing.view_direction = Vector3::x();
        assert_color(shader.shade(&grazing), Vector3::zeros(), 1e-6);
    }

    #[test]
    fn gloss_red_channel_scales_the_shininess_exponent() {
        let mut maps = Maps::new();
        maps.gloss = Texture::solid([128, 0, 0]);
        let lights = [light_with_area(1.0, 1.0)];
        let mut config = config(ShadingMode::Specular, false);

        // The mirror direction is -Z; this view sits at cos = 0.8 to it.
        let mut vertex = surface(Vector2::new(0.5, 0.5));
        vertex.view_direction = Vector3::new(0.6, 0.0, -0.8);

        let shader = PixelShader::new(&lights, maps.all(), &config);
        let expected = 0.8f32.powf(128.0 / 255.0 * 25.0);
        assert_color(shader.shade(&vertex), Vector3::repeat(expected), 1e-5);

        config.shininess = 10.0;
        let shader = PixelShader::new(&lights, maps.all(), &config);
        let expected = 0.8f32.powf(128.0 / 255.0 * 10.0);
        assert_color(shader.shade(&vertex), Vector3::repeat(expected), 1e-5);
    }

    #[test]
    fn combined_adds_ambient_diffuse_and_specular() {
        let maps = Maps::new();
        let lights = [light_with_area(0.8, 7.0)];
        let config = config(ShadingMode::Combined, false);
        let shader = PixelShader::new(&lights, maps.all(), &config);

        let mut vertex = surface(Vector2::new(0.5, 0.5));
        // Perpendicular to the reflection, so no highlight.
        vertex.view_direction = Vector3::y();
        let expected = Vector3::repeat((0.025 + 7.0 / PI) * 0.8);
        assert_color(shader.shade(&vertex), expected, 1e-4);
    }

    #[test]
    fn lights_accumulate() {
        let maps = Maps::new();
        let lights = [light_with_area(0.8, 7.0), light_with_area(0.5, 7.0)];
        let config = config(ShadingMode::ObservedArea, false);
        let shader = PixelShader::new(&lights, maps.all(), &config);
        assert_color(
            shader.shade(&surface(Vector2::new(0.5, 0.5))),
            Vector3::repeat(1.3),
            1e-5,
        );
    }
}

mod degradation {
    use super::*;

    #[test]
    fn uv_outside_unit_square_gets_no_light() {
        let maps = Maps::new();
        let lights = [light_with_area(0.8, 7.0)];
        for mode in [
            ShadingMode::Combined,
            ShadingMode::ObservedArea,
            ShadingMode::Diffuse,
            ShadingMode::Specular,
        ] {
            let config = config(mode, true);
            let shader = PixelShader::new(&lights, maps.all(), &config);
            let color = shader.shade(&surface(Vector2::new(1.5, 0.2)));
            assert_eq!(color, Vector3::zeros());
        }
    }

    #[test]
    fn back_facing_light_is_skipped() {
        let maps = Maps::new();
        let lights = [Light::new_directional(Vector3::new(0.0, 0.0, -1.0), WHITE, 7.0)];
        let config = config(ShadingMode::ObservedArea, false);
        let shader = PixelShader::new(&lights, maps.all(), &config);
        assert_eq!(shader.shade(&surface(Vector2::new(0.5, 0.5))), Vector3::zeros());
    }

    #[test]
    fn any_missing_texture_yields_black() {
        let maps = Maps::new();
        let lights = [light_with_area(0.8, 7.0)];
        let config = config(ShadingMode::ObservedArea, false);

        let mut textures = maps.all();
        textures.glossiness = None;
        let shader = PixelShader::new(&lights, textures, &config);
        assert_eq!(shader.shade(&surface(Vector2::new(0.5, 0.5))), Vector3::zeros());
    }

    #[test]
    fn missing_normal_map_yields_black_when_enabled() {
        let maps = Maps::new();
        let lights = [light_with_area(0.8, 7.0)];
        let config = config(ShadingMode::ObservedArea, true);

        let mut textures = maps.all();
        textures.normal = None;
        let shader = PixelShader::new(&lights, textures, &config);
        assert_eq!(shader.shade(&surface(Vector2::new(0.5, 0.5))), Vector3::zeros());
    }
}

mod normal_mapping {
    use super::*;

    #[test]
    fn flat_normal_map_keeps_the_geometric_normal() {
        let maps = Maps::new();
        let lights = [light_with_area(0.8, 7.0)];
        let config = config(ShadingMode::ObservedArea, true);
        let shader = PixelShader::new(&lights, maps.all(), &config);
        assert_color(
            shader.shade(&surface(Vector2::new(0.5, 0.5))),
            Vector3::repeat(0.8),
            1e-2,
        );
    }

    #[test]
    fn tilted_normal_map_changes_observed_area() {
        let mut maps = Maps::new();
        // Tangent-space +X: the shading normal becomes the tangent.
        maps.normal = Texture::solid([255, 128, 128]);
        let lights = [Light::new_directional(Vector3::new(-1.0, 0.0, 0.0), WHITE, 7.0)];

        let flat = config(ShadingMode::ObservedArea, false);
        let shader = PixelShader::new(&lights, maps.all(), &flat);
        assert_eq!(shader.shade(&surface(Vector2::new(0.5, 0.5))), Vector3::zeros());

        let mapped = config(ShadingMode::ObservedArea, true);
        let shader = PixelShader::new(&lights, maps.all(), &mapped);
        assert_color(
            shader.shade(&surface(Vector2::new(0.5, 0.5))),
            Vector3::repeat(1.0),
            1e-2,
        );
    }
}

mod point_lights {
    use super::*;

    fn shade_at(lights: &[Light], world_position: Point3<f32>) -> ColorRGB {
        let maps = Maps::new();
        let config = config(ShadingMode::Diffuse, false);
        let shader = PixelShader::new(lights, maps.all(), &config);
        let mut vertex = surface(Vector2::new(0.5, 0.5));
        vertex.world_position = world_position;
        shader.shade(&vertex)
    }

    #[test]
    fn radiance_falls_off_with_distance_to_the_shaded_point() {
        let lights = [Light::new_point(Point3::new(0.0, 0.0, -2.0), WHITE, 7.0)];

        let near = shade_at(&lights, Point3::origin());
        assert_color(near, Vector3::repeat(7.0 / 4.0 / PI), 1e-5);

        let far = shade_at(&lights, Point3::new(0.0, 0.0, 1.0));
        assert_color(far, Vector3::repeat(7.0 / 9.0 / PI), 1e-5);
    }

    #[test]
    fn direction_follows_the_light_position() {
        // Level with the surface: grazing, so no contribution.
        let beside = [Light::new_point(Point3::new(2.0, 0.0, 0.0), WHITE, 7.0)];
        assert_eq!(shade_at(&beside, Point3::origin()), Vector3::zeros());

        // Diagonal in front: cos 45 degrees over a squared distance of 8.
        let diagonal = [Light::new_point(Point3::new(2.0, 0.0, -2.0), WHITE, 7.0)];
        let expected = 7.0 / 8.0 / PI * std::f32::consts::FRAC_1_SQRT_2;
        assert_color(
            shade_at(&diagonal, Point3::origin()),
            Vector3::repeat(expected),
            1e-5,
        );
    }
}

mod depth_view {
    use super::*;

    #[test]
    fn depth_is_remapped_to_grayscale() {
        let maps = Maps::new();
        let config = RenderConfig {
            show_depth_buffer: true,
            ..RenderConfig::default()
        };
        let shader = PixelShader::new(&[], maps.all(), &config);

        let mut vertex = surface(Vector2::new(0.5, 0.5));
        vertex.position.z = 0.9925;
        assert_color(shader.shade(&vertex), Vector3::repeat(0.5), 1e-3);

        vertex.position.z = 0.5;
        assert_eq!(shader.shade(&vertex), Vector3::zeros());
    }

    #[test]
    fn depth_view_ignores_missing_textures() {
        let config = RenderConfig {
            show_depth_buffer: true,
            ..RenderConfig::default()
        };
        let shader = PixelShader::new(&[], MeshTextures::default(), &config);
        let mut vertex = surface(Vector2::new(0.5, 0.5));
        vertex.position.z = 1.0;
        assert_eq!(shader.shade(&vertex), Vector3::repeat(1.0));
    }
}
