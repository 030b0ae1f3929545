use crate::core::pipeline::RenderConfig;
use crate::error::RenderError;
use crate::scene::light::Light;
use crate::scene::mesh::PrimitiveTopology;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Everything read from the TOML configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    /// `[[light]]` tables; an absent key keeps the default sun.
    #[serde(default = "default_lights", rename = "light")]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            lights: default_lights(),
            assets: AssetsConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path_ref = path.as_ref();
        let content = fs::read_to_string(path_ref).map_err(|e| {
            RenderError::Config(format!("Failed to read '{}': {}", path_ref.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RenderError> {
        toml::from_str(content)
            .map_err(|e| RenderError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Scene lights built from the `[[light]]` tables.
    pub fn build_lights(&self) -> Vec<Light> {
        self.lights.iter().map(LightConfig::to_light).collect()
    }
}

// --- Window ---

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_target_fps")]
    pub target_fps: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            target_fps: default_target_fps(),
        }
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_title() -> String {
    "Dual Rasterizer".to_string()
}
fn default_target_fps() -> usize {
    60
}

// --- Camera ---

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub origin: [f32; 3],
    /// Vertical field of view, degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_boost_speed")]
    pub boost_speed: f32,
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0, 0.0],
            fov: default_fov(),
            yaw: 0.0,
            pitch: 0.0,
            speed: default_speed(),
            boost_speed: default_boost_speed(),
            rotation_speed: default_rotation_speed(),
        }
    }
}

fn default_fov() -> f32 {
    45.0
}
fn default_speed() -> f32 {
    15.0
}
fn default_boost_speed() -> f32 {
    25.0
}
fn default_rotation_speed() -> f32 {
    0.4
}

// --- Lights ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    Directional,
    Point,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightConfig {
    #[serde(rename = "type")]
    pub kind: LightKind,
    #[serde(default = "default_light_direction")]
    pub direction: [f32; 3],
    #[serde(default)]
    pub origin: [f32; 3],
    #[serde(default = "default_white")]
    pub color: [f32; 3],
    #[serde(default = "default_light_intensity")]
    pub intensity: f32,
    /// Point-light falloff `(constant, linear, quadratic)`.
    #[serde(default = "default_attenuation")]
    pub attenuation: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            kind: LightKind::Directional,
            direction: default_light_direction(),
            origin: [0.0, 0.0, 0.0],
            color: default_white(),
            intensity: default_light_intensity(),
            attenuation: default_attenuation(),
        }
    }
}

impl LightConfig {
    pub fn to_light(&self) -> Light {
        let color = Vector3::from(self.color);
        match self.kind {
            LightKind::Directional => {
                Light::new_directional(Vector3::from(self.direction), color, self.intensity)
            }
            LightKind::Point => Light::Point {
                origin: Point3::from(self.origin),
                color,
                intensity: self.intensity,
                attenuation: (
                    self.attenuation[0],
                    self.attenuation[1],
                    self.attenuation[2],
                ),
            },
        }
    }
}

fn default_lights() -> Vec<LightConfig> {
    vec![LightConfig::default()]
}
fn default_light_direction() -> [f32; 3] {
    [0.577, -0.577, 0.577]
}
fn default_white() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_light_intensity() -> f32 {
    7.0
}
fn default_attenuation() -> [f32; 3] {
    [0.0, 0.0, 1.0]
}

// --- Assets ---

#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_meshes", rename = "mesh")]
    pub meshes: Vec<MeshConfig>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            meshes: default_meshes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeshConfig {
    pub path: String,
    #[serde(default)]
    pub topology: PrimitiveTopology,
    #[serde(default)]
    pub transparent: bool,

    // --- Transform ---
    #[serde(default)]
    pub translation: [f32; 3],
    /// Initial yaw, degrees.
    #[serde(default)]
    pub rotation_y: f32,
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],

    // --- Texture maps ---
    pub diffuse: Option<String>,
    pub normal: Option<String>,
    pub specular: Option<String>,
    pub glossiness: Option<String>,
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_meshes() -> Vec<MeshConfig> {
    vec![
        MeshConfig {
            path: "resources/vehicle.obj".to_string(),
            topology: PrimitiveTopology::TriangleList,
            transparent: false,
            translation: [0.0, 0.0, 50.0],
            rotation_y: 0.0,
            scale: default_scale(),
            diffuse: Some("resources/vehicle_diffuse.png".to_string()),
            normal: Some("resources/vehicle_normal.png".to_string()),
            specular: Some("resources/vehicle_specular.png".to_string()),
            glossiness: Some("resources/vehicle_gloss.png".to_string()),
        },
        MeshConfig {
            path: "resources/fireFX.obj".to_string(),
            topology: PrimitiveTopology::TriangleList,
            transparent: true,
            translation: [0.0, 0.0, 50.0],
            rotation_y: 0.0,
            scale: default_scale(),
            diffuse: Some("resources/fireFX_diffuse.png".to_string()),
            normal: None,
            specular: None,
            glossiness: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rasterizer::CullMode;
    use crate::pipeline::shading::ShadingMode;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 480);
        assert_eq!(config.lights.len(), 1);
        assert_eq!(config.assets.meshes.len(), 2);
        assert!(config.assets.meshes[1].transparent);
        assert_eq!(config.render.cull_mode, CullMode::Back);
    }

    #[test]
    fn parses_full_sections() {
        let text = r#"
            [window]
            width = 320
            height = 200

            [camera]
            origin = [0.0, 1.0, -5.0]
            fov = 60.0

            [[light]]
            type = "point"
            origin = [0.0, 5.0, 0.0]
            intensity = 20.0

            [[assets.mesh]]
            path = "quad.obj"
            topology = "triangle_strip"
            diffuse = "quad.png"

            [render]
            cull_mode = "front"
            shading_mode = "specular"
            show_depth_buffer = true
        "#;
        let config = Config::from_toml_str(text).unwrap();
        assert_eq!(config.window.width, 320);
        assert_eq!(config.camera.fov, 60.0);
        assert_eq!(config.lights[0].kind, LightKind::Point);
        assert_eq!(config.assets.meshes.len(), 1);
        assert_eq!(config.assets.meshes[0].topology, PrimitiveTopology::TriangleStrip);
        assert_eq!(config.assets.meshes[0].scale, [1.0, 1.0, 1.0]);
        assert_eq!(config.render.cull_mode, CullMode::Front);
        assert_eq!(config.render.shading_mode, ShadingMode::Specular);
        assert!(config.render.show_depth_buffer);

        match config.build_lights()[0] {
            Light::Point { attenuation, .. } => assert_eq!(attenuation, (0.0, 0.0, 1.0)),
            _ => panic!("expected a point light"),
        }
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        assert!(matches!(
            Config::from_toml_str("[window\nwidth = 1"),
            Err(RenderError::Config(_))
        ));
    }
}
