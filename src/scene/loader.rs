use crate::io::config::{CameraConfig, Config, MeshConfig};
use crate::io::obj_loader::load_obj;
use crate::scene::camera::Camera;
use crate::scene::context::{Scene, TextureId};
use crate::scene::mesh::{MaterialMaps, Mesh};
use crate::scene::texture::Texture;
use log::{error, info, warn};
use nalgebra::{Point3, Vector3};

/// Builds the camera described by `[camera]`.
pub fn build_camera(config: &CameraConfig, aspect_ratio: f32) -> Camera {
    let mut camera = Camera::new(Point3::from(config.origin), config.fov, aspect_ratio);
    camera.total_yaw = config.yaw.to_radians();
    camera.total_pitch = config.pitch.to_radians();
    camera.update_matrices();
    camera
}

/// Initial resource loading (Heavy I/O).
///
/// A mesh that fails to load is replaced by the test triangle and a missing
/// texture leaves its slot empty; neither aborts startup.
pub fn build_scene(config: &Config) -> Scene {
    let mut scene = Scene::new();
    scene.lights = config.build_lights();

    for mesh_conf in &config.assets.meshes {
        let mesh = match load_obj(&mesh_conf.path) {
            Ok(m) => m,
            Err(e) => {
                error!("{}. Using fallback mesh.", e);
                Mesh::create_test_triangle()
            }
        };

        let maps = MaterialMaps {
            diffuse: load_texture(&mut scene, mesh_conf.diffuse.as_deref()),
            normal: load_texture(&mut scene, mesh_conf.normal.as_deref()),
            specular: load_texture(&mut scene, mesh_conf.specular.as_deref()),
            glossiness: load_texture(&mut scene, mesh_conf.glossiness.as_deref()),
        };

        let mut mesh = mesh
            .with_maps(maps)
            .with_transparent(mesh_conf.transparent);
        mesh.topology = mesh_conf.topology;
        place_mesh(&mut mesh, mesh_conf);
        scene.add_mesh(mesh);
    }

    info!(
        "Scene initialized with {} meshes, {} textures, {} lights.",
        scene.meshes.len(),
        scene.textures.len(),
        scene.lights.len()
    );
    scene
}

/// Re-applies the parts of the configuration that need no asset I/O.
pub fn apply_hot_reload(scene: &mut Scene, config: &Config) {
    scene.lights = config.build_lights();
    info!("Reloaded {} lights from configuration.", scene.lights.len());
}

fn place_mesh(mesh: &mut Mesh, conf: &MeshConfig) {
    mesh.scale(Vector3::from(conf.scale));
    mesh.rotate_y(conf.rotation_y.to_radians());
    mesh.translate(Vector3::from(conf.translation));
}

fn load_texture(scene: &mut Scene, path: Option<&str>) -> Option<TextureId> {
    let path = path?;
    match Texture::load(path) {
        Ok(tex) => Some(scene.add_texture(tex)),
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}
