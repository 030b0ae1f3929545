pub mod camera;
pub mod context;
pub mod light;
pub mod loader;
pub mod mesh;
pub mod texture;
