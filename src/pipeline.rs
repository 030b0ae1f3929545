pub mod manager;
pub mod renderer;
pub mod shading;
pub mod vertex;
