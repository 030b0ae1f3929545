//! Dual-mode 3D renderer.
//!
//! The software path is a complete CPU pipeline: vertex transformation,
//! parallel edge-function rasterization with perspective-correct
//! interpolation against an atomic depth buffer, and a textured Phong
//! pixel shader. A hardware backend can be plugged in through
//! [`pipeline::renderer::FrameRenderer`].

pub mod app;
pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod scene;
pub mod ui;
