use thiserror::Error;

/// Errors surfaced outside the per-frame rendering path.
///
/// Rasterization and shading never fail; they degrade to skipped or black
/// pixels instead.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid output resolution {width}x{height}")]
    InvalidResolution { width: usize, height: usize },
    #[error("Failed to allocate {what} for {pixels} pixels")]
    BufferAllocation { what: &'static str, pixels: usize },
    #[error("Failed to load texture '{path}': {reason}")]
    TextureLoad { path: String, reason: String },
    #[error("Failed to load mesh '{path}': {reason}")]
    MeshLoad { path: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Failed to save image '{path}': {reason}")]
    ImageSave { path: String, reason: String },
    #[error("Window error: {0}")]
    Window(String),
}
