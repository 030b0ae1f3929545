use crate::core::color::unpack_rgb;
use crate::error::RenderError;
use image::{ImageBuffer, Rgb};
use log::info;
use std::path::{Path, PathBuf};

/// Saves a packed `0xFFRRGGBB` frame. The format follows the file extension
/// (`.png`, `.bmp`, ...).
pub fn save_frame<P: AsRef<Path>>(
    buffer: &[u32],
    width: usize,
    height: usize,
    path: P,
) -> Result<(), RenderError> {
    let path_ref = path.as_ref();
    let save_error = |reason: String| RenderError::ImageSave {
        path: path_ref.display().to_string(),
        reason,
    };

    if buffer.len() != width * height {
        return Err(save_error(format!(
            "buffer holds {} pixels, expected {}x{}",
            buffer.len(),
            width,
            height
        )));
    }

    let img_buf: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
            Rgb(unpack_rgb(buffer[y as usize * width + x as usize]))
        });

    img_buf
        .save(path_ref)
        .map_err(|e| save_error(e.to_string()))?;
    info!("Saved frame to {}", path_ref.display());
    Ok(())
}

/// `<dir>/<prefix>_YYYYmmdd_HHMMSS.<extension>` for the current local time.
pub fn timestamped_path<P: AsRef<Path>>(dir: P, prefix: &str, extension: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    dir.as_ref()
        .join(format!("{}_{}.{}", prefix, stamp, extension))
}
