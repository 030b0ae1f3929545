use crate::core::color::{ColorRGB, pack_rgb};
use crate::error::RenderError;
use atomic_float::AtomicF32;
use rayon::prelude::*;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// Number of striped locks guarding color writes.
const LOCK_COUNT: usize = 1024;

/// Fixed-resolution color + depth target.
///
/// Thread-safe for parallel rasterization: depth is an atomic `f32` updated
/// with `fetch_min`, and a color write only lands while the pixel's depth
/// still equals the depth of the fragment that produced it, checked under a
/// striped lock. The final image matches drawing the fragments one by one.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,

    /// Packed `0xFFRRGGBB` pixels.
    color_buffer: Vec<AtomicU32>,

    /// One depth per pixel, +infinity after a clear.
    depth_buffer: Vec<AtomicF32>,

    /// Striped locks to protect color writes.
    locks: Vec<Mutex<()>>,
}

impl FrameBuffer {
    /// Allocates both buffers. Fails instead of aborting when the resolution
    /// is empty or the memory cannot be reserved.
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        let size = width
            .checked_mul(height)
            .filter(|&size| size > 0)
            .ok_or(RenderError::InvalidResolution { width, height })?;

        let mut color_buffer = Vec::new();
        color_buffer
            .try_reserve_exact(size)
            .map_err(|_| RenderError::BufferAllocation {
                what: "color buffer",
                pixels: size,
            })?;
        color_buffer.extend((0..size).map(|_| AtomicU32::new(0)));

        let mut depth_buffer = Vec::new();
        depth_buffer
            .try_reserve_exact(size)
            .map_err(|_| RenderError::BufferAllocation {
                what: "depth buffer",
                pixels: size,
            })?;
        depth_buffer.extend((0..size).map(|_| AtomicF32::new(f32::INFINITY)));

        let locks = (0..LOCK_COUNT).map(|_| Mutex::new(())).collect();

        Ok(Self {
            width,
            height,
            color_buffer,
            depth_buffer,
            locks,
        })
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Resets every depth to +infinity and every pixel to `color`.
    pub fn clear(&mut self, color: ColorRGB) {
        let packed = pack_rgb(color);
        self.color_buffer
            .par_iter_mut()
            .for_each(|p| *p.get_mut() = packed);
        self.depth_buffer
            .par_iter()
            .for_each(|d| d.store(f32::INFINITY, Ordering::Relaxed));
    }

    /// Thread-safe depth test and update.
    ///
    /// Returns true and stores `new_depth` if it is strictly closer than the
    /// current value. The compare and the write are a single atomic step.
    #[inline]
    pub fn depth_test_and_update(&self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let previous = self.depth_buffer[self.index(x, y)].fetch_min(new_depth, Ordering::AcqRel);
        new_depth < previous
    }

    /// Writes `color` only if the pixel's depth is still `depth`.
    ///
    /// Call after [`Self::depth_test_and_update`] succeeded with the same
    /// depth. A closer fragment that won the pixel in between makes this a
    /// no-op, regardless of which color write runs first.
    #[inline]
    pub fn write_color_at_depth(&self, x: usize, y: usize, depth: f32, color: u32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        let _guard = self.lock(idx);
        if self.depth_buffer[idx].load(Ordering::Acquire).to_bits() != depth.to_bits() {
            return false;
        }
        self.color_buffer[idx].store(color, Ordering::Relaxed);
        true
    }

    /// Writes `color` without any depth interaction (debug overlays).
    #[inline]
    pub fn write_color_unchecked(&self, x: usize, y: usize, color: u32) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            let _guard = self.lock(idx);
            self.color_buffer[idx].store(color, Ordering::Relaxed);
        }
    }

    #[inline]
    fn lock(&self, idx: usize) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned stripe only means another task panicked mid-write of a
        // u32; the data is still a valid pixel.
        self.locks[idx % self.locks.len()]
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copies the finished frame into `out` (row-major, `width * height`).
    pub fn copy_pixels_to(&self, out: &mut [u32]) {
        out.par_iter_mut()
            .zip(self.color_buffer.par_iter())
            .for_each(|(dst, src)| *dst = src.load(Ordering::Relaxed));
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.color_buffer[self.index(x, y)].load(Ordering::Relaxed))
    }

    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)].load(Ordering::Relaxed))
    }
}
