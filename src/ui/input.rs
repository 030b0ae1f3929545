use crate::io::config::CameraConfig;
use crate::scene::camera::Camera;
use minifb::{Key, MouseButton, MouseMode, Window};

/// Free-fly camera input.
///
/// - WASD: move along forward / right, LeftShift: boost
/// - right drag: yaw and pitch
/// - left drag: move forward/back and yaw
/// - both buttons: move up/down
pub struct CameraController {
    pub speed: f32,
    pub boost_speed: f32,
    /// Radians per pixel of mouse travel, per second.
    pub rotation_speed: f32,

    last_mouse_pos: Option<(f32, f32)>,
}

impl CameraController {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            speed: config.speed,
            boost_speed: config.boost_speed,
            rotation_speed: config.rotation_speed,
            last_mouse_pos: None,
        }
    }

    pub fn update(&mut self, window: &Window, camera: &mut Camera, dt: f32) {
        let speed = if window.is_key_down(Key::LeftShift) {
            self.boost_speed
        } else {
            self.speed
        };

        // --- 1. Keyboard Movement ---
        let forward = camera.forward();
        let right = camera.right();
        if window.is_key_down(Key::W) {
            camera.origin += forward * speed * dt;
        }
        if window.is_key_down(Key::S) {
            camera.origin -= forward * speed * dt;
        }
        if window.is_key_down(Key::A) {
            camera.origin -= right * speed * dt;
        }
        if window.is_key_down(Key::D) {
            camera.origin += right * speed * dt;
        }

        // --- 2. Mouse ---
        let left = window.get_mouse_down(MouseButton::Left);
        let right_button = window.get_mouse_down(MouseButton::Right);
        let (dx, dy) = self.mouse_delta(window, left || right_button);

        match (left, right_button) {
            (true, true) => {
                camera.origin += camera.up() * (dy / 5.0) * speed * dt;
            }
            (false, true) => {
                camera.total_yaw += dx * self.rotation_speed * dt;
                camera.total_pitch += dy * self.rotation_speed * dt;
            }
            (true, false) => {
                camera.origin += forward * (dy / 5.0) * speed * dt;
                camera.total_yaw += dx * self.rotation_speed * dt;
            }
            (false, false) => {}
        }

        // Important: Recalculate matrices after modifying origin/angles
        camera.update_matrices();
    }

    fn mouse_delta(&mut self, window: &Window, dragging: bool) -> (f32, f32) {
        if !dragging {
            self.last_mouse_pos = None;
            return (0.0, 0.0);
        }
        let Some((x, y)) = window.get_mouse_pos(MouseMode::Pass) else {
            return (0.0, 0.0);
        };
        let delta = match self.last_mouse_pos {
            Some((last_x, last_y)) => (x - last_x, y - last_y),
            None => (0.0, 0.0),
        };
        self.last_mouse_pos = Some((x, y));
        delta
    }
}
