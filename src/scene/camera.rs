use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use std::f32::consts::FRAC_PI_2;

/// Free-fly camera producing left-handed view and projection matrices.
///
/// Orientation is stored as accumulated yaw (around +Y) and pitch (around
/// the camera's right axis); the basis is rebuilt from them by
/// [`Camera::update_matrices`], which must run once per frame before the
/// vertex stage reads the matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    // --- Placement ---
    pub origin: Point3<f32>,
    pub total_yaw: f32,
    pub total_pitch: f32,

    // --- Projection ---
    /// Vertical field of view, degrees.
    pub fov_angle: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    // --- Cached basis and matrices ---
    forward: Vector3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,
    view_matrix: Matrix4<f32>,
    inv_view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new(origin: Point3<f32>, fov_angle: f32, aspect_ratio: f32) -> Self {
        let mut cam = Self {
            origin,
            total_yaw: 0.0,
            total_pitch: 0.0,
            fov_angle,
            aspect_ratio,
            near: 0.1,
            far: 100.0,
            forward: Vector3::z(),
            right: Vector3::x(),
            up: Vector3::y(),
            view_matrix: Matrix4::identity(),
            inv_view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Recalculates the basis, view, inverse view and projection matrices.
    pub fn update_matrices(&mut self) {
        // Keep the basis well defined when looking straight up or down.
        self.total_pitch = self.total_pitch.clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);

        let rotation = TransformFactory::rotation_y(self.total_yaw)
            * TransformFactory::rotation_x(self.total_pitch);
        self.forward = rotation.transform_vector(&Vector3::z()).normalize();
        self.right = Vector3::y().cross(&self.forward).normalize();
        self.up = self.forward.cross(&self.right).normalize();

        self.inv_view_matrix = Matrix4::from_columns(&[
            self.right.push(0.0),
            self.up.push(0.0),
            self.forward.push(0.0),
            Vector4::new(self.origin.x, self.origin.y, self.origin.z, 1.0),
        ]);

        // The basis is orthonormal, so the inverse is the transposed rotation
        // followed by the negated, rotated origin.
        let o = self.origin.coords;
        self.view_matrix = Matrix4::from_rows(&[
            self.right.push(-self.right.dot(&o)).transpose(),
            self.up.push(-self.up.dot(&o)).transpose(),
            self.forward.push(-self.forward.dot(&o)).transpose(),
            Vector4::new(0.0, 0.0, 0.0, 1.0).transpose(),
        ]);

        self.projection_matrix = TransformFactory::perspective_lh(
            self.aspect_ratio,
            self.fov_angle.to_radians(),
            self.near,
            self.far,
        );
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.forward
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn inv_view_matrix(&self) -> Matrix4<f32> {
        self.inv_view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }
}
