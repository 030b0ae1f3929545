use crate::core::color::ColorRGB;
use nalgebra::{Point3, Vector3};

/// Default falloff `(constant, linear, quadratic)`: pure inverse square.
pub const INVERSE_SQUARE: (f32, f32, f32) = (0.0, 0.0, 1.0);

/// Represents a light source in the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// A light source that is infinitely far away (e.g., Sun).
    /// Rays are parallel.
    Directional {
        /// Direction the light travels, normalized.
        direction: Vector3<f32>,
        color: ColorRGB,
        intensity: f32,
    },
    /// A light source at a specific position that radiates in all directions.
    Point {
        origin: Point3<f32>,
        color: ColorRGB,
        intensity: f32,
        /// Attenuation coefficients: (constant, linear, quadratic)
        attenuation: (f32, f32, f32),
    },
}

impl Light {
    /// Creates a simple directional light.
    pub fn new_directional(direction: Vector3<f32>, color: ColorRGB, intensity: f32) -> Self {
        Self::Directional {
            direction: direction.normalize(),
            color,
            intensity,
        }
    }

    /// Creates a point light with inverse-square falloff.
    pub fn new_point(origin: Point3<f32>, color: ColorRGB, intensity: f32) -> Self {
        Self::Point {
            origin,
            color,
            intensity,
            attenuation: INVERSE_SQUARE,
        }
    }

    /// Unit vector FROM the surface point TO the light source.
    pub fn direction_to_light(&self, surface_point: &Point3<f32>) -> Vector3<f32> {
        match self {
            Light::Directional { direction, .. } => -direction,
            Light::Point { origin, .. } => (origin - surface_point)
                .try_normalize(f32::EPSILON)
                .unwrap_or_else(Vector3::zeros),
        }
    }

    /// Radiance arriving at the surface point.
    pub fn radiance(&self, surface_point: &Point3<f32>) -> ColorRGB {
        match self {
            Light::Directional {
                color, intensity, ..
            } => color * *intensity,

            Light::Point {
                origin,
                color,
                intensity,
                attenuation,
            } => {
                let distance = (origin - surface_point).norm();
                let (c, l, q) = attenuation;
                let falloff = c + l * distance + q * distance * distance;
                if falloff <= f32::EPSILON {
                    return color * *intensity;
                }
                color * (*intensity / falloff)
            }
        }
    }
}
