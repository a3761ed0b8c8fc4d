//! Scene definitions for the sphere ray tracer

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::math::{Rotation, Vec3};

/// Sphere primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub color: Color,
    /// Phong exponent; negative disables the specular term
    #[serde(default = "default_specular")]
    pub specular: i32,
    /// Share of the final color taken from the reflected ray, in `[0, 1]`
    #[serde(default)]
    pub reflective: f32,
}

fn default_specular() -> i32 {
    -1
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, color: Color, specular: i32, reflective: f32) -> Self {
        Self { center, radius, color, specular, reflective }
    }
}

/// Light source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Light {
    Ambient { intensity: f32 },
    Point { intensity: f32, position: Vec3 },
    Directional { intensity: f32, direction: Vec3 },
}

impl Light {
    pub fn intensity(&self) -> f32 {
        match *self {
            Light::Ambient { intensity }
            | Light::Point { intensity, .. }
            | Light::Directional { intensity, .. } => intensity,
        }
    }

    /// Vector from `point` toward the light and the largest parametric
    /// distance along it that can still occlude the light.
    ///
    /// Ambient light has no direction and returns `None`.
    pub fn incidence(&self, point: &Vec3) -> Option<(Vec3, f32)> {
        match *self {
            Light::Ambient { .. } => None,
            Light::Point { position, .. } => Some((position - point, 1.0)),
            Light::Directional { direction, .. } => Some((direction, f32::INFINITY)),
        }
    }
}

/// Camera pose: translation plus a fixed orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    #[serde(default = "Vec3::zeros")]
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Rotation,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::zeros(), Rotation::identity())
    }
}

impl Camera {
    pub fn new(position: Vec3, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    /// World-space direction through the pixel `(x, y)` measured from the
    /// canvas center, with a unit viewport at distance 1.
    pub fn ray_direction(&self, x: i32, y: i32, width: u32, height: u32) -> Vec3 {
        self.rotation.apply(&canvas_to_viewport(x, y, width, height))
    }

    /// Move the camera by `step`, keeping its orientation
    pub fn translate(&mut self, step: Vec3) {
        self.position += step;
    }
}

/// View-space direction `(x / W, y / H, 1)`; not normalized
pub fn canvas_to_viewport(x: i32, y: i32, width: u32, height: u32) -> Vec3 {
    debug_assert!(width > 0 && height > 0, "canvas must not be empty");
    Vec3::new(x as f32 / width as f32, y as f32 / height as f32, 1.0)
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SceneError {
    #[error("sphere {index}: radius must be finite and > 0, got {radius}")]
    Radius { index: usize, radius: f32 },

    #[error("sphere {index}: reflective must be within [0, 1], got {reflective}")]
    Reflectivity { index: usize, reflective: f32 },

    #[error("light {index}: intensity must be finite and >= 0, got {intensity}")]
    Intensity { index: usize, intensity: f32 },

    #[error("light {index}: direction vector length must be > 0")]
    ZeroDirection { index: usize },

    #[error("{field} components must be finite")]
    NonFinite { field: String },
}

/// The complete, read-only input of a render pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub spheres: Vec<Sphere>,
    #[serde(default)]
    pub lights: Vec<Light>,
    #[serde(default = "default_background")]
    pub background: Color,
}

fn default_background() -> Color {
    Color::WHITE
}

impl Default for Scene {
    fn default() -> Self {
        Self::demo()
    }
}

impl Scene {
    /// An empty scene seen from the origin
    pub fn empty(background: Color) -> Self {
        Self {
            camera: Camera::default(),
            spheres: Vec::new(),
            lights: Vec::new(),
            background,
        }
    }

    /// Four spheres on a huge yellow ground sphere, lit by ambient, point
    /// and directional light, viewed from (3, 0, 1) turned 45 degrees left.
    pub fn demo() -> Self {
        let camera = Camera::new(
            Vec3::new(3.0, 0.0, 1.0),
            Rotation::from_rows([0.7071, 0.0, -0.7071, 0.0, 1.0, 0.0, 0.7071, 0.0, 0.7071]),
        );

        let spheres = vec![
            Sphere::new(Vec3::new(0.0, -1.0, 3.0), 1.0, Color::new(0, 0, 255), 500, 0.2),
            Sphere::new(Vec3::new(2.0, 0.0, 4.0), 1.0, Color::new(255, 0, 0), 500, 0.3),
            Sphere::new(Vec3::new(-2.0, 0.0, 4.0), 1.0, Color::new(0, 255, 0), 10, 0.4),
            // Ground
            Sphere::new(Vec3::new(0.0, -5001.0, 0.0), 5000.0, Color::new(0, 255, 255), 1000, 0.5),
            Sphere::new(Vec3::new(0.0, 2.0, 2.0), 2.0, Color::new(0, 255, 255), 1000, 0.5),
        ];

        let lights = vec![
            Light::Ambient { intensity: 0.2 },
            Light::Point { intensity: 0.6, position: Vec3::new(2.0, 1.0, 0.0) },
            Light::Directional { intensity: 0.2, direction: Vec3::new(1.0, 4.0, 4.0) },
        ];

        Self {
            camera,
            spheres,
            lights,
            background: Color::WHITE,
        }
    }

    /// Check the geometric and photometric invariants the tracer relies on
    pub fn validate(&self) -> Result<(), SceneError> {
        check_finite(&self.camera.position, "camera.position")?;
        if self.camera.rotation.rows().iter().any(|v| !v.is_finite()) {
            return Err(SceneError::NonFinite { field: "camera.rotation".into() });
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            check_finite(&sphere.center, &format!("spheres[{index}].center"))?;
            if !sphere.radius.is_finite() || sphere.radius <= 0.0 {
                return Err(SceneError::Radius { index, radius: sphere.radius });
            }
            if !(0.0..=1.0).contains(&sphere.reflective) {
                return Err(SceneError::Reflectivity { index, reflective: sphere.reflective });
            }
        }

        for (index, light) in self.lights.iter().enumerate() {
            let intensity = light.intensity();
            if !intensity.is_finite() || intensity < 0.0 {
                return Err(SceneError::Intensity { index, intensity });
            }
            match light {
                Light::Ambient { .. } => {}
                Light::Point { position, .. } => {
                    check_finite(position, &format!("lights[{index}].position"))?;
                }
                Light::Directional { direction, .. } => {
                    check_finite(direction, &format!("lights[{index}].direction"))?;
                    if direction.norm() < 1e-6 {
                        return Err(SceneError::ZeroDirection { index });
                    }
                }
            }
        }

        Ok(())
    }
}

fn check_finite(value: &Vec3, field: &str) -> Result<(), SceneError> {
    if value.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(SceneError::NonFinite { field: field.to_string() })
    }
}
