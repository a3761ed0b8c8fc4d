//! Vector algebra and the camera rotation matrix

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Positions, directions and normals
pub type Vec3 = Vector3<f32>;

/// Fixed 3x3 camera orientation, applied to directions only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 9]", into = "[f32; 9]")]
pub struct Rotation(Matrix3<f32>);

impl Rotation {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Build from nine values in row-major order
    pub fn from_rows(values: [f32; 9]) -> Self {
        Self(Matrix3::from_row_slice(&values))
    }

    /// Row-wise dot product with `v`
    pub fn apply(&self, v: &Vec3) -> Vec3 {
        self.0 * v
    }

    pub fn rows(&self) -> [f32; 9] {
        let m = &self.0;
        [
            m[(0, 0)], m[(0, 1)], m[(0, 2)],
            m[(1, 0)], m[(1, 1)], m[(1, 2)],
            m[(2, 0)], m[(2, 1)], m[(2, 2)],
        ]
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f32; 9]> for Rotation {
    fn from(values: [f32; 9]) -> Self {
        Self::from_rows(values)
    }
}

impl From<Rotation> for [f32; 9] {
    fn from(rotation: Rotation) -> Self {
        rotation.rows()
    }
}

/// Mirror `v` about `n`: `2 (n . v) n - v`
///
/// Both the light vector in specular shading and the view vector in
/// reflection point away from the surface, so the result does too.
pub fn reflect(v: &Vec3, n: &Vec3) -> Vec3 {
    *n * (2.0 * n.dot(v)) - *v
}
