use std::ops::{Add, Mul};

use crate::geometry::Rotation;

/// Affine transformation in matrix form, composed of uniform scaling,
/// quarter-turn rotations and translations.
///
/// Maps the local millimetre coordinates of a silhouette onto the workspace.
#[derive(Clone, Debug, PartialEq)]
pub struct Transformation {
    matrix: [[f32; 3]; 3],
}

impl Transformation {
    pub const fn empty() -> Self {
        Self {
            matrix: EMPTY_MATRIX,
        }
    }

    pub fn from_translation((tx, ty): (f32, f32)) -> Self {
        Self::empty().translate((tx, ty))
    }

    pub fn translate(mut self, (tx, ty): (f32, f32)) -> Self {
        self.matrix = dot_prod(&transl_m((tx, ty)), &self.matrix);
        self
    }

    pub fn scale(mut self, factor: f32) -> Self {
        self.matrix = dot_prod(&scale_m(factor), &self.matrix);
        self
    }

    /// Rotates clockwise on screen (the `y` axis points down).
    pub fn rotate(mut self, rotation: Rotation) -> Self {
        self.matrix = dot_prod(&rot_m(rotation), &self.matrix);
        self
    }

    /// Applies `other` after `self`.
    pub fn transform(mut self, other: &Self) -> Self {
        self.matrix = dot_prod(&other.matrix, &self.matrix);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.matrix == EMPTY_MATRIX
    }

    pub fn matrix(&self) -> &[[f32; 3]; 3] {
        &self.matrix
    }

    #[inline(always)]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.matrix;
        (
            m[0][0] * x + m[0][1] * y + m[0][2],
            m[1][0] * x + m[1][1] * y + m[1][2],
        )
    }

    /// Row-major `(sx, ky, kx, sy, tx, ty)` coefficients, as used by 2D rendering backends.
    pub fn to_row(&self) -> (f32, f32, f32, f32, f32, f32) {
        let m = &self.matrix;
        (m[0][0], m[1][0], m[0][1], m[1][1], m[0][2], m[1][2])
    }
}

const EMPTY_MATRIX: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

fn rot_m(rotation: Rotation) -> [[f32; 3]; 3] {
    let (sin, cos) = rotation.sin_cos();
    [[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]]
}

fn transl_m((tx, ty): (f32, f32)) -> [[f32; 3]; 3] {
    [[1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0]]
}

fn scale_m(factor: f32) -> [[f32; 3]; 3] {
    [[factor, 0.0, 0.0], [0.0, factor, 0.0], [0.0, 0.0, 1.0]]
}

#[inline(always)]
fn dot_prod<T>(l: &[[T; 3]; 3], r: &[[T; 3]; 3]) -> [[T; 3]; 3]
where
    T: Add<Output = T> + Mul<Output = T> + Copy,
{
    let cell = |i: usize, j: usize| l[i][0] * r[0][j] + l[i][1] * r[1][j] + l[i][2] * r[2][j];
    [
        [cell(0, 0), cell(0, 1), cell(0, 2)],
        [cell(1, 0), cell(1, 1), cell(1, 2)],
        [cell(2, 0), cell(2, 1), cell(2, 2)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turn_is_clockwise_on_screen() {
        let t = Transformation::empty().rotate(Rotation::Deg90);
        // +x (right) maps onto +y (down)
        assert_eq!(t.apply(1.0, 0.0), (0.0, 1.0));
        assert_eq!(t.apply(0.0, 1.0), (-1.0, 0.0));
    }

    #[test]
    fn composition_order() {
        let t = Transformation::empty()
            .translate((-5.0, -5.0))
            .scale(2.0)
            .translate((100.0, 0.0));
        assert_eq!(t.apply(5.0, 5.0), (100.0, 0.0));
        assert_eq!(t.apply(6.0, 5.0), (102.0, 0.0));
    }
}
