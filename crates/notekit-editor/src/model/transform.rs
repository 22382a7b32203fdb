//! Per-item placement in the scene.

use nalgebra::{Matrix2, Rotation2, Vector2};

use crate::geometry::{Point, Rect};

/// Position, rotation and local linear transform of an item.
///
/// A local point `p` lands in the scene at
/// `position + R(rotation) * (scale * p)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTransform {
    pub position: Point,
    /// Degrees, clockwise on screen.
    pub rotation: f64,
    pub scale: Matrix2<f64>,
}

impl Default for ItemTransform {
    fn default() -> Self {
        Self {
            position: Point::default(),
            rotation: 0.0,
            scale: Matrix2::identity(),
        }
    }
}

impl ItemTransform {
    pub fn at(position: Point) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Transform carrying a legacy uniform scale factor.
    pub fn with_uniform_scale(mut self, factor: f64) -> Self {
        self.scale = Matrix2::new(factor, 0.0, 0.0, factor);
        self
    }

    pub fn with_matrix(mut self, m11: f64, m12: f64, m21: f64, m22: f64) -> Self {
        self.scale = Matrix2::new(m11, m12, m21, m22);
        self
    }

    /// Matrix entries in row-major order `(m11, m12, m21, m22)`.
    pub fn matrix_entries(&self) -> (f64, f64, f64, f64) {
        (
            self.scale[(0, 0)],
            self.scale[(0, 1)],
            self.scale[(1, 0)],
            self.scale[(1, 1)],
        )
    }

    /// Full linear part: rotation applied after the local matrix.
    pub fn linear(&self) -> Matrix2<f64> {
        Rotation2::new(self.rotation.to_radians()).into_inner() * self.scale
    }

    pub fn map_to_scene(&self, p: Point) -> Point {
        let v = self.linear() * Vector2::new(p.x, p.y);
        Point::new(v.x + self.position.x, v.y + self.position.y)
    }

    /// Maps a scene point into item coordinates, `None` when the matrix is singular.
    pub fn map_from_scene(&self, p: Point) -> Option<Point> {
        let inverse = self.linear().try_inverse()?;
        let v = inverse * Vector2::new(p.x - self.position.x, p.y - self.position.y);
        Some(Point::new(v.x, v.y))
    }

    /// Scene bounds of a local rectangle.
    pub fn map_rect(&self, rect: &Rect) -> Rect {
        let corners = rect.corners().map(|c| self.map_to_scene(c));
        Rect::bounding(corners).unwrap_or(*rect)
    }

    /// Composes a scale along the item's own axes: `scale * diag(sx, sy)`.
    pub fn scaled_locally(&self, sx: f64, sy: f64) -> Self {
        Self {
            scale: self.scale * Matrix2::new(sx, 0.0, 0.0, sy),
            ..*self
        }
    }

    /// Geometric mean of the axis scale factors.
    pub fn mean_scale(&self) -> f64 {
        self.scale.determinant().abs().sqrt()
    }
}
