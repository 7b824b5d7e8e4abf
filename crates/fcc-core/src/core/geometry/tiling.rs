use super::shapes::Cube;
use super::{FractionalPosition, Point};
use nalgebra::Vector3;

/// Simple cubic repetition of a cube-shaped cell across all of space.
///
/// Cell `[i, j, k]` has its origin at `corner + [i, j, k] * edge_length`. Every ambient
/// point belongs to exactly one cell, chosen so that its fractional coordinate lies in
/// `[0, 1)` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicTiling {
    cell: Cube,
}

impl CubicTiling {
    pub fn new(cell: Cube) -> Self {
        Self { cell }
    }

    pub fn cell(&self) -> &Cube {
        &self.cell
    }

    pub fn cell_index(&self, point: &Point) -> [i64; 3] {
        let local = (point - self.cell.corner()) / self.cell.edge_length();
        [
            local.x.floor() as i64,
            local.y.floor() as i64,
            local.z.floor() as i64,
        ]
    }

    pub fn cell_origin(&self, index: [i64; 3]) -> Point {
        let offset = Vector3::new(index[0] as f64, index[1] as f64, index[2] as f64);
        self.cell.corner() + offset * self.cell.edge_length()
    }

    /// Splits `point` into the origin of its containing cell and the fractional position
    /// within that cell.
    pub fn to_fractional(&self, point: &Point) -> (Point, FractionalPosition) {
        let origin = self.cell_origin(self.cell_index(point));
        (origin, (point - origin) / self.cell.edge_length())
    }

    pub fn from_fractional(&self, fractional: &FractionalPosition, cell_origin: &Point) -> Point {
        cell_origin + fractional * self.cell.edge_length()
    }
}
