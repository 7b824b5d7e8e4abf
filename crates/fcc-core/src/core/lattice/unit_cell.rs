use crate::core::geometry::tiling::CubicTiling;
use crate::core::geometry::{FractionalPosition, Point};

/// The repeating unit of a lattice: the cell boundary and the atoms placed within it.
///
/// Basis positions are stored in the order given at construction and are never
/// mutated afterwards; lattices transform the cell through their own composed map.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCell {
    tiling: CubicTiling,
    fractional_positions: Vec<FractionalPosition>,
}

impl UnitCell {
    pub fn new(tiling: CubicTiling, fractional_positions: Vec<FractionalPosition>) -> Self {
        Self {
            tiling,
            fractional_positions,
        }
    }

    pub fn tiling(&self) -> &CubicTiling {
        &self.tiling
    }

    pub fn fractional_positions(&self) -> &[FractionalPosition] {
        &self.fractional_positions
    }

    pub fn num_basis_atoms(&self) -> usize {
        self.fractional_positions.len()
    }

    /// Positions of every basis atom of the cell whose origin is `cell_origin`.
    pub fn absolute_positions(&self, cell_origin: &Point) -> Vec<Point> {
        self.fractional_positions
            .iter()
            .map(|f| self.tiling.from_fractional(f, cell_origin))
            .collect()
    }
}
