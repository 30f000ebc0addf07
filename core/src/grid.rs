use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square board of lights, `true` meaning lit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: Coord,
    lights: Array2<bool>,
}

impl Grid {
    /// Creates a board with every light on. Callers are expected to pass a validated size.
    pub fn new(size: Coord) -> Self {
        Self {
            size,
            lights: Array2::from_elem(Cell::new(size, size).to_nd_index(), true),
        }
    }

    pub fn from_config(config: GameConfig) -> Self {
        Self::new(config.size)
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    /// The middle cell, rounded towards the bottom-right on even boards.
    pub fn center(&self) -> Cell {
        let middle = self.size / 2;
        Cell::new(middle, middle)
    }

    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.column < self.size
    }

    pub fn validate_cell(&self, cell: Cell) -> Result<Cell> {
        if self.is_in_bounds(cell) {
            Ok(cell)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Off-board cells read as dark.
    pub fn is_lit(&self, cell: Cell) -> bool {
        self.lights
            .get(cell.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    /// Flips one light and returns its new state.
    ///
    /// Off-board cells are ignored with a warning, since neighbour probing and the
    /// celebration sweeps routinely reach past the edges.
    pub fn toggle(&mut self, cell: Cell) -> Option<bool> {
        let Some(light) = self.lights.get_mut(cell.to_nd_index()) else {
            log::warn!(
                "Tried to toggle an out-of-bounds light at {} on a {}x{} board",
                cell,
                self.size,
                self.size
            );
            return None;
        };
        *light = !*light;
        Some(*light)
    }

    /// Turns every light off.
    pub fn clear(&mut self) {
        self.lights.fill(false);
    }

    pub fn is_all_off(&self) -> bool {
        self.lights.iter().all(|&lit| !lit)
    }

    pub fn lit_count(&self) -> CellCount {
        self.lights
            .iter()
            .filter(|&&lit| lit)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Every cell with its state, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, bool)> + '_ {
        self.lights
            .indexed_iter()
            .map(|((row, column), &lit)| (Cell::new(row as Coord, column as Coord), lit))
    }

    pub fn iter_neighbors(&self, cell: Cell) -> NeighborIter {
        NeighborIter::new(cell, self.size)
    }
}

impl Index<Cell> for Grid {
    type Output = bool;

    fn index(&self, cell: Cell) -> &Self::Output {
        &self.lights[cell.to_nd_index()]
    }
}
