use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Undo/redo stacks of moves, most recent last.
///
/// Since every move is its own inverse, undoing and redoing both hand the move back to the caller to
/// apply again.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    past: Vec<Move>,
    future: Vec<Move>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly played move, discarding the redo branch.
    pub fn record(&mut self, mv: Move) {
        self.past.push(mv);
        self.future.clear();
    }

    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.past.pop()?;
        self.future.push(mv);
        Some(mv)
    }

    pub fn redo(&mut self) -> Option<Move> {
        let mv = self.future.pop()?;
        self.past.push(mv);
        Some(mv)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Played moves in the order they were applied.
    pub fn past(&self) -> &[Move] {
        &self.past
    }

    pub fn future(&self) -> &[Move] {
        &self.future
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Rebuilds the live board by replaying every played move onto `base`, the board the moves were
    /// first played on.
    pub fn rebuild(&self, base: Grid) -> Grid {
        let mut grid = base;
        for &mv in &self.past {
            apply_move(&mut grid, mv);
        }
        grid
    }

    /// Dark board with only the clicked cells flipped, without the neighbour pattern.
    ///
    /// A cell clicked an even number of times ends up dark again.
    pub fn markers(&self, size: Coord) -> Grid {
        let mut grid = Grid::new(size);
        grid.clear();
        for &mv in &self.past {
            grid.toggle(mv);
        }
        grid
    }
}
