use smallvec::SmallVec;

use crate::*;

/// Cells flipped by one operation, in the order they were flipped.
pub type Toggled = SmallVec<[Cell; 5]>;

/// Toggles `cell` and each of its orthogonal neighbours that lies on the board.
pub fn apply_move(grid: &mut Grid, cell: Move) -> Toggled {
    let mut toggled = Toggled::new();
    if grid.toggle(cell).is_some() {
        toggled.push(cell);
    }
    for neighbor in grid.iter_neighbors(cell) {
        if grid.toggle(neighbor).is_some() {
            toggled.push(neighbor);
        }
    }
    toggled
}

pub fn check_win(grid: &Grid) -> bool {
    grid.is_all_off()
}
