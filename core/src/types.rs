use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board size and cell positions.
pub type Coord = u8;

/// Count type used for lit-cell and total-cell counts.
pub type CellCount = u16;

/// Position of one light, `row` first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: Coord,
    pub column: Coord,
}

/// A move is the cell that was clicked, the toggle pattern follows from it.
pub type Move = Cell;

impl Cell {
    pub const fn new(row: Coord, column: Coord) -> Self {
        Self { row, column }
    }

    /// Steps by `(rows, columns)`, returning nothing when either axis would go below zero.
    ///
    /// The upper bound depends on the board and is left to [`crate::Grid::is_in_bounds`].
    pub fn offset(self, (rows, columns): (i8, i8)) -> Option<Self> {
        let row = self.row.checked_add_signed(rows)?;
        let column = self.column.checked_add_signed(columns)?;
        Some(Self::new(row, column))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl From<(Coord, Coord)> for Cell {
    fn from((row, column): (Coord, Coord)) -> Self {
        Self::new(row, column)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Cell {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.column.into()]
    }
}

pub const fn square(size: Coord) -> CellCount {
    let size = size as CellCount;
    size.saturating_mul(size)
}

/// Right, left, down, up.
const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Applies `delta` to `cell`, returning a value only when it remains on a `size` board.
fn apply_delta(cell: Cell, delta: (i8, i8), size: Coord) -> Option<Cell> {
    cell.offset(delta)
        .filter(|next| next.row < size && next.column < size)
}

/// Orthogonal neighbours of a cell that lie on the board.
#[derive(Debug)]
pub struct NeighborIter {
    center: Cell,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Cell, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = ORTHOGONAL.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, *delta, self.size) {
                return Some(next_item);
            }
        }
    }
}
