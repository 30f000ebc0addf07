use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;

use crate::*;

/// Wait before every beam step.
pub const BEAM_STEP_DELAY: Duration = Duration::from_millis(75);

/// Wait before every explosion ring.
pub const RING_STEP_DELAY: Duration = Duration::from_millis(125);

/// Beam directions as `(rows, columns)` steps, in the order they are played.
pub const BEAM_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 1),
    (1, 1),
    (1, -1),
    (-1, -1),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pass {
    First,
    Second,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CelebrationPhase {
    /// Sweeping from the center along `BEAM_DIRECTIONS[direction]`. `cursor` is the next cell to toggle,
    /// or nothing once the sweep has left the board.
    Beam {
        direction: usize,
        pass: Pass,
        cursor: Option<Cell>,
    },
    /// Toggling square rings around the center, `radius` being the next one.
    Explosion { pass: Pass, radius: Coord },
    Announced,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Next {
    After(Duration),
    Announce,
}

/// What a single tick did.
#[derive(Clone, Debug, PartialEq)]
pub struct CelebrationStep {
    pub toggled: Toggled,
    pub next: Next,
}

/// Win animation, one tick at a time.
///
/// Every beam walks its ray twice and the explosion sweeps the board twice, so a finished celebration
/// leaves every light in the state it started in. The host owns the clock: it waits for the delay a step
/// asks for and then calls [`Celebration::advance`] again.
#[derive(Clone, Debug, PartialEq)]
pub struct Celebration {
    center: Cell,
    phase: CelebrationPhase,
}

impl Celebration {
    /// Wait before the very first tick.
    pub const FIRST_DELAY: Duration = BEAM_STEP_DELAY;

    pub fn new(size: Coord) -> Self {
        let middle = size / 2;
        let center = Cell::new(middle, middle);
        Self {
            center,
            phase: Self::beam(0, center),
        }
    }

    pub fn phase(&self) -> CelebrationPhase {
        self.phase
    }

    pub fn is_announced(&self) -> bool {
        matches!(self.phase, CelebrationPhase::Announced)
    }

    const fn beam(direction: usize, center: Cell) -> CelebrationPhase {
        CelebrationPhase::Beam {
            direction,
            pass: Pass::First,
            cursor: Some(center),
        }
    }

    /// Runs one tick. Returns nothing once the win has been announced.
    pub fn advance(&mut self, grid: &mut Grid) -> Option<CelebrationStep> {
        use CelebrationPhase::*;

        let mut toggled = Toggled::new();
        let next = match self.phase {
            Beam {
                direction,
                pass,
                cursor: Some(cell),
            } => {
                log::trace!("beam {} toggles {}", direction, cell);
                if grid.toggle(cell).is_some() {
                    toggled.push(cell);
                }
                let cursor = cell
                    .offset(BEAM_DIRECTIONS[direction])
                    .filter(|&next| grid.is_in_bounds(next));
                self.phase = Beam {
                    direction,
                    pass,
                    cursor,
                };
                Next::After(BEAM_STEP_DELAY)
            }
            Beam {
                direction,
                pass: Pass::First,
                cursor: None,
            } => {
                self.phase = Beam {
                    direction,
                    pass: Pass::Second,
                    cursor: Some(self.center),
                };
                Next::After(BEAM_STEP_DELAY)
            }
            Beam {
                direction,
                pass: Pass::Second,
                cursor: None,
            } => {
                if direction + 1 < BEAM_DIRECTIONS.len() {
                    self.phase = Self::beam(direction + 1, self.center);
                    Next::After(BEAM_STEP_DELAY)
                } else {
                    log::debug!("beams done, starting explosion");
                    self.phase = Explosion {
                        pass: Pass::First,
                        radius: 0,
                    };
                    Next::After(RING_STEP_DELAY)
                }
            }
            Explosion { pass, radius } if self.ring_fits(grid, radius) => {
                log::trace!("explosion ring {}", radius);
                for cell in ring_cells(self.center, radius) {
                    if grid.toggle(cell).is_some() {
                        toggled.push(cell);
                    }
                }
                self.phase = Explosion {
                    pass,
                    radius: radius + 1,
                };
                Next::After(RING_STEP_DELAY)
            }
            Explosion { pass, .. } => {
                if grid.size() % 2 == 0 {
                    for cell in even_size_correction(grid.size()) {
                        if grid.toggle(cell).is_some() {
                            toggled.push(cell);
                        }
                    }
                }
                match pass {
                    Pass::First => {
                        self.phase = Explosion {
                            pass: Pass::Second,
                            radius: 0,
                        };
                        Next::After(RING_STEP_DELAY)
                    }
                    Pass::Second => {
                        log::debug!("explosion done, announcing win");
                        self.phase = Announced;
                        Next::Announce
                    }
                }
            }
            Announced => return None,
        };

        Some(CelebrationStep { toggled, next })
    }

    /// Whether the ring's bottom-right corner is still on the board.
    fn ring_fits(&self, grid: &Grid, radius: Coord) -> bool {
        self.center
            .row
            .checked_add(radius)
            .is_some_and(|edge| edge < grid.size())
    }
}

/// Perimeter of the square at Chebyshev distance `radius` from `center`: top edge left to right, right
/// edge top to bottom, bottom edge right to left, then left edge bottom to top. Ring 0 is the center.
pub fn ring_cells(center: Cell, radius: Coord) -> Vec<Cell> {
    if radius == 0 {
        return vec![center];
    }

    let (Some(top), Some(left), Some(bottom), Some(right)) = (
        center.row.checked_sub(radius),
        center.column.checked_sub(radius),
        center.row.checked_add(radius),
        center.column.checked_add(radius),
    ) else {
        return Vec::new();
    };

    let mut cells = Vec::with_capacity(8 * usize::from(radius));
    cells.extend((left..right).map(|column| Cell::new(top, column)));
    cells.extend((top..bottom).map(|row| Cell::new(row, right)));
    cells.extend((left + 1..=right).rev().map(|column| Cell::new(bottom, column)));
    cells.extend((top + 1..=bottom).rev().map(|row| Cell::new(row, left)));
    cells
}

/// On even boards the rings sit one cell off the true center and never reach the top row or the left
/// column. This covers them: left column bottom to top (stopping short of row 0), then the top row left
/// to right.
pub fn even_size_correction(size: Coord) -> impl Iterator<Item = Cell> {
    (1..size)
        .rev()
        .map(|row| Cell::new(row, 0))
        .chain((0..size).map(|column| Cell::new(0, column)))
}
