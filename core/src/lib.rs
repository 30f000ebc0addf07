#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use celebration::*;
pub use controller::*;
pub use error::*;
pub use grid::*;
pub use history::*;
pub use moves::*;
pub use renderer::*;
pub use scheduler::*;
pub use types::*;

mod celebration;
mod controller;
mod error;
mod grid;
mod history;
mod moves;
mod renderer;
mod scheduler;
mod types;

pub const MIN_SIZE: Coord = 1;
pub const MAX_SIZE: Coord = 20;
pub const DEFAULT_SIZE: Coord = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord) -> Self {
        Self { size }
    }

    pub fn new(size: Coord) -> Self {
        Self::new_unchecked(size.clamp(MIN_SIZE, MAX_SIZE))
    }

    pub fn try_new(size: Coord) -> Result<Self> {
        if (MIN_SIZE..=MAX_SIZE).contains(&size) {
            Ok(Self::new_unchecked(size))
        } else {
            Err(GameError::InvalidSize)
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    Ignored,
    Applied,
    Won,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub const fn is_win(self) -> bool {
        matches!(self, Self::Won)
    }
}
