use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board size out of range")]
    InvalidSize,
}

pub type Result<T> = core::result::Result<T, GameError>;
