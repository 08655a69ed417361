use thiserror::Error;

use crate::maze::Coord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid maze dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: u16,
        height: u16,
        reason: &'static str,
    },

    #[error("Coordinate {coord:?} is outside the {width}x{height} maze")]
    OutOfBounds { coord: Coord, width: u16, height: u16 },

    #[error("Unknown maze generator: {0}")]
    UnknownGenerator(String),

    #[error("Unknown maze solver: {0}")]
    UnknownSolver(String),
}

pub type Result<T> = std::result::Result<T, MazeError>;
