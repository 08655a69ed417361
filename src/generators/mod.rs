use std::{fmt, str::FromStr};

use rand::{SeedableRng, rngs::StdRng};

mod randomized;
mod recur_backtrack;

pub use randomized::{randomized, randomized_with_walls};
pub use recur_backtrack::recursive_backtrack;

use crate::{
    error::{MazeError, Result},
    maze::Maze,
};

/// Get a random number generator, optionally seeded for reproducibility.
pub(crate) fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Checks dimensions shared by every generator: at least 3x3, with distinct start and end cells.
fn validate_dimensions(width: u16, height: u16) -> Result<()> {
    if width < 3 || height < 3 {
        return Err(MazeError::InvalidDimensions {
            width,
            height,
            reason: "width and height must be at least 3",
        });
    }
    if width == 3 && height == 3 {
        return Err(MazeError::InvalidDimensions {
            width,
            height,
            reason: "start and end would share the only interior cell",
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    RecurBacktrack,
    Randomized,
}

impl Generator {
    pub const ALL: [Generator; 2] = [Generator::RecurBacktrack, Generator::Randomized];

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Generator::RecurBacktrack => "recursive_backtracker",
            Generator::Randomized => "randomized",
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::RecurBacktrack => write!(f, "Recursive Backtracker"),
            Generator::Randomized => write!(f, "Randomized Obstacles"),
        }
    }
}

impl FromStr for Generator {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        Generator::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or_else(|| MazeError::UnknownGenerator(s.to_string()))
    }
}

/// Generate a maze with the selected algorithm.
pub fn generate_maze(
    generator: Generator,
    width: u16,
    height: u16,
    seed: Option<u64>,
) -> Result<Maze> {
    tracing::debug!(%generator, width, height, ?seed, "generating maze");
    match generator {
        Generator::RecurBacktrack => recursive_backtrack(width, height, seed),
        Generator::Randomized => randomized(width, height, seed),
    }
}
