use rand::Rng;

use crate::{
    error::Result,
    generators::{get_rng, validate_dimensions},
    maze::{Cell, Maze},
};

/// Open room with scattered obstacles, using one wall draw per eight cells.
///
/// This is not a maze in the perfect-maze sense: there is no guarantee that `End` can be
/// reached from `Start`.
pub fn randomized(width: u16, height: u16, seed: Option<u64>) -> Result<Maze> {
    let num_walls = width as usize * height as usize / 8;
    randomized_with_walls(width, height, num_walls, seed)
}

/// Open room with `num_walls` random wall draws in the middle band of the grid.
///
/// Draws land on `x` in `[width / 4, 3 * width / 4]` and `y` in `[height / 4, 3 * height / 4]`,
/// clamped to the interior. Draws may repeat a cell. Draws landing on `Start` or `End` are
/// discarded, so both cells always survive.
pub fn randomized_with_walls(
    width: u16,
    height: u16,
    num_walls: usize,
    seed: Option<u64>,
) -> Result<Maze> {
    validate_dimensions(width, height)?;

    let mut rng = get_rng(seed);
    let mut maze = Maze::new(width, height, Cell::Space)?;
    maze.wall_border();

    let (start, end) = maze.default_endpoints();
    maze[start] = Cell::Start;
    maze[end] = Cell::End;

    let x_band = middle_band(width);
    let y_band = middle_band(height);

    let mut placed = 0usize;
    for _ in 0..num_walls {
        let coord = (
            rng.random_range(x_band.clone()),
            rng.random_range(y_band.clone()),
        );
        if matches!(maze[coord], Cell::Start | Cell::End) {
            tracing::trace!(?coord, "skipped wall draw on an endpoint");
            continue;
        }
        maze[coord] = Cell::Wall;
        placed += 1;
    }

    tracing::debug!(width, height, num_walls, placed, "randomized generation finished");
    Ok(maze)
}

/// `[dim / 4, 3 * dim / 4]`, kept off the border. Non-empty for any `dim >= 3`.
fn middle_band(dim: u16) -> std::ops::RangeInclusive<u16> {
    let low = (dim / 4).max(1);
    // u32 so that 3 * dim cannot overflow
    let high = (3 * u32::from(dim) / 4).min(u32::from(dim) - 2) as u16;
    low..=high
}
