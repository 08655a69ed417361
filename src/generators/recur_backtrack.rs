use rand::Rng;

use crate::{
    error::{MazeError, Result},
    generators::{get_rng, validate_dimensions},
    maze::{Cell, Coord, Maze},
};

/// Carves a perfect maze with a randomized depth-first walk.
///
/// Requires odd dimensions, since corridors are carved two cells at a time starting from
/// `(1, 1)` and must end one cell before the border.
pub fn recursive_backtrack(width: u16, height: u16, seed: Option<u64>) -> Result<Maze> {
    validate_dimensions(width, height)?;
    if width % 2 == 0 || height % 2 == 0 {
        return Err(MazeError::InvalidDimensions {
            width,
            height,
            reason: "recursive backtracker needs odd width and height",
        });
    }

    let mut rng = get_rng(seed);
    let mut maze = Maze::new(width, height, Cell::Wall)?;

    let start: Coord = (1, 1);
    // The stack keeps only carved cells
    let mut stack = vec![start];
    let mut carved = 0usize;

    while let Some(&cell) = stack.last() {
        if maze[cell] == Cell::Wall {
            maze[cell] = Cell::Space;
            carved += 1;
        }

        let neighbors = get_unvisited_neighbors(cell, &maze);
        if neighbors.is_empty() {
            // Dead end, backtrack
            stack.pop();
            continue;
        }

        let neighbor = neighbors[rng.random_range(0..neighbors.len())];
        // Neighbors are two steps away along one axis, so the midpoint is the wall between them
        let wall = (
            cell.0.min(neighbor.0) + cell.0.abs_diff(neighbor.0) / 2,
            cell.1.min(neighbor.1) + cell.1.abs_diff(neighbor.1) / 2,
        );
        maze[wall] = Cell::Space;
        tracing::trace!(?cell, ?neighbor, "carved passage");
        stack.push(neighbor);
    }

    let (start, end) = maze.default_endpoints();
    maze[start] = Cell::Start;
    maze[end] = Cell::End;
    tracing::debug!(width, height, carved, "recursive backtracker finished");
    Ok(maze)
}

/// Get unvisited neighbors of a cell.
/// A neighbor is a cell two steps away in a cardinal direction that lies strictly inside the
/// border. It is unvisited while it is still a wall.
fn get_unvisited_neighbors(coord: Coord, maze: &Maze) -> Vec<Coord> {
    let (x, y) = coord;
    // NOTE: Near the top-left edge x - 2 and y - 2 wrap around to large values, and x + 2, y + 2
    // saturate at u16::MAX. The interior check below drops both.
    [
        (x.wrapping_sub(2), y),
        (x.saturating_add(2), y),
        (x, y.wrapping_sub(2)),
        (x, y.saturating_add(2)),
    ]
    .into_iter()
    .filter(|&(nx, ny)| {
        (1..maze.width() - 1).contains(&nx)
            && (1..maze.height() - 1).contains(&ny)
            && maze[(nx, ny)] == Cell::Wall
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::get_neighbors;
    use std::collections::{HashSet, VecDeque};

    fn reachable_from(maze: &Maze, start: Coord) -> HashSet<Coord> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(coord) = queue.pop_front() {
            for neighbor in get_neighbors(coord, maze) {
                if maze.is_open(neighbor) && seen.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        seen
    }

    #[test]
    fn test_rejects_even_and_small_dimensions() {
        assert!(matches!(
            recursive_backtrack(10, 11, Some(0)),
            Err(MazeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            recursive_backtrack(11, 4, Some(0)),
            Err(MazeError::InvalidDimensions { .. })
        ));
        assert!(recursive_backtrack(3, 3, Some(0)).is_err());
        assert!(recursive_backtrack(1, 7, Some(0)).is_err());
    }

    #[test]
    fn test_maze_properties_for_odd_sizes() {
        for (width, height) in [(5, 5), (7, 5), (5, 9), (11, 11), (21, 15)] {
            for seed in 0..5 {
                let maze = recursive_backtrack(width, height, Some(seed)).unwrap();

                assert_eq!(maze.positions_of(Cell::Start).collect::<Vec<_>>(), vec![(1, 1)]);
                assert_eq!(
                    maze.positions_of(Cell::End).collect::<Vec<_>>(),
                    vec![(width - 2, height - 2)]
                );

                let border_intact = (0..height)
                    .flat_map(|y| (0..width).map(move |x| (x, y)))
                    .filter(|&c| maze.is_boundary(c))
                    .all(|c| maze[c] == Cell::Wall);
                assert!(border_intact, "border broken for {width}x{height} seed {seed}");

                let open = (0..height)
                    .flat_map(|y| (0..width).map(move |x| (x, y)))
                    .filter(|&c| maze.is_open(c))
                    .collect::<HashSet<_>>();
                assert_eq!(reachable_from(&maze, (1, 1)), open);
            }
        }
    }

    #[test]
    fn test_perfect_maze_has_no_loops() {
        // A spanning tree over the odd-indexed cells has exactly (cells - 1) carved walls,
        // so the open cell count is 2 * cells - 1.
        let (width, height) = (15u16, 11u16);
        let maze = recursive_backtrack(width, height, Some(42)).unwrap();
        let cells = ((width - 1) / 2) as usize * ((height - 1) / 2) as usize;
        let open = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&c| maze.is_open(c))
            .count();
        assert_eq!(open, 2 * cells - 1);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = recursive_backtrack(21, 21, Some(99)).unwrap();
        let b = recursive_backtrack(21, 21, Some(99)).unwrap();
        assert_eq!(a, b);
    }
}
