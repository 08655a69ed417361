use std::{collections::HashMap, fmt, str::FromStr};

mod astar;
mod bfs;
mod dfs;

pub use astar::AStarSolver;
pub use bfs::BfsSolver;
pub use dfs::DfsSolver;

use crate::{
    error::{MazeError, Result},
    maze::{Coord, Maze},
};

/// Outcome of one solver step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A coordinate was explored. The solver has more work to do.
    Visited(Coord),
    /// The end was reached. Holds the path from start to end, both inclusive.
    Found(Vec<Coord>),
    /// Every reachable cell was explored without reaching the end.
    Exhausted,
}

/// A maze search that advances one exploration step per call.
///
/// `step` returns `Some(Step::Visited(_))` until the search terminates with either
/// `Some(Step::Found(_))` or `Some(Step::Exhausted)`. Every call after that returns `None`.
/// Dropping a solver part way through is always fine.
pub trait StepSolver {
    fn step(&mut self) -> Option<Step>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Dfs,
    Bfs,
    AStar,
}

impl Solver {
    pub const ALL: [Solver; 3] = [Solver::Dfs, Solver::Bfs, Solver::AStar];

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Solver::Dfs => "dfs",
            Solver::Bfs => "bfs",
            Solver::AStar => "astar",
        }
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

impl FromStr for Solver {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        Solver::ALL
            .into_iter()
            .find(|solver| solver.name() == s)
            .ok_or_else(|| MazeError::UnknownSolver(s.to_string()))
    }
}

/// Start the selected search from `start` to `end` over `maze`.
///
/// Fails if either endpoint lies outside the maze. An unreachable end is not an error: the
/// returned solver finishes with `Step::Exhausted`.
pub fn solve_maze<'a>(
    solver: Solver,
    maze: &'a Maze,
    start: Coord,
    end: Coord,
) -> Result<Box<dyn StepSolver + 'a>> {
    for coord in [start, end] {
        if !maze.is_in_bounds(coord) {
            return Err(MazeError::OutOfBounds {
                coord,
                width: maze.width(),
                height: maze.height(),
            });
        }
    }
    tracing::debug!(%solver, ?start, ?end, "starting solver");
    let steps: Box<dyn StepSolver + 'a> = match solver {
        Solver::Dfs => Box::new(DfsSolver::new(maze, start, end)),
        Solver::Bfs => Box::new(BfsSolver::new(maze, start, end)),
        Solver::AStar => Box::new(AStarSolver::new(maze, start, end)),
    };
    Ok(steps)
}

/// Walk the parent map back from `end` to `start` and return the path in forward order.
///
/// Every coordinate on the chain other than `start` must have a parent.
fn reconstruct_path(parents: &HashMap<Coord, Coord>, start: Coord, end: Coord) -> Vec<Coord> {
    let mut path = Vec::new();
    let mut current = end;
    while current != start {
        path.push(current);
        match parents.get(&current) {
            Some(&parent) => current = parent,
            None => {
                tracing::error!(?current, "parent chain broken during path reconstruction");
                break;
            }
        }
    }
    path.push(start);
    path.reverse();
    path
}

/// Everything a solver produced, collected by [`solve_to_end`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    /// Coordinates in the order the solver reported them.
    pub visited: Vec<Coord>,
    /// The path from start to end, if one was found.
    pub path: Option<Vec<Coord>>,
}

impl Solution {
    /// Number of moves along the path, or `None` if no path was found.
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len().saturating_sub(1))
    }
}

/// Run a solver until it terminates.
pub fn solve_to_end<S: StepSolver + ?Sized>(solver: &mut S) -> Solution {
    let mut solution = Solution::default();
    while let Some(step) = solver.step() {
        match step {
            Step::Visited(coord) => solution.visited.push(coord),
            Step::Found(path) => solution.path = Some(path),
            Step::Exhausted => {}
        }
    }
    tracing::debug!(
        visited = solution.visited.len(),
        path_len = ?solution.path_len(),
        "solver finished"
    );
    solution
}

/// Iterator over the coordinates a solver visits. The terminal step is kept aside, so the found
/// path can be read with [`VisitIter::path`] once the iterator is exhausted.
pub struct VisitIter<S> {
    solver: S,
    outcome: Option<Step>,
}

impl<S: StepSolver> VisitIter<S> {
    pub fn new(solver: S) -> Self {
        VisitIter {
            solver,
            outcome: None,
        }
    }

    /// The found path, if the solver has terminated with one.
    pub fn path(&self) -> Option<&[Coord]> {
        match &self.outcome {
            Some(Step::Found(path)) => Some(path.as_slice()),
            _ => None,
        }
    }
}

impl<S: StepSolver> Iterator for VisitIter<S> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        match self.solver.step()? {
            Step::Visited(coord) => Some(coord),
            terminal => {
                self.outcome = Some(terminal);
                None
            }
        }
    }
}

impl<S: StepSolver + ?Sized> StepSolver for Box<S> {
    fn step(&mut self) -> Option<Step> {
        (**self).step()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        generators::{randomized_with_walls, recursive_backtrack},
        maze::{Cell, is_adjacent, open_room},
    };

    pub(crate) fn run(solver: Solver, maze: &Maze, start: Coord, end: Coord) -> Solution {
        let mut steps = solve_maze(solver, maze, start, end).unwrap();
        solve_to_end(&mut steps)
    }

    pub(crate) fn assert_valid_path(maze: &Maze, path: &[Coord], start: Coord, end: Coord) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        for pair in path.windows(2) {
            assert!(is_adjacent(pair[0], pair[1]), "{:?} not adjacent", pair);
        }
        assert!(path.iter().all(|&c| maze.is_open(c)));
    }

    #[test]
    fn test_solver_names_round_trip() {
        for solver in Solver::ALL {
            assert_eq!(solver.name().parse::<Solver>(), Ok(solver));
        }
        assert!(matches!(
            "dijkstra".parse::<Solver>(),
            Err(MazeError::UnknownSolver(_))
        ));
    }

    #[test]
    fn test_out_of_bounds_endpoints_rejected() {
        let maze = open_room(5, 5);
        for solver in Solver::ALL {
            assert!(matches!(
                solve_maze(solver, &maze, (5, 1), (3, 3)),
                Err(MazeError::OutOfBounds { coord: (5, 1), .. })
            ));
            assert!(matches!(
                solve_maze(solver, &maze, (1, 1), (3, 9)),
                Err(MazeError::OutOfBounds { coord: (3, 9), .. })
            ));
        }
    }

    #[test]
    fn test_reconstruct_path() {
        let parents = HashMap::from([((2, 1), (1, 1)), ((2, 2), (2, 1)), ((3, 2), (2, 2))]);
        assert_eq!(
            reconstruct_path(&parents, (1, 1), (3, 2)),
            vec![(1, 1), (2, 1), (2, 2), (3, 2)]
        );
        assert_eq!(reconstruct_path(&parents, (1, 1), (1, 1)), vec![(1, 1)]);
    }

    #[test]
    fn test_paths_on_generated_mazes() {
        for seed in 0..10 {
            let maze = recursive_backtrack(21, 15, Some(seed)).unwrap();
            let (start, end) = maze.default_endpoints();
            let solutions = Solver::ALL.map(|solver| run(solver, &maze, start, end));
            for solution in &solutions {
                assert_valid_path(&maze, solution.path.as_ref().unwrap(), start, end);
            }
            let [dfs, bfs, astar] = solutions;
            // A perfect maze has a single simple path, so all three agree
            assert_eq!(bfs.path, dfs.path);
            assert_eq!(bfs.path_len(), astar.path_len());
        }
    }

    #[test]
    fn test_bfs_is_never_longer() {
        for seed in 0..10 {
            let maze = randomized_with_walls(15, 15, 40, Some(seed)).unwrap();
            let (start, end) = maze.default_endpoints();
            let [dfs, bfs, astar] = Solver::ALL.map(|solver| run(solver, &maze, start, end));
            match bfs.path_len() {
                Some(shortest) => {
                    assert!(shortest <= dfs.path_len().unwrap());
                    assert_eq!(Some(shortest), astar.path_len());
                    assert_valid_path(&maze, dfs.path.as_ref().unwrap(), start, end);
                    assert_valid_path(&maze, astar.path.as_ref().unwrap(), start, end);
                }
                None => {
                    assert_eq!(dfs.path, None);
                    assert_eq!(astar.path, None);
                }
            }
        }
    }

    #[test]
    fn test_open_room_scenario() {
        let maze = open_room(5, 5);
        let bfs = run(Solver::Bfs, &maze, (1, 1), (3, 3));
        assert_eq!(
            bfs.path,
            Some(vec![(1, 1), (2, 1), (3, 1), (3, 2), (3, 3)])
        );
        let dfs = run(Solver::Dfs, &maze, (1, 1), (3, 3));
        assert!(dfs.path_len().unwrap() >= bfs.path_len().unwrap());
        let astar = run(Solver::AStar, &maze, (1, 1), (3, 3));
        assert_eq!(astar.path_len(), Some(4));
    }

    #[test]
    fn test_enclosed_end_exhausts() {
        let mut maze = open_room(9, 9);
        let end = (4, 4);
        for wall in [(5, 4), (3, 4), (4, 5), (4, 3)] {
            maze[wall] = Cell::Wall;
        }
        maze[end] = Cell::End;
        let reachable = maze
            .positions_of(Cell::Space)
            .collect::<std::collections::HashSet<_>>();

        for solver in Solver::ALL {
            let mut steps = solve_maze(solver, &maze, (1, 1), end).unwrap();
            let mut visited = std::collections::HashSet::new();
            let mut outcome = None;
            while let Some(step) = steps.step() {
                match step {
                    Step::Visited(coord) => {
                        visited.insert(coord);
                    }
                    terminal => outcome = Some(terminal),
                }
            }
            assert_eq!(outcome, Some(Step::Exhausted), "{solver}");
            assert_eq!(visited, reachable, "{solver}");
        }
    }

    #[test]
    fn test_severed_randomized_maze_exhausts() {
        // In a 5x5 room the wall band covers the whole interior, so enough draws wall off
        // every cell except the two endpoints.
        let maze = randomized_with_walls(5, 5, 10_000, Some(11)).unwrap();
        assert_eq!(maze.positions_of(Cell::Space).count(), 0);
        let (start, end) = maze.default_endpoints();
        for solver in Solver::ALL {
            let solution = run(solver, &maze, start, end);
            assert_eq!(solution.path, None, "{solver}");
            assert_eq!(solution.visited, vec![start], "{solver}");
        }
    }

    #[test]
    fn test_start_equals_end() {
        let maze = open_room(5, 5);
        for solver in Solver::ALL {
            let solution = run(solver, &maze, (2, 2), (2, 2));
            assert_eq!(solution.path, Some(vec![(2, 2)]), "{solver}");
            assert!(solution.visited.is_empty(), "{solver}");
        }
    }

    #[test]
    fn test_no_steps_after_terminal() {
        let maze = open_room(5, 5);
        for solver in Solver::ALL {
            let mut steps = solve_maze(solver, &maze, (1, 1), (3, 3)).unwrap();
            while let Some(Step::Visited(_)) = steps.step() {}
            assert_eq!(steps.step(), None, "{solver}");
            assert_eq!(steps.step(), None, "{solver}");
        }
    }

    #[test]
    fn test_visit_iter_keeps_path() {
        let maze = open_room(6, 4);
        let mut iter = VisitIter::new(BfsSolver::new(&maze, (1, 1), (4, 2)));
        let visited = iter.by_ref().collect::<Vec<_>>();
        assert_eq!(visited.first(), Some(&(1, 1)));
        assert_eq!(iter.path().map(<[Coord]>::len), Some(5));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_visit_iter_over_dispatched_solver() {
        let mut maze = open_room(7, 5);
        for wall in [(4, 1), (4, 2), (4, 3)] {
            maze[wall] = Cell::Wall;
        }
        for solver in Solver::ALL {
            let mut iter = VisitIter::new(solve_maze(solver, &maze, (1, 1), (5, 3)).unwrap());
            let visited = iter.by_ref().collect::<std::collections::HashSet<_>>();
            assert_eq!(visited.len(), 9, "{solver}");
            assert_eq!(iter.path(), None, "{solver}");
        }

        let mut iter = VisitIter::new(solve_maze(Solver::Bfs, &maze, (1, 1), (3, 3)).unwrap());
        assert!(iter.by_ref().count() > 0);
        assert_eq!(iter.path(), Some(&[(1, 1), (2, 1), (3, 1), (3, 2), (3, 3)][..]));
    }
}
