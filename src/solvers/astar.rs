use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashMap},
};

use super::{Step, StepSolver, reconstruct_path};
use crate::maze::{Coord, Maze, get_neighbors};

/// Entry in the A* frontier.
struct FrontierCell {
    /// Estimated total cost through this cell: steps so far plus the heuristic
    priority: f64,
    /// Insertion order, so that equal priorities pop first-in first-out
    seq: u64,
    coord: Coord,
}

impl PartialEq for FrontierCell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierCell {}

impl PartialOrd for FrontierCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierCell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Euclidean distance between two cells.
fn heuristic(a: Coord, b: Coord) -> f64 {
    let dx = f64::from(a.0.abs_diff(b.0));
    let dy = f64::from(a.1.abs_diff(b.1));
    (dx * dx + dy * dy).sqrt()
}

/// A* search with unit step cost and a Euclidean distance heuristic.
///
/// Improved costs push a fresh frontier entry instead of updating the old one, so a cell may be
/// popped, and reported, more than once.
pub struct AStarSolver<'a> {
    maze: &'a Maze,
    start: Coord,
    end: Coord,
    /// Using Reverse to turn the max-heap into a min-heap
    frontier: BinaryHeap<Reverse<FrontierCell>>,
    costs: HashMap<Coord, usize>,
    parents: HashMap<Coord, Coord>,
    next_seq: u64,
    done: bool,
}

impl<'a> AStarSolver<'a> {
    pub fn new(maze: &'a Maze, start: Coord, end: Coord) -> Self {
        let mut solver = AStarSolver {
            maze,
            start,
            end,
            frontier: BinaryHeap::new(),
            costs: HashMap::from([(start, 0)]),
            parents: HashMap::new(),
            next_seq: 0,
            done: false,
        };
        solver.push(0.0, start);
        solver
    }

    fn push(&mut self, priority: f64, coord: Coord) {
        self.frontier.push(Reverse(FrontierCell {
            priority,
            seq: self.next_seq,
            coord,
        }));
        self.next_seq += 1;
    }
}

impl StepSolver for AStarSolver<'_> {
    fn step(&mut self) -> Option<Step> {
        if self.done {
            return None;
        }

        let Some(Reverse(FrontierCell { coord: current, .. })) = self.frontier.pop() else {
            self.done = true;
            tracing::debug!(explored = self.costs.len(), "a* exhausted");
            return Some(Step::Exhausted);
        };

        if current == self.end {
            self.done = true;
            let path = reconstruct_path(&self.parents, self.start, self.end);
            tracing::debug!(explored = self.costs.len(), len = path.len(), "a* found end");
            return Some(Step::Found(path));
        }

        let new_cost = self.costs.get(&current).copied().unwrap_or_default() + 1;
        let maze = self.maze;
        for neighbor in get_neighbors(current, maze).filter(|&c| maze.is_open(c)) {
            let is_cheaper = self
                .costs
                .get(&neighbor)
                .is_none_or(|&existing_cost| new_cost < existing_cost);
            if is_cheaper {
                self.costs.insert(neighbor, new_cost);
                self.parents.insert(neighbor, current);
                self.push(new_cost as f64 + heuristic(neighbor, self.end), neighbor);
            }
        }

        tracing::trace!(?current, frontier = self.frontier.len(), "a* visit");
        Some(Step::Visited(current))
    }
}
