use std::collections::{HashMap, HashSet, VecDeque};

use super::{Step, StepSolver, reconstruct_path};
use crate::maze::{Coord, Maze, get_neighbors};

/// Breadth-first search. Finds a path with the fewest steps.
pub struct BfsSolver<'a> {
    maze: &'a Maze,
    start: Coord,
    end: Coord,
    queue: VecDeque<Coord>,
    /// Cells that have been queued at least once
    discovered: HashSet<Coord>,
    visited: HashSet<Coord>,
    parents: HashMap<Coord, Coord>,
    done: bool,
}

impl<'a> BfsSolver<'a> {
    pub fn new(maze: &'a Maze, start: Coord, end: Coord) -> Self {
        BfsSolver {
            maze,
            start,
            end,
            queue: VecDeque::from([start]),
            discovered: HashSet::from([start]),
            visited: HashSet::new(),
            parents: HashMap::new(),
            done: false,
        }
    }
}

impl StepSolver for BfsSolver<'_> {
    fn step(&mut self) -> Option<Step> {
        if self.done {
            return None;
        }

        while let Some(current) = self.queue.pop_front() {
            if current == self.end {
                self.done = true;
                let path = reconstruct_path(&self.parents, self.start, self.end);
                tracing::debug!(visited = self.visited.len(), len = path.len(), "bfs found end");
                return Some(Step::Found(path));
            }

            if !self.visited.insert(current) {
                continue;
            }

            // The first parent recorded for a cell is on a shortest route to it
            let maze = self.maze;
            for neighbor in get_neighbors(current, maze).filter(|&c| maze.is_open(c)) {
                if self.discovered.insert(neighbor) {
                    self.parents.insert(neighbor, current);
                    self.queue.push_back(neighbor);
                }
            }

            tracing::trace!(?current, queued = self.queue.len(), "bfs visit");
            return Some(Step::Visited(current));
        }

        self.done = true;
        tracing::debug!(visited = self.visited.len(), "bfs exhausted");
        Some(Step::Exhausted)
    }
}
