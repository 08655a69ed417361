use std::collections::{HashMap, HashSet};

use super::{Step, StepSolver, reconstruct_path};
use crate::maze::{Coord, Maze, get_neighbors};

/// Greedy depth-first search.
///
/// Only the first open, unvisited neighbor (in right, left, down, up order) is pushed, so the
/// stack always holds the current route from the start. Paths are not shortest in general.
pub struct DfsSolver<'a> {
    maze: &'a Maze,
    start: Coord,
    end: Coord,
    stack: Vec<Coord>,
    visited: HashSet<Coord>,
    parents: HashMap<Coord, Coord>,
    done: bool,
}

impl<'a> DfsSolver<'a> {
    pub fn new(maze: &'a Maze, start: Coord, end: Coord) -> Self {
        DfsSolver {
            maze,
            start,
            end,
            stack: vec![start],
            visited: HashSet::new(),
            parents: HashMap::new(),
            done: false,
        }
    }
}

impl StepSolver for DfsSolver<'_> {
    fn step(&mut self) -> Option<Step> {
        if self.done {
            return None;
        }

        // Backtracking pops report nothing, so keep going until a cell is newly visited
        while let Some(&current) = self.stack.last() {
            if current == self.end {
                self.done = true;
                let path = reconstruct_path(&self.parents, self.start, self.end);
                tracing::debug!(visited = self.visited.len(), len = path.len(), "dfs found end");
                return Some(Step::Found(path));
            }

            let newly_visited = self.visited.insert(current);

            let next = get_neighbors(current, self.maze)
                .find(|&c| self.maze.is_open(c) && !self.visited.contains(&c));
            match next {
                Some(neighbor) => {
                    self.stack.push(neighbor);
                    self.parents.insert(neighbor, current);
                }
                None => {
                    self.stack.pop();
                }
            }

            if newly_visited {
                tracing::trace!(?current, "dfs visit");
                return Some(Step::Visited(current));
            }
        }

        self.done = true;
        tracing::debug!(visited = self.visited.len(), "dfs exhausted");
        Some(Step::Exhausted)
    }
}
