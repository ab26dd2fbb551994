use std::collections::VecDeque;

use pathviz_core::Grid;

use crate::search::{Expansion, admit, settle};

/// Breadth-first state: FIFO queue, each cell enqueued at most once.
pub(crate) struct Bfs {
    queue: VecDeque<usize>,
    seen: Vec<bool>,
    goal: usize,
}

impl Bfs {
    pub(crate) fn new(grid: &Grid, start: usize, goal: usize) -> Self {
        let mut seen = vec![false; grid.len()];
        seen[start] = true;
        Self {
            queue: VecDeque::from([start]),
            seen,
            goal,
        }
    }

    pub(crate) fn expand(&mut self, grid: &mut Grid, nbuf: &mut Vec<usize>) -> Expansion {
        let Some(ci) = self.queue.pop_front() else {
            return Expansion::Exhausted;
        };
        if ci == self.goal {
            return Expansion::Goal;
        }

        grid.neighbors(ci, nbuf);
        for &ni in nbuf.iter() {
            if self.seen[ni] {
                continue;
            }
            self.seen[ni] = true;
            grid.cell_mut(ni).predecessor = Some(ci);
            self.queue.push_back(ni);
            admit(grid, ni);
        }
        settle(grid, ci);
        Expansion::Expanded
    }
}
