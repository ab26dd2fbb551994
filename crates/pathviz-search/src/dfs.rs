use pathviz_core::Grid;

use crate::search::{Expansion, admit, settle};

/// Depth-first state: LIFO stack, each cell pushed at most once.
pub(crate) struct Dfs {
    stack: Vec<usize>,
    seen: Vec<bool>,
    goal: usize,
    /// Push neighbours in reverse so they pop in right, left, down, up order.
    reverse: bool,
}

impl Dfs {
    pub(crate) fn new(grid: &Grid, start: usize, goal: usize, reverse: bool) -> Self {
        let mut seen = vec![false; grid.len()];
        seen[start] = true;
        Self {
            stack: vec![start],
            seen,
            goal,
            reverse,
        }
    }

    pub(crate) fn expand(&mut self, grid: &mut Grid, nbuf: &mut Vec<usize>) -> Expansion {
        let Some(ci) = self.stack.pop() else {
            return Expansion::Exhausted;
        };
        if ci == self.goal {
            return Expansion::Goal;
        }

        grid.neighbors(ci, nbuf);
        if self.reverse {
            nbuf.reverse();
        }
        for &ni in nbuf.iter() {
            if self.seen[ni] {
                continue;
            }
            self.seen[ni] = true;
            grid.cell_mut(ni).predecessor = Some(ci);
            self.stack.push(ni);
            admit(grid, ni);
        }
        settle(grid, ci);
        Expansion::Expanded
    }
}
