use pathviz_core::{Grid, Pos, manhattan};

use crate::frontier::PriorityFrontier;
use crate::search::{Expansion, admit, settle};

/// A* state: open list keyed by `g + h` with Manhattan `h`.
pub(crate) struct AStar {
    open: PriorityFrontier,
    goal: usize,
    goal_pos: Pos,
}

impl AStar {
    pub(crate) fn new(grid: &Grid, start: usize, goal: usize) -> Self {
        let goal_pos = grid.pos(goal);
        let mut open = PriorityFrontier::new(grid.len());
        open.push(start, 0, manhattan(grid.pos(start), goal_pos));
        Self {
            open,
            goal,
            goal_pos,
        }
    }

    pub(crate) fn expand(&mut self, grid: &mut Grid, nbuf: &mut Vec<usize>) -> Expansion {
        let Some(ci) = self.open.pop() else {
            return Expansion::Exhausted;
        };
        if ci == self.goal {
            return Expansion::Goal;
        }

        let tentative = self.open.cost(ci) + 1;
        grid.neighbors(ci, nbuf);
        for &ni in nbuf.iter() {
            if tentative >= self.open.cost(ni) {
                continue;
            }
            grid.cell_mut(ni).predecessor = Some(ci);
            let f = tentative + manhattan(grid.pos(ni), self.goal_pos);
            if self.open.push(ni, tentative, f) {
                admit(grid, ni);
            }
        }
        settle(grid, ci);
        Expansion::Expanded
    }
}
