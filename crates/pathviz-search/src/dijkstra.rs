use pathviz_core::Grid;

use crate::frontier::PriorityFrontier;
use crate::search::{Expansion, admit, settle};

/// Uniform-cost state: open list keyed by distance from the start.
pub(crate) struct Dijkstra {
    open: PriorityFrontier,
    goal: usize,
}

impl Dijkstra {
    pub(crate) fn new(grid: &Grid, start: usize, goal: usize) -> Self {
        let mut open = PriorityFrontier::new(grid.len());
        open.push(start, 0, 0);
        Self { open, goal }
    }

    pub(crate) fn expand(&mut self, grid: &mut Grid, nbuf: &mut Vec<usize>) -> Expansion {
        let Some(ci) = self.open.pop() else {
            return Expansion::Exhausted;
        };
        if ci == self.goal {
            return Expansion::Goal;
        }

        let current = self.open.cost(ci);
        grid.neighbors(ci, nbuf);
        for &ni in nbuf.iter() {
            // Unit weights; a weighted grid would add the edge cost here.
            let tentative = current + 1;
            if tentative >= self.open.cost(ni) {
                continue;
            }
            grid.cell_mut(ni).predecessor = Some(ci);
            if self.open.push(ni, tentative, tentative) {
                admit(grid, ni);
            }
        }
        settle(grid, ci);
        Expansion::Expanded
    }
}
