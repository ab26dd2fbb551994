use pathviz_core::{CellState, Grid};

use crate::error::SearchError;
use crate::traits::Observer;

/// Mark the route found by a search.
///
/// Walks predecessor links back from the end cell and marks every cell
/// strictly between end and start as [`CellState::Path`], signalling
/// `observer` once per marked cell. The start and end keep their roles.
///
/// Returns the number of marked cells. A chain that revisits a cell is
/// reported as [`SearchError::PredecessorCycle`].
pub fn reconstruct(
    grid: &mut Grid,
    end: usize,
    observer: &mut impl Observer,
) -> Result<usize, SearchError> {
    let mut seen = vec![false; grid.len()];
    seen[end] = true;
    let mut marked = 0;

    let mut cur = grid.cell(end).predecessor;
    while let Some(ci) = cur {
        let next = grid.cell(ci).predecessor;
        if next.is_none() {
            // Reached the start cell.
            break;
        }
        if seen[ci] {
            return Err(SearchError::PredecessorCycle { at: grid.pos(ci) });
        }
        seen[ci] = true;
        grid.cell_mut(ci).state = CellState::Path;
        marked += 1;
        observer.changed(grid);
        cur = next;
    }
    Ok(marked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Pos;

    fn chain(grid: &mut Grid, cells: &[(i32, i32)]) {
        for w in cells.windows(2) {
            let from = grid.idx(Pos::new(w[0].0, w[0].1)).unwrap();
            let to = grid.idx(Pos::new(w[1].0, w[1].1)).unwrap();
            grid.cell_mut(to).predecessor = Some(from);
        }
    }

    #[test]
    fn marks_cells_between_start_and_end() {
        let mut grid = Grid::parse("S__\n__E").unwrap();
        chain(&mut grid, &[(0, 0), (0, 1), (0, 2), (1, 2)]);
        let end = grid.end_idx().unwrap();
        let mut signals = 0;
        let marked = reconstruct(&mut grid, end, &mut |_: &Grid| signals += 1).unwrap();
        assert_eq!(marked, 2);
        assert_eq!(signals, 2);
        assert_eq!(grid.render_ascii(), "S**\n  E");
    }

    #[test]
    fn adjacent_end_marks_nothing() {
        let mut grid = Grid::parse("SE").unwrap();
        chain(&mut grid, &[(0, 0), (0, 1)]);
        let end = grid.end_idx().unwrap();
        let marked = reconstruct(&mut grid, end, &mut crate::NoObserver).unwrap();
        assert_eq!(marked, 0);
        assert_eq!(grid.render_ascii(), "SE");
    }

    #[test]
    fn detects_cycles() {
        let mut grid = Grid::parse("S___E").unwrap();
        // 1 -> 2 -> 3 -> 1, and end hangs off 3.
        chain(&mut grid, &[(0, 1), (0, 2), (0, 3), (0, 1)]);
        chain(&mut grid, &[(0, 3), (0, 4)]);
        let end = grid.end_idx().unwrap();
        let err = reconstruct(&mut grid, end, &mut crate::NoObserver).unwrap_err();
        assert!(matches!(err, SearchError::PredecessorCycle { .. }));
    }
}
