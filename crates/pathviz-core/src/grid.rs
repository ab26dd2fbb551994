//! The [`Grid`] type: a fixed-size rectangle of [`Cell`]s with start/end
//! designation, tool application and neighbour queries.
//!
//! Cells live in one row-major `Vec`. Everything else (start/end
//! designation, predecessors) refers to them by flat index.

use std::fmt;

use rand::Rng;

use crate::cell::{Cell, CellState};
use crate::config::GridConfig;
use crate::geom::Pos;

// ---------------------------------------------------------------------------
// Tool
// ---------------------------------------------------------------------------

/// An editing tool applied to a single cell between runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tool {
    #[default]
    Start,
    End,
    Wall,
    Erase,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when parsing a grid picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A line has a different width than the first one.
    Ragged { line: usize },
    /// A character that is not a cell glyph.
    InvalidChar { ch: char, pos: Pos },
    /// More than one `S`.
    DuplicateStart(Pos),
    /// More than one `E`.
    DuplicateEnd(Pos),
    /// The cell count `rows * cols` does not fit in an `i32`.
    TooLarge { rows: i32, cols: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ragged { line } => write!(f, "grid: line {line} has inconsistent width"),
            Self::InvalidChar { ch, pos } => {
                write!(f, "grid: invalid cell character '{ch}' at {pos}")
            }
            Self::DuplicateStart(pos) => write!(f, "grid: second start cell at {pos}"),
            Self::DuplicateEnd(pos) => write!(f, "grid: second end cell at {pos}"),
            Self::TooLarge { rows, cols } => {
                write!(f, "grid: {rows}x{cols} has too many cells")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A fixed-size rectangular grid owning all of its cells.
///
/// Not serializable: cell positions, designations and predecessors must
/// agree with the cell vector, and only the constructors guarantee that.
/// Persist a [`GridConfig`] or a [`render_ascii`](Self::render_ascii)
/// picture instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: i32,
    cols: i32,
    start: Option<usize>,
    end: Option<usize>,
}

impl Grid {
    /// Create a grid of empty cells. Non-positive dimensions give an empty
    /// grid.
    ///
    /// Use [`try_new`](Self::try_new) for dimensions that come from user
    /// input.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        let mut cells = Vec::with_capacity(rows as usize * cols as usize);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(Pos::new(row, col)));
            }
        }
        Self {
            cells,
            rows,
            cols,
            start: None,
            end: None,
        }
    }

    /// Like [`new`](Self::new), but rejects dimensions whose cell count
    /// does not fit in an `i32`.
    pub fn try_new(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows.max(0).checked_mul(cols.max(0)).is_none() {
            return Err(GridError::TooLarge { rows, cols });
        }
        Ok(Self::new(rows, cols))
    }

    /// Create a grid sized by `cfg` and fill it with random walls at the
    /// configured density. A configured seed makes the fill reproducible.
    pub fn from_config(cfg: &GridConfig) -> Result<Self, GridError> {
        let mut grid = Self::try_new(cfg.rows, cfg.cols)?;
        if cfg.wall_density > 0.0 {
            match cfg.seed {
                Some(seed) => {
                    use rand::SeedableRng;
                    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
                    grid.fill_random_walls(&mut rng, cfg.wall_density);
                }
                None => grid.fill_random_walls(&mut rand::rng(), cfg.wall_density),
            }
        }
        Ok(grid)
    }

    /// Build a grid from a text picture, one line per row, using the glyphs
    /// of [`CellState::glyph`]. Empty lines are skipped.
    pub fn parse(picture: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = picture.lines().filter(|l| !l.is_empty()).collect();
        let rows = lines.len() as i32;
        let cols = lines.first().map_or(0, |l| l.chars().count()) as i32;
        let mut grid = Self::new(rows, cols);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() as i32 != cols {
                return Err(GridError::Ragged { line: row });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Pos::new(row as i32, col as i32);
                let state =
                    CellState::from_glyph(ch).ok_or(GridError::InvalidChar { ch, pos })?;
                let idx = row * cols as usize + col;
                match state {
                    CellState::Start if grid.start.is_some() => {
                        return Err(GridError::DuplicateStart(pos));
                    }
                    CellState::End if grid.end.is_some() => {
                        return Err(GridError::DuplicateEnd(pos));
                    }
                    CellState::Start => grid.start = Some(idx),
                    CellState::End => grid.end = Some(idx),
                    _ => {}
                }
                grid.cells[idx].state = state;
            }
        }
        Ok(grid)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.cols
    }

    /// Convert a position to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.cols as usize + p.col as usize)
    }

    /// Convert a flat index back to a position.
    #[inline]
    pub fn pos(&self, idx: usize) -> Pos {
        self.cells[idx].pos()
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Pos) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Mutable access to the cell at `p`, or `None` if out of bounds.
    ///
    /// Changing a cell to or from `Start`/`End` here bypasses designation
    /// tracking; use [`set_start`](Self::set_start) and
    /// [`set_end`](Self::set_end) for that.
    #[inline]
    pub fn at_mut(&mut self, p: Pos) -> Option<&mut Cell> {
        self.idx(p).map(|i| &mut self.cells[i])
    }

    /// The cell at flat index `idx`.
    #[inline]
    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Mutable access to the cell at flat index `idx`.
    #[inline]
    pub fn cell_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Position of the start cell, if designated.
    pub fn start(&self) -> Option<Pos> {
        self.start.map(|i| self.pos(i))
    }

    /// Position of the end cell, if designated.
    pub fn end(&self) -> Option<Pos> {
        self.end.map(|i| self.pos(i))
    }

    /// Flat index of the start cell, if designated.
    #[inline]
    pub fn start_idx(&self) -> Option<usize> {
        self.start
    }

    /// Flat index of the end cell, if designated.
    #[inline]
    pub fn end_idx(&self) -> Option<usize> {
        self.end
    }

    // -----------------------------------------------------------------------
    // Designation and tools
    // -----------------------------------------------------------------------

    /// Move the start designation to `pos`, demoting the previous start
    /// cell to empty. `None` only clears the designation.
    ///
    /// Returns `false` without changing anything if `pos` is out of bounds
    /// or is the current end cell.
    pub fn set_start(&mut self, pos: Option<Pos>) -> bool {
        self.designate(pos, CellState::Start)
    }

    /// Move the end designation to `pos`. See [`set_start`](Self::set_start).
    pub fn set_end(&mut self, pos: Option<Pos>) -> bool {
        self.designate(pos, CellState::End)
    }

    fn designate(&mut self, pos: Option<Pos>, role: CellState) -> bool {
        let target = match pos {
            Some(p) => match self.idx(p) {
                Some(i) => Some(i),
                None => return false,
            },
            None => None,
        };
        let (slot, other) = match role {
            CellState::Start => (self.start, self.end),
            _ => (self.end, self.start),
        };
        if target.is_some() && target == other {
            return false;
        }
        if let Some(old) = slot {
            self.cells[old].reset(false);
        }
        if let Some(i) = target {
            self.cells[i].state = role;
            self.cells[i].predecessor = None;
        }
        match role {
            CellState::Start => self.start = target,
            _ => self.end = target,
        }
        true
    }

    fn is_designated(&self, idx: usize) -> bool {
        self.start == Some(idx) || self.end == Some(idx)
    }

    /// Flip a cell between wall and empty. Rejected (returns `false`) on
    /// the start or end cell and out of bounds.
    pub fn toggle_wall(&mut self, pos: Pos) -> bool {
        let Some(i) = self.idx(pos) else {
            return false;
        };
        if self.is_designated(i) {
            return false;
        }
        let cell = &mut self.cells[i];
        cell.state = match cell.state {
            CellState::Wall => CellState::Empty,
            _ => CellState::Wall,
        };
        cell.predecessor = None;
        true
    }

    /// Clear a cell to empty. Rejected on the start or end cell and out of
    /// bounds.
    pub fn erase(&mut self, pos: Pos) -> bool {
        let Some(i) = self.idx(pos) else {
            return false;
        };
        if self.is_designated(i) {
            return false;
        }
        self.cells[i].reset(false);
        true
    }

    /// Apply an editing tool at `pos`. Returns whether the grid changed.
    pub fn apply_tool(&mut self, tool: Tool, pos: Pos) -> bool {
        match tool {
            Tool::Start => self.set_start(Some(pos)),
            Tool::End => self.set_end(Some(pos)),
            Tool::Wall => self.toggle_wall(pos),
            Tool::Erase => self.erase(pos),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Append the walkable orthogonal neighbours of cell `idx` into `buf`,
    /// in right, left, down, up order. `buf` is cleared first.
    pub fn neighbors(&self, idx: usize, buf: &mut Vec<usize>) {
        buf.clear();
        for np in self.pos(idx).neighbors_4() {
            if let Some(ni) = self.idx(np) {
                if self.cells[ni].is_walkable() {
                    buf.push(ni);
                }
            }
        }
    }

    /// Walkable orthogonal neighbours of `pos`. Empty if `pos` is out of
    /// bounds.
    pub fn neighbor_positions(&self, pos: Pos) -> Vec<Pos> {
        let mut buf = Vec::with_capacity(4);
        if let Some(i) = self.idx(pos) {
            self.neighbors(i, &mut buf);
        }
        buf.into_iter().map(|i| self.pos(i)).collect()
    }

    /// Count how many cells are in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// The route from start to end (both included) following predecessor
    /// links back from the end cell. Empty when the end cell is not
    /// designated or was never reached.
    pub fn path_positions(&self) -> Vec<Pos> {
        let Some(end) = self.end else {
            return Vec::new();
        };
        let mut path = vec![self.pos(end)];
        let mut cur = self.cells[end].predecessor;
        while let Some(i) = cur {
            if path.len() > self.cells.len() {
                // Broken chain; refuse to report a bogus route.
                return Vec::new();
            }
            path.push(self.pos(i));
            cur = self.cells[i].predecessor;
        }
        if path.len() == 1 {
            return Vec::new();
        }
        path.reverse();
        path
    }

    /// Number of edges on the route reported by
    /// [`path_positions`](Self::path_positions).
    pub fn path_len(&self) -> usize {
        self.path_positions().len().saturating_sub(1)
    }

    // -----------------------------------------------------------------------
    // Bulk operations
    // -----------------------------------------------------------------------

    /// Drop all marks and predecessors, keeping walls, start and end.
    pub fn clear_path(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reset(true);
        }
    }

    /// Reset every cell to empty and forget the start/end designation.
    pub fn clear_all(&mut self) {
        self.start = None;
        self.end = None;
        for cell in self.cells.iter_mut() {
            cell.reset(false);
        }
    }

    /// Reset the grid, then turn each cell into a wall with probability
    /// `density` (clamped to 0..=1).
    pub fn fill_random_walls(&mut self, rng: &mut impl Rng, density: f64) {
        self.clear_all();
        let p = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        for cell in self.cells.iter_mut() {
            if rng.random_bool(p) {
                cell.state = CellState::Wall;
            }
        }
    }

    /// Text rendering, one line per row, using [`CellState::glyph`].
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.rows as usize);
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % self.cols as usize == 0 {
                out.push('\n');
            }
            out.push(cell.state.glyph());
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_ascii())
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_new_and_size() {
        let g = Grid::new(5, 10);
        assert_eq!(g.rows(), 5);
        assert_eq!(g.cols(), 10);
        assert_eq!(g.len(), 50);
        assert_eq!(g.at(Pos::new(4, 9)).map(Cell::pos), Some(Pos::new(4, 9)));
        assert!(Grid::new(-1, 3).is_empty());
    }

    #[test]
    fn test_out_of_bounds_is_absent() {
        let mut g = Grid::new(3, 3);
        assert!(g.at(Pos::new(3, 0)).is_none());
        assert!(g.at(Pos::new(0, -1)).is_none());
        assert!(g.at_mut(Pos::new(-1, -1)).is_none());
        assert!(g.neighbor_positions(Pos::new(7, 7)).is_empty());
        assert!(!g.set_start(Some(Pos::new(9, 9))));
        assert!(!g.toggle_wall(Pos::new(3, 3)));
    }

    #[test]
    fn test_idx_round_trip() {
        let g = Grid::new(4, 7);
        for cell in &g {
            let i = g.idx(cell.pos()).unwrap();
            assert_eq!(g.pos(i), cell.pos());
        }
    }

    #[test]
    fn test_neighbors_order_and_filter() {
        let mut g = Grid::new(3, 3);
        assert_eq!(
            g.neighbor_positions(Pos::new(1, 1)),
            vec![Pos::new(1, 2), Pos::new(1, 0), Pos::new(2, 1), Pos::new(0, 1)]
        );
        g.toggle_wall(Pos::new(1, 0));
        assert_eq!(
            g.neighbor_positions(Pos::new(1, 1)),
            vec![Pos::new(1, 2), Pos::new(2, 1), Pos::new(0, 1)]
        );
        assert_eq!(
            g.neighbor_positions(Pos::new(0, 0)),
            vec![Pos::new(0, 1)]
        );
    }

    #[test]
    fn test_single_designation() {
        let mut g = Grid::new(4, 4);
        assert!(g.set_start(Some(Pos::new(0, 0))));
        assert!(g.set_start(Some(Pos::new(1, 1))));
        assert_eq!(g.count(CellState::Start), 1);
        assert_eq!(g.at(Pos::new(0, 0)).unwrap().state, CellState::Empty);

        assert!(g.set_end(Some(Pos::new(3, 3))));
        // End cannot be moved onto the start cell, nor start onto end.
        assert!(!g.set_end(Some(Pos::new(1, 1))));
        assert!(!g.set_start(Some(Pos::new(3, 3))));
        assert_eq!(g.start(), Some(Pos::new(1, 1)));
        assert_eq!(g.end(), Some(Pos::new(3, 3)));

        assert!(g.set_start(None));
        assert_eq!(g.start(), None);
        assert_eq!(g.count(CellState::Start), 0);
        assert_eq!(g.count(CellState::End), 1);
    }

    #[test]
    fn test_tools_reject_designated_cells() {
        let mut g = Grid::new(3, 3);
        g.apply_tool(Tool::Start, Pos::new(0, 0));
        g.apply_tool(Tool::End, Pos::new(2, 2));
        assert!(!g.apply_tool(Tool::Wall, Pos::new(0, 0)));
        assert!(!g.apply_tool(Tool::Erase, Pos::new(2, 2)));
        assert!(g.apply_tool(Tool::Wall, Pos::new(1, 1)));
        assert_eq!(g.at(Pos::new(1, 1)).unwrap().state, CellState::Wall);
        assert!(g.apply_tool(Tool::Wall, Pos::new(1, 1)));
        assert_eq!(g.at(Pos::new(1, 1)).unwrap().state, CellState::Empty);
        g.apply_tool(Tool::Wall, Pos::new(0, 1));
        assert!(g.apply_tool(Tool::Erase, Pos::new(0, 1)));
        assert_eq!(g.count(CellState::Wall), 0);
    }

    #[test]
    fn test_start_over_wall_replaces_it() {
        let mut g = Grid::new(2, 2);
        g.toggle_wall(Pos::new(0, 1));
        assert!(g.set_start(Some(Pos::new(0, 1))));
        assert_eq!(g.at(Pos::new(0, 1)).unwrap().state, CellState::Start);
        assert_eq!(g.count(CellState::Wall), 0);
    }

    #[test]
    fn test_clear_path_and_clear_all() {
        let mut g = Grid::parse("S.o\n#*_\n__E").unwrap();
        g.cell_mut(1).predecessor = Some(0);
        g.clear_path();
        assert_eq!(g.render_ascii(), "S  \n#  \n  E");
        assert!(g.iter().all(|c| c.predecessor.is_none()));
        assert_eq!(g.start(), Some(Pos::new(0, 0)));

        g.clear_all();
        assert!(g.iter().all(|c| c.state == CellState::Empty));
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Grid::parse("S_\n_"), Err(GridError::Ragged { line: 1 }));
        assert_eq!(
            Grid::parse("S?"),
            Err(GridError::InvalidChar {
                ch: '?',
                pos: Pos::new(0, 1)
            })
        );
        assert_eq!(
            Grid::parse("S_\n_S"),
            Err(GridError::DuplicateStart(Pos::new(1, 1)))
        );
        assert_eq!(
            Grid::parse("EE"),
            Err(GridError::DuplicateEnd(Pos::new(0, 1)))
        );
    }

    #[test]
    fn test_path_positions() {
        let mut g = Grid::parse("S__\n__E").unwrap();
        assert!(g.path_positions().is_empty());
        // (0,0) -> (0,1) -> (0,2) -> (1,2)
        g.cell_mut(1).predecessor = Some(0);
        g.cell_mut(2).predecessor = Some(1);
        g.cell_mut(5).predecessor = Some(2);
        assert_eq!(
            g.path_positions(),
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2), Pos::new(1, 2)]
        );
        assert_eq!(g.path_len(), 3);
    }

    #[test]
    fn test_random_walls_density() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut g = Grid::new(20, 20);
        g.set_start(Some(Pos::ZERO));
        g.fill_random_walls(&mut rng, 0.0);
        assert_eq!(g.count(CellState::Wall), 0);
        assert_eq!(g.start(), None);
        g.fill_random_walls(&mut rng, 1.0);
        assert_eq!(g.count(CellState::Wall), 400);
        g.fill_random_walls(&mut rng, 0.25);
        let walls = g.count(CellState::Wall);
        assert!(walls > 40 && walls < 160, "walls = {walls}");
    }

    #[test]
    fn test_from_config_is_reproducible() {
        let cfg = GridConfig {
            rows: 10,
            cols: 12,
            wall_density: 0.3,
            seed: Some(99),
        };
        let a = Grid::from_config(&cfg).unwrap();
        let b = Grid::from_config(&cfg).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rows(), 10);
        assert_eq!(a.cols(), 12);
    }

    #[test]
    fn test_oversized_dimensions_are_rejected() {
        assert_eq!(
            Grid::try_new(50_000, 50_000),
            Err(GridError::TooLarge {
                rows: 50_000,
                cols: 50_000
            })
        );
        let cfg = GridConfig {
            rows: i32::MAX,
            cols: 2,
            ..GridConfig::default()
        };
        assert!(matches!(
            Grid::from_config(&cfg),
            Err(GridError::TooLarge { .. })
        ));
        assert!(Grid::try_new(-50_000, 50_000).unwrap().is_empty());
        assert_eq!(Grid::try_new(3, 4).unwrap().len(), 12);
    }

    #[test]
    fn test_idx_far_out_of_bounds() {
        let g = Grid::new(2, 3);
        assert_eq!(g.idx(Pos::new(i32::MAX, i32::MAX)), None);
        assert_eq!(g.idx(Pos::new(1, 2)), Some(5));
    }

    #[test]
    fn test_error_messages_use_plain_quotes() {
        let err = GridError::InvalidChar {
            ch: '?',
            pos: Pos::new(0, 1),
        };
        assert_eq!(err.to_string(), "grid: invalid cell character '?' at (0, 1)");
        assert_eq!(
            GridError::TooLarge { rows: 50_000, cols: 50_000 }.to_string(),
            "grid: 50000x50000 has too many cells"
        );
    }
}
