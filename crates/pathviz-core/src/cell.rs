//! The [`Cell`] type: one addressable grid position with its role,
//! visitation mark and search backpointer.

use crate::geom::Pos;

/// Role and visitation mark of a cell, unioned in one field.
///
/// `Start`, `End` and `Wall` are roles set by the user. `Frontier`,
/// `Visited` and `Path` are transient marks written by a search run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Start,
    End,
    Wall,
    Frontier,
    Visited,
    Path,
}

impl CellState {
    /// Whether this is a user-placed role that survives `clear_path`.
    #[inline]
    pub const fn is_essential(self) -> bool {
        matches!(self, Self::Start | Self::End | Self::Wall)
    }

    /// Whether this is a transient mark left by a search run.
    #[inline]
    pub const fn is_mark(self) -> bool {
        matches!(self, Self::Frontier | Self::Visited | Self::Path)
    }

    /// Single-character glyph used by the text rendering.
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Wall => '#',
            Self::Frontier => 'o',
            Self::Visited => '.',
            Self::Path => '*',
        }
    }

    /// Inverse of [`glyph`](Self::glyph). `_` is accepted as empty too.
    pub const fn from_glyph(ch: char) -> Option<Self> {
        Some(match ch {
            ' ' | '_' => Self::Empty,
            'S' => Self::Start,
            'E' => Self::End,
            '#' => Self::Wall,
            'o' => Self::Frontier,
            '.' => Self::Visited,
            '*' => Self::Path,
            _ => return None,
        })
    }
}

/// A single grid cell.
///
/// Cells only exist inside a [`Grid`](crate::Grid), which keeps their
/// positions and predecessors consistent, so they are not serializable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Pos,
    pub state: CellState,
    /// Flat index of the cell this one was discovered from. Only the search
    /// engine sets it; any reset clears it.
    pub predecessor: Option<usize>,
}

impl Cell {
    /// Create an empty cell at `pos`.
    #[inline]
    pub const fn new(pos: Pos) -> Self {
        Self {
            pos,
            state: CellState::Empty,
            predecessor: None,
        }
    }

    /// Position of the cell, fixed at creation.
    #[inline]
    pub const fn pos(&self) -> Pos {
        self.pos
    }

    /// A cell is walkable unless it is a wall.
    #[inline]
    pub const fn is_walkable(&self) -> bool {
        !matches!(self.state, CellState::Wall)
    }

    /// Reset the cell after a run.
    ///
    /// With `preserve_essentials`, start/end/wall roles are kept and only
    /// transient marks are dropped. Without it the cell returns to `Empty`.
    /// The predecessor is always cleared.
    pub fn reset(&mut self, preserve_essentials: bool) {
        self.predecessor = None;
        if preserve_essentials && self.state.is_essential() {
            return;
        }
        self.state = CellState::Empty;
    }
}
