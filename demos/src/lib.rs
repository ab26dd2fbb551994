//! Terminal front end for the pathviz searches.
//!
//! Builds a grid with random walls, then repaints it with crossterm every
//! time the search signals a change.

use std::fmt;
use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
};
use pathviz_core::{CellState, Grid, GridConfig, GridError, Pos};
use pathviz_search::{Observer, ParseAlgorithmError, RunConfig};

pub const USAGE: &str = "\
usage: pathviz [astar|dijkstra|bfs|dfs] [--delay MS] [--seed N]
               [--rows N] [--cols N] [--density P] [--dfs-forward]";

// Colours
const COL_EMPTY: Color = Color::Rgb { r: 255, g: 255, b: 255 };
const COL_START: Color = Color::Rgb { r: 46, g: 204, b: 113 };
const COL_END: Color = Color::Rgb { r: 231, g: 76, b: 60 };
const COL_WALL: Color = Color::Rgb { r: 52, g: 73, b: 94 };
const COL_VISITED: Color = Color::Rgb { r: 52, g: 152, b: 219 };
const COL_FRONTIER: Color = Color::Rgb { r: 133, g: 193, b: 233 };
const COL_PATH: Color = Color::Rgb { r: 241, g: 196, b: 15 };

fn cell_color(state: CellState) -> Color {
    match state {
        CellState::Empty => COL_EMPTY,
        CellState::Start => COL_START,
        CellState::End => COL_END,
        CellState::Wall => COL_WALL,
        CellState::Visited => COL_VISITED,
        CellState::Frontier => COL_FRONTIER,
        CellState::Path => COL_PATH,
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Errors from command-line parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgsError {
    Algorithm(ParseAlgorithmError),
    MissingValue(String),
    BadValue { flag: String, value: String },
    Unknown(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Algorithm(e) => write!(f, "{e}"),
            Self::MissingValue(flag) => write!(f, "{flag} needs a value"),
            Self::BadValue { flag, value } => write!(f, "bad value for {flag}: {value}"),
            Self::Unknown(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Demo settings gathered from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub grid: GridConfig,
    pub run: RunConfig,
}

fn value<T: std::str::FromStr>(
    flag: &str,
    args: &mut impl Iterator<Item = String>,
) -> Result<T, ArgsError> {
    let raw = args
        .next()
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))?;
    raw.parse().map_err(|_| ArgsError::BadValue {
        flag: flag.to_string(),
        value: raw,
    })
}

impl Options {
    /// Parse command-line words (program name already skipped).
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut opts = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--delay" => opts.run.delay_ms = value(&arg, &mut args)?,
                "--seed" => opts.grid.seed = Some(value(&arg, &mut args)?),
                "--rows" => opts.grid.rows = value(&arg, &mut args)?,
                "--cols" => opts.grid.cols = value(&arg, &mut args)?,
                "--density" => opts.grid.wall_density = value(&arg, &mut args)?,
                "--dfs-forward" => opts.run.dfs_reverse_neighbors = false,
                s if s.starts_with("--") => return Err(ArgsError::Unknown(s.to_string())),
                s => opts.run.algorithm = s.parse().map_err(ArgsError::Algorithm)?,
            }
        }
        Ok(opts)
    }
}

/// Build the demo grid: random walls, start in the top-left corner and end
/// in the bottom-right one.
pub fn prepare_grid(cfg: &GridConfig) -> Result<Grid, GridError> {
    let mut grid = Grid::from_config(cfg)?;
    grid.set_start(Some(Pos::ZERO));
    grid.set_end(Some(Pos::new(grid.rows() - 1, grid.cols() - 1)));
    Ok(grid)
}

// ---------------------------------------------------------------------------
// TerminalPainter
// ---------------------------------------------------------------------------

/// An [`Observer`] that repaints the whole grid on every signal.
///
/// Observers cannot fail, so the first I/O error is kept and reported by
/// [`finish`](TerminalPainter::finish); later frames are skipped.
pub struct TerminalPainter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TerminalPainter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Paint `grid` at the top-left corner of the terminal.
    pub fn paint(&mut self, grid: &Grid) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, 0))?;
        for (i, cell) in grid.iter().enumerate() {
            queue!(self.out, SetBackgroundColor(cell_color(cell.state)), Print("  "))?;
            if (i + 1) % grid.cols() as usize == 0 {
                queue!(self.out, ResetColor, Print("\r\n"))?;
            }
        }
        self.out.flush()
    }

    /// Report the first paint error, if any.
    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<W: Write> Observer for TerminalPainter<W> {
    fn changed(&mut self, grid: &Grid) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.paint(grid) {
            self.error = Some(e);
        }
    }
}
