//! The stepwise search engine shared by all four algorithms.

use std::fmt;
use std::str::FromStr;

use pathviz_core::{CellState, Grid};

use crate::astar::AStar;
use crate::bfs::Bfs;
use crate::dfs::Dfs;
use crate::dijkstra::Dijkstra;
use crate::error::{ParseAlgorithmError, SearchError};
use crate::reconstruct::reconstruct;
use crate::traits::Observer;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The available search strategies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    #[default]
    AStar,
    Dijkstra,
    Bfs,
    Dfs,
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Algorithm; 4] = [Self::AStar, Self::Dijkstra, Self::Bfs, Self::Dfs];

    /// Human-readable label.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AStar => "A* Search",
            Self::Dijkstra => "Dijkstra",
            Self::Bfs => "Breadth-First Search (BFS)",
            Self::Dfs => "Depth-First Search (DFS)",
        }
    }

    /// Whether the algorithm always finds a shortest route.
    pub const fn is_optimal(self) -> bool {
        !matches!(self, Self::Dfs)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            "dijkstra" => Ok(Self::Dijkstra),
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Step results
// ---------------------------------------------------------------------------

/// Terminal result of a search run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Found,
    NotFound,
}

/// What a single [`Search::step`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// One cell was expanded and more work remains.
    Continue,
    /// The run is over.
    Done(Outcome),
}

/// Engine options that do not change correctness.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// DFS pushes neighbours in reverse so they are explored in forward
    /// order. Only changes which of several routes DFS finds.
    pub dfs_reverse_neighbors: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            dfs_reverse_neighbors: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared expansion rules
// ---------------------------------------------------------------------------

pub(crate) enum Expansion {
    Expanded,
    Goal,
    Exhausted,
}

/// Mark a cell newly admitted to the frontier. Start and end keep their
/// role marker.
pub(crate) fn admit(grid: &mut Grid, idx: usize) {
    let cell = grid.cell_mut(idx);
    if !matches!(cell.state, CellState::Start | CellState::End) {
        cell.state = CellState::Frontier;
    }
}

/// Mark a just-expanded cell as visited, unless it is the start.
pub(crate) fn settle(grid: &mut Grid, idx: usize) {
    let cell = grid.cell_mut(idx);
    if cell.state != CellState::Start {
        cell.state = CellState::Visited;
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

enum State {
    AStar(AStar),
    Dijkstra(Dijkstra),
    Bfs(Bfs),
    Dfs(Dfs),
}

/// A resumable search run over a borrowed grid.
///
/// Each [`step`](Search::step) expands exactly one cell, so a driver can
/// render between steps. The run holds the grid mutably until it is
/// dropped; dropping it mid-run simply abandons the search.
pub struct Search<'g> {
    grid: &'g mut Grid,
    state: State,
    algorithm: Algorithm,
    end: usize,
    rounds: usize,
    outcome: Option<Outcome>,
    /// Set when route reconstruction failed; the run cannot continue.
    failed: Option<SearchError>,
    nbuf: Vec<usize>,
}

impl<'g> Search<'g> {
    /// Prepare a run. Marks and predecessors left by an earlier run are
    /// cleared first.
    ///
    /// Fails if the grid has no start or no end cell.
    pub fn new(
        algorithm: Algorithm,
        grid: &'g mut Grid,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        let Some(start) = grid.start_idx() else {
            log::warn!("{algorithm}: refusing to run without a start cell");
            return Err(SearchError::MissingStart);
        };
        let Some(end) = grid.end_idx() else {
            log::warn!("{algorithm}: refusing to run without an end cell");
            return Err(SearchError::MissingEnd);
        };
        grid.clear_path();
        log::debug!(
            "{algorithm}: searching {}x{} grid from {} to {}",
            grid.rows(),
            grid.cols(),
            grid.pos(start),
            grid.pos(end)
        );

        let state = match algorithm {
            Algorithm::AStar => State::AStar(AStar::new(grid, start, end)),
            Algorithm::Dijkstra => State::Dijkstra(Dijkstra::new(grid, start, end)),
            Algorithm::Bfs => State::Bfs(Bfs::new(grid, start, end)),
            Algorithm::Dfs => State::Dfs(Dfs::new(grid, start, end, config.dfs_reverse_neighbors)),
        };
        Ok(Self {
            grid,
            state,
            algorithm,
            end,
            rounds: 0,
            outcome: None,
            failed: None,
            nbuf: Vec::with_capacity(4),
        })
    }

    /// Run one expansion round: pop one cell and process its neighbours.
    ///
    /// `observer` is signalled after the round and once per cell marked
    /// while revealing the route. Calling this again after
    /// [`Step::Done`] is a caller bug: it panics in debug builds and
    /// returns [`SearchError::Finished`] otherwise.
    ///
    /// If revealing the route fails, the error is returned again on every
    /// later call.
    pub fn step(&mut self, observer: &mut impl Observer) -> Result<Step, SearchError> {
        if let Some(err) = self.failed {
            return Err(err);
        }
        if let Some(outcome) = self.outcome {
            if cfg!(debug_assertions) {
                panic!("{}: search resumed after it finished ({outcome:?})", self.algorithm);
            }
            return Err(SearchError::Finished);
        }

        let grid = &mut *self.grid;
        let nbuf = &mut self.nbuf;
        let expansion = match &mut self.state {
            State::AStar(s) => s.expand(grid, nbuf),
            State::Dijkstra(s) => s.expand(grid, nbuf),
            State::Bfs(s) => s.expand(grid, nbuf),
            State::Dfs(s) => s.expand(grid, nbuf),
        };

        match expansion {
            Expansion::Expanded => {
                self.rounds += 1;
                log::trace!("{}: round {}", self.algorithm, self.rounds);
                observer.changed(self.grid);
                Ok(Step::Continue)
            }
            Expansion::Goal => {
                self.rounds += 1;
                let marked = match reconstruct(self.grid, self.end, observer) {
                    Ok(marked) => marked,
                    Err(err) => {
                        log::warn!("{}: {err}", self.algorithm);
                        self.failed = Some(err);
                        return Err(err);
                    }
                };
                log::debug!(
                    "{}: found route of {} steps after {} rounds",
                    self.algorithm,
                    marked + 1,
                    self.rounds
                );
                self.outcome = Some(Outcome::Found);
                Ok(Step::Done(Outcome::Found))
            }
            Expansion::Exhausted => {
                log::debug!(
                    "{}: frontier exhausted after {} rounds",
                    self.algorithm,
                    self.rounds
                );
                self.outcome = Some(Outcome::NotFound);
                Ok(Step::Done(Outcome::NotFound))
            }
        }
    }

    /// Step until the run finishes.
    pub fn finish(&mut self, observer: &mut impl Observer) -> Result<Outcome, SearchError> {
        if let Some(outcome) = self.outcome {
            return Ok(outcome);
        }
        loop {
            if let Step::Done(outcome) = self.step(observer)? {
                return Ok(outcome);
            }
        }
    }

    /// The grid being searched, for rendering between steps.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Which algorithm this run uses.
    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Number of expansion rounds performed so far.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// The terminal result, once the run is over.
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the run is over, with an outcome or a reconstruction error.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some() || self.failed.is_some()
    }
}
