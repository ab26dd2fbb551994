use std::fmt;

use pathviz_core::Pos;

/// Errors that can occur when starting or stepping a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// No start cell is designated.
    MissingStart,
    /// No end cell is designated.
    MissingEnd,
    /// `step` was called after the search already finished.
    Finished,
    /// The predecessor chain from the end cell loops back on itself.
    PredecessorCycle { at: Pos },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => f.write_str("search: no start cell designated"),
            Self::MissingEnd => f.write_str("search: no end cell designated"),
            Self::Finished => f.write_str("search: resumed after it finished"),
            Self::PredecessorCycle { at } => {
                write!(f, "search: predecessor chain revisits {at}")
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Returned when an algorithm name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm '{}' (expected astar, dijkstra, bfs or dfs)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}
