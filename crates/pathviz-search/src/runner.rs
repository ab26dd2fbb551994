//! A paced driver loop around [`Search`].

use std::thread;
use std::time::Duration;

use pathviz_core::Grid;

use crate::error::SearchError;
use crate::search::{Algorithm, Outcome, Search, SearchConfig, Step};
use crate::traits::Observer;

/// Upper bound for the delay between steps, in milliseconds.
pub const MAX_DELAY_MS: u64 = 100;
/// Default delay between steps, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 5;

/// Settings for [`run`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    pub algorithm: Algorithm,
    /// Pause after each step, clamped to `0..=MAX_DELAY_MS`.
    pub delay_ms: u64,
    pub dfs_reverse_neighbors: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AStar,
            delay_ms: DEFAULT_DELAY_MS,
            dfs_reverse_neighbors: true,
        }
    }
}

impl RunConfig {
    /// Config for `algorithm` with no pacing.
    pub fn instant(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            delay_ms: 0,
            ..Self::default()
        }
    }

    /// The clamped pause between steps.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms.min(MAX_DELAY_MS))
    }

    /// Engine options derived from this config.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            dfs_reverse_neighbors: self.dfs_reverse_neighbors,
        }
    }
}

/// Summary of a finished run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub outcome: Outcome,
    /// Expansion rounds performed.
    pub rounds: usize,
    /// Edges on the found route; 0 when nothing was found.
    pub path_len: usize,
}

/// Run a search to completion, signalling `observer` after every change
/// and sleeping the configured delay between steps.
pub fn run(
    grid: &mut Grid,
    cfg: &RunConfig,
    observer: &mut impl Observer,
) -> Result<RunReport, SearchError> {
    let delay = cfg.delay();
    let mut search = Search::new(cfg.algorithm, grid, &cfg.search_config())?;
    observer.changed(search.grid());

    let outcome = loop {
        match search.step(observer)? {
            Step::Continue => {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
            }
            Step::Done(outcome) => break outcome,
        }
    };
    let rounds = search.rounds();

    let path_len = match outcome {
        Outcome::Found => grid.path_len(),
        Outcome::NotFound => 0,
    };
    match outcome {
        Outcome::Found => log::info!("{}: path found ({path_len} steps, {rounds} rounds)", cfg.algorithm),
        Outcome::NotFound => log::info!("{}: no path found ({rounds} rounds)", cfg.algorithm),
    }
    Ok(RunReport {
        algorithm: cfg.algorithm,
        outcome,
        rounds,
        path_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoObserver;
    use pathviz_core::{CellState, Pos};

    #[test]
    fn delay_is_clamped() {
        let cfg = RunConfig {
            delay_ms: 5000,
            ..RunConfig::default()
        };
        assert_eq!(cfg.delay(), Duration::from_millis(MAX_DELAY_MS));
        assert_eq!(RunConfig::instant(Algorithm::Bfs).delay(), Duration::ZERO);
    }

    #[test]
    fn run_reports_the_route() {
        let mut grid = Grid::parse("S_#\n__#\n#_E").unwrap();
        let report = run(&mut grid, &RunConfig::instant(Algorithm::Bfs), &mut NoObserver).unwrap();
        assert_eq!(report.outcome, Outcome::Found);
        assert_eq!(report.path_len, 4);
        assert!(report.rounds <= grid.len());
        assert_eq!(grid.at(Pos::new(2, 1)).unwrap().state, CellState::Path);
    }

    #[test]
    fn run_rejects_missing_end() {
        let mut grid = Grid::new(2, 2);
        grid.set_start(Some(Pos::ZERO));
        let err = run(&mut grid, &RunConfig::instant(Algorithm::AStar), &mut NoObserver);
        assert_eq!(err, Err(SearchError::MissingEnd));
    }

    #[test]
    fn observer_sees_initial_state() {
        let mut grid = Grid::parse("S#E").unwrap();
        let mut frames = Vec::new();
        let report = run(
            &mut grid,
            &RunConfig::instant(Algorithm::Dfs),
            &mut |g: &Grid| frames.push(g.render_ascii()),
        )
        .unwrap();
        assert_eq!(report.outcome, Outcome::NotFound);
        assert_eq!(report.path_len, 0);
        assert_eq!(frames, vec!["S#E".to_string(), "S#E".to_string()]);
    }
}
