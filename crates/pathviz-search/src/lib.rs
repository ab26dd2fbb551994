//! Stepwise pathfinding searches over a [`pathviz_core::Grid`].
//!
//! Four interchangeable strategies share one resumable contract:
//!
//! - **A\*** with a Manhattan heuristic ([`Algorithm::AStar`])
//! - **Dijkstra** uniform-cost search ([`Algorithm::Dijkstra`])
//! - **BFS** breadth-first search ([`Algorithm::Bfs`])
//! - **DFS** depth-first search ([`Algorithm::Dfs`])
//!
//! A [`Search`] performs one expansion round per [`Search::step`] and
//! writes frontier, visited and path marks into the grid as it goes, so a
//! driver can render between steps. [`run`] is a ready-made paced loop.
//!
//! | Algorithm | Frontier | Shortest route |
//! |---|---|---|
//! | A\* | min-heap on `g + h`, then insertion order | yes |
//! | Dijkstra | min-heap on `g`, then insertion order | yes |
//! | BFS | FIFO queue | yes |
//! | DFS | LIFO stack | no |

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod error;
mod frontier;
mod reconstruct;
mod runner;
mod search;
mod traits;

pub use error::{ParseAlgorithmError, SearchError};
pub use frontier::UNREACHABLE;
pub use reconstruct::reconstruct;
pub use runner::{DEFAULT_DELAY_MS, MAX_DELAY_MS, RunConfig, RunReport, run};
pub use search::{Algorithm, Outcome, Search, SearchConfig, Step};
pub use traits::{NoObserver, Observer};
