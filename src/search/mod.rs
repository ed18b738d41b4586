//! Search algorithms over [`StateSpace`](crate::space::StateSpace).
//!
//! Eleven algorithms share one configuration value ([`SearchConfig`] with
//! its [`Budget`]) and one result type ([`SearchResult`]). They can be
//! called directly or through the [`Algorithm`] registry, which validates
//! the configuration first.
//!
//! | Algorithm | Budget read | Family |
//! |-----------|-------------|--------|
//! | [`bfs`], [`dfs`], [`uniform_cost`], [`backtracking`], [`bidirectional`] | `max_nodes` | systematic |
//! | [`iddfs`] | `max_depth` (and `max_nodes` if set) | systematic |
//! | [`greedy`], [`a_star`] | `max_nodes` | systematic |
//! | [`hill_climbing`], [`simulated_annealing`] | `max_steps` | local search |
//! | [`beam_search`] | `max_iters` | local search |
//!
//! Every algorithm is single-threaded and runs to completion or budget
//! exhaustion. Wall-clock limits belong to the caller, who can run the
//! call on a worker thread.

mod bidirectional;
mod config;
mod frontier;
mod informed;
mod types;
mod uninformed;

pub use bidirectional::bidirectional;
pub use config::{create_rng, Budget, BudgetKind, SearchConfig};
pub use informed::{a_star, beam_search, greedy, hill_climbing, simulated_annealing};
pub use types::{Algorithm, AlgorithmFamily, SearchResult};
pub use uninformed::{backtracking, bfs, dfs, iddfs, uniform_cost};
