//! Algorithm benchmarking.
//!
//! Runs a battery of registry algorithms against one problem instance,
//! timing each run and validating what it returns, then ranks the
//! algorithms that produced a valid solution by wall-clock time.
//!
//! # Algorithm
//!
//! For every algorithm in [`BenchmarkConfig::algorithms`]:
//!
//! 1. Derive a fresh problem copy for the algorithm's family with
//!    [`StateSpace::prepare_for`](crate::space::StateSpace::prepare_for).
//! 2. Merge the caller's budget over the domain's
//!    [`default_budget`](crate::space::StateSpace::default_budget).
//! 3. Time the call and validate the solution. A missing solution counts
//!    as invalid.
//!
//! Runs are sequential and blocking. A caller that wants a wall-clock
//! limit runs the benchmark on its own thread.

mod runner;
mod types;

pub use runner::BenchmarkRunner;
pub use types::{AlgorithmRun, BenchmarkConfig, BenchmarkReport, PredictionScore};
