//! Benchmark execution loop.

use std::time::Instant;

use log::{info, warn};

use super::types::{AlgorithmRun, BenchmarkConfig, BenchmarkReport};
use crate::error::SearchError;
use crate::space::{StateSpace, Validation};

/// Executes a benchmark.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Runs every configured algorithm on `problem`.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidConfig`] when `config` fails validation. No
    /// algorithm runs in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_search::bench::{BenchmarkConfig, BenchmarkRunner};
    /// use u_search::problems::NQueens;
    /// use u_search::search::Algorithm;
    ///
    /// let problem = NQueens::new(6).unwrap();
    /// let config = BenchmarkConfig::default()
    ///     .with_algorithms([Algorithm::Dfs, Algorithm::Backtracking, Algorithm::AStar]);
    /// let report = BenchmarkRunner::run(&problem, &config).unwrap();
    /// assert_eq!(report.ranking().len(), 3);
    /// ```
    pub fn run<P: StateSpace>(
        problem: &P,
        config: &BenchmarkConfig,
    ) -> Result<BenchmarkReport<P::State>, SearchError> {
        config.validate()?;

        let budget = config.search.budget.or(problem.default_budget());
        let search = config.search.clone().with_budget(budget);

        let mut runs = Vec::with_capacity(config.algorithms.len());
        for &algorithm in &config.algorithms {
            let instance = problem.prepare_for(algorithm.family());

            let started = Instant::now();
            let result = algorithm.run(&instance, &search)?;
            let elapsed = started.elapsed();

            let validation = match &result.solution {
                Some(solution) => instance.validate_solution(solution),
                None => Validation::invalid("no solution found within budget"),
            };

            if validation.is_valid() {
                info!(
                    "{algorithm}: valid solution at depth {:?} in {elapsed:?} ({} expanded)",
                    result.depth, result.expanded
                );
            } else if result.solution.is_some() {
                warn!("{algorithm}: invalid solution: {}", validation.reason);
            } else {
                info!("{algorithm}: no solution in {elapsed:?} ({} expanded)", result.expanded);
            }

            runs.push(AlgorithmRun {
                algorithm,
                elapsed,
                solution: result.solution,
                depth: result.depth,
                expanded: result.expanded,
                validation,
            });
        }

        Ok(BenchmarkReport::new(runs))
    }
}
