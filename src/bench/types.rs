//! Benchmark configuration and report types.

use std::time::Duration;

use crate::error::SearchError;
use crate::search::{Algorithm, SearchConfig};
use crate::space::Validation;

/// Which algorithms to run and with what search settings.
///
/// # Examples
///
/// ```
/// use u_search::bench::BenchmarkConfig;
/// use u_search::search::{Algorithm, Budget, SearchConfig};
///
/// let config = BenchmarkConfig::default()
///     .with_algorithms([Algorithm::Bfs, Algorithm::AStar])
///     .with_search(SearchConfig::default().with_budget(Budget::uniform(5_000)));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    /// Settings shared by every run. Budget caps left unset fall back to
    /// the problem's defaults.
    pub search: SearchConfig,

    /// Algorithms to run, in order.
    pub algorithms: Vec<Algorithm>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            algorithms: Algorithm::ALL.to_vec(),
        }
    }
}

impl BenchmarkConfig {
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_algorithms(mut self, algorithms: impl IntoIterator<Item = Algorithm>) -> Self {
        self.algorithms = algorithms.into_iter().collect();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.algorithms.is_empty() {
            return Err(SearchError::InvalidConfig(
                "at least one algorithm is required".into(),
            ));
        }
        self.search.validate()
    }
}

/// One timed algorithm run.
#[derive(Debug, Clone)]
pub struct AlgorithmRun<S: Clone> {
    pub algorithm: Algorithm,

    /// Wall-clock time of the search call alone.
    pub elapsed: Duration,

    pub solution: Option<S>,
    pub depth: Option<usize>,
    pub expanded: usize,

    /// Verdict of the problem's validator on `solution`.
    pub validation: Validation,
}

impl<S: Clone> AlgorithmRun<S> {
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }
}

/// How a "fastest algorithm" prediction fared against a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionScore {
    pub predicted: Algorithm,

    /// The fastest algorithm with a valid solution, if any.
    pub fastest: Option<Algorithm>,

    /// Whether the prediction names the fastest algorithm.
    pub correct: bool,

    /// 1-based position of the prediction in the ranking; `None` when its
    /// run was invalid or absent.
    pub rank: Option<usize>,
}

/// All runs of one benchmark, in execution order.
#[derive(Debug, Clone)]
pub struct BenchmarkReport<S: Clone> {
    runs: Vec<AlgorithmRun<S>>,
}

impl<S: Clone> BenchmarkReport<S> {
    pub(crate) fn new(runs: Vec<AlgorithmRun<S>>) -> Self {
        Self { runs }
    }

    pub fn runs(&self) -> &[AlgorithmRun<S>] {
        &self.runs
    }

    /// The run of `algorithm`, if it was part of the benchmark.
    pub fn get(&self, algorithm: Algorithm) -> Option<&AlgorithmRun<S>> {
        self.runs.iter().find(|run| run.algorithm == algorithm)
    }

    /// Valid runs, fastest first. Equal times keep execution order.
    pub fn ranking(&self) -> Vec<&AlgorithmRun<S>> {
        let mut valid: Vec<&AlgorithmRun<S>> = self.runs.iter().filter(|run| run.is_valid()).collect();
        valid.sort_by_key(|run| run.elapsed);
        valid
    }

    /// The fastest valid run.
    pub fn fastest(&self) -> Option<&AlgorithmRun<S>> {
        self.ranking().into_iter().next()
    }

    /// Scores a prediction of the fastest algorithm.
    pub fn score_prediction(&self, predicted: Algorithm) -> PredictionScore {
        let ranking = self.ranking();
        let fastest = ranking.first().map(|run| run.algorithm);
        let rank = ranking
            .iter()
            .position(|run| run.algorithm == predicted)
            .map(|index| index + 1);
        PredictionScore {
            predicted,
            fastest,
            correct: fastest == Some(predicted),
            rank,
        }
    }
}
