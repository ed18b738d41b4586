//! Search results and the algorithm registry.

use std::fmt;
use std::str::FromStr;

use super::config::{BudgetKind, SearchConfig};
use super::{bidirectional, informed, uninformed};
use crate::error::SearchError;
use crate::space::StateSpace;

/// Result of one algorithm run.
///
/// A missing `solution` means the algorithm gave up: either the space was
/// exhausted or the budget ran out. The two are deliberately not told
/// apart and callers must treat them the same way.
#[derive(Debug, Clone)]
pub struct SearchResult<S: Clone> {
    /// The goal state found, if any.
    pub solution: Option<S>,

    /// Transitions from the initial state to `solution` along the path
    /// the algorithm followed.
    pub depth: Option<usize>,

    /// States charged against the budget (expanded, settled or visited,
    /// depending on the algorithm).
    pub expanded: usize,
}

impl<S: Clone> SearchResult<S> {
    pub(crate) fn found(solution: S, depth: usize, expanded: usize) -> Self {
        Self {
            solution: Some(solution),
            depth: Some(depth),
            expanded,
        }
    }

    pub(crate) fn not_found(expanded: usize) -> Self {
        Self {
            solution: None,
            depth: None,
            expanded,
        }
    }

    /// Whether a solution was found.
    pub fn is_found(&self) -> bool {
        self.solution.is_some()
    }

    /// Consumes the result and returns the solution.
    pub fn into_solution(self) -> Option<S> {
        self.solution
    }
}

/// Broad class of an algorithm, used by domains with mode-sensitive
/// state shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    /// Tree/graph search over partial states.
    Systematic,
    /// Trajectory or beam search over complete states.
    LocalSearch,
}

/// The algorithm registry.
///
/// # Examples
///
/// ```
/// use u_search::problems::NQueens;
/// use u_search::search::{Algorithm, SearchConfig};
///
/// let problem = NQueens::new(6).unwrap();
/// let algorithm: Algorithm = "bkt".parse().unwrap();
/// let result = algorithm.run(&problem, &SearchConfig::default()).unwrap();
/// assert!(result.is_found());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    UniformCost,
    Iddfs,
    Backtracking,
    Bidirectional,
    Greedy,
    HillClimbing,
    SimulatedAnnealing,
    BeamSearch,
    AStar,
}

impl Algorithm {
    /// Every registered algorithm, in benchmark order.
    pub const ALL: [Algorithm; 11] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::UniformCost,
        Algorithm::Iddfs,
        Algorithm::Backtracking,
        Algorithm::Bidirectional,
        Algorithm::Greedy,
        Algorithm::HillClimbing,
        Algorithm::SimulatedAnnealing,
        Algorithm::BeamSearch,
        Algorithm::AStar,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::UniformCost => "Uniform Cost",
            Algorithm::Iddfs => "IDDFS",
            Algorithm::Backtracking => "BKT",
            Algorithm::Bidirectional => "Bidirectional",
            Algorithm::Greedy => "Greedy",
            Algorithm::HillClimbing => "Hill Climbing",
            Algorithm::SimulatedAnnealing => "Simulated Annealing",
            Algorithm::BeamSearch => "Beam Search",
            Algorithm::AStar => "A*",
        }
    }

    pub fn family(self) -> AlgorithmFamily {
        match self {
            Algorithm::HillClimbing | Algorithm::SimulatedAnnealing | Algorithm::BeamSearch => {
                AlgorithmFamily::LocalSearch
            }
            _ => AlgorithmFamily::Systematic,
        }
    }

    /// The budget cap this algorithm reads.
    pub fn budget_kind(self) -> BudgetKind {
        match self {
            Algorithm::Iddfs => BudgetKind::Depth,
            Algorithm::HillClimbing | Algorithm::SimulatedAnnealing => BudgetKind::Steps,
            Algorithm::BeamSearch => BudgetKind::Iterations,
            _ => BudgetKind::Nodes,
        }
    }

    /// Validates `config` and runs the algorithm on `problem`.
    pub fn run<P: StateSpace>(
        self,
        problem: &P,
        config: &SearchConfig,
    ) -> Result<SearchResult<P::State>, SearchError> {
        config.validate()?;
        let result = match self {
            Algorithm::Bfs => uninformed::bfs(problem, config),
            Algorithm::Dfs => uninformed::dfs(problem, config),
            Algorithm::UniformCost => uninformed::uniform_cost(problem, config),
            Algorithm::Iddfs => uninformed::iddfs(problem, config),
            Algorithm::Backtracking => uninformed::backtracking(problem, config),
            Algorithm::Bidirectional => bidirectional::bidirectional(problem, config),
            Algorithm::Greedy => informed::greedy(problem, config),
            Algorithm::HillClimbing => informed::hill_climbing(problem, config),
            Algorithm::SimulatedAnnealing => informed::simulated_annealing(problem, config),
            Algorithm::BeamSearch => informed::beam_search(problem, config),
            Algorithm::AStar => informed::a_star(problem, config),
        };
        Ok(result)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    /// Parses a display name or a common alias, ignoring case, spaces,
    /// dashes and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        let algorithm = match normalized.as_str() {
            "bfs" | "breadthfirst" => Algorithm::Bfs,
            "dfs" | "depthfirst" => Algorithm::Dfs,
            "uniformcost" | "ucs" => Algorithm::UniformCost,
            "iddfs" | "iterativedeepening" => Algorithm::Iddfs,
            "bkt" | "backtracking" => Algorithm::Backtracking,
            "bidirectional" => Algorithm::Bidirectional,
            "greedy" | "greedybestfirst" => Algorithm::Greedy,
            "hillclimbing" => Algorithm::HillClimbing,
            "simulatedannealing" | "sa" => Algorithm::SimulatedAnnealing,
            "beamsearch" | "beam" => Algorithm::BeamSearch,
            "a*" | "astar" => Algorithm::AStar,
            _ => return Err(SearchError::UnknownAlgorithm(s.to_string())),
        };
        Ok(algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for algorithm in Algorithm::ALL {
            let parsed: Algorithm = algorithm.name().parse().unwrap();
            assert_eq!(parsed, algorithm, "{algorithm} did not round-trip");
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("a_star".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("Hill-Climbing".parse::<Algorithm>().unwrap(), Algorithm::HillClimbing);
        assert_eq!("UCS".parse::<Algorithm>().unwrap(), Algorithm::UniformCost);
        assert!(matches!(
            "dijkstra".parse::<Algorithm>(),
            Err(SearchError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_families_and_budget_kinds() {
        let local: Vec<Algorithm> = Algorithm::ALL
            .into_iter()
            .filter(|a| a.family() == AlgorithmFamily::LocalSearch)
            .collect();
        assert_eq!(
            local,
            vec![
                Algorithm::HillClimbing,
                Algorithm::SimulatedAnnealing,
                Algorithm::BeamSearch
            ]
        );
        assert_eq!(Algorithm::Iddfs.budget_kind(), BudgetKind::Depth);
        assert_eq!(Algorithm::BeamSearch.budget_kind(), BudgetKind::Iterations);
        assert_eq!(Algorithm::SimulatedAnnealing.budget_kind(), BudgetKind::Steps);
        assert_eq!(Algorithm::AStar.budget_kind(), BudgetKind::Nodes);
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let problem = crate::problems::NQueens::new(4).unwrap();
        let config = SearchConfig::default().with_beam_width(0);
        assert!(Algorithm::Bfs.run(&problem, &config).is_err());
    }
}
