//! Search budgets and configuration.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::SearchError;

/// Which budget cap an algorithm reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetKind {
    /// States expanded or settled (`max_nodes`).
    Nodes,
    /// Moves of a single trajectory (`max_steps`).
    Steps,
    /// Outer loop iterations (`max_iters`).
    Iterations,
    /// Maximum search depth (`max_depth`).
    Depth,
}

/// Work caps shared by every algorithm.
///
/// Each algorithm reads the caps relevant to it and ignores the rest. A
/// cap left at `None` falls back to that algorithm's own default.
///
/// Exhausting a budget is not an error. The algorithm returns no
/// solution, exactly as it would for an unsolvable instance; the two
/// cases cannot be told apart from the result.
///
/// # Examples
///
/// ```
/// use u_search::search::{Budget, BudgetKind};
///
/// let budget = Budget::default().with_max_nodes(50_000).with_max_depth(12);
/// assert_eq!(budget.limit(BudgetKind::Nodes), Some(50_000));
/// assert_eq!(budget.limit(BudgetKind::Steps), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Budget {
    /// Cap on expanded/settled states.
    pub max_nodes: Option<usize>,
    /// Cap on trajectory moves.
    pub max_steps: Option<usize>,
    /// Cap on outer iterations.
    pub max_iters: Option<usize>,
    /// Cap on depth.
    pub max_depth: Option<usize>,
}

impl Budget {
    /// Sets the same cap for nodes, steps and iterations.
    pub fn uniform(limit: usize) -> Self {
        Self {
            max_nodes: Some(limit),
            max_steps: Some(limit),
            max_iters: Some(limit),
            max_depth: None,
        }
    }

    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = Some(n);
        self
    }

    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = Some(n);
        self
    }

    pub fn with_max_iters(mut self, n: usize) -> Self {
        self.max_iters = Some(n);
        self
    }

    pub fn with_max_depth(mut self, n: usize) -> Self {
        self.max_depth = Some(n);
        self
    }

    /// The cap of the given kind, if set.
    pub fn limit(&self, kind: BudgetKind) -> Option<usize> {
        match kind {
            BudgetKind::Nodes => self.max_nodes,
            BudgetKind::Steps => self.max_steps,
            BudgetKind::Iterations => self.max_iters,
            BudgetKind::Depth => self.max_depth,
        }
    }

    /// Field-wise merge: caps set on `self` win, unset caps come from
    /// `fallback`.
    pub fn or(self, fallback: Budget) -> Budget {
        Budget {
            max_nodes: self.max_nodes.or(fallback.max_nodes),
            max_steps: self.max_steps.or(fallback.max_steps),
            max_iters: self.max_iters.or(fallback.max_iters),
            max_depth: self.max_depth.or(fallback.max_depth),
        }
    }
}

/// Configuration passed to every algorithm.
///
/// # Examples
///
/// ```
/// use u_search::search::{Budget, SearchConfig};
///
/// let config = SearchConfig::default()
///     .with_budget(Budget::default().with_max_steps(20_000))
///     .with_beam_width(5)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Work caps.
    pub budget: Budget,

    /// Beam width `k` for beam search.
    pub beam_width: usize,

    /// Start temperature `T0` of the annealing schedule
    /// `T = T0 / ln(2 + t)`.
    pub initial_temperature: f64,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            budget: Budget::default(),
            beam_width: 3,
            initial_temperature: 1.0,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_beam_width(mut self, k: usize) -> Self {
        self.beam_width = k;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.beam_width == 0 {
            return Err(SearchError::InvalidConfig(
                "beam_width must be at least 1".into(),
            ));
        }
        if self.initial_temperature.is_nan()
            || self.initial_temperature <= 0.0
            || !self.initial_temperature.is_finite()
        {
            return Err(SearchError::InvalidConfig(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        Ok(())
    }

    /// Node cap, or `default` when unset.
    pub(crate) fn max_nodes(&self, default: usize) -> usize {
        self.budget.max_nodes.unwrap_or(default)
    }

    pub(crate) fn max_steps(&self, default: usize) -> usize {
        self.budget.max_steps.unwrap_or(default)
    }

    pub(crate) fn max_iters(&self, default: usize) -> usize {
        self.budget.max_iters.unwrap_or(default)
    }

    pub(crate) fn max_depth(&self, default: usize) -> usize {
        self.budget.max_depth.unwrap_or(default)
    }

    /// Builds the random source for one algorithm run.
    pub(crate) fn rng(&self) -> StdRng {
        create_rng(self.seed.unwrap_or_else(rand::random))
    }
}

/// Creates a seeded random generator.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.beam_width, 3);
        assert!((config.initial_temperature - 1.0).abs() < 1e-12);
        assert_eq!(config.budget, Budget::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_beam_width() {
        let config = SearchConfig::default().with_beam_width(0);
        assert!(matches!(config.validate(), Err(SearchError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_bad_temperature() {
        for t in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SearchConfig::default().with_initial_temperature(t);
            assert!(config.validate().is_err(), "temperature {t} should be rejected");
        }
    }

    #[test]
    fn test_budget_merge_prefers_caller() {
        let caller = Budget::default().with_max_nodes(5);
        let domain = Budget::uniform(100).with_max_depth(9);
        let merged = caller.or(domain);
        assert_eq!(merged.max_nodes, Some(5));
        assert_eq!(merged.max_steps, Some(100));
        assert_eq!(merged.max_iters, Some(100));
        assert_eq!(merged.max_depth, Some(9));
    }

    #[test]
    fn test_fallback_caps() {
        let config = SearchConfig::default().with_budget(Budget::default().with_max_steps(42));
        assert_eq!(config.max_steps(1), 42);
        assert_eq!(config.max_nodes(10_000), 10_000);
        assert_eq!(config.max_iters(7), 7);
        assert_eq!(config.max_depth(20), 20);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = SearchConfig::default().with_seed(99);
        let a: Vec<u32> = (0..8).map(|_| config.rng().random()).collect();
        let mut r1 = config.rng();
        let mut r2 = config.rng();
        let b: Vec<u32> = (0..8).map(|_| r1.random()).collect();
        let c: Vec<u32> = (0..8).map(|_| r2.random()).collect();
        assert_eq!(b, c);
        // a draws the first value of a fresh rng each time
        assert!(a.windows(2).all(|w| w[0] == w[1]));
    }
}
