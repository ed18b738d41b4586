//! Core traits for searchable problems.

use std::fmt::Debug;

use rand::Rng;

use super::key::Canonicalize;
use crate::error::ProblemError;
use crate::search::{AlgorithmFamily, Budget};

/// A reachable next state paired with its transition cost.
pub type Successor<S> = (S, f64);

/// Outcome of checking a candidate solution.
///
/// Validation never fails with an error: a malformed candidate is simply
/// invalid, with a reason a driver can display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Whether the candidate is a correct solution.
    pub valid: bool,
    /// Why the candidate was rejected. Empty when valid.
    pub reason: String,
}

impl Validation {
    /// A passing validation.
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: String::new(),
        }
    }

    /// A failing validation with the given reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: reason.into(),
        }
    }

    /// Whether the candidate passed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the `(valid, reason)` pair.
    pub fn into_pair(self) -> (bool, String) {
        (self.valid, self.reason)
    }
}

/// Defines a searchable state space.
///
/// The user implements initial state, goal test, and successor
/// generation. The algorithms in [`crate::search`] handle frontier
/// management, duplicate detection, and budgets.
///
/// # Purity
///
/// [`successors`](StateSpace::successors) must return new state values and
/// never mutate its input. Every closed list in every algorithm relies on
/// a state staying equal to the key it was recorded under.
///
/// # Heuristic sign
///
/// Several algorithms treat a *higher* heuristic as closer to the goal
/// (hill-climbing, annealing, beam search) while the priority frontiers of
/// greedy search and A* pop the *lowest* value first. Domains in this
/// crate return negated progress measures (e.g. `-(queens placed)`) so
/// both readings steer toward the goal.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_search::space::{StateSpace, Successor};
///
/// /// Count from zero up to a target.
/// #[derive(Clone)]
/// struct Counter { target: usize }
///
/// impl StateSpace for Counter {
///     type State = Vec<usize>;
///
///     fn initial_state<R: Rng>(&self, _rng: &mut R) -> Vec<usize> { vec![] }
///
///     fn is_goal(&self, state: &Vec<usize>) -> bool { state.len() == self.target }
///
///     fn successors(&self, state: &Vec<usize>) -> Vec<Successor<Vec<usize>>> {
///         let mut next = state.clone();
///         next.push(state.len());
///         vec![(next, 1.0)]
///     }
/// }
///
/// let problem = Counter { target: 3 };
/// assert!(problem.is_goal(&vec![0, 1, 2]));
/// ```
pub trait StateSpace: Clone + Send + Sync {
    /// The state representation.
    type State: Clone + Debug + Send + Canonicalize;

    /// Returns the starting state, honoring any prefill seed.
    ///
    /// Domains that randomize their starting point (local-search modes)
    /// draw from `rng`; the others ignore it.
    fn initial_state<R: Rng>(&self, rng: &mut R) -> Self::State;

    /// Returns true if `state` is a goal state.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Generates `(next_state, cost)` pairs reachable from `state`.
    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State>>;

    /// Heuristic value of a state. Defaults to 0.
    fn heuristic(&self, _state: &Self::State) -> f64 {
        0.0
    }

    /// Cost of the transition from `a` to `b`. Defaults to 1.
    fn distance(&self, _a: &Self::State, _b: &Self::State) -> f64 {
        1.0
    }

    /// Checks whether `candidate` is a correct complete solution.
    fn validate_solution(&self, _candidate: &Self::State) -> Validation {
        Validation::invalid("validate_solution not implemented for this problem")
    }

    /// Whether the domain has a complete-assignment mode suited to local
    /// search.
    fn supports_local_search(&self) -> bool {
        false
    }

    /// Returns a fresh copy of this problem configured for an algorithm
    /// family. The prefill seed is carried over.
    fn prepare_for(&self, _family: AlgorithmFamily) -> Self {
        self.clone()
    }

    /// Budget caps suited to this domain. Unset caps fall back to each
    /// algorithm's own default.
    fn default_budget(&self) -> Budget {
        Budget::default()
            .with_max_nodes(10_000)
            .with_max_steps(5_000)
    }

    /// Whether [`goal_states`](StateSpace::goal_states) and
    /// [`predecessors`](StateSpace::predecessors) are implemented.
    fn supports_reverse_search(&self) -> bool {
        false
    }

    /// Enumerates the goal states, for searches that start from the goal.
    fn goal_states(&self) -> Vec<Self::State> {
        Vec::new()
    }

    /// Generates the states from which `state` is reachable in one move.
    fn predecessors(&self, _state: &Self::State) -> Vec<Successor<Self::State>> {
        Vec::new()
    }
}

/// Seeding a problem with a partial, legal state.
///
/// Both methods consume the problem and return the seeded copy, so a
/// problem is never changed after an algorithm has seen it.
pub trait Prefill: StateSpace + Sized {
    /// The applied seed, if any.
    fn prefilled(&self) -> Option<&Self::State>;

    /// Applies a caller-supplied seed.
    ///
    /// # Errors
    ///
    /// [`ProblemError::InvalidPrefill`] when the seed is out of range, has
    /// the wrong shape, or breaks a domain rule.
    fn with_prefill(self, seed: Self::State) -> Result<Self, ProblemError>;

    /// Generates and applies a seed covering about `level` of a solution.
    ///
    /// # Errors
    ///
    /// [`ProblemError::InvalidLevel`] for a level outside `[0, 1]`,
    /// [`ProblemError::NoSeed`] when no complete solution is available to
    /// derive the seed from.
    fn with_prefill_level(self, level: f64) -> Result<Self, ProblemError>;
}

/// Checks a prefill level and returns `round(total * level)`.
pub(crate) fn scaled_count(total: usize, level: f64) -> Result<usize, ProblemError> {
    if !(0.0..=1.0).contains(&level) {
        return Err(ProblemError::InvalidLevel(level));
    }
    Ok(((total as f64) * level).round() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_pair() {
        assert_eq!(Validation::ok().into_pair(), (true, String::new()));
        let (valid, reason) = Validation::invalid("wrong length").into_pair();
        assert!(!valid);
        assert_eq!(reason, "wrong length");
    }

    #[test]
    fn test_scaled_count() {
        assert_eq!(scaled_count(8, 0.0).unwrap(), 0);
        assert_eq!(scaled_count(8, 0.5).unwrap(), 4);
        assert_eq!(scaled_count(8, 1.0).unwrap(), 8);
        assert_eq!(scaled_count(5, 0.5).unwrap(), 3);
        assert!(matches!(scaled_count(8, 1.1), Err(ProblemError::InvalidLevel(_))));
        assert!(matches!(scaled_count(8, -0.1), Err(ProblemError::InvalidLevel(_))));
        assert!(scaled_count(8, f64::NAN).is_err());
    }
}
