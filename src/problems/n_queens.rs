//! N-Queens.
//!
//! A state is the sequence of queen rows for the columns filled so far,
//! built left to right. Successors only ever add a queen that attacks
//! none of the placed ones, so every generated state is conflict-free and
//! the goal test is a length check.

use rand::Rng;

use crate::error::ProblemError;
use crate::search::{backtracking, Budget, SearchConfig};
use crate::space::{scaled_count, Prefill, StateSpace, Successor, Validation};

/// Node budget for the solver behind [`Prefill::with_prefill_level`].
const SEED_SOLVER_NODES: usize = 1_000_000;

/// The N-Queens problem on an `n x n` board.
///
/// # Examples
///
/// ```
/// use u_search::problems::NQueens;
/// use u_search::search::{backtracking, SearchConfig};
/// use u_search::space::StateSpace;
///
/// let problem = NQueens::new(8).unwrap();
/// let solution = backtracking(&problem, &SearchConfig::default()).solution.unwrap();
/// assert!(problem.validate_solution(&solution).is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "NQueensParams", into = "NQueensParams")
)]
pub struct NQueens {
    n: usize,
    prefilled: Option<Vec<usize>>,
}

/// Serializable parameters of [`NQueens`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NQueensParams {
    pub n: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefilled: Option<Vec<usize>>,
}

impl NQueens {
    /// Creates an `n x n` instance.
    ///
    /// # Errors
    ///
    /// [`ProblemError::InvalidParameter`] when `n == 0`.
    pub fn new(n: usize) -> Result<Self, ProblemError> {
        if n == 0 {
            return Err(ProblemError::parameter("n", "board size must be at least 1"));
        }
        Ok(Self { n, prefilled: None })
    }

    /// Board size.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Whether a queen at (`row`, `col`) is safe from every queen in
    /// `state`.
    fn is_safe(state: &[usize], row: usize, col: usize) -> bool {
        state
            .iter()
            .enumerate()
            .all(|(c, &r)| r != row && r.abs_diff(row) != c.abs_diff(col))
    }

    /// Validates an explicit list of `(row, col)` queen positions.
    pub fn validate_placements(&self, placements: &[(usize, usize)]) -> Validation {
        if placements.len() != self.n {
            return Validation::invalid(format!(
                "expected {} queens, got {}",
                self.n,
                placements.len()
            ));
        }
        for &(row, col) in placements {
            if row >= self.n || col >= self.n {
                return Validation::invalid(format!("queen at ({row}, {col}) is off the board"));
            }
        }
        for (i, &(r1, c1)) in placements.iter().enumerate() {
            for &(r2, c2) in &placements[i + 1..] {
                if r1 == r2 || c1 == c2 || r1.abs_diff(r2) == c1.abs_diff(c2) {
                    return Validation::invalid(format!(
                        "queens at ({r1}, {c1}) and ({r2}, {c2}) attack each other"
                    ));
                }
            }
        }
        Validation::ok()
    }

    /// Finds one complete placement by backtracking from the empty board.
    fn solve(&self) -> Option<Vec<usize>> {
        let blank = Self {
            n: self.n,
            prefilled: None,
        };
        let config = SearchConfig::default()
            .with_budget(Budget::default().with_max_nodes(SEED_SOLVER_NODES))
            .with_seed(0);
        backtracking(&blank, &config).solution
    }
}

impl StateSpace for NQueens {
    type State = Vec<usize>;

    fn initial_state<R: Rng>(&self, _rng: &mut R) -> Vec<usize> {
        self.prefilled.clone().unwrap_or_default()
    }

    fn is_goal(&self, state: &Vec<usize>) -> bool {
        state.len() == self.n
    }

    fn successors(&self, state: &Vec<usize>) -> Vec<Successor<Vec<usize>>> {
        let col = state.len();
        if col >= self.n {
            return Vec::new();
        }
        (0..self.n)
            .filter(|&row| Self::is_safe(state, row, col))
            .map(|row| {
                let mut next = state.clone();
                next.push(row);
                let cost = self.distance(state, &next);
                (next, cost)
            })
            .collect()
    }

    /// Minus the number of queens placed.
    fn heuristic(&self, state: &Vec<usize>) -> f64 {
        -(state.len() as f64)
    }

    fn validate_solution(&self, candidate: &Vec<usize>) -> Validation {
        let placements: Vec<(usize, usize)> = candidate
            .iter()
            .enumerate()
            .map(|(col, &row)| (row, col))
            .collect();
        self.validate_placements(&placements)
    }
}

impl Prefill for NQueens {
    fn prefilled(&self) -> Option<&Vec<usize>> {
        self.prefilled.as_ref()
    }

    fn with_prefill(mut self, seed: Vec<usize>) -> Result<Self, ProblemError> {
        if seed.len() > self.n {
            return Err(ProblemError::prefill(format!(
                "{} columns given for a {}-column board",
                seed.len(),
                self.n
            )));
        }
        for (col, &row) in seed.iter().enumerate() {
            if row >= self.n {
                return Err(ProblemError::prefill(format!(
                    "row {row} in column {col} is off the board"
                )));
            }
            if !Self::is_safe(&seed[..col], row, col) {
                return Err(ProblemError::prefill(format!(
                    "queen in column {col} is attacked"
                )));
            }
        }
        self.prefilled = Some(seed);
        Ok(self)
    }

    /// Truncates one complete solution to `round(n * level)` columns, so
    /// the seed always extends to a full placement.
    fn with_prefill_level(self, level: f64) -> Result<Self, ProblemError> {
        let count = scaled_count(self.n, level)?;
        let mut solution = self
            .solve()
            .ok_or_else(|| ProblemError::NoSeed(format!("no {0}x{0} placement exists", self.n)))?;
        solution.truncate(count);
        self.with_prefill(solution)
    }
}

impl TryFrom<NQueensParams> for NQueens {
    type Error = ProblemError;

    fn try_from(params: NQueensParams) -> Result<Self, Self::Error> {
        let problem = NQueens::new(params.n)?;
        match params.prefilled {
            Some(seed) => problem.with_prefill(seed),
            None => Ok(problem),
        }
    }
}

impl From<NQueens> for NQueensParams {
    fn from(problem: NQueens) -> Self {
        Self {
            n: problem.n,
            prefilled: problem.prefilled,
        }
    }
}
