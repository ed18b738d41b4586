//! Open knight's tour.
//!
//! A state is the path of visited squares as `(row, col)` pairs, starting
//! at a fixed square. Successors extend the path by one knight move onto
//! an unvisited square and are ordered by Warnsdorff's rule: the candidate
//! with the fewest onward moves comes first. With that ordering depth-first
//! search and backtracking find tours on boards well beyond toy size.
//!
//! # Reference
//!
//! Warnsdorff (1823), *Des Rösselsprunges einfachste und allgemeinste
//! Lösung*.

use rand::Rng;

use crate::error::ProblemError;
use crate::search::{backtracking, Budget, SearchConfig};
use crate::space::{scaled_count, Prefill, StateSpace, Successor, Validation};

/// A board square as `(row, col)`.
pub type Square = (usize, usize);

/// Knight offsets in the order candidates are generated.
const MOVES: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Node budget for the solver behind [`Prefill::with_prefill_level`].
const SEED_SOLVER_NODES: usize = 1_000_000;

/// Knight's tour on an `n x n` board from a fixed start square.
///
/// # Examples
///
/// ```
/// use u_search::problems::KnightsTour;
/// use u_search::search::{backtracking, SearchConfig};
/// use u_search::space::StateSpace;
///
/// let problem = KnightsTour::new(5, (0, 0)).unwrap();
/// let tour = backtracking(&problem, &SearchConfig::default()).solution.unwrap();
/// assert_eq!(tour.len(), 25);
/// assert!(problem.validate_solution(&tour).is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "KnightsTourParams", into = "KnightsTourParams")
)]
pub struct KnightsTour {
    n: usize,
    start: Square,
    prefilled: Option<Vec<Square>>,
}

/// Serializable parameters of [`KnightsTour`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnightsTourParams {
    pub n: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Square,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefilled: Option<Vec<Square>>,
}

impl KnightsTour {
    /// # Errors
    ///
    /// [`ProblemError::InvalidParameter`] for an empty board or a start
    /// square off the board.
    pub fn new(n: usize, start: Square) -> Result<Self, ProblemError> {
        if n == 0 {
            return Err(ProblemError::parameter("n", "board size must be at least 1"));
        }
        if start.0 >= n || start.1 >= n {
            return Err(ProblemError::parameter(
                "start",
                format!("{start:?} is off the {n}x{n} board"),
            ));
        }
        Ok(Self {
            n,
            start,
            prefilled: None,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn start(&self) -> Square {
        self.start
    }

    /// In-bounds knight moves from `square`, in generation order.
    fn jumps(&self, (row, col): Square) -> impl Iterator<Item = Square> + '_ {
        MOVES.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < self.n && c < self.n).then_some((r, c))
        })
    }

    fn board(&self, path: &[Square]) -> Vec<bool> {
        let mut visited = vec![false; self.n * self.n];
        for &(r, c) in path {
            visited[r * self.n + c] = true;
        }
        visited
    }

    /// Unvisited squares one jump from `square`.
    fn onward(&self, square: Square, visited: &[bool]) -> usize {
        self.jumps(square)
            .filter(|&(r, c)| !visited[r * self.n + c])
            .count()
    }

    fn is_jump(a: Square, b: Square) -> bool {
        let dr = a.0.abs_diff(b.0);
        let dc = a.1.abs_diff(b.1);
        (dr == 1 && dc == 2) || (dr == 2 && dc == 1)
    }

    /// Checks a path prefix: starts at the start square, stays on the
    /// board, never repeats a square and moves like a knight.
    fn check_path(&self, path: &[Square]) -> Result<(), String> {
        match path.first() {
            None => return Err("path is empty".to_string()),
            Some(&first) if first != self.start => {
                return Err(format!(
                    "path starts at {first:?}, expected {:?}",
                    self.start
                ))
            }
            Some(_) => {}
        }
        let mut visited = vec![false; self.n * self.n];
        for (index, &(r, c)) in path.iter().enumerate() {
            if r >= self.n || c >= self.n {
                return Err(format!("square {:?} is off the board", (r, c)));
            }
            let cell = &mut visited[r * self.n + c];
            if *cell {
                return Err(format!("square {:?} is visited twice", (r, c)));
            }
            *cell = true;
            if index > 0 && !Self::is_jump(path[index - 1], (r, c)) {
                return Err(format!(
                    "{:?} to {:?} is not a knight move",
                    path[index - 1],
                    (r, c)
                ));
            }
        }
        Ok(())
    }

    /// Finds one tour with backtracking over the Warnsdorff ordering.
    fn solve(&self) -> Option<Vec<Square>> {
        let blank = Self {
            n: self.n,
            start: self.start,
            prefilled: None,
        };
        let config = SearchConfig::default()
            .with_budget(Budget::default().with_max_nodes(SEED_SOLVER_NODES))
            .with_seed(0);
        backtracking(&blank, &config).solution
    }
}

impl StateSpace for KnightsTour {
    type State = Vec<Square>;

    fn initial_state<R: Rng>(&self, _rng: &mut R) -> Vec<Square> {
        self.prefilled.clone().unwrap_or_else(|| vec![self.start])
    }

    fn is_goal(&self, state: &Vec<Square>) -> bool {
        state.len() == self.n * self.n
    }

    fn successors(&self, state: &Vec<Square>) -> Vec<Successor<Vec<Square>>> {
        let Some(&last) = state.last() else {
            return Vec::new();
        };
        let mut visited = self.board(state);
        let mut candidates: Vec<(usize, Square)> = Vec::with_capacity(MOVES.len());
        for square in self.jumps(last) {
            let cell = square.0 * self.n + square.1;
            if visited[cell] {
                continue;
            }
            // The candidate counts as visited once the knight stands on it.
            visited[cell] = true;
            candidates.push((self.onward(square, &visited), square));
            visited[cell] = false;
        }
        candidates.sort_by_key(|&(onward, _)| onward);

        candidates
            .into_iter()
            .map(|(_, square)| {
                let mut next = state.clone();
                next.push(square);
                let cost = self.distance(state, &next);
                (next, cost)
            })
            .collect()
    }

    /// Minus the summed onward-move counts of the squares reachable from
    /// the end of the path.
    fn heuristic(&self, state: &Vec<Square>) -> f64 {
        let Some(&last) = state.last() else {
            return 0.0;
        };
        let visited = self.board(state);
        let total: usize = self
            .jumps(last)
            .filter(|&(r, c)| !visited[r * self.n + c])
            .map(|square| self.onward(square, &visited))
            .sum();
        -(total as f64)
    }

    fn validate_solution(&self, candidate: &Vec<Square>) -> Validation {
        if let Err(reason) = self.check_path(candidate) {
            return Validation::invalid(reason);
        }
        if candidate.len() != self.n * self.n {
            return Validation::invalid(format!(
                "tour covers {} of {} squares",
                candidate.len(),
                self.n * self.n
            ));
        }
        Validation::ok()
    }

    fn default_budget(&self) -> Budget {
        Budget::default()
            .with_max_nodes(5_000_000)
            .with_max_steps(5_000_000)
    }
}

impl Prefill for KnightsTour {
    fn prefilled(&self) -> Option<&Vec<Square>> {
        self.prefilled.as_ref()
    }

    fn with_prefill(mut self, seed: Vec<Square>) -> Result<Self, ProblemError> {
        self.check_path(&seed).map_err(ProblemError::InvalidPrefill)?;
        self.prefilled = Some(seed);
        Ok(self)
    }

    /// Keeps the first `max(1, round(n * n * level))` squares of one tour.
    fn with_prefill_level(self, level: f64) -> Result<Self, ProblemError> {
        let count = scaled_count(self.n * self.n, level)?.max(1);
        let mut tour = self.solve().ok_or_else(|| {
            ProblemError::NoSeed(format!(
                "no tour found on the {0}x{0} board from {1:?}",
                self.n, self.start
            ))
        })?;
        tour.truncate(count);
        self.with_prefill(tour)
    }
}

impl TryFrom<KnightsTourParams> for KnightsTour {
    type Error = ProblemError;

    fn try_from(params: KnightsTourParams) -> Result<Self, Self::Error> {
        let problem = KnightsTour::new(params.n, params.start)?;
        match params.prefilled {
            Some(seed) => problem.with_prefill(seed),
            None => Ok(problem),
        }
    }
}

impl From<KnightsTour> for KnightsTourParams {
    fn from(problem: KnightsTour) -> Self {
        Self {
            n: problem.n,
            start: problem.start,
            prefilled: problem.prefilled,
        }
    }
}
