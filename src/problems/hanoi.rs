//! Tower of Hanoi on any number of pegs.
//!
//! A state records the peg of every disk: entry `d - 1` is the peg of disk
//! `d`, disk 1 being the smallest. Pegs are numbered from 1 and every disk
//! starts on peg 1. Every disk-to-peg assignment reads as exactly one
//! legal stacking (each peg holds its disks largest first), so an illegal
//! stack cannot be written down. Solution checks therefore cover length,
//! peg range and the target only.
//!
//! Moves are invertible, so the domain also drives
//! [`bidirectional`](crate::search::bidirectional) search.

use rand::Rng;

use crate::error::ProblemError;
use crate::space::{scaled_count, Prefill, StateSpace, Successor, Validation};

/// Tower of Hanoi with `num_towers` pegs and `num_disks` disks.
///
/// States map disks to pegs, so every state is a legal stacking; a
/// validator only has to check length, peg range and the target.
///
/// # Examples
///
/// ```
/// use u_search::problems::Hanoi;
/// use u_search::search::{bfs, SearchConfig};
///
/// let problem = Hanoi::new(3, 3, 3).unwrap();
/// let result = bfs(&problem, &SearchConfig::default());
/// assert_eq!(result.solution, Some(vec![3, 3, 3]));
/// assert_eq!(result.depth, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "HanoiParams", into = "HanoiParams")
)]
pub struct Hanoi {
    num_towers: usize,
    num_disks: usize,
    target_tower: usize,
    prefilled: Option<Vec<usize>>,
}

/// Serializable parameters of [`Hanoi`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HanoiParams {
    pub num_towers: usize,
    pub num_disks: usize,
    pub target_tower: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefilled: Option<Vec<usize>>,
}

impl Hanoi {
    /// Creates an instance moving every disk from peg 1 to `target_tower`.
    ///
    /// # Errors
    ///
    /// [`ProblemError::InvalidParameter`] when there are fewer than three
    /// pegs, no disks, or the target is not a peg.
    pub fn new(num_towers: usize, num_disks: usize, target_tower: usize) -> Result<Self, ProblemError> {
        if num_towers < 3 {
            return Err(ProblemError::parameter(
                "num_towers",
                format!("need at least 3, got {num_towers}"),
            ));
        }
        if num_disks == 0 {
            return Err(ProblemError::parameter("num_disks", "need at least 1 disk"));
        }
        if target_tower == 0 || target_tower > num_towers {
            return Err(ProblemError::parameter(
                "target_tower",
                format!("must be within 1..={num_towers}, got {target_tower}"),
            ));
        }
        Ok(Self {
            num_towers,
            num_disks,
            target_tower,
            prefilled: None,
        })
    }

    pub fn num_towers(&self) -> usize {
        self.num_towers
    }

    pub fn num_disks(&self) -> usize {
        self.num_disks
    }

    pub fn target_tower(&self) -> usize {
        self.target_tower
    }

    /// The disks on each peg, bottom to top. Index `p - 1` holds peg `p`.
    ///
    /// Entries naming a peg outside `1..=num_towers` are ignored.
    pub fn pegs(&self, state: &[usize]) -> Vec<Vec<usize>> {
        let mut pegs = vec![Vec::new(); self.num_towers];
        for (index, &peg) in state.iter().enumerate().rev() {
            if (1..=self.num_towers).contains(&peg) {
                pegs[peg - 1].push(index + 1);
            }
        }
        pegs
    }

    /// Smallest disk on each peg, if any.
    fn tops(&self, state: &[usize]) -> Vec<Option<usize>> {
        let mut tops = vec![None; self.num_towers];
        for (index, &peg) in state.iter().enumerate() {
            let top = &mut tops[peg - 1];
            if top.is_none() {
                *top = Some(index + 1);
            }
        }
        tops
    }

    fn disks_off_target(&self, state: &[usize]) -> usize {
        state.iter().filter(|&&peg| peg != self.target_tower).count()
    }

    fn check_pegs(&self, state: &[usize]) -> Result<(), String> {
        for (index, &peg) in state.iter().enumerate() {
            if peg == 0 || peg > self.num_towers {
                return Err(format!(
                    "disk {} is on peg {peg}, outside 1..={}",
                    index + 1,
                    self.num_towers
                ));
            }
        }
        Ok(())
    }
}

impl StateSpace for Hanoi {
    type State = Vec<usize>;

    fn initial_state<R: Rng>(&self, _rng: &mut R) -> Vec<usize> {
        self.prefilled
            .clone()
            .unwrap_or_else(|| vec![1; self.num_disks])
    }

    fn is_goal(&self, state: &Vec<usize>) -> bool {
        state.iter().all(|&peg| peg == self.target_tower)
    }

    fn successors(&self, state: &Vec<usize>) -> Vec<Successor<Vec<usize>>> {
        let tops = self.tops(state);
        let mut next = Vec::new();
        for (from, top) in tops.iter().enumerate() {
            let Some(disk) = *top else { continue };
            for (to, other) in tops.iter().enumerate() {
                if to == from || other.is_some_and(|o| o < disk) {
                    continue;
                }
                let mut moved = state.clone();
                moved[disk - 1] = to + 1;
                let cost = self.distance(state, &moved);
                next.push((moved, cost));
            }
        }
        next
    }

    /// Minus the number of disks not yet on the target peg.
    fn heuristic(&self, state: &Vec<usize>) -> f64 {
        -(self.disks_off_target(state) as f64)
    }

    fn validate_solution(&self, candidate: &Vec<usize>) -> Validation {
        if candidate.len() != self.num_disks {
            return Validation::invalid(format!(
                "expected {} disks, got {}",
                self.num_disks,
                candidate.len()
            ));
        }
        if let Err(reason) = self.check_pegs(candidate) {
            return Validation::invalid(reason);
        }
        let off = self.disks_off_target(candidate);
        if off > 0 {
            return Validation::invalid(format!(
                "{off} disk(s) not on target peg {}",
                self.target_tower
            ));
        }
        Validation::ok()
    }

    fn supports_reverse_search(&self) -> bool {
        true
    }

    fn goal_states(&self) -> Vec<Vec<usize>> {
        vec![vec![self.target_tower; self.num_disks]]
    }

    fn predecessors(&self, state: &Vec<usize>) -> Vec<Successor<Vec<usize>>> {
        self.successors(state)
    }
}

impl Prefill for Hanoi {
    fn prefilled(&self) -> Option<&Vec<usize>> {
        self.prefilled.as_ref()
    }

    /// Places the first `seed.len()` disks (smallest first) on the given
    /// pegs; the remaining disks stay on peg 1.
    fn with_prefill(mut self, seed: Vec<usize>) -> Result<Self, ProblemError> {
        if seed.len() > self.num_disks {
            return Err(ProblemError::prefill(format!(
                "{} positions given for {} disks",
                seed.len(),
                self.num_disks
            )));
        }
        self.check_pegs(&seed).map_err(ProblemError::InvalidPrefill)?;
        let mut positions = seed;
        positions.resize(self.num_disks, 1);
        self.prefilled = Some(positions);
        Ok(self)
    }

    /// Moves the `round(num_disks * level)` smallest disks to the target.
    fn with_prefill_level(self, level: f64) -> Result<Self, ProblemError> {
        let count = scaled_count(self.num_disks, level)?;
        let seed = vec![self.target_tower; count];
        self.with_prefill(seed)
    }
}

impl TryFrom<HanoiParams> for Hanoi {
    type Error = ProblemError;

    fn try_from(params: HanoiParams) -> Result<Self, Self::Error> {
        let problem = Hanoi::new(params.num_towers, params.num_disks, params.target_tower)?;
        match params.prefilled {
            Some(seed) => problem.with_prefill(seed),
            None => Ok(problem),
        }
    }
}

impl From<Hanoi> for HanoiParams {
    fn from(problem: Hanoi) -> Self {
        Self {
            num_towers: problem.num_towers,
            num_disks: problem.num_disks,
            target_tower: problem.target_tower,
            prefilled: problem.prefilled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{bfs, create_rng, SearchConfig};
    use proptest::prelude::*;
    use rand::Rng;

    fn states(problem: &Hanoi, state: &[usize]) -> Vec<Vec<usize>> {
        problem
            .successors(&state.to_vec())
            .into_iter()
            .map(|(s, _)| s)
            .collect()
    }

    #[test]
    fn test_new_validates_parameters() {
        assert!(matches!(
            Hanoi::new(2, 3, 2),
            Err(ProblemError::InvalidParameter { parameter: "num_towers", .. })
        ));
        assert!(matches!(
            Hanoi::new(3, 0, 2),
            Err(ProblemError::InvalidParameter { parameter: "num_disks", .. })
        ));
        assert!(Hanoi::new(3, 3, 0).is_err());
        assert!(Hanoi::new(3, 3, 4).is_err());
        assert!(Hanoi::new(5, 1, 5).is_ok());
    }

    #[test]
    fn test_initial_state_on_first_peg() {
        let problem = Hanoi::new(3, 4, 3).unwrap();
        assert_eq!(problem.initial_state(&mut create_rng(0)), vec![1, 1, 1, 1]);
        assert_eq!(problem.heuristic(&vec![1, 1, 1, 1]), -4.0);
    }

    #[test]
    fn test_successors_from_start() {
        let problem = Hanoi::new(3, 3, 3).unwrap();
        assert_eq!(states(&problem, &[1, 1, 1]), vec![vec![2, 1, 1], vec![3, 1, 1]]);
    }

    #[test]
    fn test_successors_respect_disk_order() {
        // Disk 1 on peg 2, disks 2 and 3 on peg 1.
        let problem = Hanoi::new(3, 3, 3).unwrap();
        assert_eq!(
            states(&problem, &[2, 1, 1]),
            vec![vec![2, 3, 1], vec![1, 1, 1], vec![3, 1, 1]]
        );
    }

    #[test]
    fn test_successor_costs_are_unit() {
        let problem = Hanoi::new(4, 3, 2).unwrap();
        for (_, cost) in problem.successors(&vec![1, 2, 3]) {
            assert!((cost - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_pegs_bottom_to_top() {
        let problem = Hanoi::new(3, 4, 3).unwrap();
        assert_eq!(
            problem.pegs(&[2, 1, 2, 1]),
            vec![vec![4, 2], vec![3, 1], vec![]]
        );
    }

    #[test]
    fn test_validate_solution() {
        let problem = Hanoi::new(3, 3, 2).unwrap();
        assert!(problem.validate_solution(&vec![2, 2, 2]).is_valid());

        let short = problem.validate_solution(&vec![2, 2]);
        assert!(short.reason.contains("expected 3 disks"), "{}", short.reason);

        let off_board = problem.validate_solution(&vec![2, 2, 7]);
        assert!(off_board.reason.contains("outside"), "{}", off_board.reason);

        let unfinished = problem.validate_solution(&vec![2, 2, 1]);
        assert!(!unfinished.is_valid());
        assert!(unfinished.reason.contains("not on target"));
    }

    #[test]
    fn test_only_target_decides_validity() {
        let problem = Hanoi::new(4, 5, 2).unwrap();
        let mut checked = 0;
        for code in 0..4usize.pow(5) {
            let state: Vec<usize> = (0..5).map(|d| code / 4usize.pow(d) % 4 + 1).collect();
            for stack in problem.pegs(&state) {
                assert!(stack.windows(2).all(|pair| pair[0] > pair[1]), "{state:?}");
            }
            let on_target = state.iter().all(|&peg| peg == 2);
            assert_eq!(problem.validate_solution(&state).is_valid(), on_target, "{state:?}");
            checked += 1;
        }
        assert_eq!(checked, 1024);
    }

    #[test]
    fn test_prefill_pads_with_first_peg() {
        let problem = Hanoi::new(3, 4, 3).unwrap().with_prefill(vec![3, 2]).unwrap();
        assert_eq!(problem.prefilled(), Some(&vec![3, 2, 1, 1]));
        assert_eq!(problem.initial_state(&mut create_rng(0)), vec![3, 2, 1, 1]);
    }

    #[test]
    fn test_prefill_rejects_bad_positions() {
        let problem = Hanoi::new(3, 2, 3).unwrap();
        assert!(problem.clone().with_prefill(vec![1, 1, 1]).is_err());
        assert!(matches!(
            problem.clone().with_prefill(vec![0]),
            Err(ProblemError::InvalidPrefill(_))
        ));
        assert!(problem.with_prefill(vec![4]).is_err());
    }

    #[test]
    fn test_prefill_level_moves_smallest_disks() {
        let problem = Hanoi::new(3, 4, 2).unwrap().with_prefill_level(0.5).unwrap();
        assert_eq!(problem.prefilled(), Some(&vec![2, 2, 1, 1]));

        let done = Hanoi::new(3, 4, 2).unwrap().with_prefill_level(1.0).unwrap();
        let start = done.initial_state(&mut create_rng(0));
        assert!(done.is_goal(&start));
    }

    #[test]
    fn test_prefill_level_start_is_searchable() {
        let warm = Hanoi::new(3, 4, 3).unwrap().with_prefill_level(0.75).unwrap();
        assert_eq!(warm.prefilled(), Some(&vec![3, 3, 3, 1]));
        let result = bfs(&warm, &SearchConfig::default());
        assert!(warm.validate_solution(&result.solution.unwrap()).is_valid());
        // The largest disk still has to cross under the whole stack.
        assert_eq!(result.depth, Some(15));
    }

    #[test]
    fn test_reverse_hooks() {
        let problem = Hanoi::new(4, 3, 4).unwrap();
        assert!(problem.supports_reverse_search());
        assert_eq!(problem.goal_states(), vec![vec![4, 4, 4]]);
        let back = problem.predecessors(&vec![4, 4, 4]);
        assert_eq!(back.len(), 3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let problem = Hanoi::new(4, 5, 3).unwrap().with_prefill(vec![3]).unwrap();
        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["num_towers"], 4);
        assert_eq!(json["prefilled"], serde_json::json!([3, 1, 1, 1, 1]));
        let back: Hanoi = serde_json::from_value(json).unwrap();
        assert_eq!(back, problem);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_bad_target() {
        let json = r#"{"num_towers":3,"num_disks":3,"target_tower":9}"#;
        assert!(serde_json::from_str::<Hanoi>(json).is_err());
    }

    proptest! {
        #[test]
        fn prop_moves_are_invertible(towers in 3usize..6, disks in 1usize..6, seed in any::<u64>()) {
            let problem = Hanoi::new(towers, disks, towers).unwrap();
            let mut rng = create_rng(seed);
            let mut state = problem.initial_state(&mut rng);
            for _ in 0..20 {
                let next = problem.successors(&state);
                prop_assert!(!next.is_empty());
                let (moved, _) = next[rng.random_range(0..next.len())].clone();
                let back: Vec<Vec<usize>> =
                    problem.predecessors(&moved).into_iter().map(|(s, _)| s).collect();
                prop_assert!(back.contains(&state));
                prop_assert_eq!(moved.iter().zip(&state).filter(|(a, b)| a != b).count(), 1);
                state = moved;
            }
        }
    }
}
