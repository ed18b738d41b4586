//! Bidirectional breadth-first search.
//!
//! # Algorithm
//!
//! 1. Seed a forward frontier with the initial state and a backward
//!    frontier with every goal state ([`StateSpace::goal_states`]).
//! 2. Expand one whole layer of the smaller frontier, forward through
//!    [`StateSpace::successors`] or backward through
//!    [`StateSpace::predecessors`].
//! 3. When a generated state is already known to the other side, record
//!    the total depth. After finishing the layer, return the goal reached
//!    by the shallowest meeting. A layer cut short by the node budget
//!    still returns any meeting it recorded.
//!
//! Domains that cannot enumerate goals or predecessors report
//! [`StateSpace::supports_reverse_search`] as false; the search then
//! returns no solution without expanding anything.
//!
//! # Reference
//!
//! Pohl (1971), "Bi-directional Search", *Machine Intelligence* 6.

use std::collections::HashMap;

use log::{debug, trace};

use super::config::SearchConfig;
use super::types::SearchResult;
use crate::space::{state_key, Canonicalize, StateSpace};

const DEFAULT_BIDIRECTIONAL_NODES: usize = 100_000;

type Key<P> = <<P as StateSpace>::State as Canonicalize>::Key;

/// Per-side bookkeeping: depth of each known state and, on the backward
/// side, which goal it leads to.
#[derive(Clone, Copy)]
struct Mark {
    depth: usize,
    goal: usize,
}

/// Bidirectional breadth-first search.
///
/// `max_nodes` caps the expansions of both sides together. The reported
/// depth is the length of the shortest start-to-goal path under unit
/// costs.
pub fn bidirectional<P: StateSpace>(problem: &P, config: &SearchConfig) -> SearchResult<P::State> {
    if !problem.supports_reverse_search() {
        debug!("no reverse generator; bidirectional search skipped");
        return SearchResult::not_found(0);
    }

    let max_nodes = config.max_nodes(DEFAULT_BIDIRECTIONAL_NODES);
    let mut rng = config.rng();

    let start = problem.initial_state(&mut rng);
    let goals = problem.goal_states();
    if goals.is_empty() {
        return SearchResult::not_found(0);
    }

    let mut backward: HashMap<Key<P>, Mark> = HashMap::new();
    let mut backward_frontier = Vec::with_capacity(goals.len());
    for (index, goal) in goals.iter().enumerate() {
        if backward
            .insert(state_key(goal), Mark { depth: 0, goal: index })
            .is_none()
        {
            backward_frontier.push(goal.clone());
        }
    }

    if let Some(mark) = backward.get(&state_key(&start)) {
        return SearchResult::found(goals[mark.goal].clone(), 0, 0);
    }

    let mut forward: HashMap<Key<P>, Mark> = HashMap::from([(state_key(&start), Mark { depth: 0, goal: 0 })]);
    let mut forward_frontier = vec![start];
    let mut expanded = 0usize;

    while !forward_frontier.is_empty() && !backward_frontier.is_empty() {
        let expand_forward = forward_frontier.len() <= backward_frontier.len();
        let (frontier, own, other) = if expand_forward {
            (&mut forward_frontier, &mut forward, &backward)
        } else {
            (&mut backward_frontier, &mut backward, &forward)
        };

        let mut next_layer = Vec::new();
        // (total depth, goal index) of the best meeting in this layer
        let mut meeting: Option<(usize, usize)> = None;
        let mut exhausted = false;

        for state in frontier.drain(..) {
            if expanded >= max_nodes {
                exhausted = true;
                break;
            }
            expanded += 1;

            let Some(&mark) = own.get(&state_key(&state)) else {
                continue;
            };
            let neighbors = if expand_forward {
                problem.successors(&state)
            } else {
                problem.predecessors(&state)
            };

            for (neighbor, _) in neighbors {
                let key = state_key(&neighbor);
                if own.contains_key(&key) {
                    continue;
                }
                let reached = Mark {
                    depth: mark.depth + 1,
                    goal: mark.goal,
                };
                if let Some(seen) = other.get(&key) {
                    let total = reached.depth + seen.depth;
                    let goal = if expand_forward { seen.goal } else { reached.goal };
                    if meeting.map_or(true, |(best, _)| total < best) {
                        meeting = Some((total, goal));
                    }
                }
                own.insert(key, reached);
                next_layer.push(neighbor);
            }
        }

        if let Some((depth, goal)) = meeting {
            debug!("frontiers met at total depth {depth} after {expanded} expansions");
            return SearchResult::found(goals[goal].clone(), depth, expanded);
        }
        if exhausted {
            debug!("node budget of {max_nodes} exhausted");
            return SearchResult::not_found(expanded);
        }

        trace!(
            "{} layer done: {} new states",
            if expand_forward { "forward" } else { "backward" },
            next_layer.len()
        );
        *frontier = next_layer;
    }

    debug!("a frontier emptied without meeting");
    SearchResult::not_found(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::{Hanoi, NQueens};
    use crate::search::{bfs, Budget};

    #[test]
    fn test_bidirectional_hanoi_is_optimal() {
        for disks in 1..=5 {
            let problem = Hanoi::new(3, disks, 3).unwrap();
            let result = bidirectional(&problem, &SearchConfig::default());
            let goal = result.solution.as_ref().expect("hanoi is reversible");
            assert!(problem.is_goal(goal));
            assert!(problem.validate_solution(goal).is_valid());
            assert_eq!(result.depth, Some((1 << disks) - 1), "disks = {disks}");
        }
    }

    #[test]
    fn test_bidirectional_matches_bfs_on_four_pegs() {
        let problem = Hanoi::new(4, 4, 2).unwrap();
        let forward = bfs(&problem, &SearchConfig::default());
        let both = bidirectional(&problem, &SearchConfig::default());
        assert_eq!(both.depth, forward.depth);
    }

    #[test]
    fn test_bidirectional_expands_less_than_bfs() {
        let problem = Hanoi::new(3, 5, 2).unwrap();
        let forward = bfs(&problem, &SearchConfig::default());
        let both = bidirectional(&problem, &SearchConfig::default());
        assert_eq!(both.depth, Some(31));
        assert!(
            both.expanded < forward.expanded,
            "meeting in the middle should expand fewer states ({} vs {})",
            both.expanded,
            forward.expanded
        );
    }

    #[test]
    fn test_bidirectional_from_prefilled_start() {
        use crate::space::Prefill;
        let problem = Hanoi::new(3, 4, 2).unwrap().with_prefill_level(0.5).unwrap();
        let from_seed = bidirectional(&problem, &SearchConfig::default());
        let reference = bfs(&problem, &SearchConfig::default());
        assert_eq!(from_seed.depth, reference.depth);
    }

    #[test]
    fn test_bidirectional_without_reverse_generator() {
        let problem = NQueens::new(6).unwrap();
        let result = bidirectional(&problem, &SearchConfig::default());
        assert!(result.solution.is_none());
        assert_eq!(result.expanded, 0);
    }

    #[test]
    fn test_bidirectional_start_is_goal() {
        let problem = Hanoi::new(3, 3, 1).unwrap();
        let result = bidirectional(&problem, &SearchConfig::default());
        assert_eq!(result.depth, Some(0));
    }

    #[test]
    fn test_bidirectional_budget() {
        let problem = Hanoi::new(3, 7, 2).unwrap();
        let config = SearchConfig::default().with_budget(Budget::default().with_max_nodes(20));
        let result = bidirectional(&problem, &config);
        assert!(result.solution.is_none());
        assert!(result.expanded <= 20);
    }

    #[test]
    fn test_budget_mid_layer_keeps_meeting() {
        // Layer three of 2-disk Hanoi meets on its first state, [2, 1].
        let problem = Hanoi::new(3, 2, 3).unwrap();
        let config = SearchConfig::default().with_budget(Budget::default().with_max_nodes(3));
        let result = bidirectional(&problem, &config);
        assert_eq!(result.solution, Some(vec![3, 3]));
        assert_eq!(result.depth, Some(3));
        assert_eq!(result.expanded, 3);

        let tighter = SearchConfig::default().with_budget(Budget::default().with_max_nodes(2));
        assert!(bidirectional(&problem, &tighter).solution.is_none());
    }
}
