//! Informed search: greedy best-first, hill-climbing, simulated
//! annealing, beam search and A*.
//!
//! # Heuristic sign
//!
//! Greedy search and A* pop the *lowest* priority first. Hill-climbing,
//! annealing and beam search prefer the *highest* heuristic. This is the
//! contract the domains are written against (see
//! [`StateSpace`](crate::space::StateSpace)); flipping either side turns
//! the search into worst-first.
//!
//! # References
//!
//! - Hart, Nilsson & Raphael (1968), "A Formal Basis for the Heuristic
//!   Determination of Minimum Cost Paths"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Geman & Geman (1984), logarithmic cooling `T = T0 / ln(2 + t)`
//! - Lowerre (1976), "The HARPY Speech Recognition System" (beam search)

use std::collections::{HashMap, HashSet};

use log::{debug, trace};
use rand::Rng;

use super::config::SearchConfig;
use super::frontier::{Entry, Frontier};
use super::types::SearchResult;
use crate::space::{state_key, Canonicalize, StateSpace};

const DEFAULT_GREEDY_NODES: usize = 100_000;
const DEFAULT_ASTAR_NODES: usize = 100_000;
const DEFAULT_HILL_STEPS: usize = 10_000;
const DEFAULT_ANNEALING_STEPS: usize = 5_000;
const DEFAULT_BEAM_ITERS: usize = 1_000;

type Key<P> = <<P as StateSpace>::State as Canonicalize>::Key;

/// Greedy best-first search.
///
/// Orders the frontier by heuristic alone and pops the lowest value
/// first. `max_nodes` caps the closed set.
pub fn greedy<P: StateSpace>(problem: &P, config: &SearchConfig) -> SearchResult<P::State> {
    let max_nodes = config.max_nodes(DEFAULT_GREEDY_NODES);
    let mut rng = config.rng();

    let start = problem.initial_state(&mut rng);
    let mut frontier = Frontier::new();
    frontier.push(problem.heuristic(&start), 0, start);
    let mut visited: HashSet<Key<P>> = HashSet::new();

    while visited.len() < max_nodes {
        let Some(Entry { depth, state, .. }) = frontier.pop() else {
            return SearchResult::not_found(visited.len());
        };

        if !visited.insert(state_key(&state)) {
            continue;
        }

        if problem.is_goal(&state) {
            debug!("goal at depth {depth} after {} states", visited.len());
            return SearchResult::found(state, depth, visited.len());
        }

        for (child, _) in problem.successors(&state) {
            if !visited.contains(&state_key(&child)) {
                frontier.push(problem.heuristic(&child), depth + 1, child);
            }
        }
    }

    debug!("node budget of {max_nodes} exhausted");
    SearchResult::not_found(visited.len())
}

/// Stochastic hill-climbing.
///
/// Each step moves to a uniformly random successor whose heuristic is at
/// least the current one (sideways moves allowed). Fails at a local
/// optimum (no eligible successor), at a dead end, or after `max_steps`
/// moves.
pub fn hill_climbing<P: StateSpace>(problem: &P, config: &SearchConfig) -> SearchResult<P::State> {
    let max_steps = config.max_steps(DEFAULT_HILL_STEPS);
    let mut rng = config.rng();

    let mut state = problem.initial_state(&mut rng);
    for step in 0..max_steps {
        if problem.is_goal(&state) {
            debug!("goal after {step} steps");
            return SearchResult::found(state, step, step);
        }

        let current = problem.heuristic(&state);
        let mut eligible: Vec<P::State> = problem
            .successors(&state)
            .into_iter()
            .map(|(child, _)| child)
            .filter(|child| problem.heuristic(child) >= current)
            .collect();

        if eligible.is_empty() {
            debug!("local optimum at h = {current} after {step} steps");
            return SearchResult::not_found(step);
        }

        let pick = rng.random_range(0..eligible.len());
        state = eligible.swap_remove(pick);
    }

    debug!("step budget of {max_steps} exhausted");
    SearchResult::not_found(max_steps)
}

/// Simulated annealing with logarithmic cooling.
///
/// At step `t` (from 1) a random successor is drawn. A strictly better
/// successor is always accepted; any other is accepted with probability
/// `exp(dh / T)` where `dh <= 0` is the heuristic change and
/// `T = T0 / ln(2 + t)`. Fails at a dead end or after `max_steps` steps.
pub fn simulated_annealing<P: StateSpace>(
    problem: &P,
    config: &SearchConfig,
) -> SearchResult<P::State> {
    let max_steps = config.max_steps(DEFAULT_ANNEALING_STEPS);
    let t0 = config.initial_temperature;
    let mut rng = config.rng();

    let mut state = problem.initial_state(&mut rng);
    let mut moves = 0usize;

    for t in 1..=max_steps {
        if problem.is_goal(&state) {
            debug!("goal at step {t} after {moves} accepted moves");
            return SearchResult::found(state, moves, t - 1);
        }

        let mut children = problem.successors(&state);
        if children.is_empty() {
            debug!("dead end at step {t}");
            return SearchResult::not_found(t - 1);
        }
        let pick = rng.random_range(0..children.len());
        let (candidate, _) = children.swap_remove(pick);

        let current_h = problem.heuristic(&state);
        let candidate_h = problem.heuristic(&candidate);

        // Metropolis acceptance with logarithmic schedule
        let accept = if candidate_h > current_h {
            true
        } else {
            let temperature = t0 / ((2 + t) as f64).ln();
            let probability = if temperature > 0.0 {
                ((candidate_h - current_h) / temperature).exp()
            } else {
                0.0
            };
            rng.random::<f64>() < probability
        };

        if accept {
            state = candidate;
            moves += 1;
        }
    }

    debug!("step budget of {max_steps} exhausted");
    SearchResult::not_found(max_steps)
}

/// Beam search of width `k` ([`SearchConfig::beam_width`]).
///
/// Before expanding, the best-heuristic member of the beam (the first
/// one on ties) is tested for the goal. All beam states are then
/// expanded, successors already seen anywhere in the run are dropped,
/// and the `k` highest-heuristic candidates form the next beam (stable
/// sort, so ties keep generation order). Fails on an empty beam or after
/// `max_iters` iterations.
pub fn beam_search<P: StateSpace>(problem: &P, config: &SearchConfig) -> SearchResult<P::State> {
    let k = config.beam_width;
    let max_iters = config.max_iters(DEFAULT_BEAM_ITERS);
    let mut rng = config.rng();

    let start = problem.initial_state(&mut rng);
    let mut visited: HashSet<Key<P>> = HashSet::from([state_key(&start)]);
    let mut beam: Vec<(P::State, usize)> = vec![(start, 0)];
    let mut expanded = 0usize;

    for iteration in 0..max_iters {
        if beam.is_empty() {
            debug!("beam emptied at iteration {iteration}");
            return SearchResult::not_found(expanded);
        }

        let best = first_max(beam.iter().map(|(state, _)| problem.heuristic(state)));
        if problem.is_goal(&beam[best].0) {
            let (goal, depth) = beam.swap_remove(best);
            debug!("goal at iteration {iteration}");
            return SearchResult::found(goal, depth, expanded);
        }

        let mut candidates: Vec<(f64, P::State, usize)> = Vec::new();
        for (state, depth) in &beam {
            expanded += 1;
            for (child, _) in problem.successors(state) {
                if visited.insert(state_key(&child)) {
                    candidates.push((problem.heuristic(&child), child, depth + 1));
                }
            }
        }

        candidates.sort_by(|a, b| b.0.total_cmp(&a.0));
        candidates.truncate(k);
        trace!(
            "iteration {iteration}: beam of {} (best h = {:?})",
            candidates.len(),
            candidates.first().map(|c| c.0)
        );
        beam = candidates
            .into_iter()
            .map(|(_, state, depth)| (state, depth))
            .collect();
    }

    debug!("iteration budget of {max_iters} exhausted");
    SearchResult::not_found(expanded)
}

/// A* search with `f = g + h`.
///
/// Keeps the best known `g` per canonical key and relaxes it on
/// improvement; a closed set stops re-expansion of a key that has already
/// been popped. `max_nodes` caps the closed set.
pub fn a_star<P: StateSpace>(problem: &P, config: &SearchConfig) -> SearchResult<P::State> {
    let max_nodes = config.max_nodes(DEFAULT_ASTAR_NODES);
    let mut rng = config.rng();

    let start = problem.initial_state(&mut rng);
    let mut best_g: HashMap<Key<P>, f64> = HashMap::from([(state_key(&start), 0.0)]);
    let mut frontier = Frontier::new();
    frontier.push(problem.heuristic(&start), 0, start);
    let mut closed: HashSet<Key<P>> = HashSet::new();

    while closed.len() < max_nodes {
        let Some(Entry { depth, state, .. }) = frontier.pop() else {
            return SearchResult::not_found(closed.len());
        };

        let key = state_key(&state);
        if closed.contains(&key) {
            continue;
        }
        let Some(&g) = best_g.get(&key) else {
            continue;
        };
        closed.insert(key);

        if problem.is_goal(&state) {
            debug!("goal at g = {g} after {} states", closed.len());
            return SearchResult::found(state, depth, closed.len());
        }

        for (child, cost) in problem.successors(&state) {
            let child_key = state_key(&child);
            let candidate = g + cost;
            if best_g.get(&child_key).map_or(true, |&known| candidate < known) {
                best_g.insert(child_key, candidate);
                frontier.push(candidate + problem.heuristic(&child), depth + 1, child);
            }
        }
    }

    debug!("node budget of {max_nodes} exhausted");
    SearchResult::not_found(closed.len())
}

/// Index of the first maximum. `values` must be non-empty.
fn first_max(values: impl Iterator<Item = f64>) -> usize {
    let mut best_index = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, v) in values.enumerate() {
        if i == 0 || v > best_value {
            best_index = i;
            best_value = v;
        }
    }
    best_index
}
