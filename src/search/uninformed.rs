//! Uninformed search: BFS, DFS, uniform-cost, iterative deepening and
//! backtracking.
//!
//! Every algorithm keys its bookkeeping by [`state_key`] and charges work
//! against [`Budget::max_nodes`](super::Budget::max_nodes) (IDDFS reads
//! `max_depth` first).
//!
//! # Reference
//!
//! Russell & Norvig (2020), *Artificial Intelligence: A Modern Approach*,
//! §3.4 "Uninformed Search Strategies".

use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, trace};

use super::config::SearchConfig;
use super::frontier::{Entry, Frontier};
use super::types::SearchResult;
use crate::space::{state_key, Canonicalize, StateSpace};

const DEFAULT_BFS_NODES: usize = 10_000;
const DEFAULT_UCS_NODES: usize = 100_000;
const DEFAULT_BACKTRACKING_NODES: usize = 100_000;
const DEFAULT_MAX_DEPTH: usize = 20;

type Key<P> = <<P as StateSpace>::State as Canonicalize>::Key;

/// Breadth-first search with a closed set.
///
/// Stops once `max_nodes` distinct states have been visited. The first
/// goal dequeued is one of minimum depth.
pub fn bfs<P: StateSpace>(problem: &P, config: &SearchConfig) -> SearchResult<P::State> {
    closed_set_search(problem, config, Order::Fifo)
}

/// Depth-first search with a closed set.
///
/// Successors are pushed in reverse so they are explored in the order
/// the domain generated them.
pub fn dfs<P: StateSpace>(problem: &P, config: &SearchConfig) -> SearchResult<P::State> {
    closed_set_search(problem, config, Order::Lifo)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Order {
    Fifo,
    Lifo,
}

fn closed_set_search<P: StateSpace>(
    problem: &P,
    config: &SearchConfig,
    order: Order,
) -> SearchResult<P::State> {
    let max_nodes = config.max_nodes(DEFAULT_BFS_NODES);
    let mut rng = config.rng();

    let start = problem.initial_state(&mut rng);
    let mut frontier = VecDeque::from([(start, 0usize)]);
    let mut visited: HashSet<Key<P>> = HashSet::new();

    while visited.len() < max_nodes {
        let next = match order {
            Order::Fifo => frontier.pop_front(),
            Order::Lifo => frontier.pop_back(),
        };
        let Some((state, depth)) = next else {
            debug!("frontier exhausted after {} states", visited.len());
            return SearchResult::not_found(visited.len());
        };

        if !visited.insert(state_key(&state)) {
            continue;
        }

        if problem.is_goal(&state) {
            debug!("goal at depth {depth} after {} states", visited.len());
            return SearchResult::found(state, depth, visited.len());
        }

        let mut children: Vec<_> = problem
            .successors(&state)
            .into_iter()
            .filter(|(child, _)| !visited.contains(&state_key(child)))
            .map(|(child, _)| (child, depth + 1))
            .collect();
        if order == Order::Lifo {
            children.reverse();
        }
        frontier.extend(children);
    }

    debug!("node budget of {max_nodes} exhausted");
    SearchResult::not_found(visited.len())
}

/// Uniform-cost search.
///
/// Keeps the best known path cost per canonical key, relaxes it when a
/// cheaper path appears, and tests for the goal when a state is popped.
/// `max_nodes` caps the number of settled states.
pub fn uniform_cost<P: StateSpace>(problem: &P, config: &SearchConfig) -> SearchResult<P::State> {
    let max_nodes = config.max_nodes(DEFAULT_UCS_NODES);
    let mut rng = config.rng();

    let start = problem.initial_state(&mut rng);
    let mut best: HashMap<Key<P>, f64> = HashMap::from([(state_key(&start), 0.0)]);
    let mut frontier = Frontier::new();
    frontier.push(0.0, 0, start);
    let mut settled: HashSet<Key<P>> = HashSet::new();

    while settled.len() < max_nodes {
        let Some(Entry {
            priority: cost,
            depth,
            state,
            ..
        }) = frontier.pop()
        else {
            return SearchResult::not_found(settled.len());
        };

        if !settled.insert(state_key(&state)) {
            continue;
        }

        if problem.is_goal(&state) {
            debug!("goal at cost {cost} after {} states", settled.len());
            return SearchResult::found(state, depth, settled.len());
        }

        for (child, step) in problem.successors(&state) {
            let key = state_key(&child);
            let candidate = cost + step;
            if best.get(&key).map_or(true, |&known| candidate < known) {
                best.insert(key, candidate);
                frontier.push(candidate, depth + 1, child);
            }
        }
    }

    debug!("node budget of {max_nodes} exhausted");
    SearchResult::not_found(settled.len())
}

/// Iterative-deepening depth-first search.
///
/// Runs a depth-limited search for each limit `0..=max_depth`. Each
/// iteration starts from scratch with a path-local cycle check only; no
/// memo is carried between iterations. `max_nodes`, when set, caps the
/// states examined over all iterations.
pub fn iddfs<P: StateSpace>(problem: &P, config: &SearchConfig) -> SearchResult<P::State> {
    let max_depth = config.max_depth(DEFAULT_MAX_DEPTH);
    let max_nodes = config.max_nodes(usize::MAX);
    let mut rng = config.rng();

    let start = problem.initial_state(&mut rng);
    let mut expanded = 0usize;

    for limit in 0..=max_depth {
        let mut on_path: HashSet<Key<P>> = HashSet::from([state_key(&start)]);
        let mut search = DepthLimited {
            problem,
            limit,
            max_nodes,
            expanded: &mut expanded,
        };
        if let Some((goal, depth)) = search.visit(&start, 0, &mut on_path) {
            debug!("goal at depth {depth} in iteration {limit}");
            return SearchResult::found(goal, depth, expanded);
        }
        if expanded >= max_nodes {
            debug!("node budget of {max_nodes} exhausted at limit {limit}");
            break;
        }
        trace!("limit {limit} exhausted, {expanded} states so far");
    }

    SearchResult::not_found(expanded)
}

struct DepthLimited<'a, P> {
    problem: &'a P,
    limit: usize,
    max_nodes: usize,
    expanded: &'a mut usize,
}

impl<P: StateSpace> DepthLimited<'_, P> {
    fn visit(
        &mut self,
        state: &P::State,
        depth: usize,
        on_path: &mut HashSet<Key<P>>,
    ) -> Option<(P::State, usize)> {
        if *self.expanded >= self.max_nodes {
            return None;
        }
        *self.expanded += 1;

        if self.problem.is_goal(state) {
            return Some((state.clone(), depth));
        }
        if depth == self.limit {
            return None;
        }

        for (child, _) in self.problem.successors(state) {
            let key = state_key(&child);
            if !on_path.insert(key.clone()) {
                continue;
            }
            let found = self.visit(&child, depth + 1, on_path);
            on_path.remove(&key);
            if found.is_some() {
                return found;
            }
        }
        None
    }
}

/// Plain backtracking.
///
/// Depth-first enumeration straight over `successors` with no visited
/// set, so it only terminates on its own in domains whose successors
/// never revisit a state (N-Queens, path-mode graph colouring, knight's
/// tour). Every goal test counts against `max_nodes`.
///
/// The recursion is kept on an explicit stack of successor iterators.
pub fn backtracking<P: StateSpace>(problem: &P, config: &SearchConfig) -> SearchResult<P::State> {
    let max_nodes = config.max_nodes(DEFAULT_BACKTRACKING_NODES);
    let mut rng = config.rng();

    let start = problem.initial_state(&mut rng);
    let mut nodes = 1usize;
    if problem.is_goal(&start) {
        return SearchResult::found(start, 0, nodes);
    }

    let mut stack = vec![problem.successors(&start).into_iter()];
    loop {
        let next = match stack.last_mut() {
            Some(children) => children.next(),
            None => break,
        };
        match next {
            Some((child, _)) => {
                if nodes >= max_nodes {
                    debug!("node budget of {max_nodes} exhausted at depth {}", stack.len());
                    return SearchResult::not_found(nodes);
                }
                nodes += 1;
                let depth = stack.len();
                if problem.is_goal(&child) {
                    debug!("goal at depth {depth} after {nodes} nodes");
                    return SearchResult::found(child, depth, nodes);
                }
                stack.push(problem.successors(&child).into_iter());
            }
            None => {
                stack.pop();
            }
        }
    }

    SearchResult::not_found(nodes)
}
