//! Graph colouring in two formulations.
//!
//! - [`ColoringMode::Path`] builds a colouring one node at a time, always
//!   branching on the uncoloured node of highest degree and only over
//!   colours no coloured neighbour uses. Suited to systematic search.
//! - [`ColoringMode::Local`] starts from a complete random colouring and
//!   moves by recolouring a single node. Suited to local search.
//!
//! A state maps node ids to colours `0..colors`. The goal in both modes is
//! a complete colouring with no monochromatic edge.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use rand::Rng;

use super::graph::Graph;
use crate::error::ProblemError;
use crate::search::{backtracking, AlgorithmFamily, Budget, SearchConfig};
use crate::space::{scaled_count, Prefill, StateSpace, Successor, Validation};

/// Path-mode penalty for an uncoloured node with no legal colour left.
const DEAD_END_PENALTY: f64 = 100.0;
/// Path-mode penalty for an uncoloured node with a single legal colour.
const FORCED_PENALTY: f64 = 0.5;
/// Node budget for the solver behind [`Prefill::with_prefill_level`].
const SEED_SOLVER_NODES: usize = 1_000_000;

/// A node-to-colour assignment.
pub type Coloring = BTreeMap<usize, usize>;

/// Formulation used by [`GraphColoring`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ColoringMode {
    /// Incremental assignment.
    #[default]
    Path,
    /// Complete assignment repaired one node at a time.
    Local,
}

/// Properly colour a graph with a fixed number of colours.
///
/// # Examples
///
/// ```
/// use u_search::problems::{ColoringMode, Graph, GraphColoring};
/// use u_search::search::{backtracking, SearchConfig};
/// use u_search::space::StateSpace;
///
/// let cycle = Graph::from_edges(0..5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap();
/// let problem = GraphColoring::new(cycle, 3, ColoringMode::Path).unwrap();
/// let coloring = backtracking(&problem, &SearchConfig::default()).solution.unwrap();
/// assert!(problem.validate_solution(&coloring).is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GraphColoringParams", into = "GraphColoringParams")
)]
pub struct GraphColoring {
    graph: Graph,
    colors: usize,
    mode: ColoringMode,
    prefilled: Option<Coloring>,
}

/// Serializable parameters of [`GraphColoring`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphColoringParams {
    pub nodes: Vec<usize>,
    pub edges: Vec<(usize, usize)>,
    pub colors: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: ColoringMode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefilled: Option<Coloring>,
}

impl GraphColoring {
    /// # Errors
    ///
    /// [`ProblemError::InvalidParameter`] for fewer than two colours or an
    /// empty graph.
    pub fn new(graph: Graph, colors: usize, mode: ColoringMode) -> Result<Self, ProblemError> {
        if colors < 2 {
            return Err(ProblemError::parameter(
                "colors",
                format!("need at least 2, got {colors}"),
            ));
        }
        if graph.node_count() == 0 {
            return Err(ProblemError::parameter("graph", "need at least 1 node"));
        }
        Ok(Self {
            graph,
            colors,
            mode,
            prefilled: None,
        })
    }

    /// The same instance, prefill included, in another formulation.
    pub fn with_mode(mut self, mode: ColoringMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ColoringMode {
        self.mode
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn colors(&self) -> usize {
        self.colors
    }

    /// Number of edges whose endpoints are both coloured with the same
    /// colour. Each edge counts once.
    pub fn conflicts(&self, state: &Coloring) -> usize {
        self.graph
            .edges()
            .into_iter()
            .filter(|(u, v)| matches!((state.get(u), state.get(v)), (Some(a), Some(b)) if a == b))
            .count()
    }

    /// Colours not used by any coloured neighbour of `node`.
    fn legal_colors(&self, state: &Coloring, node: usize) -> Vec<usize> {
        let mut used = vec![false; self.colors];
        for neighbor in self.graph.neighbors(node) {
            if let Some(&color) = state.get(&neighbor) {
                if color < self.colors {
                    used[color] = true;
                }
            }
        }
        (0..self.colors).filter(|&c| !used[c]).collect()
    }

    fn uncolored<'a>(&'a self, state: &'a Coloring) -> impl Iterator<Item = usize> + 'a {
        self.graph.nodes().filter(move |node| !state.contains_key(node))
    }

    /// Uncoloured node of highest degree, lowest id on ties.
    fn next_node(&self, state: &Coloring) -> Option<usize> {
        self.uncolored(state)
            .max_by_key(|&node| (self.graph.degree(node), Reverse(node)))
    }

    fn path_successors(&self, state: &Coloring) -> Vec<Successor<Coloring>> {
        let Some(node) = self.next_node(state) else {
            return Vec::new();
        };
        self.legal_colors(state, node)
            .into_iter()
            .map(|color| {
                let mut next = state.clone();
                next.insert(node, color);
                let cost = self.distance(state, &next);
                (next, cost)
            })
            .collect()
    }

    fn local_successors(&self, state: &Coloring) -> Vec<Successor<Coloring>> {
        let mut next = Vec::with_capacity(self.graph.node_count() * (self.colors - 1));
        for node in self.graph.nodes() {
            let current = state.get(&node).copied();
            for color in (0..self.colors).filter(|&c| Some(c) != current) {
                let mut flipped = state.clone();
                flipped.insert(node, color);
                let cost = self.distance(state, &flipped);
                next.push((flipped, cost));
            }
        }
        next
    }

    fn path_heuristic(&self, state: &Coloring) -> f64 {
        let mut uncolored = 0.0;
        let mut penalty = 0.0;
        for node in self.uncolored(state) {
            uncolored += 1.0;
            match self.legal_colors(state, node).len() {
                0 => penalty += DEAD_END_PENALTY,
                1 => penalty += FORCED_PENALTY,
                _ => {}
            }
        }
        -(uncolored + penalty)
    }

    /// Checks node ids and colour ranges of a possibly partial colouring.
    fn check_assignment(&self, state: &Coloring) -> Result<(), String> {
        for (&node, &color) in state {
            if !self.graph.contains(node) {
                return Err(format!("unknown node {node}"));
            }
            if color >= self.colors {
                return Err(format!(
                    "node {node} has colour {color}, outside 0..{}",
                    self.colors
                ));
            }
        }
        Ok(())
    }

    /// Finds one proper colouring with path-mode backtracking.
    fn solve(&self) -> Option<Coloring> {
        let blank = Self {
            graph: self.graph.clone(),
            colors: self.colors,
            mode: ColoringMode::Path,
            prefilled: None,
        };
        let config = SearchConfig::default()
            .with_budget(Budget::default().with_max_nodes(SEED_SOLVER_NODES))
            .with_seed(0);
        backtracking(&blank, &config).solution
    }
}

impl StateSpace for GraphColoring {
    type State = Coloring;

    /// Path mode starts from the prefill (or nothing); local mode colours
    /// every node the prefill leaves open uniformly at random.
    fn initial_state<R: Rng>(&self, rng: &mut R) -> Coloring {
        let mut state = self.prefilled.clone().unwrap_or_default();
        if self.mode == ColoringMode::Local {
            for node in self.graph.nodes() {
                state
                    .entry(node)
                    .or_insert_with(|| rng.random_range(0..self.colors));
            }
        }
        state
    }

    fn is_goal(&self, state: &Coloring) -> bool {
        state.len() == self.graph.node_count()
            && self.graph.nodes().all(|node| state.contains_key(&node))
            && self.conflicts(state) == 0
    }

    fn successors(&self, state: &Coloring) -> Vec<Successor<Coloring>> {
        match self.mode {
            ColoringMode::Path => self.path_successors(state),
            ColoringMode::Local => self.local_successors(state),
        }
    }

    /// Path mode: minus uncoloured nodes plus a constraint penalty. Local
    /// mode: minus the conflict count.
    fn heuristic(&self, state: &Coloring) -> f64 {
        match self.mode {
            ColoringMode::Path => self.path_heuristic(state),
            ColoringMode::Local => -(self.conflicts(state) as f64),
        }
    }

    fn validate_solution(&self, candidate: &Coloring) -> Validation {
        if let Err(reason) = self.check_assignment(candidate) {
            return Validation::invalid(reason);
        }
        if let Some(node) = self.uncolored(candidate).next() {
            return Validation::invalid(format!("node {node} is not coloured"));
        }
        for (u, v) in self.graph.edges() {
            if candidate.get(&u) == candidate.get(&v) {
                return Validation::invalid(format!("adjacent nodes {u} and {v} share a colour"));
            }
        }
        Validation::ok()
    }

    fn supports_local_search(&self) -> bool {
        true
    }

    fn prepare_for(&self, family: AlgorithmFamily) -> Self {
        let mode = match family {
            AlgorithmFamily::Systematic => ColoringMode::Path,
            AlgorithmFamily::LocalSearch => ColoringMode::Local,
        };
        self.clone().with_mode(mode)
    }

    fn default_budget(&self) -> Budget {
        Budget::default()
            .with_max_nodes(100_000)
            .with_max_steps(100_000)
    }
}

impl Prefill for GraphColoring {
    fn prefilled(&self) -> Option<&Coloring> {
        self.prefilled.as_ref()
    }

    fn with_prefill(mut self, seed: Coloring) -> Result<Self, ProblemError> {
        self.check_assignment(&seed).map_err(ProblemError::InvalidPrefill)?;
        if self.conflicts(&seed) > 0 {
            return Err(ProblemError::prefill("seeded nodes share a colour across an edge"));
        }
        self.prefilled = Some(seed);
        Ok(self)
    }

    /// Keeps the colours of the first `round(nodes * level)` node ids from
    /// one proper colouring.
    fn with_prefill_level(self, level: f64) -> Result<Self, ProblemError> {
        let count = scaled_count(self.graph.node_count(), level)?;
        let solution = self.solve().ok_or_else(|| {
            ProblemError::NoSeed(format!("no {}-colouring found", self.colors))
        })?;
        let seed = solution.into_iter().take(count).collect();
        self.with_prefill(seed)
    }
}

impl TryFrom<GraphColoringParams> for GraphColoring {
    type Error = ProblemError;

    fn try_from(params: GraphColoringParams) -> Result<Self, Self::Error> {
        let graph = Graph::from_edges(params.nodes, params.edges)?;
        let problem = GraphColoring::new(graph, params.colors, params.mode)?;
        match params.prefilled {
            Some(seed) => problem.with_prefill(seed),
            None => Ok(problem),
        }
    }
}

impl From<GraphColoring> for GraphColoringParams {
    fn from(problem: GraphColoring) -> Self {
        Self {
            nodes: problem.graph.nodes().collect(),
            edges: problem.graph.edges(),
            colors: problem.colors,
            mode: problem.mode,
            prefilled: problem.prefilled,
        }
    }
}
