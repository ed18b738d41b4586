//! Undirected simple graphs for the colouring domain.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use rand::Rng;

use crate::error::ProblemError;

/// An undirected graph without self-loops or parallel edges.
///
/// Nodes are arbitrary `usize` ids and iterate in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: BTreeMap<usize, BTreeSet<usize>>,
}

impl Graph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph on nodes `0..n` with no edges.
    pub fn with_nodes(n: usize) -> Self {
        Self {
            adjacency: (0..n).map(|node| (node, BTreeSet::new())).collect(),
        }
    }

    /// Adds an isolated node. Returns `false` if it already existed.
    pub fn add_node(&mut self, node: usize) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, BTreeSet::new());
        true
    }

    /// Adds the edge `{u, v}`. Returns `false` if it already existed.
    ///
    /// # Errors
    ///
    /// Self-loops and unknown endpoints.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<bool, ProblemError> {
        if u == v {
            return Err(ProblemError::parameter("graph", format!("self-loop on node {u}")));
        }
        for node in [u, v] {
            if !self.contains(node) {
                return Err(ProblemError::parameter("graph", format!("unknown node {node}")));
            }
        }
        let added = self.adjacency.entry(u).or_default().insert(v);
        self.adjacency.entry(v).or_default().insert(u);
        Ok(added)
    }

    /// Builds a graph from a node list and an edge list.
    pub fn from_edges<N, E>(nodes: N, edges: E) -> Result<Self, ProblemError>
    where
        N: IntoIterator<Item = usize>,
        E: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Builds a graph from an adjacency map, which must be symmetric and
    /// free of self-loops.
    pub fn from_adjacency(adjacency: BTreeMap<usize, BTreeSet<usize>>) -> Result<Self, ProblemError> {
        for (&node, neighbors) in &adjacency {
            for &other in neighbors {
                if other == node {
                    return Err(ProblemError::parameter("graph", format!("self-loop on node {node}")));
                }
                match adjacency.get(&other) {
                    None => {
                        return Err(ProblemError::parameter(
                            "graph",
                            format!("node {node} lists unknown neighbour {other}"),
                        ))
                    }
                    Some(back) if !back.contains(&node) => {
                        return Err(ProblemError::parameter(
                            "graph",
                            format!("edge {node}-{other} is not listed on both ends"),
                        ))
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(Self { adjacency })
    }

    /// A random graph that `colors` colours can always colour properly.
    ///
    /// Node `i` belongs to colour class `i % colors` and edges only join
    /// distinct classes, so assigning colour `i % colors` to node `i` is a
    /// proper colouring. At most `10 * edges` attempts are made; the graph
    /// may end up with fewer edges than requested when the classes run out
    /// of free pairs.
    pub fn random_colorable<R: Rng>(
        nodes: usize,
        edges: usize,
        colors: usize,
        rng: &mut R,
    ) -> Result<Self, ProblemError> {
        if nodes == 0 {
            return Err(ProblemError::parameter("nodes", "need at least 1 node"));
        }
        if colors < 2 {
            return Err(ProblemError::parameter(
                "colors",
                format!("need at least 2, got {colors}"),
            ));
        }

        let mut graph = Self::with_nodes(nodes);
        let classes: Vec<Vec<usize>> = (0..colors)
            .map(|class| (class..nodes).step_by(colors).collect())
            .collect();

        let mut placed = 0;
        let mut attempts = 0;
        while placed < edges && attempts < edges * 10 {
            attempts += 1;
            let a = rng.random_range(0..colors);
            let mut b = rng.random_range(0..colors - 1);
            if b >= a {
                b += 1;
            }
            if classes[a].is_empty() || classes[b].is_empty() {
                continue;
            }
            let u = classes[a][rng.random_range(0..classes[a].len())];
            let v = classes[b][rng.random_range(0..classes[b].len())];
            if graph.add_edge(u, v)? {
                placed += 1;
            }
        }
        if placed < edges {
            debug!("placed {placed} of {edges} requested edges");
        }
        Ok(graph)
    }

    pub fn contains(&self, node: usize) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Neighbours of `node` in ascending order; empty for unknown nodes.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.get(&node).into_iter().flatten().copied()
    }

    pub fn degree(&self, node: usize) -> usize {
        self.adjacency.get(&node).map_or(0, BTreeSet::len)
    }

    /// Each edge once, as `(u, v)` with `u < v`.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.adjacency
            .iter()
            .flat_map(|(&u, neighbors)| {
                neighbors.iter().filter(move |&&v| v > u).map(move |&v| (u, v))
            })
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_add_edge() {
        let mut graph = Graph::with_nodes(3);
        assert_eq!(graph.add_edge(0, 1), Ok(true));
        assert_eq!(graph.add_edge(1, 0), Ok(false));
        assert!(graph.add_edge(2, 2).is_err());
        assert!(graph.add_edge(0, 5).is_err());
        assert_eq!(graph.edges(), vec![(0, 1)]);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.degree(2), 0);
    }

    #[test]
    fn test_from_edges() {
        let graph = Graph::from_edges(0..4, [(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(graph.edges(), vec![(0, 1), (0, 3), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_from_adjacency_validation() {
        let symmetric = BTreeMap::from([
            (0, BTreeSet::from([1])),
            (1, BTreeSet::from([0])),
        ]);
        assert!(Graph::from_adjacency(symmetric).is_ok());

        let one_sided = BTreeMap::from([(0, BTreeSet::from([1])), (1, BTreeSet::new())]);
        assert!(Graph::from_adjacency(one_sided).is_err());

        let dangling = BTreeMap::from([(0, BTreeSet::from([7]))]);
        assert!(Graph::from_adjacency(dangling).is_err());

        let looped = BTreeMap::from([(0, BTreeSet::from([0]))]);
        assert!(Graph::from_adjacency(looped).is_err());
    }

    #[test]
    fn test_random_colorable_parameters() {
        let mut rng = create_rng(1);
        assert!(Graph::random_colorable(0, 3, 3, &mut rng).is_err());
        assert!(Graph::random_colorable(5, 3, 1, &mut rng).is_err());
        let empty = Graph::random_colorable(5, 0, 3, &mut rng).unwrap();
        assert_eq!(empty.node_count(), 5);
        assert_eq!(empty.edge_count(), 0);
    }

    #[test]
    fn test_random_colorable_runs_out_of_pairs() {
        // Two classes of one node each admit a single edge.
        let mut rng = create_rng(2);
        let graph = Graph::random_colorable(2, 10, 2, &mut rng).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    proptest! {
        #[test]
        fn prop_random_colorable_class_coloring_is_proper(
            nodes in 1usize..30,
            edges in 0usize..60,
            colors in 2usize..5,
            seed in any::<u64>(),
        ) {
            let mut rng = create_rng(seed);
            let graph = Graph::random_colorable(nodes, edges, colors, &mut rng).unwrap();
            prop_assert_eq!(graph.node_count(), nodes);
            prop_assert!(graph.edge_count() <= edges);
            for (u, v) in graph.edges() {
                prop_assert!(u < v);
                prop_assert_ne!(u % colors, v % colors);
            }
        }
    }
}
