//! Benchmark domains.
//!
//! | Domain | State | Notes |
//! |--------|-------|-------|
//! | [`NQueens`] | row per placed column | conflict-free successors only |
//! | [`Hanoi`] | peg per disk | any number of pegs; reversible moves |
//! | [`GraphColoring`] | node to colour map | path and local formulations |
//! | [`KnightsTour`] | path of squares | Warnsdorff successor ordering |
//!
//! Every domain implements [`StateSpace`](crate::space::StateSpace) and
//! [`Prefill`](crate::space::Prefill). With the `serde` feature each one
//! (de)serializes through its `*Params` record, and deserializing re-runs
//! the constructor and prefill checks.

mod graph;
mod graph_coloring;
mod hanoi;
mod knights_tour;
mod n_queens;

pub use graph::Graph;
pub use graph_coloring::{Coloring, ColoringMode, GraphColoring, GraphColoringParams};
pub use hanoi::{Hanoi, HanoiParams};
pub use knights_tour::{KnightsTour, KnightsTourParams, Square};
pub use n_queens::{NQueens, NQueensParams};
