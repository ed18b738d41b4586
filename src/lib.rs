//! Domain-agnostic state-space search.
//!
//! Provides generic implementations of classic search algorithms over a
//! single problem trait:
//!
//! - **Uninformed search**: breadth-first, depth-first, uniform-cost,
//!   iterative deepening, backtracking and bidirectional breadth-first
//!   search.
//! - **Informed search**: greedy best-first, A*, hill-climbing, simulated
//!   annealing and beam search.
//! - **Domains**: N-Queens, generalized Tower of Hanoi, graph colouring
//!   and knight's tour, each with a solution validator and prefill seeding.
//! - **Benchmarking**: runs the algorithm registry against a problem,
//!   times and validates every run, and ranks the results.
//!
//! # Architecture
//!
//! [`space`] defines the contract ([`space::StateSpace`]). [`search`]
//! holds the algorithms, written once against that contract, plus the
//! shared [`search::SearchConfig`] and [`search::Budget`]. [`problems`]
//! implements the contract for the four domains. [`bench`] drives the
//! registry ([`search::Algorithm`]) for comparisons. No module below
//! `bench` knows about timing, and no algorithm knows about a concrete
//! domain.
//!
//! # Examples
//!
//! ```
//! use u_search::problems::Hanoi;
//! use u_search::search::{Algorithm, SearchConfig};
//!
//! let problem = Hanoi::new(4, 4, 4).unwrap();
//! let result = Algorithm::Bidirectional
//!     .run(&problem, &SearchConfig::default())
//!     .unwrap();
//! assert_eq!(result.depth, Some(9));
//! ```

pub mod bench;
pub mod error;
pub mod problems;
pub mod search;
pub mod space;

pub use error::{ProblemError, SearchError};
