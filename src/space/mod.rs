//! State-space contract.
//!
//! Every searchable domain implements [`StateSpace`]: an initial state, a
//! goal test, successor generation with transition costs, and an optional
//! heuristic. The algorithms in [`crate::search`] are written once against
//! this trait and never see a concrete domain.
//!
//! # Key Components
//!
//! - [`StateSpace`]: the traversal contract plus capability hooks
//! - [`Prefill`]: consuming builders that seed a problem's initial state
//! - [`Validation`]: the outcome of checking a candidate solution
//! - [`Canonicalize`] / [`state_key`]: the single canonicalisation shared
//!   by all visited-set bookkeeping
//!
//! # References
//!
//! Russell & Norvig (2020), *Artificial Intelligence: A Modern Approach*,
//! ch. 3 "Solving Problems by Searching".

mod key;
mod types;

pub use key::{state_key, Canonicalize};
pub use types::{Prefill, StateSpace, Successor, Validation};
pub(crate) use types::scaled_count;
