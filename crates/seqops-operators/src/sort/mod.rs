//! Stable multi-key ordering.
//!
//! An ordering is an explicit list of levels built primary-first
//! (`order_by`, then any number of `then_by`). Enumeration runs a
//! [`SortExecution`]: buffer, per-level keys, permutation quicksort with an
//! original-index tie-break, then lazy emission through [`Sorted`].

pub mod execution;
pub mod level;
pub mod ordered;

pub use execution::{SortExecution, Sorted};
pub use level::{BoxedLevel, KeyLevel, LevelKeys, SortLevel};
pub use ordered::OrderedSequence;
