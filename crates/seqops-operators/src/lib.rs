#![forbid(unsafe_code)]
//! seqops-operators: ordering, joining, and grouping over plain iterators.
//!
//! Design intent:
//! - Everything is single-threaded and pull-based. Work happens when the
//!   consumer pulls; stopping early just drops whatever was buffered.
//! - Grouping and joins are thin consumers of `seqops-lookup`.
//! - Ordering materializes its input once per enumeration (`SequenceBuffer`),
//!   computes one key array per level, and sorts an index permutation.
//! - `SequenceExt` exposes all of it as iterator adapters.

pub mod ext;
pub mod group;
pub mod join;
pub mod reverse;
pub mod sort;

pub use ext::SequenceExt;
pub use group::{group_by, group_by_with, to_lookup, to_lookup_with, Groups};
pub use join::{group_join, group_join_with, join, join_with, GroupJoin, Join};
pub use reverse::Reverse;
pub use sort::{KeyLevel, LevelKeys, OrderedSequence, SortExecution, SortLevel, Sorted};
