#![forbid(unsafe_code)]
//! seqops: grouping, stable multi-key ordering, and hash joins over
//! in-memory sequences.
//!
//! This crate only re-exports the workspace crates:
//! - `seqops-core` (flattened here): errors, config, comparers, `SequenceBuffer`
//! - [`lookup`]: the insertion-ordered hash multimap
//! - [`operators`]: ordering, joins, grouping, `SequenceExt`
//! - [`query`]: the YAML query DSL over JSON records

pub use seqops_core::{buffer, comparer, config, error};
pub use seqops_lookup as lookup;
pub use seqops_operators as operators;
pub use seqops_query as query;

pub use seqops_core::{Error, Result, SeqConfig};
pub use seqops_lookup::{Grouping, Lookup, LookupBuilder};
pub use seqops_operators::{GroupJoin, Join, OrderedSequence, SequenceExt};
