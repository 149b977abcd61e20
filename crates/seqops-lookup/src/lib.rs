#![forbid(unsafe_code)]
//! seqops-lookup: the keyed multimap behind grouping and joins.
//!
//! A `Lookup` partitions a sequence by a derived key. It guarantees:
//! - one `Grouping` per distinct key (as judged by the configured comparer),
//! - groupings iterate in first-occurrence order of their key,
//! - elements inside a grouping keep their source order,
//! - a lookup of an unknown key yields an empty slice, never an error.
//!
//! Storage is flat: groupings live in an append-only arena whose index order
//! *is* the first-occurrence order, and bucket chains are `GroupingId` links
//! held in side arrays. Rehashing relinks ids and never touches the arena.

pub mod grouping;
pub mod lookup;

pub use grouping::Grouping;
pub use lookup::{Lookup, LookupBuilder};
