#![forbid(unsafe_code)]
//! seqops-query: a small YAML query language over JSON records.
//!
//! Design intent:
//! - A query is a linear list of steps (`group`, `order`, `join`,
//!   `group_join`); each step consumes the previous step's records.
//! - Keys are dotted field paths. A missing field or JSON `null` is an absent
//!   key: joins never match it, grouping and ordering treat it as `null`.
//! - Joins reference named datasets registered on the [`Executor`].
//! - Every step runs through the `seqops-operators` implementations.

pub mod compare;
pub mod dsl;
pub mod error;
pub mod exec;
pub mod path;
pub mod records;

pub use compare::{JsonEquality, JsonOrder};
pub use dsl::{OrderLevel, Query, QueryConfig, Step};
pub use error::{QueryError, Result};
pub use exec::Executor;
pub use path::KeyPath;
pub use records::{load_records, parse_records};
