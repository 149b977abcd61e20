#![forbid(unsafe_code)]
//! seqops-core: shared types for the seqops operators.
//!
//! This crate holds what every other crate needs and nothing more:
//! - the error enum and `Result` alias,
//! - `SeqConfig` (tunables with env overrides),
//! - equality/order comparer traits plus the stock comparers,
//! - `SequenceBuffer`, the one-pass materializer used by sorting and reversal.
//!
//! No logging, IO, or operator logic lives here.

pub mod buffer;
pub mod comparer;
pub mod config;
pub mod error;
pub mod id;
pub mod prelude;

pub use buffer::SequenceBuffer;
pub use comparer::{
    DefaultEquality, EqualityComparer, FloatOrder, IgnoreAsciiCase, NaturalOrder, Nullable,
    OrderComparer, SortDirection,
};
pub use config::SeqConfig;
pub use error::{Error, Result};
