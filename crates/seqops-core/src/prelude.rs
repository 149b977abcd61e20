//! Convenient re-exports for downstream crates.

pub use crate::buffer::SequenceBuffer;
pub use crate::comparer::{
    DefaultEquality, EqualityComparer, FloatOrder, IgnoreAsciiCase, NaturalOrder, Nullable,
    OrderComparer, SortDirection,
};
pub use crate::config::SeqConfig;
pub use crate::error::{Error, Result};
pub use crate::id::GroupingId;
