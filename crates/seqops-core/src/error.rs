use thiserror::Error;

/// Canonical result for seqops.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required input was missing or unusable. Raised before any element is pulled.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Growing the bucket array past `count * 2 + 1` overflowed `usize`.
    #[error("lookup capacity overflow: cannot grow beyond {groupings} groupings")]
    CapacityOverflow { groupings: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("json error: {0}")]
    Json(String),
}

impl Error {
    pub fn invalid_argument(what: impl Into<String>) -> Self {
        Error::InvalidArgument(what.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
