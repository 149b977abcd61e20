use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Core(#[from] seqops_core::Error),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// The document parsed but cannot be executed as written.
    #[error("invalid query: {0}")]
    Invalid(String),

    #[error("unknown dataset '{0}'")]
    UnknownDataset(String),
}

impl QueryError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        QueryError::Invalid(msg.into())
    }
}
