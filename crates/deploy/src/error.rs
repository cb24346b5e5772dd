//! Deploy error types.

/// Errors produced while deploying or removing a site bucket.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The configuration failed validation. Surfaced once, before any
    /// prompt or store operation runs.
    #[error("invalid configuration:\n{}", .0.join("\n"))]
    InvalidConfig(Vec<String>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A store call failed. Steps already completed are not rolled
    /// back; their side effects stay in place.
    #[error("store error: {0}")]
    Store(String),

    #[error("prompt error: {0}")]
    Prompt(String),
}
