/// Centralized error types for git-resource using thiserror
///
/// The walker, the git engine, configuration and the request protocol each
/// have their own error enum; `ResourceError` is what an action returns.
use thiserror::Error;

/// Main error type for a resource invocation
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("History walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors raised while walking commit history
///
/// A marker that is missing from the graph is not an error; the walk
/// degrades to full first-parent history instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    #[error("Head cannot be resolved to a commit: {0}")]
    UnresolvableHead(String),

    #[error("Commit graph is corrupt at {commit}: {reason}")]
    GraphCorrupt { commit: String, reason: String },
}

/// Errors related to git engine operations
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open git repository at '{path}': {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("Failed to clone '{uri}': {reason}")]
    CloneFailed { uri: String, reason: String },

    #[error("Failed to fetch from remote '{remote}': {reason}")]
    FetchFailed { remote: String, reason: String },

    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    #[error("Revision not found: {0}")]
    RevisionNotFound(String),

    #[error("Failed to check out {revision}: {reason}")]
    CheckoutFailed { revision: String, reason: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

/// Errors related to the request document and response stream
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Request document is empty")]
    EmptyRequest,

    #[error("Invalid request document: {0}")]
    InvalidRequest(String),

    #[error("Request has no response_path, required by '{0}'")]
    MissingResponsePath(String),
}

// Conversion from anyhow::Error to ResourceError
impl From<anyhow::Error> for ResourceError {
    fn from(err: anyhow::Error) -> Self {
        ResourceError::Other(format!("{:#}", err))
    }
}

impl ResourceError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        ResourceError::Other(msg.into())
    }

    /// Check if this is a user error (bad request or config) vs system error
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ResourceError::Protocol(_) | ResourceError::Config(ConfigError::InvalidValue { .. })
        )
    }

    /// Check if this error is retryable
    ///
    /// Only network-facing engine failures qualify; a corrupt graph or an
    /// unresolvable head will not fix itself on a second attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ResourceError::Git(GitError::FetchFailed { .. })
                | ResourceError::Git(GitError::CloneFailed { .. })
                | ResourceError::Io(_)
        )
    }
}
