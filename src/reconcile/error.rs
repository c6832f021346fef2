//! Error types for change application.

/// Error type for applying a change list to a snapshot tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    /// A change addresses a location whose parent entry does not exist.
    #[error("no entry exists at '{path}' to hold the change target")]
    MissingParent { path: String },

    /// A change addresses a location whose parent entry is not a directory.
    #[error("entry at '{path}' is not a directory")]
    NotADirectory { path: String },
}

/// Result type for change application.
pub type Result<T> = std::result::Result<T, ApplyError>;
