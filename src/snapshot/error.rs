//! Error types for snapshot construction.

/// Error type for snapshot validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// A directory contains a child with an empty name.
    #[error("directory at '{path}' contains a child with an empty name")]
    EmptyName { path: String },

    /// A directory contains a child whose name includes a path separator.
    #[error("child name '{name}' in directory at '{path}' contains a path separator")]
    NameContainsSeparator { path: String, name: String },

    /// A directory contains a child named "." or "..".
    #[error("child name '{name}' in directory at '{path}' is a relative path reference")]
    RelativeName { path: String, name: String },
}

/// Result type for snapshot validation.
pub type Result<T> = std::result::Result<T, SnapshotError>;
