//! Error types for the admin panel core.

/// Failures surfaced by edit-session transitions and their seams.
#[derive(thiserror::Error, Debug)]
pub enum AdminError {
    /// An element the page contract requires was not found.
    #[error("required element missing from page: {0}")]
    MissingElement(String),

    /// A DOM operation failed.
    #[error("dom operation failed: {0}")]
    Dom(String),

    /// The visual editor library reported a failure or never loaded.
    #[error("editor error: {0}")]
    Editor(String),

    /// Content persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures from a content storage backend.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("content load failed: {0}")]
    Load(String),

    #[error("content store failed: {0}")]
    Store(String),
}
