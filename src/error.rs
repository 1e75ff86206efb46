use thiserror::Error;

/// Form input the user has to correct before anything is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title is empty")]
    EmptyTitle,
    #[error("entry body is empty")]
    EmptyBody,
}

impl ValidationError {
    /// Text shown in the blocking alert.
    pub fn user_message(&self) -> &'static str {
        "Please fill in both title and entry."
    }
}

/// A snapshot that does not line up with the configured rating dimensions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot has {actual} ratings but {expected} dimensions are configured")]
    RatingCount { expected: usize, actual: usize },
}
