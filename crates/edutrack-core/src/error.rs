//! Engine error types.
//!
//! Every rejected command surfaces as one of these. None of them are fatal:
//! the engine stays usable and no partial mutation is committed.

use thiserror::Error;

/// A student name or draft value broke one of the input rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The student name was empty.
    #[error("Student name cannot be empty. Please enter a name.")]
    EmptyName,

    /// The student name exceeded the configured length limit.
    #[error("Student name cannot exceed {max} characters. Please enter a shorter name.")]
    NameTooLong { max: usize, len: usize },

    /// The student name had leading or trailing whitespace.
    #[error("Student name cannot have leading or trailing whitespaces. Please enter a valid name.")]
    WhitespaceName,

    /// A student with this exact name is already on the roster.
    #[error("Student {0} already exists. Please enter a different name.")]
    DuplicateName(String),

    /// A draft rating symbol outside `-`, `~`, `+`.
    #[error("unknown rating symbol: {0:?} (expected one of '-', '~', '+')")]
    UnknownRating(String),

    /// A topic rename to an empty name while strict topic names are enabled.
    #[error("Topic name cannot be empty.")]
    EmptyTopicName,
}

/// Errors returned by engine commands and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Deleting the only remaining topic.
    #[error("Cannot delete the last remaining topic.")]
    LastTopic,

    /// Building a registry from an empty topic list.
    #[error("a class needs at least one topic")]
    NoTopics,

    /// A topic index outside the current registry.
    #[error("no topic at index {index} (registry has {len} topics)")]
    TopicNotFound { index: usize, len: usize },

    /// A student name that is not on the roster.
    #[error("no student named {0:?}")]
    StudentNotFound(String),
}

/// Coarse classification of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Structural,
    NotFound,
}

impl EngineError {
    /// Returns the error category the presentation layer reports under.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation(_) => ErrorKind::Validation,
            EngineError::LastTopic | EngineError::NoTopics => ErrorKind::Structural,
            EngineError::TopicNotFound { .. } | EngineError::StudentNotFound(_) => {
                ErrorKind::NotFound
            }
        }
    }
}
