use thiserror::Error;

/// Errors produced by the crate itself.
///
/// Caller error types opt into these by implementing `From<LoadableError>`;
/// the conversions and store operations that can fail on their own require it.
#[derive(Error, Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LoadableError {
    /// A general error with a message describing what went wrong.
    #[error("{0}")]
    Error(String),

    /// A transform or conversion produced no value.
    #[error("Operation returned None!")]
    None,

    /// A request status that carries no information was converted.
    #[error("Request status is unknown!")]
    Unknown,

    /// The request was cancelled before completion.
    #[error("Task was cancelled!")]
    Cancelled,

    /// The request did not finish before its deadline.
    #[error("deadline has elapsed!")]
    Timeout,

    /// The store's update queue is gone, usually because its runtime shut down.
    #[error("state store is closed!")]
    Closed,
}

impl LoadableError {
    pub fn error(message: impl Into<String>) -> Self {
        LoadableError::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadableError::Error(_))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, LoadableError::None)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, LoadableError::Unknown)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, LoadableError::Cancelled)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, LoadableError::Timeout)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, LoadableError::Closed)
    }
}
