/// Convenience result type used across the crate.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Top-level error taxonomy for schedule generation and request handling.
#[derive(thiserror::Error, Debug)]
pub enum ScheduleError {
    /// Parameters the generator cannot work with (bad step mode, non-positive sizes).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Errors when serializing or deserializing requests and schedules.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScheduleError {
    /// Build a [`ScheduleError::InvalidConfiguration`] value.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`ScheduleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
