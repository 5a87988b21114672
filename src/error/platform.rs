use std::time::Duration;
use thiserror::Error;

/// Failure talking to the chat platform or a display surface.
///
/// These errors are always logged and swallowed by the counting engine; the
/// sequence state is decided before any platform call is attempted.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),

    /// Platform call exceeded its best-effort deadline.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        /// Name of the platform operation that timed out
        operation: &'static str,
        /// Deadline that was exceeded
        after: Duration,
    },

    /// The background worker feeding a display surface has stopped.
    #[error("Stats publisher worker is no longer running")]
    PublisherClosed,
}

impl From<serenity::Error> for PlatformError {
    fn from(err: serenity::Error) -> Self {
        PlatformError::Discord(Box::new(err))
    }
}
