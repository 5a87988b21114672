use thiserror::Error;

/// A recognised chat command with unusable arguments.
///
/// The `Display` text is replied to the author.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("❌ Usage: `{0}`")]
    Usage(String),

    #[error("❌ '{0}' is not a valid number.")]
    InvalidNumber(String),

    #[error("❌ '{0}' is not a user mention or ID.")]
    InvalidUser(String),
}
