use thiserror::Error;

/// Reasons a counting submission is rejected.
///
/// The `Display` text is the private notice sent to the submitter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CountingViolation {
    /// Message text does not start with a number.
    #[error("❌ Your message '{preview}' was deleted because it didn't start with a valid number.")]
    ParseError {
        /// Leading part of the rejected message
        preview: String,
    },

    /// Number is not the successor of the current count. The counter is kept.
    #[error("❌ Your number {submitted} was wrong. The next number is {expected}, the count continues from there.")]
    SequenceViolation {
        /// Number the user submitted
        submitted: u64,
        /// Number the game expects next
        expected: u64,
    },

    /// Same user tried to count twice in a row.
    #[error("❌ You cannot count twice in a row. Wait for someone else to count.")]
    TurnViolation,
}
