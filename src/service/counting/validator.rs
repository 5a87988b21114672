//! Submission validation.
//!
//! `judge` is the pure decision; `CountingService::evaluate` applies it under the game
//! lock and performs the resulting platform calls.

use dioxus_logger::tracing;

use crate::{
    error::platform::PlatformError,
    model::counting::{CandidateSubmission, Outcome, SequenceState},
};

use super::CountingService;

/// Decides the fate of a submission against the current state.
///
/// Checks run in this order:
/// 1. the text must start with a number
/// 2. the submitter must not have produced the current count
/// 3. the number must be `current_count + 1`
///
/// A wrong number never resets the counter; the expected number stays the same.
///
/// # Arguments
/// - `state` - Current head of the chain
/// - `submission` - Message being evaluated
///
/// # Returns
/// - `Outcome` - Acceptance or the specific rejection
pub fn judge(state: &SequenceState, submission: &CandidateSubmission) -> Outcome {
    let Some(number) = submission.parsed_number() else {
        return Outcome::RejectedNotNumeric;
    };

    if state.last_contributor_id == Some(submission.submitter_id) {
        return Outcome::RejectedRepeatSubmitter;
    }

    let expected = state.next_expected();
    if number != expected {
        return Outcome::RejectedWrongNumber {
            submitted: number,
            expected,
        };
    }

    Outcome::Accepted { count: number }
}

impl CountingService {
    /// Evaluates a message posted in the counting channel.
    ///
    /// Holds the game lock from the decision until an accepted count is marked, stored,
    /// and published. Rejected messages are deleted and their author privately notified
    /// after the lock is released. Platform failures are logged and do not change the
    /// outcome.
    ///
    /// # Arguments
    /// - `submission` - The inbound message
    ///
    /// # Returns
    /// - `Ok(Outcome)` - The decision that was applied
    /// - `Err(PlatformError)` - The game could not be initialized from history; the
    ///   message was left untouched
    pub async fn evaluate(&self, submission: &CandidateSubmission) -> Result<Outcome, PlatformError> {
        let mut game = self.game.lock().await;
        self.ensure_initialized(&mut game).await?;

        let outcome = judge(&game.sequence, submission);

        if let Outcome::Accepted { count } = outcome {
            if let Err(e) = self
                .platform
                .mark_success(self.channel_id, submission.message_id)
                .await
            {
                tracing::warn!(
                    "Failed to mark count {} on message {}: {}",
                    count,
                    submission.message_id,
                    e
                );
            }

            game.sequence
                .accept(count, submission.submitter_id, submission.message_id);

            tracing::debug!(
                "Accepted count {} from user {} (message {})",
                count,
                submission.submitter_id,
                submission.message_id
            );

            self.publish(count).await;

            return Ok(outcome);
        }

        drop(game);

        self.reject(submission, &outcome).await;

        Ok(outcome)
    }

    /// Deletes a rejected message and tells its author why.
    async fn reject(&self, submission: &CandidateSubmission, outcome: &Outcome) {
        tracing::debug!(
            "Rejected message {} from user {}: {:?}",
            submission.message_id,
            submission.submitter_id,
            outcome
        );

        if let Err(e) = self
            .platform
            .delete_message(self.channel_id, submission.message_id)
            .await
        {
            tracing::warn!(
                "Failed to delete rejected message {}: {}",
                submission.message_id,
                e
            );
        }

        let Some(violation) = outcome.violation(&submission.raw_text) else {
            return;
        };

        if let Err(e) = self
            .platform
            .notify_user_ephemeral(submission.submitter_id, &violation.to_string())
            .await
        {
            tracing::warn!(
                "Failed to notify user {} about rejected message: {}",
                submission.submitter_id,
                e
            );
        }
    }
}
