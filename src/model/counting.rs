//! Counting game domain models.
//!
//! Provides the sequence state owned by the counting service, the per-message
//! submission and history types consumed by validation and recovery, and the
//! outcomes reported back to the event handlers.

use chrono::{DateTime, Utc};
use serenity::all::{Message, ReactionType};

use crate::{
    error::counting::CountingViolation,
    model::api::CountingStatusDto,
    util::parse::{parse_leading_number, preview},
};

/// Reaction the bot places on every accepted count.
pub const SUCCESS_MARKER: &str = "✅";

/// Characters of a rejected message quoted back in the parse-error notice.
const NOTICE_PREVIEW_CHARS: usize = 50;

/// Current head of the counting chain.
///
/// `last_contributor_id` and `anchor_message_id` are `None` at game start, after an
/// administrative reset, and when recovery found no marked message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceState {
    /// Last accepted number.
    pub current_count: u64,
    /// Who submitted `current_count`.
    pub last_contributor_id: Option<u64>,
    /// Message carrying the success marker for `current_count`.
    pub anchor_message_id: Option<u64>,
}

impl SequenceState {
    /// State after a reset to `count`, with no contributor or anchor.
    pub fn reset_to(count: u64) -> Self {
        Self {
            current_count: count,
            last_contributor_id: None,
            anchor_message_id: None,
        }
    }

    /// The only number the game accepts next.
    pub fn next_expected(&self) -> u64 {
        self.current_count.saturating_add(1)
    }

    /// Folds an accepted submission into the state.
    pub fn accept(&mut self, count: u64, contributor_id: u64, message_id: u64) {
        self.current_count = count;
        self.last_contributor_id = Some(contributor_id);
        self.anchor_message_id = Some(message_id);
    }
}

/// A message posted in the counting channel, awaiting evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSubmission {
    pub submitter_id: u64,
    pub raw_text: String,
    pub message_id: u64,
    pub received_at: DateTime<Utc>,
}

impl CandidateSubmission {
    /// Builds a submission from a gateway message.
    pub fn from_message(message: &Message) -> Self {
        Self {
            submitter_id: message.author.id.get(),
            raw_text: message.content.clone(),
            message_id: message.id.get(),
            received_at: message.timestamp.to_utc(),
        }
    }

    /// Leading integer of the message text, if any.
    pub fn parsed_number(&self) -> Option<u64> {
        parse_leading_number(&self.raw_text)
    }
}

/// One entry of the counting channel's history as seen by recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryMessage {
    pub message_id: u64,
    pub author_id: u64,
    pub author_is_bot: bool,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Whether the bot itself placed the success marker on this message.
    pub has_success_marker: bool,
}

impl HistoryMessage {
    /// Builds a history entry from a fetched message.
    ///
    /// Only a success reaction placed by the current bot user counts as a marker, so
    /// users cannot forge counts by reacting themselves.
    pub fn from_message(message: &Message) -> Self {
        let has_success_marker = message.reactions.iter().any(|reaction| {
            reaction.me
                && matches!(
                    &reaction.reaction_type,
                    ReactionType::Unicode(emoji) if emoji == SUCCESS_MARKER
                )
        });

        Self {
            message_id: message.id.get(),
            author_id: message.author.id.get(),
            author_is_bot: message.author.bot,
            text: message.content.clone(),
            timestamp: message.timestamp.to_utc(),
            has_success_marker,
        }
    }

    /// Leading integer of the message text, if any.
    pub fn parsed_number(&self) -> Option<u64> {
        parse_leading_number(&self.text)
    }
}

/// Result of evaluating one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The submission became the new head of the chain.
    Accepted { count: u64 },
    /// The message does not start with a number.
    RejectedNotNumeric,
    /// The number is not the successor of the current count.
    RejectedWrongNumber { submitted: u64, expected: u64 },
    /// The submitter also produced the current count.
    RejectedRepeatSubmitter,
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }

    /// Rejection reason for the submitter, `None` when accepted.
    ///
    /// # Arguments
    /// - `raw_text` - Text of the evaluated message, quoted in parse-error notices
    pub fn violation(&self, raw_text: &str) -> Option<CountingViolation> {
        match *self {
            Outcome::Accepted { .. } => None,
            Outcome::RejectedNotNumeric => Some(CountingViolation::ParseError {
                preview: preview(raw_text, NOTICE_PREVIEW_CHARS),
            }),
            Outcome::RejectedWrongNumber {
                submitted,
                expected,
            } => Some(CountingViolation::SequenceViolation {
                submitted,
                expected,
            }),
            Outcome::RejectedRepeatSubmitter => Some(CountingViolation::TurnViolation),
        }
    }
}

/// Snapshot of the game for administrative surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountingStatus {
    pub current_count: u64,
    pub next_expected: u64,
    pub last_contributor_id: Option<u64>,
    pub initialized: bool,
}

impl CountingStatus {
    pub fn new(state: &SequenceState, initialized: bool) -> Self {
        Self {
            current_count: state.current_count,
            next_expected: state.next_expected(),
            last_contributor_id: state.last_contributor_id,
            initialized,
        }
    }

    pub fn into_dto(self) -> CountingStatusDto {
        CountingStatusDto {
            current_count: self.current_count,
            next_expected: self.next_expected,
            last_contributor_id: self.last_contributor_id.map(|id| id.to_string()),
            initialized: self.initialized,
        }
    }
}

/// What happened when the anchor message disappeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retraction {
    /// Count carried by the deleted anchor.
    pub retracted_count: u64,
    /// Author of the deleted anchor.
    pub retracted_contributor_id: Option<u64>,
    /// State rebuilt from the remaining history.
    pub restored: SequenceState,
}

impl Retraction {
    /// Correction notice posted in the counting channel.
    pub fn notice(&self) -> String {
        let contributor = self
            .retracted_contributor_id
            .map(|id| format!("<@{}>", id))
            .unwrap_or_else(|| "an unknown user".to_string());

        format!(
            "⚠️ The message with number {} from {} was deleted. The count is back at {}, the next number is {}.",
            self.retracted_count,
            contributor,
            self.restored.current_count,
            self.restored.next_expected()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::TestMessageBuilder;

    /// Tests that only the bot's own success reaction counts as a marker.
    ///
    /// Expected: marker detected for `me` reactions of ✅ only
    #[test]
    fn detects_success_marker_placed_by_bot() {
        let marked = TestMessageBuilder::new(10, 42, "5")
            .reaction(SUCCESS_MARKER, true)
            .build();
        let user_marked = TestMessageBuilder::new(11, 42, "6")
            .reaction(SUCCESS_MARKER, false)
            .build();
        let other_emoji = TestMessageBuilder::new(12, 42, "7")
            .reaction("🎉", true)
            .build();

        assert!(HistoryMessage::from_message(&marked).has_success_marker);
        assert!(!HistoryMessage::from_message(&user_marked).has_success_marker);
        assert!(!HistoryMessage::from_message(&other_emoji).has_success_marker);
    }

    /// Tests conversion of a gateway message into a submission.
    ///
    /// Expected: ids, text, and parsed number carried over
    #[test]
    fn builds_submission_from_message() {
        let message = TestMessageBuilder::new(99, 7, "12 and counting").build();

        let submission = CandidateSubmission::from_message(&message);

        assert_eq!(submission.message_id, 99);
        assert_eq!(submission.submitter_id, 7);
        assert_eq!(submission.parsed_number(), Some(12));
    }

    /// Tests that bot authorship is preserved on history entries.
    ///
    /// Expected: author_is_bot is true
    #[test]
    fn keeps_bot_authorship() {
        let message = TestMessageBuilder::new(1, 2, "3").bot_author(true).build();

        assert!(HistoryMessage::from_message(&message).author_is_bot);
    }

    /// Tests the reason-specific notices for each rejection.
    ///
    /// Expected: sequence notice names the expected number
    #[test]
    fn rejection_notices_name_the_violation() {
        let wrong = Outcome::RejectedWrongNumber {
            submitted: 9,
            expected: 6,
        }
        .violation("9")
        .unwrap();
        assert!(wrong.to_string().contains("next number is 6"));

        let not_numeric = Outcome::RejectedNotNumeric.violation("hello").unwrap();
        assert!(not_numeric.to_string().contains("'hello'"));

        assert_eq!(
            Outcome::RejectedRepeatSubmitter.violation("6"),
            Some(CountingViolation::TurnViolation)
        );
        assert_eq!(Outcome::Accepted { count: 6 }.violation("6"), None);
    }

    /// Tests the correction notice text.
    ///
    /// Expected: names the contributor, retracted number, restored and next number
    #[test]
    fn retraction_notice_names_contributor_and_numbers() {
        let retraction = Retraction {
            retracted_count: 6,
            retracted_contributor_id: Some(222),
            restored: SequenceState {
                current_count: 5,
                last_contributor_id: Some(111),
                anchor_message_id: Some(5),
            },
        };

        let notice = retraction.notice();

        assert!(notice.contains("number 6"));
        assert!(notice.contains("<@222>"));
        assert!(notice.contains("back at 5"));
        assert!(notice.contains("next number is 6"));
    }
}
