//! Sequence recovery from channel history.
//!
//! The count is never persisted; it is rebuilt from the success markers in the most
//! recent messages of the counting channel. Instead of trusting the highest marked
//! number, recovery splits the marked messages into unbroken `n, n + 1, ...` chains
//! and follows the one ending in the newest marker. Stale or duplicated markers left
//! by earlier bot versions, and runs from before an administrative reset, cannot
//! inflate the count.
//!
//! The window size trades startup cost (one request per 100 messages) against accuracy:
//! when the game start lies outside the window the chain starts at the oldest visible
//! link and recovery reports a gap instead of failing.

use dioxus_logger::tracing;

use crate::{
    error::platform::PlatformError,
    model::counting::{HistoryMessage, SequenceState},
};

use super::platform::ChatPlatform;

/// Result of a recovery pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recovery {
    /// Reconstructed state.
    pub state: SequenceState,
    /// Number of marked messages forming the recovered chain.
    pub chain_length: usize,
    /// The chain does not start at 1, so the window did not reach the game start.
    pub gap: bool,
}

/// Rebuilds the sequence state from a window of channel history.
///
/// Only the returned value carries state; the recoverer never touches the game itself.
pub struct HistoryRecoverer<'a> {
    platform: &'a dyn ChatPlatform,
    channel_id: u64,
    window: u16,
}

impl<'a> HistoryRecoverer<'a> {
    /// Creates a new HistoryRecoverer.
    ///
    /// # Arguments
    /// - `platform` - Chat platform to fetch history from
    /// - `channel_id` - Counting channel
    /// - `window` - Number of most recent messages to scan
    ///
    /// # Returns
    /// - `HistoryRecoverer` - New recoverer instance
    pub fn new(platform: &'a dyn ChatPlatform, channel_id: u64, window: u16) -> Self {
        Self {
            platform,
            channel_id,
            window,
        }
    }

    /// Fetches the history window and reconstructs the state from it.
    ///
    /// # Arguments
    /// - `excluded_ids` - Messages to ignore even if the platform still returns them,
    ///   used for messages known to be deleted
    ///
    /// # Returns
    /// - `Ok(Recovery)` - Best-effort reconstruction
    /// - `Err(PlatformError)` - History could not be fetched
    pub async fn recover(&self, excluded_ids: &[u64]) -> Result<Recovery, PlatformError> {
        let mut history = self
            .platform
            .fetch_history(self.channel_id, self.window)
            .await?;
        history.retain(|message| !excluded_ids.contains(&message.message_id));

        let recovery = reconstruct(&history);

        if recovery.gap {
            tracing::warn!(
                "Recovered count {} in channel {} from a chain that does not start at 1; \
                 the {} message window may not reach the start of the game",
                recovery.state.current_count,
                self.channel_id,
                self.window
            );
        }

        Ok(recovery)
    }
}

/// A run of consecutive marked numbers found in history.
struct Chain {
    state: SequenceState,
    start: u64,
    length: usize,
}

/// Reconstructs the sequence state from history entries in any order.
///
/// Candidates are human-authored messages carrying the bot's success marker and a
/// leading number. They are walked oldest-first (ties broken by message id). Each
/// candidate extends the most recent chain whose head is exactly one below it, or
/// starts a new chain. The chain ending in the newest candidate wins, so a stale
/// marker or a pre-reset run left in the window cannot take over the count.
///
/// # Arguments
/// - `history` - Fetched messages
///
/// # Returns
/// - `Recovery` - `(0, None, None)` when no candidate exists, otherwise the head of the
///   chain holding the newest candidate
pub fn reconstruct(history: &[HistoryMessage]) -> Recovery {
    let mut candidates: Vec<(&HistoryMessage, u64)> = history
        .iter()
        .filter(|message| message.has_success_marker && !message.author_is_bot)
        .filter_map(|message| message.parsed_number().map(|number| (message, number)))
        .collect();

    candidates.sort_by_key(|(message, _)| (message.timestamp, message.message_id));

    let mut chains: Vec<Chain> = Vec::new();
    let mut newest: Option<usize> = None;

    for (message, number) in candidates {
        let extends = chains
            .iter()
            .rposition(|chain| chain.state.next_expected() == number);

        let index = match extends {
            Some(index) => {
                chains[index].length += 1;
                index
            }
            None => {
                chains.push(Chain {
                    state: SequenceState::default(),
                    start: number,
                    length: 1,
                });
                chains.len() - 1
            }
        };

        chains[index]
            .state
            .accept(number, message.author_id, message.message_id);
        newest = Some(index);
    }

    match newest.map(|index| &chains[index]) {
        Some(chain) => Recovery {
            state: chain.state,
            chain_length: chain.length,
            gap: chain.start != 1,
        },
        None => Recovery {
            state: SequenceState::default(),
            chain_length: 0,
            gap: false,
        },
    }
}
