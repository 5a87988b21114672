//! Counting game engine.
//!
//! This module provides the `CountingService`, which owns the sequence state of one
//! counting channel and serializes every operation on it behind a single async lock:
//!
//! - `validator` - Evaluates inbound submissions and applies accepted counts
//! - `recovery` - Rebuilds the state from the channel's recent history
//! - `retraction` - Re-recovers when the anchor message is deleted
//! - `platform` - Traits for the chat platform and the count display surface
//!
//! The lock is held from parsing until the accepted state is published, so two
//! near-simultaneous submissions of the same number can never both be accepted.
//! Platform failures are logged and never roll back a decided state.

pub mod platform;
pub mod recovery;
pub mod retraction;
pub mod validator;

#[cfg(test)]
mod test;

use dioxus_logger::tracing;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    error::platform::PlatformError,
    model::counting::{CountingStatus, SequenceState},
};

use self::{
    platform::{ChatPlatform, StatsPublisher},
    recovery::HistoryRecoverer,
};

/// Sequence state plus whether it has been seeded from history yet.
struct GameState {
    sequence: SequenceState,
    initialized: bool,
}

/// Service owning the counting game of a single channel.
///
/// Shared between the gateway event handler, the chat commands, and the admin API
/// through an `Arc`.
pub struct CountingService {
    /// Channel the game is played in
    channel_id: u64,
    /// Number of recent messages scanned during recovery
    history_window: u16,
    platform: Arc<dyn ChatPlatform>,
    publisher: Arc<dyn StatsPublisher>,
    game: Mutex<GameState>,
}

impl CountingService {
    /// Creates a new, uninitialized CountingService.
    ///
    /// The state is seeded from channel history by `initialize`, or lazily by the first
    /// evaluated submission.
    ///
    /// # Arguments
    /// - `channel_id` - Counting channel
    /// - `history_window` - Number of recent messages scanned during recovery
    /// - `platform` - Chat platform used for history, markers, deletions, and notices
    /// - `publisher` - Display surface notified of every new count
    ///
    /// # Returns
    /// - `CountingService` - New service with an empty, uninitialized state
    pub fn new(
        channel_id: u64,
        history_window: u16,
        platform: Arc<dyn ChatPlatform>,
        publisher: Arc<dyn StatsPublisher>,
    ) -> Self {
        Self {
            channel_id,
            history_window,
            platform,
            publisher,
            game: Mutex::new(GameState {
                sequence: SequenceState::default(),
                initialized: false,
            }),
        }
    }

    pub fn channel_id(&self) -> u64 {
        self.channel_id
    }

    /// Seeds the state from channel history if that has not happened yet.
    ///
    /// Repeated calls (for example on gateway reconnects) leave an initialized state
    /// untouched.
    ///
    /// # Returns
    /// - `Ok(CountingStatus)` - Status after initialization
    /// - `Err(PlatformError)` - History could not be fetched; the game stays uninitialized
    pub async fn initialize(&self) -> Result<CountingStatus, PlatformError> {
        let mut game = self.game.lock().await;
        self.ensure_initialized(&mut game).await?;

        Ok(CountingStatus::new(&game.sequence, game.initialized))
    }

    /// Publishes the current count again if the game is initialized.
    ///
    /// Used after reconnecting, when the display surface may still show a value from
    /// before the restart.
    pub async fn republish(&self) {
        let game = self.game.lock().await;
        if game.initialized {
            self.publish(game.sequence.current_count).await;
        }
    }

    /// Current status of the game.
    pub async fn status(&self) -> CountingStatus {
        let game = self.game.lock().await;
        CountingStatus::new(&game.sequence, game.initialized)
    }

    /// Sets the count to `new_count`, bypassing validation.
    ///
    /// Clears the last contributor and anchor, and marks the state as initialized so a
    /// later recovery does not overwrite the administrative decision. The new count is
    /// published to the display surface.
    ///
    /// # Arguments
    /// - `new_count` - Count to continue from; the next accepted number is `new_count + 1`
    ///
    /// # Returns
    /// - `CountingStatus` - Status after the reset
    pub async fn force_reset(&self, new_count: u64) -> CountingStatus {
        let mut game = self.game.lock().await;
        let old_count = game.sequence.current_count;

        game.sequence = SequenceState::reset_to(new_count);
        game.initialized = true;

        tracing::info!(
            "Count in channel {} reset from {} to {}",
            self.channel_id,
            old_count,
            new_count
        );

        self.publish(new_count).await;

        CountingStatus::new(&game.sequence, game.initialized)
    }

    /// Runs recovery when the state has not been seeded yet.
    async fn ensure_initialized(&self, game: &mut GameState) -> Result<(), PlatformError> {
        if game.initialized {
            return Ok(());
        }

        let recovery = self.recoverer().recover(&[]).await?;

        game.sequence = recovery.state;
        game.initialized = true;

        tracing::info!(
            "Counting initialized in channel {}: count {} (chain of {} marked messages)",
            self.channel_id,
            recovery.state.current_count,
            recovery.chain_length
        );

        Ok(())
    }

    fn recoverer(&self) -> HistoryRecoverer<'_> {
        HistoryRecoverer::new(self.platform.as_ref(), self.channel_id, self.history_window)
    }

    /// Publishes a count, logging instead of failing.
    async fn publish(&self, count: u64) {
        if let Err(e) = self.publisher.publish(count).await {
            tracing::warn!("Failed to publish count {}: {}", count, e);
        }
    }
}
