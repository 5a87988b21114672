//! Anchor retraction handling.
//!
//! Only the message currently credited with the count matters: deleting any earlier
//! accepted message leaves the head of the chain unchanged. When the anchor goes away
//! the state is rebuilt from the remaining history and a correction notice is posted.

use dioxus_logger::tracing;

use crate::{error::platform::PlatformError, model::counting::Retraction};

use super::CountingService;

impl CountingService {
    /// Handles deletion of a single message in the counting channel.
    ///
    /// # Arguments
    /// - `message_id` - Id of the deleted message
    ///
    /// # Returns
    /// - `Ok(Some(Retraction))` - The anchor was deleted and the state was re-recovered
    /// - `Ok(None)` - Not the anchor (or the game is not initialized), nothing changed
    /// - `Err(PlatformError)` - The anchor was deleted but history could not be fetched;
    ///   the game is marked uninitialized and recovers on the next submission
    pub async fn on_message_deleted(
        &self,
        message_id: u64,
    ) -> Result<Option<Retraction>, PlatformError> {
        self.on_messages_deleted(&[message_id]).await
    }

    /// Handles a bulk deletion in the counting channel.
    ///
    /// Same rules as `on_message_deleted`; the state is re-recovered at most once.
    pub async fn on_messages_deleted(
        &self,
        message_ids: &[u64],
    ) -> Result<Option<Retraction>, PlatformError> {
        let mut game = self.game.lock().await;

        if !game.initialized {
            return Ok(None);
        }

        let Some(anchor_id) = game.sequence.anchor_message_id else {
            return Ok(None);
        };

        if !message_ids.contains(&anchor_id) {
            return Ok(None);
        }

        let retracted_count = game.sequence.current_count;
        let retracted_contributor_id = game.sequence.last_contributor_id;

        tracing::info!(
            "Anchor message {} for count {} was deleted, recovering from history",
            anchor_id,
            retracted_count
        );

        let recovery = match self.recoverer().recover(message_ids).await {
            Ok(recovery) => recovery,
            Err(e) => {
                game.sequence.anchor_message_id = None;
                game.sequence.last_contributor_id = None;
                game.initialized = false;

                tracing::error!(
                    "Failed to recover count after anchor {} was deleted: {}",
                    anchor_id,
                    e
                );

                return Err(e);
            }
        };

        game.sequence = recovery.state;

        let retraction = Retraction {
            retracted_count,
            retracted_contributor_id,
            restored: recovery.state,
        };

        self.publish(retraction.restored.current_count).await;

        drop(game);

        if let Err(e) = self
            .platform
            .send_notice(self.channel_id, &retraction.notice())
            .await
        {
            tracing::warn!("Failed to post count correction notice: {}", e);
        }

        Ok(Some(retraction))
    }
}
