//! Ready event handler for bot initialization.
//!
//! Fires after every successful gateway handshake, including reconnects. Recovers the
//! counting state if that has not happened yet, refreshes the count display, and sets
//! up the statistics voice channels.

use dioxus_logger::tracing;
use serenity::all::{ActivityData, Context, Ready};

use super::Handler;

/// Handles the ready event when the bot connects to Discord.
///
/// A failed recovery is not fatal: the counting engine retries on the next message.
///
/// # Arguments
/// - `handler` - Event handler holding the services
/// - `ctx` - Discord context for setting activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(handler: &Handler, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("the count")));

    match handler.counting.initialize().await {
        Ok(status) => {
            tracing::info!(
                "Counting ready: current count {}, next number {}",
                status.current_count,
                status.next_expected
            );
            handler.counting.republish().await;
        }
        Err(e) => {
            tracing::error!(
                "Failed to recover count from history, retrying on the next message: {}",
                e
            );
        }
    }

    if let Err(e) = handler.server_stats.refresh().await {
        tracing::error!("Failed to set up server statistics channels: {}", e);
    }
}
