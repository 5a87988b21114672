//! Count display in a voice channel name.
//!
//! Discord rate limits channel renames heavily, so publishing never waits for the
//! rename. The latest count is stored in a `watch` channel and a background worker
//! renames the channel whenever it gets the chance; intermediate values written
//! while a rename is pending are skipped. A failed rename is retried after
//! `RENAME_RETRY_DELAY` unless a newer count arrives first.

use dioxus_logger::tracing;
use serenity::{
    all::{ChannelId, EditChannel},
    async_trait,
    http::Http,
};
use std::{future::Future, sync::Arc, time::Duration};
use tokio::sync::watch;

use crate::{error::platform::PlatformError, service::counting::platform::StatsPublisher};

const RENAME_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Voice channel name displaying `count`.
pub fn count_label(count: u64) -> String {
    format!("🔢 Count: {}", count)
}

/// Publishes the count into the name of a voice channel.
pub struct VoiceLabelPublisher {
    sender: watch::Sender<Option<u64>>,
}

impl VoiceLabelPublisher {
    /// Starts the rename worker for `channel_id` and returns its publisher.
    ///
    /// The worker stops once the publisher is dropped.
    ///
    /// # Arguments
    /// - `http` - Discord HTTP client
    /// - `channel_id` - Voice channel to rename
    ///
    /// # Returns
    /// - `VoiceLabelPublisher` - Publisher feeding the worker
    pub fn spawn(http: Arc<Http>, channel_id: u64) -> Self {
        let (sender, receiver) = watch::channel(None);

        let rename = move |count: u64| {
            let http = http.clone();
            async move {
                ChannelId::new(channel_id)
                    .edit(&http, EditChannel::new().name(count_label(count)))
                    .await
                    .map(|_| ())
                    .map_err(PlatformError::from)
            }
        };

        tokio::spawn(run_rename_worker(
            channel_id,
            receiver,
            RENAME_RETRY_DELAY,
            rename,
        ));

        Self { sender }
    }
}

#[async_trait]
impl StatsPublisher for VoiceLabelPublisher {
    async fn publish(&self, count: u64) -> Result<(), PlatformError> {
        self.sender
            .send(Some(count))
            .map_err(|_| PlatformError::PublisherClosed)
    }
}

/// Renames the channel to the most recent published count until the sender is dropped.
///
/// A count whose rename failed stays pending and is retried after `retry_delay`, or
/// replaced by a newer count if one arrives sooner.
async fn run_rename_worker<F, Fut>(
    channel_id: u64,
    mut receiver: watch::Receiver<Option<u64>>,
    retry_delay: Duration,
    rename: F,
) where
    F: Fn(u64) -> Fut,
    Fut: Future<Output = Result<(), PlatformError>>,
{
    let mut written: Option<u64> = None;

    loop {
        let pending = match *receiver.borrow_and_update() {
            Some(count) if written != Some(count) => Some(count),
            _ => None,
        };

        if let Some(count) = pending {
            match rename(count).await {
                Ok(()) => {
                    tracing::debug!("Count voice channel now shows {}", count);
                    written = Some(count);
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to rename count voice channel {} to {}: {}",
                        channel_id,
                        count,
                        e
                    );

                    tokio::select! {
                        changed = receiver.changed() => {
                            if changed.is_err() {
                                break;
                            }
                        }
                        _ = tokio::time::sleep(retry_delay) => {}
                    }
                    continue;
                }
            }
        }

        if receiver.changed().await.is_err() {
            break;
        }
    }

    tracing::debug!("Count voice channel worker for {} stopped", channel_id);
}

/// Publisher used when no count voice channel is configured.
pub struct LogOnlyPublisher;

#[async_trait]
impl StatsPublisher for LogOnlyPublisher {
    async fn publish(&self, count: u64) -> Result<(), PlatformError> {
        tracing::debug!("Count is now {}", count);
        Ok(())
    }
}
