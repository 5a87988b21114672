use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use chrono::{DateTime, TimeZone, Utc};
use serenity::async_trait;

use crate::{
    error::platform::PlatformError,
    model::counting::{CandidateSubmission, HistoryMessage},
    service::counting::{
        platform::{ChatPlatform, StatsPublisher},
        CountingService,
    },
};


const CHANNEL_ID: u64 = 1;
const WINDOW: u16 = 200;

/// Platform call recorded by `FakePlatform`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Fetch,
    Mark(u64),
    Delete(u64),
    Notify(u64, String),
    Notice(String),
}

/// In-memory chat channel.
///
/// Keeps messages oldest-first, applies markers and deletions to them, and records
/// every call in order.
#[derive(Default)]
struct FakePlatform {
    messages: Mutex<Vec<HistoryMessage>>,
    calls: Mutex<Vec<Call>>,
    fail_fetch: AtomicBool,
    fail_writes: AtomicBool,
    mark_delay: Option<Duration>,
}

impl FakePlatform {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with_mark_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            mark_delay: Some(delay),
            ..Default::default()
        })
    }

    /// Adds an unmarked human message and returns it as a submission.
    fn post(&self, message_id: u64, author_id: u64, text: &str) -> CandidateSubmission {
        self.push(history_message(message_id, author_id, text, false));

        CandidateSubmission {
            submitter_id: author_id,
            raw_text: text.to_string(),
            message_id,
            received_at: timestamp(message_id),
        }
    }

    /// Adds a message that already carries the success marker.
    fn seed_marked(&self, message_id: u64, author_id: u64, text: &str) {
        self.push(history_message(message_id, author_id, text, true));
    }

    fn push(&self, message: HistoryMessage) {
        self.messages.lock().unwrap().push(message);
    }

    /// Removes a message from the channel without notifying anyone.
    fn remove(&self, message_id: u64) {
        self.messages
            .lock()
            .unwrap()
            .retain(|message| message.message_id != message_id);
    }

    fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn fetch_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| **call == Call::Fetch)
            .count()
    }

    fn is_marked(&self, message_id: u64) -> bool {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .any(|message| message.message_id == message_id && message.has_success_marker)
    }

    fn contains(&self, message_id: u64) -> bool {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .any(|message| message.message_id == message_id)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn write_result(&self, operation: &'static str) -> Result<(), PlatformError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PlatformError::Timeout {
                operation,
                after: Duration::from_secs(10),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    async fn fetch_history(
        &self,
        _channel_id: u64,
        limit: u16,
    ) -> Result<Vec<HistoryMessage>, PlatformError> {
        self.record(Call::Fetch);

        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(PlatformError::Timeout {
                operation: "fetch_history",
                after: Duration::from_secs(10),
            });
        }

        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn mark_success(&self, _channel_id: u64, message_id: u64) -> Result<(), PlatformError> {
        if let Some(delay) = self.mark_delay {
            tokio::time::sleep(delay).await;
        }

        self.record(Call::Mark(message_id));
        self.write_result("mark_success")?;

        for message in self.messages.lock().unwrap().iter_mut() {
            if message.message_id == message_id {
                message.has_success_marker = true;
            }
        }

        Ok(())
    }

    async fn delete_message(
        &self,
        _channel_id: u64,
        message_id: u64,
    ) -> Result<(), PlatformError> {
        self.record(Call::Delete(message_id));
        self.write_result("delete_message")?;

        self.remove(message_id);

        Ok(())
    }

    async fn notify_user_ephemeral(&self, user_id: u64, text: &str) -> Result<(), PlatformError> {
        self.record(Call::Notify(user_id, text.to_string()));
        self.write_result("notify_user_ephemeral")
    }

    async fn send_notice(&self, _channel_id: u64, text: &str) -> Result<(), PlatformError> {
        self.record(Call::Notice(text.to_string()));
        self.write_result("send_notice")
    }
}

/// Publisher remembering every published count.
#[derive(Default)]
struct RecordingPublisher {
    published: Mutex<Vec<u64>>,
    fail: AtomicBool,
}

impl RecordingPublisher {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn published(&self) -> Vec<u64> {
        self.published.lock().unwrap().clone()
    }

    /// Makes every publish fail as if the display worker had stopped.
    fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl StatsPublisher for RecordingPublisher {
    async fn publish(&self, count: u64) -> Result<(), PlatformError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PlatformError::PublisherClosed);
        }

        self.published.lock().unwrap().push(count);
        Ok(())
    }
}

fn service(platform: &Arc<FakePlatform>, publisher: &Arc<RecordingPublisher>) -> CountingService {
    CountingService::new(CHANNEL_ID, WINDOW, platform.clone(), publisher.clone())
}

/// Message timestamps follow message ids, one second apart.
fn timestamp(message_id: u64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        + chrono::Duration::seconds(message_id as i64)
}

fn history_message(message_id: u64, author_id: u64, text: &str, marked: bool) -> HistoryMessage {
    HistoryMessage {
        message_id,
        author_id,
        author_is_bot: false,
        text: text.to_string(),
        timestamp: timestamp(message_id),
        has_success_marker: marked,
    }
}
