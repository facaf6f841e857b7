use chrono::Utc;
use tokio::sync::watch;

use crate::api::PracticumClient;
use crate::error::Error;
use crate::response;
use crate::status;
use crate::telegram::Notify;

pub const NOTHING_TO_REVIEW: &str = "Нет работ для проверки";

/// Loop-driver state, one instance per process. Nothing persists across
/// restarts: on startup the window opens at "now" and both last-seen
/// markers are empty.
#[derive(Debug)]
pub struct LoopState {
    pub last_seen_update: String,
    pub last_sent_message: String,
    pub poll_from: i64,
}

impl LoopState {
    pub fn new(poll_from: i64) -> Self {
        Self {
            last_seen_update: String::new(),
            last_sent_message: String::new(),
            poll_from,
        }
    }
}

/// The fallible part of a cycle: fetch, validate, diff against the last
/// seen update. Returns the cycle's message, which is empty when the
/// newest record is one we already reported.
async fn poll_once(client: &PracticumClient, state: &mut LoopState) -> Result<String, Error> {
    let body = client.fetch_statuses(state.poll_from).await?;
    let homeworks = response::check_response(&body)?;

    let newest = match homeworks.first() {
        Some(record) => record,
        None => return Ok(NOTHING_TO_REVIEW.to_string()),
    };

    let current_update = newest
        .get("date_updated")
        .and_then(|v| v.as_str())
        .ok_or(Error::MissingField("date_updated"))?;

    if current_update == state.last_seen_update {
        tracing::debug!("No new statuses in the response");
        return Ok(String::new());
    }

    let message = status::parse_status(newest)?;
    state.last_seen_update = current_update.to_string();
    Ok(message)
}

/// One full poll/notify cycle. Never fails: any fault becomes the
/// failure-report message, and a failed cycle keeps its polling window;
/// the next iteration retries the same range.
pub async fn run_cycle(client: &PracticumClient, notifier: &dyn Notify, state: &mut LoopState) {
    let message = match poll_once(client, state).await {
        Ok(message) => {
            state.poll_from = Utc::now().timestamp();
            message
        }
        Err(e) => {
            tracing::error!("Cycle failed: {e}");
            format!("Сбой в работе программы: {e}")
        }
    };

    // Failure reports and status updates share the one dedup slot; a
    // repeating fault yields a single message, not one per cycle.
    if !message.is_empty() && message != state.last_sent_message {
        match notifier.send(&message).await {
            Ok(()) => state.last_sent_message = message,
            Err(e) => tracing::error!("Failed to deliver notification: {e}"),
        }
    }
}

/// Polls until the shutdown signal flips.
pub async fn run(
    client: &PracticumClient,
    notifier: &dyn Notify,
    poll_interval: std::time::Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut state = LoopState::new(Utc::now().timestamp());

    tracing::info!("Polling loop started (interval {}s)", poll_interval.as_secs());

    loop {
        if *shutdown.borrow() {
            break;
        }

        run_cycle(client, notifier, &mut state).await;

        tokio::select! {
            _ = tokio::time::sleep(poll_interval) => {}
            _ = shutdown.changed() => {}
        }
    }

    tracing::info!("Polling loop stopped");
}
