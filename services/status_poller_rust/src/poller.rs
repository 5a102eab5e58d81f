use chrono::Utc;
use std::time::Duration;
use tracing::{debug, error, info};

use hwbot_rust_core::clients::{practicum, PracticumClient, TelegramClient};
use hwbot_rust_core::models::HomeworkStatus;
use hwbot_rust_core::PollError;

use crate::formatters;

/// The poller's only persistent state, held on the loop's own stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollState {
    /// Window start for the next fetch. Non-decreasing across iterations.
    pub last_timestamp: i64,
    /// Status seen on the latest successful iteration.
    pub last_status: Option<HomeworkStatus>,
}

impl PollState {
    pub fn starting_now() -> Self {
        Self {
            last_timestamp: Utc::now().timestamp(),
            last_status: None,
        }
    }
}

/// One successful fetch-and-validate pass, ready for the state transition.
#[derive(Debug, Clone)]
struct Snapshot {
    current_date: i64,
    status: HomeworkStatus,
    message: String,
}

pub struct StatusPoller {
    practicum: PracticumClient,
    telegram: TelegramClient,
    interval: Duration,
    state: PollState,
}

impl StatusPoller {
    pub fn new(practicum: PracticumClient, telegram: TelegramClient, interval: Duration) -> Self {
        Self {
            practicum,
            telegram,
            interval,
            state: PollState::starting_now(),
        }
    }

    /// Run forever at a fixed cadence. Every iteration sleeps the full
    /// interval, success or failure; the sleep is the only throttling.
    pub async fn run(mut self) {
        info!(
            "poll loop started (interval={}s from_date={})",
            self.interval.as_secs(),
            self.state.last_timestamp
        );
        loop {
            self.tick().await;
            tokio::time::sleep(self.interval).await;
        }
    }

    async fn tick(&mut self) {
        let outcome = self.poll_once().await;
        match &outcome {
            Ok(snapshot) => info!(
                "homework status: {} (current_date={})",
                snapshot.status.as_str(),
                snapshot.current_date
            ),
            Err(PollError::EmptyList) => info!("no new homework submissions"),
            Err(err) => error!("poll failed: {}", err),
        }

        if let Some(message) = advance(&mut self.state, outcome) {
            self.notify(&message).await;
        }
    }

    /// Fetch, validate, and render one iteration's worth of data.
    async fn poll_once(&self) -> Result<Snapshot, PollError> {
        let resp = self
            .practicum
            .homework_statuses(self.state.last_timestamp)
            .await?;
        let homework = practicum::check_response(&resp)?;
        let current_date = practicum::response_timestamp(&resp)?;
        let message = formatters::render_status_message(&homework)?;
        // render_status_message already rejected anything outside the known set
        let status = HomeworkStatus::parse(homework.status.as_deref().unwrap_or_default())?;
        Ok(Snapshot {
            current_date,
            status,
            message,
        })
    }

    /// Deliver a notification. Provider failures are logged and swallowed so
    /// the loop keeps running.
    async fn notify(&self, message: &str) {
        match self.telegram.send_message(message).await {
            Ok(()) => debug!("sent notification: {:?}", message),
            Err(err) => error!("{}", err),
        }
    }
}

/// Pure state transition for one poll outcome. Returns the notification to
/// send, if any.
///
/// - success: notify only when the status changed, then record it and advance
///   the timestamp (clamped so it never decreases)
/// - empty list: fixed unchanged-status message, state untouched
/// - anything else: generic failure message with the error text, state
///   untouched
fn advance(state: &mut PollState, outcome: Result<Snapshot, PollError>) -> Option<String> {
    match outcome {
        Ok(snapshot) => {
            let changed = state.last_status != Some(snapshot.status);
            state.last_status = Some(snapshot.status);
            state.last_timestamp = state.last_timestamp.max(snapshot.current_date);
            changed.then_some(snapshot.message)
        }
        Err(PollError::EmptyList) => Some(formatters::STATUS_UNCHANGED.to_string()),
        Err(err) => Some(formatters::failure_message(&err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state(ts: i64, status: Option<HomeworkStatus>) -> PollState {
        PollState {
            last_timestamp: ts,
            last_status: status,
        }
    }

    fn snapshot(current_date: i64, status: HomeworkStatus, message: &str) -> Snapshot {
        Snapshot {
            current_date,
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_first_status_notifies() {
        let mut st = state(100, None);
        let msg = advance(
            &mut st,
            Ok(snapshot(1000, HomeworkStatus::Reviewing, "taken for review")),
        );
        assert_eq!(msg.as_deref(), Some("taken for review"));
        assert_eq!(st.last_status, Some(HomeworkStatus::Reviewing));
        assert_eq!(st.last_timestamp, 1000);
    }

    #[test]
    fn test_unchanged_status_is_silent() {
        let mut st = state(1000, Some(HomeworkStatus::Reviewing));
        let msg = advance(
            &mut st,
            Ok(snapshot(1600, HomeworkStatus::Reviewing, "taken for review")),
        );
        assert!(msg.is_none());
        assert_eq!(st.last_timestamp, 1600);
    }

    #[test]
    fn test_changed_status_notifies() {
        let mut st = state(1000, Some(HomeworkStatus::Reviewing));
        let msg = advance(
            &mut st,
            Ok(snapshot(1600, HomeworkStatus::Approved, "approved!")),
        );
        assert_eq!(msg.as_deref(), Some("approved!"));
        assert_eq!(st.last_status, Some(HomeworkStatus::Approved));
    }

    #[test]
    fn test_empty_list_leaves_state_untouched() {
        let mut st = state(1000, Some(HomeworkStatus::Rejected));
        let before = st;
        let msg = advance(&mut st, Err(PollError::EmptyList));
        assert_eq!(msg.as_deref(), Some(formatters::STATUS_UNCHANGED));
        assert_eq!(st, before);
    }

    #[test]
    fn test_error_keeps_state_and_reports() {
        let mut st = state(1000, Some(HomeworkStatus::Reviewing));
        let before = st;
        let msg = advance(&mut st, Err(PollError::Endpoint(500)));
        assert_eq!(
            msg.as_deref(),
            Some("Bot failure: endpoint returned HTTP status 500")
        );
        assert_eq!(st, before);
    }

    #[test]
    fn test_timestamp_never_decreases() {
        let mut st = state(2000, Some(HomeworkStatus::Reviewing));
        advance(
            &mut st,
            Ok(snapshot(1500, HomeworkStatus::Approved, "approved!")),
        );
        assert_eq!(st.last_timestamp, 2000);
    }

    // Full pipeline over the wire shape: validate -> render -> advance,
    // then the same status again on the next poll.
    #[test]
    fn test_approved_scenario() {
        let resp = json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1000,
        });

        let homework = practicum::check_response(&resp).unwrap();
        let current_date = practicum::response_timestamp(&resp).unwrap();
        let message = formatters::render_status_message(&homework).unwrap();
        let status = HomeworkStatus::parse(homework.status.as_deref().unwrap()).unwrap();

        let mut st = state(900, None);
        let first = advance(&mut st, Ok(snapshot(current_date, status, &message)));
        let first = first.expect("first poll must notify");
        assert!(first.contains("hw1"));
        assert!(first.ends_with(HomeworkStatus::Approved.verdict()));
        assert_eq!(st.last_timestamp, 1000);

        // identical status on the next poll: no new notification
        let second = advance(&mut st, Ok(snapshot(1600, status, &message)));
        assert!(second.is_none());
        assert_eq!(st.last_timestamp, 1600);
    }
}
