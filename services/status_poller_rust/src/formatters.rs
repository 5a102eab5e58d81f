// User-facing message rendering.

use hwbot_rust_core::models::{HomeworkStatus, RawHomework};
use hwbot_rust_core::PollError;

/// Sent when the API has no new submissions for the polled window.
pub const STATUS_UNCHANGED: &str = "Homework status has not changed";

/// Render the status-change notification for one homework record.
///
/// The record arrives raw off the wire, so both fields are checked here:
/// a missing name is a shape error, a missing or undocumented status is an
/// unknown-status error.
pub fn render_status_message(homework: &RawHomework) -> Result<String, PollError> {
    let name = homework
        .homework_name
        .as_deref()
        .ok_or_else(|| PollError::Shape("missing \"homework_name\" key".to_string()))?;

    let status = HomeworkStatus::parse(homework.status.as_deref().unwrap_or_default())?;

    Ok(format!(
        "Status changed for \"{}\". {}",
        name,
        status.verdict()
    ))
}

/// Generic failure notification wrapping the error text.
pub fn failure_message(err: &PollError) -> String {
    format!("Bot failure: {err}")
}
