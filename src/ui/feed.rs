use chrono::{DateTime, Local, Utc};

use crate::domain::types::{Event, FetchResult};

const MISSING_TYPE: &str = "null";
const MISSING_TIME: &str = "unknown time";

/// What the result area should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedView {
    /// No fetch has completed yet
    Empty,
    /// One formatted line per event, upstream order
    Lines(Vec<String>),
    /// Failure message, shown verbatim
    Error(String),
}

pub fn render_result(result: Option<&FetchResult>) -> FeedView {
    match result {
        None => FeedView::Empty,
        Some(FetchResult::Success(events)) => {
            FeedView::Lines(events.iter().map(format_event_line).collect())
        }
        Some(FetchResult::Failure(message)) => FeedView::Error(message.clone()),
    }
}

/// `- {type} by @{login} at {time}`
pub fn format_event_line(event: &Event) -> String {
    let kind = event.kind.as_deref().unwrap_or(MISSING_TYPE);
    let time = event
        .created_at
        .as_ref()
        .map(format_local_time)
        .unwrap_or_else(|| MISSING_TIME.to_string());

    format!("- {} by @{} at {}", kind, event.actor.login, time)
}

/// Local wall-clock time, e.g. `1/1/2024, 12:00:00 AM`
pub fn format_local_time(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}
