use crate::countdown::{self, CountdownView};
use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LABEL: &str = "Year 2030";
/// 2030-01-01T00:00:00Z
pub const DEFAULT_TIMESTAMP_MS: i64 = 1_893_456_000_000;

/// The occasion being counted down to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub label: String,
    pub timestamp_ms: i64,
}

impl Default for Event {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            timestamp_ms: DEFAULT_TIMESTAMP_MS,
        }
    }
}

/// Body of `POST /api/event` and `POST /event`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitRequest {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub date: String,
    /// Client's offset from UTC in minutes, east positive. Used to place a
    /// naive `datetime-local` value on the timeline.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountdownResponse {
    pub label: String,
    pub target_ms: i64,
    pub target: String,
    pub now_ms: i64,
    pub finished: bool,
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl CountdownResponse {
    pub fn new(event: &Event, now_ms: i64) -> Self {
        let CountdownView {
            days,
            hours,
            minutes,
            seconds,
        } = countdown::view(now_ms, event.timestamp_ms);

        let target = DateTime::from_timestamp_millis(event.timestamp_ms)
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default();

        Self {
            label: event.label.clone(),
            target_ms: event.timestamp_ms,
            target,
            now_ms,
            finished: countdown::is_finished(now_ms, event.timestamp_ms),
            days,
            hours,
            minutes,
            seconds,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct IndexQuery {
    /// Comma separated input names to flag, e.g. `label,date`.
    #[serde(default)]
    pub invalid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_for_default_event() {
        let event = Event::default();
        let response = CountdownResponse::new(&event, DEFAULT_TIMESTAMP_MS - 90_123_000);

        assert_eq!(response.label, "Year 2030");
        assert_eq!(response.target, "2030-01-01T00:00:00Z");
        assert!(!response.finished);
        assert_eq!(
            (response.days.as_str(), response.hours.as_str(), response.minutes.as_str(), response.seconds.as_str()),
            ("1", "01", "02", "03")
        );
    }

    #[test]
    fn commit_request_accepts_missing_fields() {
        let request: CommitRequest = serde_json::from_str(r#"{"label": "Trip"}"#).unwrap();
        assert_eq!(request.label, "Trip");
        assert!(request.date.is_empty());
        assert_eq!(request.utc_offset_minutes, None);
    }
}
