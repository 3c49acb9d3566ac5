use serde::Serialize;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left until an event, split into whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Remaining {
    pub days: i64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Remaining {
    /// Clamps to zero once `target_ms` is reached.
    pub fn between(now_ms: i64, target_ms: i64) -> Self {
        let left = target_ms.saturating_sub(now_ms).max(0);
        Self {
            days: left / MS_PER_DAY,
            hours: (left / MS_PER_HOUR % 24) as u8,
            minutes: (left / MS_PER_MINUTE % 60) as u8,
            seconds: (left / MS_PER_SECOND % 60) as u8,
        }
    }
}

/// The four strings shown on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountdownView {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl From<Remaining> for CountdownView {
    fn from(remaining: Remaining) -> Self {
        Self {
            days: remaining.days.to_string(),
            hours: format!("{:02}", remaining.hours),
            minutes: format!("{:02}", remaining.minutes),
            seconds: format!("{:02}", remaining.seconds),
        }
    }
}

pub fn is_finished(now_ms: i64, target_ms: i64) -> bool {
    target_ms <= now_ms
}

pub fn view(now_ms: i64, target_ms: i64) -> CountdownView {
    Remaining::between(now_ms, target_ms).into()
}
