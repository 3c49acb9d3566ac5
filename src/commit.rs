use crate::models::{CommitRequest, Event};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

/// Same cap as the label input's `maxlength`.
pub const LABEL_MAX_CHARS: usize = 18;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Label,
    Date,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Label => "label",
            Field::Date => "date",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "label" => Some(Field::Label),
            "date" => Some(Field::Date),
            _ => None,
        }
    }
}

/// A commit that failed one or both checks. Nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRejection {
    pub fields: Vec<Field>,
}

impl CommitRejection {
    pub fn query(&self) -> String {
        self.fields
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Display for CommitRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reasons: Vec<&str> = self
            .fields
            .iter()
            .map(|field| match field {
                Field::Label => "label must not be empty",
                Field::Date => "date must be a valid time in the future",
            })
            .collect();
        f.write_str(&reasons.join("; "))
    }
}

impl std::error::Error for CommitRejection {}

#[derive(Serialize)]
struct RejectionBody<'a> {
    error: String,
    fields: &'a [Field],
}

impl IntoResponse for CommitRejection {
    fn into_response(self) -> Response {
        let body = RejectionBody {
            error: self.to_string(),
            fields: &self.fields,
        };
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

/// Checks a proposed label/date pair against `now_ms`.
///
/// Both checks always run so every bad input can be flagged at once.
pub fn validate(now_ms: i64, request: &CommitRequest) -> Result<Event, CommitRejection> {
    let mut fields = Vec::new();

    let label: String = request.label.chars().take(LABEL_MAX_CHARS).collect();
    if label.is_empty() {
        fields.push(Field::Label);
    }

    let timestamp_ms = parse_target(&request.date, request.utc_offset_minutes)
        .filter(|&target| target > now_ms);
    if timestamp_ms.is_none() {
        fields.push(Field::Date);
    }

    match timestamp_ms {
        Some(timestamp_ms) if fields.is_empty() => Ok(Event {
            label,
            timestamp_ms,
        }),
        _ => Err(CommitRejection { fields }),
    }
}

/// Parses a user-entered target time into epoch milliseconds.
///
/// Values without an offset are read in `utc_offset_minutes` (east of UTC)
/// when given, else in the server's local zone.
pub fn parse_target(input: &str, utc_offset_minutes: Option<i32>) -> Option<i64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(input) {
        return Some(at.timestamp_millis());
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    match utc_offset_minutes {
        Some(minutes) => {
            let offset = FixedOffset::east_opt(minutes.checked_mul(60)?)?;
            offset
                .from_local_datetime(&naive)
                .single()
                .map(|at| at.timestamp_millis())
        }
        None => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|at| at.timestamp_millis()),
    }
}
