use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::models::UNKNOWN;

const DISPLAY_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Format a date-like JSON value as `DD/MM/YYYY, HH:MM:SS`. Absent input
/// yields "Unknown"; present but unparseable input yields "Invalid Date".
pub fn format_timestamp(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return UNKNOWN.to_string();
    };
    if value.is_null() {
        return UNKNOWN.to_string();
    }

    match parse_timestamp(value) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => {
            tracing::warn!("Unparseable submission timestamp: {value}");
            "Invalid Date".to_string()
        }
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_str(s),
        Value::Number(n) => n.as_i64().and_then(parse_epoch),
        _ => None,
    }
}

fn parse_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    s.parse::<i64>().ok().and_then(parse_epoch)
}

/// Millisecond epochs are told apart from second epochs by magnitude;
/// the cutover is far outside any plausible submission date.
fn parse_epoch(n: i64) -> Option<DateTime<Utc>> {
    if n.unsigned_abs() >= 100_000_000_000 {
        DateTime::from_timestamp_millis(n)
    } else {
        DateTime::from_timestamp(n, 0)
    }
}
