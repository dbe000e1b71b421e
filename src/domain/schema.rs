//! Validation of the raw events payload.
//!
//! The upstream body is decoded into a [`serde_json::Value`] first and then
//! walked element by element so that every mismatch is reported with its path,
//! and so that `created_at` can be coerced from the handful of shapes a
//! timestamp arrives in. The actor is decoded with serde. A single bad element
//! rejects the whole payload.

use std::fmt;

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::types::{Actor, Event};

/// Offset-less date-times, read in the local time zone
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// A single mismatch between the payload and the expected event shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

impl Issue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_issues(.issues))]
pub struct SchemaError {
    pub issues: Vec<Issue>,
}

fn join_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(Issue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a decoded payload as an ordered list of events
pub fn parse_events(payload: &Value) -> Result<Vec<Event>, SchemaError> {
    let Value::Array(items) = payload else {
        return Err(SchemaError {
            issues: vec![Issue::new("", expected("array", Some(payload)))],
        });
    };

    let mut events = Vec::with_capacity(items.len());
    let mut issues = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match parse_event(item, &format!("[{index}]")) {
            Ok(event) => events.push(event),
            Err(mut found) => issues.append(&mut found),
        }
    }

    if issues.is_empty() {
        Ok(events)
    } else {
        Err(SchemaError { issues })
    }
}

fn parse_event(value: &Value, path: &str) -> Result<Event, Vec<Issue>> {
    let Value::Object(fields) = value else {
        return Err(vec![Issue::new(path, expected("object", Some(value)))]);
    };

    let mut issues = Vec::new();

    let actor = collect(
        parse_actor(fields.get("actor"), &format!("{path}.actor")),
        &mut issues,
    );

    let created_at = collect(
        match fields.get("created_at") {
            None | Some(Value::Null) => Ok(None),
            Some(value) => coerce_timestamp(value).map(Some),
        }
        .map_err(|message| vec![Issue::new(format!("{path}.created_at"), message)]),
        &mut issues,
    );

    let kind = collect(
        optional_string(fields.get("type"))
            .map_err(|message| vec![Issue::new(format!("{path}.type"), message)]),
        &mut issues,
    );

    match (actor, created_at, kind) {
        (Some(actor), Some(created_at), Some(kind)) if issues.is_empty() => Ok(Event {
            actor,
            created_at,
            kind,
        }),
        _ => Err(issues),
    }
}

/// Decodes through serde; on failure each missing or mistyped field is
/// reported against its own path.
fn parse_actor(value: Option<&Value>, path: &str) -> Result<Actor, Vec<Issue>> {
    let Some(actor) = value.filter(|value| value.is_object()) else {
        return Err(vec![Issue::new(path, expected("object", value))]);
    };

    Actor::deserialize(actor).map_err(|err| {
        let issues: Vec<Issue> = ["login", "url"]
            .into_iter()
            .filter_map(|key| required_string(actor.get(key), &format!("{path}.{key}")).err())
            .collect();

        if issues.is_empty() {
            vec![Issue::new(path, err.to_string())]
        } else {
            issues
        }
    })
}

fn required_string<'a>(value: Option<&'a Value>, path: &str) -> Result<&'a str, Issue> {
    match value {
        Some(Value::String(text)) => Ok(text),
        other => Err(Issue::new(path, expected("string", other))),
    }
}

fn optional_string(value: Option<&Value>) -> Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        other => Err(expected("string or null", other)),
    }
}

/// Coerce a JSON value into a timestamp.
///
/// Strings may be RFC 3339, RFC 2822, an offset-less date-time (local time)
/// or a bare date (midnight UTC). Numbers are milliseconds since the epoch.
pub fn coerce_timestamp(value: &Value) -> Result<DateTime<Utc>, String> {
    match value {
        Value::String(text) => {
            parse_timestamp(text).ok_or_else(|| format!("invalid date {text:?}"))
        }
        Value::Number(number) => number
            .as_f64()
            .filter(|millis| millis.is_finite())
            .and_then(|millis| DateTime::from_timestamp_millis(millis.trunc() as i64))
            .ok_or_else(|| format!("invalid date {number}")),
        other => Err(expected("date", Some(other))),
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return resolve_local(&naive, |naive| Local.from_local_datetime(naive));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Map a wall-clock time to an instant. Ambiguous times take the earlier
/// instant; times skipped by a DST jump move forward by the one-hour gap.
fn resolve_local<Tz, F>(naive: &NaiveDateTime, from_local: F) -> Option<DateTime<Utc>>
where
    Tz: TimeZone,
    F: Fn(&NaiveDateTime) -> LocalResult<DateTime<Tz>>,
{
    from_local(naive)
        .earliest()
        .or_else(|| from_local(&(*naive + TimeDelta::hours(1))).earliest())
        .map(|local| local.with_timezone(&Utc))
}

fn collect<T>(result: Result<T, Vec<Issue>>, issues: &mut Vec<Issue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(mut found) => {
            issues.append(&mut found);
            None
        }
    }
}

fn expected(kind: &str, value: Option<&Value>) -> String {
    format!("expected {kind}, received {}", describe(value))
}

fn describe(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
