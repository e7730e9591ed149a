//! Task normalization
//!
//! Converts raw records into [`NormalizedTask`]s using a [`FieldMapping`].
//! Nothing here fails: missing names get a placeholder, missing ids get a
//! generated one, and unparsable dates become invalid [`TaskDate`]s that
//! degrade the layout downstream instead of raising.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::id::IdGenerator;
use crate::mapping::{FieldMapping, FieldRole};
use crate::record::{RawRecord, is_truthy, value_to_text};

/// Name given to records whose name field is missing or empty
pub const UNNAMED_TASK: &str = "Unnamed Task";

/// Generator calls tried before a taken candidate is suffixed instead
const MAX_ID_ATTEMPTS: usize = 10;

/// Naive date-time layouts accepted in addition to RFC 3339 and bare dates.
/// Interpreted as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A parsed point in time, or the invalid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDate(Option<DateTime<Utc>>);

impl TaskDate {
    pub fn valid(at: DateTime<Utc>) -> Self {
        Self(Some(at))
    }

    pub fn invalid() -> Self {
        Self(None)
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// The instant, if this date is valid.
    pub fn get(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// Milliseconds since the Unix epoch; NaN for the invalid date.
    pub fn timestamp_ms(&self) -> f64 {
        self.0.map_or(f64::NAN, |at| at.timestamp_millis() as f64)
    }
}

impl From<DateTime<Utc>> for TaskDate {
    fn from(at: DateTime<Utc>) -> Self {
        Self::valid(at)
    }
}

impl std::fmt::Display for TaskDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(at) => write!(f, "{}", at.to_rfc3339()),
            None => write!(f, "invalid date"),
        }
    }
}

/// Canonical task record consumed by the axis builder and position calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTask {
    pub id: String,
    pub name: String,
    pub start_date: TaskDate,
    pub end_date: TaskDate,
    /// Percent complete; `None` means "no progress bar", not zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Every original field, verbatim.
    pub fields: RawRecord,
}

impl NormalizedTask {
    /// Look up an original field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Whether both dates parsed.
    pub fn has_valid_dates(&self) -> bool {
        self.start_date.is_valid() && self.end_date.is_valid()
    }
}

/// Parse a JSON value into a date.
///
/// Strings may be RFC 3339, `YYYY-MM-DD` (UTC midnight) or a naive
/// date-time (UTC). Numbers are epoch milliseconds. Anything else is the
/// invalid date.
pub fn parse_date(value: Option<&Value>) -> TaskDate {
    match value {
        Some(Value::String(s)) => parse_date_str(s.trim()),
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|ms| ms.is_finite())
            .and_then(|ms| DateTime::from_timestamp_millis(ms.trunc() as i64))
            .map_or_else(TaskDate::invalid, TaskDate::valid),
        _ => TaskDate::invalid(),
    }
}

fn parse_date_str(s: &str) -> TaskDate {
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return TaskDate::valid(at.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return TaskDate::valid(midnight.and_utc());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map_or_else(TaskDate::invalid, |naive| TaskDate::valid(naive.and_utc()))
}

/// Parse a progress value. Numeric strings are accepted.
fn parse_progress(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Normalize a single record.
pub fn normalize_record(
    record: &RawRecord,
    mapping: &FieldMapping,
    ids: &mut dyn IdGenerator,
) -> NormalizedTask {
    normalize_with(record, mapping, ids, &mut HashSet::new())
}

/// Normalize a list of records. Empty input gives an empty list.
///
/// Generated ids never reuse an id already present in the input or handed
/// out earlier in the same call.
pub fn normalize_records(
    records: &[RawRecord],
    mapping: &FieldMapping,
    ids: &mut dyn IdGenerator,
) -> Vec<NormalizedTask> {
    let mut taken: HashSet<String> = records
        .iter()
        .filter_map(|record| explicit_id(record, mapping))
        .collect();

    let tasks: Vec<NormalizedTask> = records
        .iter()
        .map(|record| normalize_with(record, mapping, ids, &mut taken))
        .collect();
    debug!(count = tasks.len(), "normalized records");
    tasks
}

/// The record's own id, if the mapped field holds a truthy value.
fn explicit_id(record: &RawRecord, mapping: &FieldMapping) -> Option<String> {
    mapping
        .resolve(record, FieldRole::Id)
        .filter(|value| is_truthy(value))
        .map(value_to_text)
}

/// Ask the generator for an id not in `taken`, retrying a few times before
/// falling back to a numeric suffix.
fn fresh_id(record: &RawRecord, ids: &mut dyn IdGenerator, taken: &mut HashSet<String>) -> String {
    let mut candidate = ids.next_id(record);
    for _ in 1..MAX_ID_ATTEMPTS {
        if !taken.contains(&candidate) {
            break;
        }
        candidate = ids.next_id(record);
    }

    if taken.contains(&candidate) {
        let base = candidate;
        let mut n = 2;
        candidate = format!("{}-{}", base, n);
        while taken.contains(&candidate) {
            n += 1;
            candidate = format!("{}-{}", base, n);
        }
    }

    taken.insert(candidate.clone());
    candidate
}

fn normalize_with(
    record: &RawRecord,
    mapping: &FieldMapping,
    ids: &mut dyn IdGenerator,
    taken: &mut HashSet<String>,
) -> NormalizedTask {
    let id = match explicit_id(record, mapping) {
        Some(id) => id,
        None => {
            let id = fresh_id(record, ids, taken);
            debug!(task = %id, "generated fallback id");
            id
        }
    };

    let name = match mapping.resolve(record, FieldRole::TaskName) {
        Some(value) if is_truthy(value) => value_to_text(value),
        _ => UNNAMED_TASK.to_string(),
    };

    let start_date = parse_date(mapping.resolve(record, FieldRole::StartDate));
    let end_date = parse_date(mapping.resolve(record, FieldRole::EndDate));

    if !start_date.is_valid() {
        warn!(task = %id, field = mapping.field_name(FieldRole::StartDate), "unparsable start date");
    }
    if !end_date.is_valid() {
        warn!(task = %id, field = mapping.field_name(FieldRole::EndDate), "unparsable end date");
    }

    NormalizedTask {
        id,
        name,
        start_date,
        end_date,
        progress: parse_progress(mapping.resolve(record, FieldRole::Progress)),
        fields: record.clone(),
    }
}
