//! Day-aligned date range filters
//!
//! A range built here always covers whole local calendar days: the lower
//! bound is pinned to local midnight, the upper bound to 23:59:59.999.

use std::str::FromStr;

use chrono::{
    DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Field filtered on when the caller does not name one
pub const DEFAULT_DATE_FIELD: &str = "createdAt";

/// 23:59:59.999, the last millisecond included in a day-aligned range
pub fn end_of_day_time() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("Invalid date: {input:?}")]
    InvalidDate { input: String },
}

/// A date-like filter input.
///
/// Naive values are read as local wall-clock time; zoned values are
/// converted to local time before their calendar day is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Instant(DateTime<Local>),
}

impl DateInput {
    /// Parse RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]`, `YYYY-MM-DD HH:MM:SS[.fff]`
    /// or a bare `YYYY-MM-DD`.
    pub fn parse(input: &str) -> Result<Self, DateRangeError> {
        let trimmed = input.trim();

        if let Ok(instant) = DateTime::<FixedOffset>::parse_from_rfc3339(trimmed) {
            return Ok(instant.into());
        }
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self::DateTime(naive));
            }
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Self::Date)
            .map_err(|_| DateRangeError::InvalidDate {
                input: input.to_string(),
            })
    }

    /// Calendar day of this input in local time
    pub fn local_date(&self) -> NaiveDate {
        match self {
            Self::Date(date) => *date,
            Self::DateTime(naive) => naive.date(),
            Self::Instant(instant) => instant.date_naive(),
        }
    }

    fn start_of_local_day(&self) -> DateTime<Local> {
        at_wall_clock(&Local, self.local_date(), NaiveTime::MIN, Bound::Lower)
    }

    fn end_of_local_day(&self) -> DateTime<Local> {
        at_wall_clock(&Local, self.local_date(), end_of_day_time(), Bound::Upper)
    }
}

impl FromStr for DateInput {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(naive: NaiveDateTime) -> Self {
        Self::DateTime(naive)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(instant: DateTime<Tz>) -> Self {
        Self::Instant(instant.with_timezone(&Local))
    }
}

/// Inclusive bounds of a date range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<DateTime<Local>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<DateTime<Local>>,
}

/// Date constraint on a single field.
///
/// Serializes as `{"<field>": {"gte": ..., "lte": ...}}` so it can be merged
/// into a larger filter object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeFilter {
    field: String,
    bounds: DateBounds,
}

impl DateRangeFilter {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    pub fn gte(&self) -> Option<DateTime<Local>> {
        self.bounds.gte
    }

    pub fn lte(&self) -> Option<DateTime<Local>> {
        self.bounds.lte
    }

    /// Whether `instant` falls inside the range
    pub fn contains<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        self.bounds.gte.map_or(true, |gte| instant >= &gte)
            && self.bounds.lte.map_or(true, |lte| instant <= &lte)
    }
}

impl Serialize for DateRangeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.bounds)?;
        map.end()
    }
}

/// Same calendar day at 00:00:00.000 in the value's own time zone.
pub fn to_start_of_day<Tz: TimeZone>(value: &DateTime<Tz>) -> DateTime<Tz> {
    at_wall_clock(&value.timezone(), value.date_naive(), NaiveTime::MIN, Bound::Lower)
}

/// Same calendar day at 23:59:59.999 in the value's own time zone.
pub fn to_end_of_day<Tz: TimeZone>(value: &DateTime<Tz>) -> DateTime<Tz> {
    at_wall_clock(&value.timezone(), value.date_naive(), end_of_day_time(), Bound::Upper)
}

/// Build a day-aligned range filter on `field`.
///
/// Returns `None` when neither bound is given. `start <= end` is not checked.
pub fn build_date_range_filter(
    start: Option<DateInput>,
    end: Option<DateInput>,
    field: impl Into<String>,
) -> Option<DateRangeFilter> {
    if start.is_none() && end.is_none() {
        return None;
    }

    Some(DateRangeFilter {
        field: field.into(),
        bounds: DateBounds {
            gte: start.map(|s| s.start_of_local_day()),
            lte: end.map(|e| e.end_of_local_day()),
        },
    })
}

/// Text variant of [`build_date_range_filter`]; blank strings count as absent.
pub fn build_date_range_filter_from_str(
    start: Option<&str>,
    end: Option<&str>,
    field: impl Into<String>,
) -> Result<Option<DateRangeFilter>, DateRangeError> {
    let start = parse_optional(start)?;
    let end = parse_optional(end)?;
    Ok(build_date_range_filter(start, end, field))
}

fn parse_optional(input: Option<&str>) -> Result<Option<DateInput>, DateRangeError> {
    match input {
        Some(text) if !text.trim().is_empty() => DateInput::parse(text).map(Some),
        _ => Ok(None),
    }
}

#[derive(Clone, Copy)]
enum Bound {
    Lower,
    Upper,
}

/// Pin `date` at wall-clock `time` in `tz`.
///
/// A repeated wall-clock time picks the earlier instant for lower bounds and
/// the later one for upper bounds. A skipped one (DST gap) moves forward to
/// the first wall-clock time that exists.
fn at_wall_clock<Tz: TimeZone>(
    tz: &Tz,
    date: NaiveDate,
    time: NaiveTime,
    bound: Bound,
) -> DateTime<Tz> {
    let naive = date.and_time(time);

    let resolved = tz.from_local_datetime(&naive);
    let picked = match bound {
        Bound::Lower => resolved.earliest(),
        Bound::Upper => resolved.latest(),
    };
    if let Some(instant) = picked {
        return instant;
    }

    let mut probe = naive;
    for _ in 0..96 {
        probe += Duration::minutes(15);
        if let Some(instant) = tz.from_local_datetime(&probe).earliest() {
            return instant;
        }
    }
    tz.from_utc_datetime(&naive)
}
