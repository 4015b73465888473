//! `date`, `time` and `datetime` types
//!
//! Formats:
//! - `default`: ISO 8601 (`%Y-%m-%d`, `%H:%M:%S`, `%Y-%m-%dT%H:%M:%SZ`)
//! - `any`: a list of common layouts, plus RFC 3339 for datetimes
//! - a strftime pattern, with or without the legacy `fmt:` prefix

use super::TypeCaster;
use crate::config::CastConfig;
use crate::errors::{CastError, CastResult};
use crate::types::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const ANY_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%d %B %Y", "%B %d, %Y"];
const ANY_TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M", "%I:%M %p", "%I:%M:%S %p"];
const ANY_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Resolved layout of a temporal format string
enum Layout<'a> {
    Any,
    Pattern(&'a str),
}

fn layout<'a>(type_name: &str, format: &'a str, default: &'a str) -> CastResult<Layout<'a>> {
    match format {
        "default" => Ok(Layout::Pattern(default)),
        "any" => Ok(Layout::Any),
        f => match f.strip_prefix("fmt:") {
            Some(pattern) => Ok(Layout::Pattern(pattern)),
            None if f.contains('%') => Ok(Layout::Pattern(f)),
            None => Err(CastError::unsupported_format(type_name, f)),
        },
    }
}

// ============================================================================
// Parsers
// ============================================================================

fn parse_date(s: &str, layout: &Layout<'_>) -> Option<NaiveDate> {
    match layout {
        Layout::Pattern(p) => NaiveDate::parse_from_str(s, p).ok(),
        Layout::Any => ANY_DATE_FORMATS
            .iter()
            .find_map(|p| NaiveDate::parse_from_str(s, p).ok()),
    }
}

fn parse_time(s: &str, layout: &Layout<'_>) -> Option<NaiveTime> {
    match layout {
        Layout::Pattern(p) => NaiveTime::parse_from_str(s, p).ok(),
        Layout::Any => ANY_TIME_FORMATS
            .iter()
            .find_map(|p| NaiveTime::parse_from_str(s, p).ok()),
    }
}

fn parse_datetime(s: &str, layout: &Layout<'_>) -> Option<DateTime<Utc>> {
    let naive = |p: &str| NaiveDateTime::parse_from_str(s, p).ok().map(|dt| Utc.from_utc_datetime(&dt));
    match layout {
        Layout::Pattern(p) => DateTime::parse_from_str(s, p)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| naive(p)),
        Layout::Any => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| ANY_DATETIME_FORMATS.iter().find_map(|p| naive(p))),
    }
}

/// Parse `s` into the same temporal kind as `value`, accepting any layout
///
/// Used to read string bounds of the `minimum`/`maximum` constraints.
pub fn parse_like(value: &Value, s: &str) -> Option<Value> {
    let s = s.trim();
    match value {
        Value::Date(_) => parse_date(s, &Layout::Any).map(Value::Date),
        Value::Time(_) => parse_time(s, &Layout::Any).map(Value::Time),
        Value::DateTime(_) => parse_datetime(s, &Layout::Any).map(Value::DateTime),
        _ => None,
    }
}

// ============================================================================
// Casters
// ============================================================================

/// `date`: calendar date without time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct DateType;

impl TypeCaster for DateType {
    fn type_name(&self) -> &'static str {
        "date"
    }

    fn cast(&self, format: &str, value: &Value, _config: &CastConfig) -> CastResult<Value> {
        let layout = layout("date", format, DEFAULT_DATE_FORMAT)?;
        match value {
            Value::Date(d) => Ok(Value::Date(*d)),
            Value::String(s) => parse_date(s, &layout)
                .map(Value::Date)
                .ok_or_else(|| CastError::invalid("date", format, s)),
            other => Err(CastError::invalid("date", format, other)),
        }
    }
}

/// `time`: time of day without time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeType;

impl TypeCaster for TimeType {
    fn type_name(&self) -> &'static str {
        "time"
    }

    fn cast(&self, format: &str, value: &Value, _config: &CastConfig) -> CastResult<Value> {
        let layout = layout("time", format, DEFAULT_TIME_FORMAT)?;
        match value {
            Value::Time(t) => Ok(Value::Time(*t)),
            Value::String(s) => parse_time(s, &layout)
                .map(Value::Time)
                .ok_or_else(|| CastError::invalid("time", format, s)),
            other => Err(CastError::invalid("time", format, other)),
        }
    }
}

/// `datetime`: instant normalized to UTC
///
/// Inputs without an offset are read as UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeType;

impl TypeCaster for DateTimeType {
    fn type_name(&self) -> &'static str {
        "datetime"
    }

    fn cast(&self, format: &str, value: &Value, _config: &CastConfig) -> CastResult<Value> {
        let layout = layout("datetime", format, DEFAULT_DATETIME_FORMAT)?;
        match value {
            Value::DateTime(dt) => Ok(Value::DateTime(*dt)),
            Value::String(s) => parse_datetime(s, &layout)
                .map(Value::DateTime)
                .ok_or_else(|| CastError::invalid("datetime", format, s)),
            other => Err(CastError::invalid("datetime", format, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> CastConfig {
        CastConfig::default()
    }

    fn date(y: i32, m: u32, d: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_date_default_format() {
        assert_eq!(DateType.cast("default", &Value::from("2020-01-31"), &cfg()), Ok(date(2020, 1, 31)));
        assert!(DateType.cast("default", &Value::from("31/01/2020"), &cfg()).is_err());
        assert!(DateType.cast("default", &Value::from("2020-02-30"), &cfg()).is_err());
        assert_eq!(DateType.cast("default", &date(2020, 1, 31), &cfg()), Ok(date(2020, 1, 31)));
    }

    #[test]
    fn test_date_pattern_formats() {
        let raw = Value::from("31/01/2020");
        assert_eq!(DateType.cast("%d/%m/%Y", &raw, &cfg()), Ok(date(2020, 1, 31)));
        assert_eq!(DateType.cast("fmt:%d/%m/%Y", &raw, &cfg()), Ok(date(2020, 1, 31)));
        assert_eq!(DateType.cast("any", &Value::from("2020/01/31"), &cfg()), Ok(date(2020, 1, 31)));
        assert_eq!(
            DateType.cast("iso", &raw, &cfg()),
            Err(CastError::unsupported_format("date", "iso"))
        );
    }

    #[test]
    fn test_time_cast() {
        let expected = Value::Time(NaiveTime::from_hms_opt(22, 30, 0).unwrap());
        assert_eq!(TimeType.cast("default", &Value::from("22:30:00"), &cfg()), Ok(expected.clone()));
        assert_eq!(TimeType.cast("any", &Value::from("10:30 PM"), &cfg()), Ok(expected));
        assert!(TimeType.cast("default", &Value::from("25:00:00"), &cfg()).is_err());
    }

    #[test]
    fn test_datetime_cast() {
        let expected = Value::DateTime(Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap());
        assert_eq!(
            DateTimeType.cast("default", &Value::from("2020-01-01T10:00:00Z"), &cfg()),
            Ok(expected.clone())
        );
        assert_eq!(
            DateTimeType.cast("any", &Value::from("2020-01-01T12:00:00+02:00"), &cfg()),
            Ok(expected.clone())
        );
        assert_eq!(
            DateTimeType.cast("%d/%m/%Y %H:%M", &Value::from("01/01/2020 10:00"), &cfg()),
            Ok(expected)
        );
        assert!(DateTimeType.cast("default", &Value::from("2020-01-01"), &cfg()).is_err());
    }

    #[test]
    fn test_parse_like() {
        assert_eq!(parse_like(&date(1999, 1, 1), "2020-05-06"), Some(date(2020, 5, 6)));
        assert_eq!(parse_like(&date(1999, 1, 1), "yesterday"), None);
        assert_eq!(parse_like(&Value::Int(1), "2020-05-06"), None);
    }
}
