//! Time-range macros
//!
//! Dashboard queries filter on the panel's time range with one of two macros
//! in the `WHERE` clause:
//!
//! - `time_range(field)` for numeric epoch-millisecond fields
//! - `str_time_range(field)` for RFC 3339 string fields
//!
//! The macro becomes a range predicate and the query is wrapped so rows come
//! back ordered by that field. Exactly one macro call per query is supported.

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use couchdash_core::{CouchdashError, Result};
use regex::Regex;

static STR_TIME_RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)str_time_range\s*\(([^\)]+)\)").expect("valid regex"));

// `\b` keeps this from matching the tail of `str_time_range`
static TIME_RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btime_range\s*\(([^\)]+)\)").expect("valid regex"));

/// Dashboard time range a query is run for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    fn bounds(&self) -> (String, String) {
        (
            self.from.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.to.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }
}

/// How the time field is stored in documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    /// Epoch milliseconds, matched by `time_range()`
    Numeric,
    /// RFC 3339 string, matched by `str_time_range()`
    String,
}

impl TimeField {
    fn millis_expr(self, expr: &str) -> String {
        match self {
            TimeField::Numeric => format!("TO_NUMBER({expr})"),
            TimeField::String => format!("STR_TO_MILLIS({expr})"),
        }
    }

    fn order_by(self, field: &str) -> String {
        match self {
            TimeField::Numeric => format!("TO_NUMBER(data.{field})"),
            TimeField::String => format!("str_to_millis(data.{field})"),
        }
    }
}

/// A query with its time-range macro expanded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedQuery {
    pub text: String,
    /// Field named in the macro call
    pub time_field: String,
    pub kind: TimeField,
}

/// Expand the single `time_range()` / `str_time_range()` call in `text`
pub fn expand_time_macros(text: &str, range: &TimeRange) -> Result<ExpandedQuery> {
    let string_calls = STR_TIME_RANGE_REGEX.captures_iter(text).count();
    let numeric_calls = TIME_RANGE_REGEX.captures_iter(text).count();

    if string_calls > 1 {
        return Err(CouchdashError::Macro(
            "Only one call to STR_TIME_RANGE per query is supported".to_string(),
        ));
    }
    if string_calls + numeric_calls > 1 {
        return Err(CouchdashError::Macro(
            "Only one call to TIME_RANGE per query is supported".to_string(),
        ));
    }

    let (regex, kind) = if string_calls == 1 {
        (&*STR_TIME_RANGE_REGEX, TimeField::String)
    } else if numeric_calls == 1 {
        (&*TIME_RANGE_REGEX, TimeField::Numeric)
    } else {
        return Err(CouchdashError::Macro(
            "Failed to detect time field. Please use time_range(fieldName) or \
             str_time_range(fieldName) functions in WHERE clause of your query."
                .to_string(),
        ));
    };

    let field = regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or_else(|| CouchdashError::Macro("Failed to read time field".to_string()))?;

    let (from, to) = range.bounds();
    let millis = kind.millis_expr(&field);
    let predicate = format!(
        "{millis} > STR_TO_MILLIS('{from}') AND {millis} <= STR_TO_MILLIS('{to}')"
    );
    let filtered = regex.replace(text, regex::NoExpand(&predicate));
    let text = format!(
        "SELECT * FROM ({filtered}) AS data ORDER by {} ASC",
        kind.order_by(&field)
    );

    tracing::debug!(time_field = %field, kind = ?kind, "expanded time range macro");
    Ok(ExpandedQuery {
        text,
        time_field: field,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn range() -> TimeRange {
        TimeRange::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 12, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_numeric_time_range() {
        let expanded = expand_time_macros(
            "SELECT ts, value FROM metrics WHERE time_range(ts)",
            &range(),
        )
        .unwrap();

        assert_eq!(expanded.time_field, "ts");
        assert_eq!(expanded.kind, TimeField::Numeric);
        assert_eq!(
            expanded.text,
            "SELECT * FROM (SELECT ts, value FROM metrics WHERE \
             TO_NUMBER(ts) > STR_TO_MILLIS('2024-01-01T00:00:00Z') AND \
             TO_NUMBER(ts) <= STR_TO_MILLIS('2024-01-02T12:30:00Z')) \
             AS data ORDER by TO_NUMBER(data.ts) ASC"
        );
    }

    #[test]
    fn test_string_time_range_is_case_insensitive() {
        let expanded = expand_time_macros(
            "SELECT time, v FROM b WHERE STR_TIME_RANGE( time ) AND v > 0",
            &range(),
        )
        .unwrap();

        assert_eq!(expanded.time_field, "time");
        assert_eq!(expanded.kind, TimeField::String);
        assert!(expanded.text.contains(
            "STR_TO_MILLIS(time) > STR_TO_MILLIS('2024-01-01T00:00:00Z') AND \
             STR_TO_MILLIS(time) <= STR_TO_MILLIS('2024-01-02T12:30:00Z') AND v > 0"
        ));
        assert!(expanded.text.ends_with("ORDER by str_to_millis(data.time) ASC"));
    }

    #[test]
    fn test_time_field_expressions() {
        assert_eq!(TimeField::Numeric.millis_expr("ts"), "TO_NUMBER(ts)");
        assert_eq!(TimeField::String.millis_expr("ts"), "STR_TO_MILLIS(ts)");
        assert_eq!(TimeField::String.order_by("ts"), "str_to_millis(data.ts)");
    }

    #[test]
    fn test_missing_macro_is_an_error() {
        let err = expand_time_macros("SELECT * FROM b", &range()).unwrap_err();
        assert!(err.to_string().contains("Failed to detect time field"));
    }

    #[test]
    fn test_more_than_one_macro_is_an_error() {
        let err =
            expand_time_macros("WHERE time_range(a) OR time_range(b)", &range()).unwrap_err();
        assert!(err.to_string().contains("Only one call to TIME_RANGE"));

        let err = expand_time_macros("WHERE str_time_range(a) OR str_time_range(b)", &range())
            .unwrap_err();
        assert!(err.to_string().contains("Only one call to STR_TIME_RANGE"));

        let err =
            expand_time_macros("WHERE str_time_range(a) OR time_range(b)", &range()).unwrap_err();
        assert!(err.to_string().contains("Only one call to TIME_RANGE"));
    }
}
