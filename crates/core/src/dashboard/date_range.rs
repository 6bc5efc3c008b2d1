//! Date range driving one dashboard load cycle.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DATE_FORMAT;
use crate::errors::{Error, Result, ValidationError};

/// Inclusive calendar window selected by the two filter inputs.
///
/// Bounds are not checked against each other: an inverted range is sent to
/// the gateway as-is, which answers with whatever its queries produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse the raw `start_date` / `end_date` input values (`YYYY-MM-DD`).
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_input("start_date", start)?,
            end: parse_input("end_date", end)?,
        })
    }

    /// The window the dashboard opens with: first day of the month of
    /// `today` through the day before `today`.
    pub fn default_for(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        let end = today - Duration::days(1);
        Self { start, end }
    }

    /// Query string understood by the gateway endpoints.
    pub fn to_query(&self) -> String {
        format!(
            "start_date={}&end_date={}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

fn parse_input(field: &str, value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        )));
    }
    Ok(NaiveDate::parse_from_str(value, DATE_FORMAT)?)
}
