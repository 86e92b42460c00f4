//! Date ranges over normalized instants, open on either end.
//!
//! Ranges are the currency of blocking rules: a minimum date blocks
//! everything up to the day before it, a maximum date everything from
//! the day after. Containment is instant-based; day-level semantics
//! belong to the caller that chose the endpoints.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::locale::{DateInput, Locale, NormalizeOptions};

/// A span of time, possibly unbounded on one or both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// A single-moment range.
    pub fn at(instant: DateTime<Utc>) -> Self {
        DateRange {
            start: Some(instant),
            end: Some(instant),
        }
    }

    /// Everything up to and including `end`.
    pub fn until(end: DateTime<Utc>) -> Self {
        DateRange {
            start: None,
            end: Some(end),
        }
    }

    /// Everything from `start` onward.
    pub fn since(start: DateTime<Utc>) -> Self {
        DateRange {
            start: Some(start),
            end: None,
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| start <= instant)
            && self.end.is_none_or(|end| instant <= end)
    }
}

/// What a range can be built from: a single date, or a pair of
/// optional endpoints.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeInput {
    Single(DateInput),
    Span {
        start: Option<DateInput>,
        end: Option<DateInput>,
    },
}

impl From<DateInput> for RangeInput {
    fn from(input: DateInput) -> Self {
        RangeInput::Single(input)
    }
}

impl From<&str> for RangeInput {
    fn from(text: &str) -> Self {
        RangeInput::Single(DateInput::from(text))
    }
}

impl From<String> for RangeInput {
    fn from(text: String) -> Self {
        RangeInput::Single(DateInput::from(text))
    }
}

impl From<chrono::NaiveDate> for RangeInput {
    fn from(date: chrono::NaiveDate) -> Self {
        RangeInput::Single(DateInput::from(date))
    }
}

impl From<DateTime<Utc>> for RangeInput {
    fn from(instant: DateTime<Utc>) -> Self {
        RangeInput::Single(DateInput::Instant(instant))
    }
}

impl From<i64> for RangeInput {
    fn from(timestamp: i64) -> Self {
        RangeInput::Single(DateInput::Timestamp(timestamp))
    }
}

impl Locale {
    /// Normalizes a batch of range inputs. Entries whose present
    /// endpoints fail to normalize are dropped; absent endpoints stay
    /// open. Reversed spans are reordered.
    pub fn normalize_dates(
        &self,
        inputs: impl IntoIterator<Item = RangeInput>,
        options: NormalizeOptions,
    ) -> Vec<DateRange> {
        inputs
            .into_iter()
            .filter_map(|input| self.normalize_range(input, options.clone()))
            .collect()
    }

    fn normalize_range(&self, input: RangeInput, options: NormalizeOptions) -> Option<DateRange> {
        match input {
            RangeInput::Single(date) => {
                let instant = self.normalize_date(date, options)?;
                Some(DateRange::at(instant))
            }
            RangeInput::Span { start, end } => {
                let start = match start {
                    Some(date) => Some(self.normalize_date(date, options.clone())?),
                    None => None,
                };
                let end = match end {
                    Some(date) => Some(self.normalize_date(date, options)?),
                    None => None,
                };
                if let (Some(s), Some(e)) = (start, end)
                    && s > e
                {
                    return Some(DateRange {
                        start: Some(e),
                        end: Some(s),
                    });
                }
                Some(DateRange { start, end })
            }
        }
    }

    /// The blocking range induced by a minimum date: open start, ending
    /// one day before the minimum.
    pub fn blocked_before(&self, min: impl Into<DateInput>) -> Option<DateRange> {
        let instant = self.normalize_date(min.into(), NormalizeOptions::default())?;
        Some(DateRange::until(instant - TimeDelta::days(1)))
    }

    /// The blocking range induced by a maximum date: starting one day
    /// after the maximum, open end.
    pub fn blocked_after(&self, max: impl Into<DateInput>) -> Option<DateRange> {
        let instant = self.normalize_date(max.into(), NormalizeOptions::default())?;
        Some(DateRange::since(instant + TimeDelta::days(1)))
    }
}
