//! Date parts: decomposing instants into calendar-relative fields and
//! composing such fields back into instants, plus the normalization
//! funnel that accepts timestamps, strings, parts, and instants alike.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarKind;
use crate::error::AlmanacError;
use crate::timezone;

use super::Locale;

/// An instant decomposed into the fields of a locale's calendar, viewed
/// through its timezone.
///
/// `day`, `week`, and `month` are 1-based; `weekday` runs 1 (Sunday)
/// through 7 (Saturday) regardless of the configured first day of week.
/// The `*_from_end` fields count backwards from the end of the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateParts {
    pub milliseconds: u32,
    pub seconds: u32,
    pub minutes: u32,
    pub hours: u32,
    pub day: u32,
    pub day_from_end: u32,
    pub weekday: u32,
    pub weekday_ordinal: u32,
    pub weekday_ordinal_from_end: u32,
    pub week: u32,
    /// Can drop to zero when the configured first day disagrees with the
    /// regional week convention on the month's final partial week.
    pub week_from_end: i32,
    pub month: u32,
    pub year: i32,
    /// Offset of the active zone in minutes, positive west of UTC.
    pub timezone_offset: i32,
    pub calendar: CalendarKind,
    pub locale: String,
    /// The instant these fields were derived from.
    pub instant: DateTime<Utc>,
}

/// Structured date input for composition. Missing date fields take the
/// current date, missing time fields zero. Setting `calendar` reads the
/// date fields in the locale's active calendar instead of civil.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartsInput {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub day: Option<i64>,
    pub hours: Option<i64>,
    pub minutes: Option<i64>,
    pub seconds: Option<i64>,
    pub milliseconds: Option<i64>,
    pub calendar: Option<CalendarKind>,
}

impl From<&DateParts> for PartsInput {
    fn from(parts: &DateParts) -> Self {
        PartsInput {
            year: Some(parts.year),
            month: Some(parts.month as i32),
            day: Some(i64::from(parts.day)),
            hours: Some(i64::from(parts.hours)),
            minutes: Some(i64::from(parts.minutes)),
            seconds: Some(i64::from(parts.seconds)),
            milliseconds: Some(i64::from(parts.milliseconds)),
            calendar: Some(parts.calendar),
        }
    }
}

/// Anything normalization accepts as a date.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    /// Text to run through mask parsing.
    Text(String),
    Parts(PartsInput),
    Instant(DateTime<Utc>),
}

impl From<i64> for DateInput {
    fn from(ms: i64) -> Self {
        DateInput::Timestamp(ms)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl From<PartsInput> for DateInput {
    fn from(parts: PartsInput) -> Self {
        DateInput::Parts(parts)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(instant: DateTime<Utc>) -> Self {
        DateInput::Instant(instant)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Parts(PartsInput {
            year: Some(date.year()),
            month: Some(date.month() as i32),
            day: Some(i64::from(date.day())),
            ..PartsInput::default()
        })
    }
}

/// Which fields the normalized input overrides when patching onto a
/// fill date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Patch {
    DateTime,
    Date,
    Time,
}

/// How normalization interprets its input and adjusts the result.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    /// Mask for string input; the `iso` macro when unset.
    pub mask: Option<String>,
    /// Merge the normalized result over a fill date instead of taking it
    /// whole.
    pub patch: Option<Patch>,
    /// Date supplying the unpatched fields; now when unset.
    pub fill_date: Option<DateTime<Utc>>,
    pub time: TimeAdjust,
}

/// Time-of-day rules applied after a date resolves.
#[derive(Debug, Clone, Default)]
pub struct TimeAdjust {
    pub time: Option<TimeSource>,
    pub valid_hours: Option<ValidHours>,
    pub minute_increment: Option<u32>,
}

impl TimeAdjust {
    fn is_noop(&self) -> bool {
        self.time.is_none() && self.valid_hours.is_none() && self.minute_increment.is_none()
    }
}

/// Where an adjusted time of day comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// The current wall clock in the locale's zone.
    Now,
    At(TimeOfDay),
}

/// A fixed time of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

impl FromStr for TimeOfDay {
    type Err = AlmanacError;

    /// Parses `HH:MM`, `HH:MM:SS`, or `HH:MM:SS.SSS`. Fractions shorter
    /// than three digits scale up, longer ones truncate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || AlmanacError::InvalidTimeLiteral(s.to_string());
        let mut fields = s.trim().split(':');
        let hours = fields.next().and_then(number).ok_or_else(err)?;
        let minutes = fields.next().and_then(number).ok_or_else(err)?;
        let (seconds, milliseconds) = match fields.next() {
            None => (0, 0),
            Some(rest) => {
                let (sec, frac) = match rest.split_once('.') {
                    None => (rest, None),
                    Some((sec, frac)) => (sec, Some(frac)),
                };
                let seconds = number(sec).ok_or_else(err)?;
                let milliseconds = match frac {
                    None => 0,
                    Some(frac) => {
                        let digits: String = frac.chars().take(3).collect();
                        let value = number(&digits).ok_or_else(err)?;
                        match digits.len() {
                            1 => value * 100,
                            2 => value * 10,
                            _ => value,
                        }
                    }
                };
                (seconds, milliseconds)
            }
        };
        if fields.next().is_some() || hours > 23 || minutes > 59 || seconds > 59 {
            return Err(err());
        }
        Ok(TimeOfDay {
            hours,
            minutes,
            seconds,
            milliseconds,
        })
    }
}

fn number(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Hours a time adjustment may land on.
#[derive(Debug, Clone)]
pub enum ValidHours {
    List(Vec<u32>),
    Range { min: u32, max: u32 },
    Predicate(fn(u32, &DateParts) -> bool),
}

impl ValidHours {
    fn allows(&self, hour: u32, parts: &DateParts) -> bool {
        match self {
            ValidHours::List(list) => list.contains(&hour),
            ValidHours::Range { min, max } => (*min..=*max).contains(&hour),
            ValidHours::Predicate(f) => f(hour, parts),
        }
    }
}

/// A selectable hour or minute value with its zero-padded label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOption {
    pub value: u32,
    pub label: String,
}

impl TimeOption {
    fn new(value: u32) -> TimeOption {
        TimeOption {
            value,
            label: format!("{value:02}"),
        }
    }
}

/// Output representations for [`Locale::denormalize_date`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateOutputKind {
    Timestamp,
    Text,
    #[default]
    Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DateOutput {
    Timestamp(i64),
    Text(String),
    Instant(DateTime<Utc>),
}

impl Locale {
    /// Decomposes an instant through the locale's timezone and calendar.
    ///
    /// `None` only when the calendar cannot express the civil date, which
    /// stays well outside any representable chrono range in practice.
    pub fn date_parts(&self, instant: DateTime<Utc>) -> Option<DateParts> {
        self.date_parts_in_zone(instant, self.timezone())
    }

    pub(crate) fn date_parts_in_zone(
        &self,
        instant: DateTime<Utc>,
        zone: Option<chrono_tz::Tz>,
    ) -> Option<DateParts> {
        let civil = timezone::civil_view(instant, zone);
        let date = civil.date();
        let fields = self.calendar().decompose(date)?;
        let comps = self.month_components(fields.month, fields.year)?;
        let day = fields.day;
        let weekday = date.weekday().num_days_from_sunday() + 1;
        let week = (day + comps.first_weekday.abs_diff(comps.first_day_of_week)).div_ceil(7);
        Some(DateParts {
            milliseconds: civil.nanosecond() / 1_000_000,
            seconds: civil.second(),
            minutes: civil.minute(),
            hours: civil.hour(),
            day,
            day_from_end: comps.days - day + 1,
            weekday,
            weekday_ordinal: (day - 1) / 7 + 1,
            weekday_ordinal_from_end: (comps.days - day) / 7 + 1,
            week,
            week_from_end: comps.weeks as i32 - week as i32 + 1,
            month: fields.month,
            year: fields.year,
            timezone_offset: timezone::offset_minutes(instant, zone),
            calendar: self.calendar(),
            locale: self.id().to_string(),
            instant,
        })
    }

    /// Composes structured fields into an instant. Zero date fields are
    /// invalid; in a timezone-aware locale every field must be in range,
    /// while the local path rolls overflow into neighboring units.
    pub fn date_from_parts(&self, parts: &PartsInput) -> Option<DateTime<Utc>> {
        let today = Local::now().date_naive();
        let year = parts.year.unwrap_or_else(|| today.year());
        let month = parts.month.unwrap_or(today.month() as i32);
        let day = parts.day.unwrap_or(i64::from(today.day()));
        if year == 0 || month == 0 || day == 0 {
            return None;
        }
        let (year, month, day) = if parts.calendar.is_some() {
            let civil = self.calendar().compose(
                year,
                month.max(1) as u32,
                day.clamp(1, i64::from(u32::MAX)) as u32,
            )?;
            (civil.year(), civil.month() as i32, i64::from(civil.day()))
        } else {
            (year, month, day)
        };
        let hours = parts.hours.unwrap_or(0);
        let minutes = parts.minutes.unwrap_or(0);
        let seconds = parts.seconds.unwrap_or(0);
        let milliseconds = parts.milliseconds.unwrap_or(0);

        if let Some(tz) = self.timezone() {
            let time = NaiveDate::from_ymd_opt(
                year,
                u32::try_from(month).ok()?,
                u32::try_from(day).ok()?,
            )?
            .and_hms_milli_opt(
                u32::try_from(hours).ok()?,
                u32::try_from(minutes).ok()?,
                u32::try_from(seconds).ok()?,
                u32::try_from(milliseconds).ok()?,
            )?;
            timezone::compose_civil(&tz, &time)
        } else {
            let naive = timezone::roll_civil(
                year,
                month - 1,
                day,
                hours,
                minutes,
                seconds,
                milliseconds,
            )?;
            timezone::compose_civil(&Local, &naive)
        }
    }

    /// Funnels any date representation into an instant. A patch request
    /// merges the normalized result onto the fill date before time rules
    /// apply.
    pub fn normalize_date(
        &self,
        input: impl Into<DateInput>,
        options: NormalizeOptions,
    ) -> Option<DateTime<Utc>> {
        let mut result = match input.into() {
            DateInput::Timestamp(ms) => DateTime::from_timestamp_millis(ms),
            DateInput::Text(text) => {
                if text.is_empty() {
                    None
                } else {
                    let mask = options.mask.as_deref().unwrap_or("iso");
                    self.parse(&text, &[mask])
                }
            }
            DateInput::Instant(instant) => Some(instant),
            DateInput::Parts(parts) => self.date_from_parts(&parts),
        }?;
        if let Some(patch) = options.patch {
            let fill = options.fill_date.unwrap_or_else(Utc::now);
            let fill_parts = self.date_parts(fill)?;
            let new_parts = self.date_parts(result)?;
            result = self.date_from_parts(&patched(&fill_parts, &new_parts, patch))?;
        }
        self.adjust_time(result, &options.time)
    }

    /// Renders an instant back into a caller-chosen representation.
    pub fn denormalize_date(
        &self,
        date: DateTime<Utc>,
        kind: DateOutputKind,
        mask: Option<&str>,
    ) -> DateOutput {
        match kind {
            DateOutputKind::Timestamp => DateOutput::Timestamp(date.timestamp_millis()),
            DateOutputKind::Text => DateOutput::Text(self.format(date, mask.unwrap_or("iso"))),
            DateOutputKind::Instant => DateOutput::Instant(date),
        }
    }

    /// Applies time-of-day rules to a date: an explicit or current time
    /// first, then snapping to the nearest valid hour and minute.
    pub fn adjust_time(
        &self,
        date: DateTime<Utc>,
        adjust: &TimeAdjust,
    ) -> Option<DateTime<Utc>> {
        if adjust.is_noop() {
            return Some(date);
        }
        let mut parts = self.date_parts(date)?;
        match adjust.time {
            Some(TimeSource::Now) => {
                let now = self.date_parts(Utc::now())?;
                parts.hours = now.hours;
                parts.minutes = now.minutes;
                parts.seconds = now.seconds;
                parts.milliseconds = now.milliseconds;
            }
            Some(TimeSource::At(t)) => {
                parts.hours = t.hours;
                parts.minutes = t.minutes;
                parts.seconds = t.seconds;
                parts.milliseconds = t.milliseconds;
            }
            None => {}
        }
        if let Some(valid) = &adjust.valid_hours {
            let options = self.hour_options(valid, &parts);
            if let Some(hour) = nearest_option(&options, parts.hours) {
                parts.hours = hour;
            }
        }
        if let Some(increment) = adjust.minute_increment {
            let options = self.minute_options(increment);
            if let Some(minute) = nearest_option(&options, parts.minutes) {
                parts.minutes = minute;
            }
        }
        self.date_from_parts(&PartsInput::from(&parts))
    }

    /// The hours of the day a rule allows, with display labels.
    pub fn hour_options(&self, valid: &ValidHours, parts: &DateParts) -> Vec<TimeOption> {
        (0..24)
            .filter(|&hour| valid.allows(hour, parts))
            .map(TimeOption::new)
            .collect()
    }

    /// Minute steps for an increment; increments of zero behave as one.
    pub fn minute_options(&self, increment: u32) -> Vec<TimeOption> {
        let step = increment.max(1);
        (0..60)
            .step_by(step as usize)
            .map(TimeOption::new)
            .collect()
    }
}

/// Fill parts with the patch level's whole field subset taken from the
/// newly normalized parts. Both sides carry the active calendar, so the
/// merge recomposes through it.
fn patched(fill: &DateParts, new: &DateParts, patch: Patch) -> PartsInput {
    let mut parts = PartsInput::from(fill);
    let (date_fields, time_fields) = match patch {
        Patch::DateTime => (true, true),
        Patch::Date => (true, false),
        Patch::Time => (false, true),
    };
    if date_fields {
        parts.year = Some(new.year);
        parts.month = Some(new.month as i32);
        parts.day = Some(i64::from(new.day));
    }
    if time_fields {
        parts.hours = Some(i64::from(new.hours));
        parts.minutes = Some(i64::from(new.minutes));
        parts.seconds = Some(i64::from(new.seconds));
        parts.milliseconds = Some(i64::from(new.milliseconds));
    }
    parts
}

/// First option, then strictly nearer ones; ties keep the earlier
/// option.
fn nearest_option(options: &[TimeOption], value: u32) -> Option<u32> {
    let mut nearest: Option<u32> = None;
    for option in options {
        match nearest {
            None => nearest = Some(option.value),
            Some(prev) => {
                if option.value.abs_diff(value) < prev.abs_diff(value) {
                    nearest = Some(option.value);
                }
            }
        }
    }
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{LocaleConfig, LocaleInit, LocaleOptions};
    use chrono::TimeZone;

    fn utc_locale(init: impl Into<LocaleInit>) -> Locale {
        Locale::new(
            init,
            LocaleOptions {
                timezone: Some("UTC".to_string()),
                ..LocaleOptions::default()
            },
        )
    }

    fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn decomposes_a_utc_instant() {
        let en = utc_locale("en-US");
        let parts = en.date_parts(instant(2024, 1, 15, 13, 45, 30)).unwrap();
        assert_eq!(parts.year, 2024);
        assert_eq!(parts.month, 1);
        assert_eq!(parts.day, 15);
        assert_eq!(parts.day_from_end, 17);
        // 2024-01-15 was a Monday, the third of five January Mondays.
        assert_eq!(parts.weekday, 2);
        assert_eq!(parts.weekday_ordinal, 3);
        assert_eq!(parts.weekday_ordinal_from_end, 3);
        assert_eq!(parts.week, 3);
        assert_eq!(parts.week_from_end, 3);
        assert_eq!(parts.hours, 13);
        assert_eq!(parts.minutes, 45);
        assert_eq!(parts.seconds, 30);
        assert_eq!(parts.timezone_offset, 0);
        assert_eq!(parts.calendar, CalendarKind::Gregorian);
        assert_eq!(parts.locale, "en-US");
    }

    #[test]
    fn zone_shifts_the_civil_fields() {
        let ny = Locale::new(
            "en-US",
            LocaleOptions {
                timezone: Some("America/New_York".to_string()),
                ..LocaleOptions::default()
            },
        );
        let parts = ny.date_parts(instant(2024, 1, 15, 1, 30, 0)).unwrap();
        assert_eq!((parts.year, parts.month, parts.day), (2024, 1, 14));
        assert_eq!(parts.weekday, 1);
        assert_eq!(parts.hours, 20);
        assert_eq!(parts.timezone_offset, 300);
    }

    #[test]
    fn decomposes_into_the_active_calendar() {
        let locale = utc_locale(LocaleConfig {
            id: Some("en-US".to_string()),
            calendar: Some("buddhist".to_string()),
            ..LocaleConfig::default()
        });
        let parts = locale.date_parts(instant(2024, 1, 15, 0, 0, 0)).unwrap();
        assert_eq!((parts.year, parts.month, parts.day), (2567, 1, 15));
        assert_eq!(parts.calendar, CalendarKind::Buddhist);
    }

    #[test]
    fn composes_civil_parts() {
        let en = utc_locale("en-US");
        let result = en.date_from_parts(&PartsInput {
            year: Some(2024),
            month: Some(3),
            day: Some(5),
            hours: Some(10),
            minutes: Some(30),
            ..PartsInput::default()
        });
        assert_eq!(result, Some(instant(2024, 3, 5, 10, 30, 0)));
    }

    #[test]
    fn zero_date_fields_are_invalid() {
        let en = utc_locale("en-US");
        for parts in [
            PartsInput {
                year: Some(0),
                month: Some(1),
                day: Some(1),
                ..PartsInput::default()
            },
            PartsInput {
                year: Some(2024),
                month: Some(0),
                day: Some(1),
                ..PartsInput::default()
            },
            PartsInput {
                year: Some(2024),
                month: Some(1),
                day: Some(0),
                ..PartsInput::default()
            },
        ] {
            assert_eq!(en.date_from_parts(&parts), None);
        }
    }

    #[test]
    fn zoned_composition_is_strict() {
        let en = utc_locale("en-US");
        let overflowing = PartsInput {
            year: Some(2024),
            month: Some(13),
            day: Some(1),
            ..PartsInput::default()
        };
        assert_eq!(en.date_from_parts(&overflowing), None);
        let bad_hour = PartsInput {
            year: Some(2024),
            month: Some(1),
            day: Some(1),
            hours: Some(24),
            ..PartsInput::default()
        };
        assert_eq!(en.date_from_parts(&bad_hour), None);
    }

    #[test]
    fn local_composition_rolls_overflow() {
        // No timezone configured: overflow rolls instead of failing.
        let local = Locale::new("en-US", LocaleOptions::default());
        let composed = local
            .date_from_parts(&PartsInput {
                year: Some(2024),
                month: Some(13),
                day: Some(1),
                ..PartsInput::default()
            })
            .unwrap();
        let parts = local.date_parts(composed).unwrap();
        assert_eq!((parts.year, parts.month, parts.day), (2025, 1, 1));

        let composed = local
            .date_from_parts(&PartsInput {
                year: Some(2024),
                month: Some(1),
                day: Some(32),
                hours: Some(25),
                ..PartsInput::default()
            })
            .unwrap();
        let parts = local.date_parts(composed).unwrap();
        assert_eq!((parts.month, parts.day, parts.hours), (2, 2, 1));
    }

    #[test]
    fn calendar_marked_parts_convert_to_civil() {
        let locale = utc_locale(LocaleConfig {
            id: Some("en-US".to_string()),
            calendar: Some("buddhist".to_string()),
            ..LocaleConfig::default()
        });
        let result = locale.date_from_parts(&PartsInput {
            year: Some(2567),
            month: Some(1),
            day: Some(15),
            calendar: Some(CalendarKind::Buddhist),
            ..PartsInput::default()
        });
        assert_eq!(result, Some(instant(2024, 1, 15, 0, 0, 0)));
    }

    #[test]
    fn parts_round_trip_through_composition() {
        let hebrew = utc_locale(LocaleConfig {
            id: Some("en-US".to_string()),
            calendar: Some("hebrew".to_string()),
            ..LocaleConfig::default()
        });
        let original = instant(2024, 3, 5, 10, 0, 45);
        let parts = hebrew.date_parts(original).unwrap();
        let recomposed = hebrew.date_from_parts(&PartsInput::from(&parts));
        assert_eq!(recomposed, Some(original));
    }

    #[test]
    fn normalizes_every_input_shape() {
        let en = utc_locale("en-US");
        let expected = instant(2024, 1, 15, 0, 0, 0);
        assert_eq!(
            en.normalize_date(1_705_276_800_000_i64, NormalizeOptions::default()),
            Some(expected)
        );
        assert_eq!(
            en.normalize_date("2024-01-15T00:00:00.000", NormalizeOptions::default()),
            Some(expected)
        );
        assert_eq!(
            en.normalize_date(expected, NormalizeOptions::default()),
            Some(expected)
        );
        assert_eq!(
            en.normalize_date(
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                NormalizeOptions::default()
            ),
            Some(expected)
        );
        assert_eq!(
            en.normalize_date("", NormalizeOptions::default()),
            None
        );
    }

    #[test]
    fn string_input_honors_an_explicit_mask() {
        let en = utc_locale("en-US");
        assert_eq!(
            en.normalize_date(
                "15/01/2024",
                NormalizeOptions {
                    mask: Some("DD/MM/YYYY".to_string()),
                    ..NormalizeOptions::default()
                }
            ),
            Some(instant(2024, 1, 15, 0, 0, 0))
        );
    }

    #[test]
    fn time_patches_replace_the_whole_time_of_the_fill() {
        let en = utc_locale("en-US");
        let fill = instant(2024, 1, 15, 10, 30, 45);

        // Unset time fields land as zeros, not as the fill's values.
        let result = en.normalize_date(
            PartsInput {
                hours: Some(8),
                ..PartsInput::default()
            },
            NormalizeOptions {
                patch: Some(Patch::Time),
                fill_date: Some(fill),
                ..NormalizeOptions::default()
            },
        );
        assert_eq!(result, Some(instant(2024, 1, 15, 8, 0, 0)));
    }

    #[test]
    fn patches_apply_to_parsed_and_instant_inputs() {
        let en = utc_locale("en-US");
        let fill = instant(2024, 1, 15, 10, 30, 45);

        let result = en.normalize_date(
            "08:30",
            NormalizeOptions {
                mask: Some("HH:mm".to_string()),
                patch: Some(Patch::Time),
                fill_date: Some(fill),
                ..NormalizeOptions::default()
            },
        );
        assert_eq!(result, Some(instant(2024, 1, 15, 8, 30, 0)));

        let result = en.normalize_date(
            instant(2026, 6, 9, 23, 59, 58),
            NormalizeOptions {
                patch: Some(Patch::Date),
                fill_date: Some(fill),
                ..NormalizeOptions::default()
            },
        );
        assert_eq!(result, Some(instant(2026, 6, 9, 10, 30, 45)));
    }

    #[test]
    fn datetime_patches_take_every_field_from_the_input() {
        let en = utc_locale("en-US");
        let fill = instant(2024, 3, 5, 10, 30, 45);
        let result = en.normalize_date(
            PartsInput {
                year: Some(2025),
                month: Some(6),
                day: Some(9),
                hours: Some(1),
                ..PartsInput::default()
            },
            NormalizeOptions {
                patch: Some(Patch::DateTime),
                fill_date: Some(fill),
                ..NormalizeOptions::default()
            },
        );
        assert_eq!(result, Some(instant(2025, 6, 9, 1, 0, 0)));
    }

    #[test]
    fn time_patches_recompose_calendar_relative_fills() {
        // The fill's date round-trips through its Hebrew fields.
        let hebrew = utc_locale(LocaleConfig {
            id: Some("en-US".to_string()),
            calendar: Some("hebrew".to_string()),
            ..LocaleConfig::default()
        });
        let fill = instant(2024, 3, 5, 10, 30, 45);
        let result = hebrew.normalize_date(
            PartsInput {
                hours: Some(8),
                minutes: Some(15),
                ..PartsInput::default()
            },
            NormalizeOptions {
                patch: Some(Patch::Time),
                fill_date: Some(fill),
                ..NormalizeOptions::default()
            },
        );
        assert_eq!(result, Some(instant(2024, 3, 5, 8, 15, 0)));
    }

    #[test]
    fn time_of_day_literals_parse() {
        assert_eq!(
            "13:45".parse::<TimeOfDay>().unwrap(),
            TimeOfDay {
                hours: 13,
                minutes: 45,
                seconds: 0,
                milliseconds: 0
            }
        );
        assert_eq!(
            "09:05:30.250".parse::<TimeOfDay>().unwrap(),
            TimeOfDay {
                hours: 9,
                minutes: 5,
                seconds: 30,
                milliseconds: 250
            }
        );
        assert_eq!(
            "09:05:30.5".parse::<TimeOfDay>().unwrap().milliseconds,
            500
        );
        for bad in ["", "13", "25:00", "13:60", "13:00:60", "13:00:00:00", "a:b"] {
            assert!(bad.parse::<TimeOfDay>().is_err(), "{bad}");
        }
    }

    #[test]
    fn adjusts_to_a_fixed_time() {
        let en = utc_locale("en-US");
        let adjusted = en.adjust_time(
            instant(2024, 1, 15, 10, 7, 30),
            &TimeAdjust {
                time: Some(TimeSource::At("13:45".parse().unwrap())),
                ..TimeAdjust::default()
            },
        );
        assert_eq!(adjusted, Some(instant(2024, 1, 15, 13, 45, 0)));
    }

    #[test]
    fn snaps_minutes_to_the_increment() {
        let en = utc_locale("en-US");
        let adjusted = en.adjust_time(
            instant(2024, 1, 15, 10, 7, 0),
            &TimeAdjust {
                minute_increment: Some(15),
                ..TimeAdjust::default()
            },
        );
        assert_eq!(adjusted, Some(instant(2024, 1, 15, 10, 0, 0)));

        let adjusted = en.adjust_time(
            instant(2024, 1, 15, 10, 59, 0),
            &TimeAdjust {
                minute_increment: Some(25),
                ..TimeAdjust::default()
            },
        );
        assert_eq!(adjusted, Some(instant(2024, 1, 15, 10, 50, 0)));
    }

    #[test]
    fn clamps_hours_into_the_valid_range() {
        let en = utc_locale("en-US");
        let rule = TimeAdjust {
            valid_hours: Some(ValidHours::Range { min: 9, max: 17 }),
            ..TimeAdjust::default()
        };
        let adjusted = en.adjust_time(instant(2024, 1, 15, 20, 15, 0), &rule);
        assert_eq!(adjusted, Some(instant(2024, 1, 15, 17, 15, 0)));
        let adjusted = en.adjust_time(instant(2024, 1, 15, 3, 0, 0), &rule);
        assert_eq!(adjusted, Some(instant(2024, 1, 15, 9, 0, 0)));
    }

    #[test]
    fn hour_ties_keep_the_earlier_option() {
        let en = utc_locale("en-US");
        let adjusted = en.adjust_time(
            instant(2024, 1, 15, 13, 0, 0),
            &TimeAdjust {
                valid_hours: Some(ValidHours::Predicate(|hour, _| hour % 2 == 0)),
                ..TimeAdjust::default()
            },
        );
        assert_eq!(adjusted, Some(instant(2024, 1, 15, 12, 0, 0)));
    }

    #[test]
    fn noop_adjustment_returns_the_date_unchanged() {
        let en = utc_locale("en-US");
        let t = instant(2024, 1, 15, 10, 7, 30);
        assert_eq!(en.adjust_time(t, &TimeAdjust::default()), Some(t));
    }

    #[test]
    fn hour_options_respect_each_rule_shape() {
        let en = utc_locale("en-US");
        let parts = en.date_parts(instant(2024, 1, 15, 0, 0, 0)).unwrap();
        let list = en.hour_options(&ValidHours::List(vec![2, 1, 22]), &parts);
        assert_eq!(
            list.iter().map(|o| o.value).collect::<Vec<_>>(),
            vec![1, 2, 22]
        );
        assert_eq!(list[0].label, "01");
        let range = en.hour_options(&ValidHours::Range { min: 9, max: 11 }, &parts);
        assert_eq!(
            range.iter().map(|o| o.value).collect::<Vec<_>>(),
            vec![9, 10, 11]
        );
    }

    #[test]
    fn minute_options_step_by_the_increment() {
        let en = utc_locale("en-US");
        let options = en.minute_options(15);
        assert_eq!(
            options.iter().map(|o| o.value).collect::<Vec<_>>(),
            vec![0, 15, 30, 45]
        );
        assert_eq!(options[1].label, "15");
        // A zero increment behaves as one.
        assert_eq!(en.minute_options(0).len(), 60);
    }

    #[test]
    fn denormalizes_to_each_representation() {
        let en = utc_locale("en-US");
        let t = instant(2024, 1, 15, 10, 30, 0);
        assert_eq!(
            en.denormalize_date(t, DateOutputKind::Timestamp, None),
            DateOutput::Timestamp(1_705_314_600_000)
        );
        assert_eq!(
            en.denormalize_date(t, DateOutputKind::Text, Some("MM/DD/YYYY")),
            DateOutput::Text("01/15/2024".to_string())
        );
        assert_eq!(
            en.denormalize_date(t, DateOutputKind::Text, None),
            DateOutput::Text("2024-01-15T10:30:00.000".to_string())
        );
        assert_eq!(
            en.denormalize_date(t, DateOutputKind::Instant, None),
            DateOutput::Instant(t)
        );
    }
}
