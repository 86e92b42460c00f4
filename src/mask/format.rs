//! Renders a token stream against a decomposed date.

use super::{Field, Token};
use crate::locale::{DateParts, Locale, NameLength};

/// English ordinal suffix for a day number.
pub(crate) fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

fn weekday_name(locale: &Locale, length: NameLength, weekday: u32) -> &str {
    // Day-name arrays start at the configured first day of week, so the
    // absolute weekday has to be rotated back before indexing.
    let idx = (weekday as i32 - locale.first_day_of_week() as i32).rem_euclid(7) as usize;
    locale.day_names(length)[idx].as_str()
}

pub(crate) fn render(tokens: &[Token], parts: &DateParts, locale: &Locale) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Field(field) => render_field(*field, parts, locale, &mut out),
        }
    }
    out
}

fn render_field(field: Field, parts: &DateParts, locale: &Locale, out: &mut String) {
    use std::fmt::Write;

    // Infallible; formatting into a String cannot error.
    let _ = match field {
        Field::Day => write!(out, "{}", parts.day),
        Field::DayPad => write!(out, "{:02}", parts.day),
        Field::DayOrdinal => write!(out, "{}{}", parts.day, ordinal_suffix(parts.day)),
        Field::WeekdayNum => write!(out, "{}", parts.weekday - 1),
        Field::WeekdayNumPad => write!(out, "{:02}", parts.weekday - 1),
        Field::WeekdayNarrow => {
            write!(out, "{}", weekday_name(locale, NameLength::Narrow, parts.weekday))
        }
        Field::WeekdayShorter => {
            write!(out, "{}", weekday_name(locale, NameLength::Shorter, parts.weekday))
        }
        Field::WeekdayShort => {
            write!(out, "{}", weekday_name(locale, NameLength::Short, parts.weekday))
        }
        Field::WeekdayLong => {
            write!(out, "{}", weekday_name(locale, NameLength::Long, parts.weekday))
        }
        Field::Month => write!(out, "{}", parts.month),
        Field::MonthPad => write!(out, "{:02}", parts.month),
        Field::MonthShort => write!(
            out,
            "{}",
            locale.month_label(parts.year, parts.month, false).unwrap_or_default()
        ),
        Field::MonthLong => write!(
            out,
            "{}",
            locale.month_label(parts.year, parts.month, true).unwrap_or_default()
        ),
        Field::YearShort => {
            let year = parts.year.to_string();
            write!(out, "{}", year.chars().skip(2).collect::<String>())
        }
        Field::Year => write!(out, "{:04}", parts.year),
        Field::Hour24 => write!(out, "{}", parts.hours),
        Field::Hour24Pad => write!(out, "{:02}", parts.hours),
        Field::Hour12 => write!(out, "{}", hour12(parts.hours)),
        Field::Hour12Pad => write!(out, "{:02}", hour12(parts.hours)),
        Field::Minute => write!(out, "{}", parts.minutes),
        Field::MinutePad => write!(out, "{:02}", parts.minutes),
        Field::Second => write!(out, "{}", parts.seconds),
        Field::SecondPad => write!(out, "{:02}", parts.seconds),
        Field::Millis1 => write!(out, "{}", (parts.milliseconds + 50) / 100),
        Field::Millis2 => write!(out, "{:02}", (parts.milliseconds + 5) / 10),
        Field::Millis3 => write!(out, "{:03}", parts.milliseconds),
        Field::DayPeriodLower => write!(out, "{}", locale.day_period(parts.hours < 12)),
        Field::DayPeriodUpper => {
            write!(out, "{}", locale.day_period(parts.hours < 12).to_uppercase())
        }
        Field::ZoneLiteral => write!(out, "Z"),
        Field::ZoneHours => {
            let o = parts.timezone_offset;
            write!(out, "{}{:02}", zone_sign(o), o.abs() / 60)
        }
        Field::ZoneCompact => {
            let o = parts.timezone_offset;
            write!(out, "{}{:04}", zone_sign(o), o.abs() / 60 * 100 + o.abs() % 60)
        }
        Field::ZoneColon => {
            let o = parts.timezone_offset;
            write!(out, "{}{:02}:{:02}", zone_sign(o), o.abs() / 60, o.abs() % 60)
        }
    };
}

fn hour12(hours: u32) -> u32 {
    match hours % 12 {
        0 => 12,
        h => h,
    }
}

// Offsets carry the civil convention where west of UTC is positive.
fn zone_sign(offset: i32) -> char {
    if offset > 0 { '-' } else { '+' }
}
