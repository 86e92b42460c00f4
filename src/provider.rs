//! Locale environment detection and CLDR-backed locale data: default
//! calendars, script direction, and week conventions.

use icu::calendar::types::Weekday;
use icu::calendar::week::WeekInformation;
use icu::locale::extensions::unicode::Key;
use icu::locale::{Locale as IcuLocale, LocaleDirectionality, LocaleExpander};
use tracing::debug;

use crate::calendar::CalendarKind;
use crate::locale::Direction;

/// Locale tag taken from the process environment (`LC_ALL`, `LC_TIME`,
/// `LANG` in that order), normalized to BCP-47. Falls back to `en-US`.
pub fn detect_locale() -> String {
    for var in ["LC_ALL", "LC_TIME", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            if let Some(tag) = env_tag(&value) {
                return canonical_tag(&tag).unwrap_or(tag);
            }
        }
    }
    String::from("en-US")
}

/// Converts a POSIX environment value (`en_US.UTF-8`, `de_DE@euro`) to a
/// BCP-47 tag. `C` and `POSIX` carry no locale information.
fn env_tag(raw: &str) -> Option<String> {
    let value = raw.trim();
    let value = value.split(['.', '@']).next().unwrap_or(value);
    if value.is_empty() || value == "C" || value == "POSIX" {
        return None;
    }
    Some(value.replace('_', "-"))
}

/// Parses a tag leniently; `None` when ICU cannot make sense of it.
pub fn parse_tag(tag: &str) -> Option<IcuLocale> {
    tag.parse().ok()
}

/// Canonical casing of a tag (`EN-us` becomes `en-US`).
pub fn canonical_tag(tag: &str) -> Option<String> {
    parse_tag(tag).map(|l| l.to_string())
}

/// Value of a `-u-` extension keyword, e.g. `ca` for `th-TH-u-ca-buddhist`.
pub fn unicode_keyword(locale: &IcuLocale, key_str: &str) -> Option<String> {
    let key: Key = key_str.parse().ok()?;
    locale
        .extensions
        .unicode
        .keywords
        .get(&key)
        .map(|v| v.to_string())
}

/// The calendar a locale resolves to by default. An explicit `u-ca`
/// keyword wins when it names a supported calendar; otherwise the
/// regional preference applies (Buddhist in Thailand, Persian in Iran
/// and Afghanistan, Umm al-Qura in Saudi Arabia), and Gregorian covers
/// the rest.
pub fn default_calendar(locale: &IcuLocale) -> CalendarKind {
    if let Some(value) = unicode_keyword(locale, "ca") {
        if let Some(kind) = CalendarKind::from_id(&value) {
            return kind;
        }
        debug!(calendar = %value, "unsupported u-ca keyword, using regional default");
    }
    let mut id = locale.id.clone();
    LocaleExpander::new_extended().maximize(&mut id);
    match id.region.map(|r| r.to_string()).as_deref() {
        Some("TH") => CalendarKind::Buddhist,
        Some("IR") | Some("AF") => CalendarKind::Persian,
        Some("SA") => CalendarKind::IslamicUmalqura,
        _ => CalendarKind::Gregorian,
    }
}

/// Script direction of a locale.
pub fn direction(locale: &IcuLocale) -> Direction {
    let ld = LocaleDirectionality::new_extended();
    if ld.is_right_to_left(&locale.id) {
        Direction::Rtl
    } else {
        Direction::Ltr
    }
}

/// CLDR first day of the week for a locale, 1 = Sunday .. 7 = Saturday.
pub fn first_day_of_week(locale: &IcuLocale) -> Option<u32> {
    let wi = WeekInformation::try_new(locale.into()).ok()?;
    Some(weekday_number(wi.first_weekday))
}

/// Weekend days of a locale, indexed 0 = Sunday .. 6 = Saturday.
pub fn weekend(locale: &IcuLocale) -> [bool; 7] {
    let mut days = [false; 7];
    match WeekInformation::try_new(locale.into()) {
        Ok(wi) => {
            for wd in [
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
                Weekday::Saturday,
                Weekday::Sunday,
            ] {
                if wi.weekend.contains(wd) {
                    days[(weekday_number(wd) - 1) as usize] = true;
                }
            }
        }
        Err(_) => {
            days[0] = true;
            days[6] = true;
        }
    }
    days
}

fn weekday_number(wd: Weekday) -> u32 {
    match wd {
        Weekday::Sunday => 1,
        Weekday::Monday => 2,
        Weekday::Tuesday => 3,
        Weekday::Wednesday => 4,
        Weekday::Thursday => 5,
        Weekday::Friday => 6,
        Weekday::Saturday => 7,
    }
}
