//! Timezone resolution and conversion between instants and civil
//! wall-clock time.
//!
//! A locale either pins an IANA zone or follows the system's local zone
//! (`None`). Conversions from wall-clock time resolve DST folds to the
//! earlier instant and shift skipped times forward by the width of the
//! gap.

use chrono::offset::MappedLocalTime;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Parses an IANA zone name. `None` or an empty name selects the system
/// zone; unknown names resolve to `None` as well so the caller can fall
/// back and report.
pub fn resolve(name: Option<&str>) -> Option<Tz> {
    let name = name?.trim();
    if name.is_empty() {
        return None;
    }
    if name.eq_ignore_ascii_case("utc") {
        return Some(Tz::UTC);
    }
    name.parse().ok()
}

/// IANA name of the active zone: the configured one, else the system's.
pub fn zone_name(zone: Option<Tz>) -> String {
    match zone {
        Some(tz) => tz.name().to_string(),
        None => iana_time_zone::get_timezone().unwrap_or_else(|_| String::from("UTC")),
    }
}

/// Civil wall-clock view of an instant in the given zone (system local
/// when `None`).
pub fn civil_view(instant: DateTime<Utc>, zone: Option<Tz>) -> NaiveDateTime {
    match zone {
        Some(tz) => instant.with_timezone(&tz).naive_local(),
        None => instant.with_timezone(&Local).naive_local(),
    }
}

/// Resolves a wall-clock time in `tz` to an instant.
pub fn compose_civil<Z: TimeZone>(tz: &Z, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(naive) {
        MappedLocalTime::Single(t) => Some(t.with_timezone(&Utc)),
        MappedLocalTime::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        MappedLocalTime::None => {
            // Inside a spring-forward gap. Interpret with the offset in
            // effect before the transition, which lands past the gap.
            let day_before = naive.checked_sub_signed(TimeDelta::days(1))?;
            let offset = tz.offset_from_utc_datetime(&day_before).fix();
            let shifted =
                naive.checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))?;
            Some(Utc.from_utc_datetime(&shifted))
        }
    }
}

/// Resolves a wall-clock time in the configured zone (system local when
/// `None`).
pub fn compose_in_zone(naive: &NaiveDateTime, zone: Option<Tz>) -> Option<DateTime<Utc>> {
    match zone {
        Some(tz) => compose_civil(&tz, naive),
        None => compose_civil(&Local, naive),
    }
}

/// Builds a civil datetime from free-running fields, letting each
/// component roll into its neighbors: month 12 (0-based) wraps the year,
/// day 0 backs into the previous month, hour 24 rolls the day, and
/// negative values borrow.
pub fn roll_civil(
    year: i32,
    month0: i32,
    day: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    millis: i64,
) -> Option<NaiveDateTime> {
    let year = year.checked_add(month0.div_euclid(12))?;
    let month = month0.rem_euclid(12) as u32 + 1;
    let base = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    base.checked_add_signed(TimeDelta::days(day.checked_sub(1)?))?
        .checked_add_signed(TimeDelta::hours(hours))?
        .checked_add_signed(TimeDelta::minutes(minutes))?
        .checked_add_signed(TimeDelta::seconds(seconds))?
        .checked_add_signed(TimeDelta::milliseconds(millis))
}

/// Composes free-running fields as a UTC instant.
pub fn compose_utc_rolling(
    year: i32,
    month0: i32,
    day: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    millis: i64,
) -> Option<DateTime<Utc>> {
    let naive = roll_civil(year, month0, day, hours, minutes, seconds, millis)?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Offset of the zone at an instant in minutes, using the sign
/// convention of JavaScript's `getTimezoneOffset`: positive west of
/// Greenwich, negative east.
pub fn offset_minutes(instant: DateTime<Utc>, zone: Option<Tz>) -> i32 {
    let civil = civil_view(instant, zone);
    let as_utc = Utc.from_utc_datetime(&civil);
    ((instant - as_utc).num_seconds() / 60) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn resolve_accepts_iana_names() {
        assert_eq!(resolve(Some("America/New_York")), Some(Tz::America__New_York));
        assert_eq!(resolve(Some("UTC")), Some(Tz::UTC));
        assert_eq!(resolve(Some("utc")), Some(Tz::UTC));
        assert_eq!(resolve(Some("")), None);
        assert_eq!(resolve(Some("Mars/Olympus_Mons")), None);
        assert_eq!(resolve(None), None);
    }

    #[test]
    fn compose_fixed_offset_zone() {
        let t = compose_civil(&Tz::America__New_York, &naive(2024, 1, 15, 12, 0, 0)).unwrap();
        assert_eq!(
            t,
            Utc.with_ymd_and_hms(2024, 1, 15, 17, 0, 0).unwrap()
        );
    }

    #[test]
    fn fold_takes_the_earlier_instant() {
        // US fall-back 2023: 01:30 EDT and 01:30 EST both exist.
        let t = compose_civil(&Tz::America__New_York, &naive(2023, 11, 5, 1, 30, 0)).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2023, 11, 5, 5, 30, 0).unwrap());
    }

    #[test]
    fn gap_shifts_forward() {
        // US spring-forward 2024: 02:30 EST does not exist; the pre-gap
        // offset (-05:00) pushes the result to 07:30Z, i.e. 03:30 EDT.
        let t = compose_civil(&Tz::America__New_York, &naive(2024, 3, 10, 2, 30, 0)).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap());
    }

    #[test]
    fn rolling_composition_wraps_fields() {
        // Month 12 (0-based) rolls into January of the next year.
        assert_eq!(
            compose_utc_rolling(2023, 12, 1, 0, 0, 0, 0),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        // Day zero backs into the previous month.
        assert_eq!(
            compose_utc_rolling(2024, 0, 0, 0, 0, 0, 0),
            Some(Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap())
        );
        // Negative month borrows from the year.
        assert_eq!(
            compose_utc_rolling(2024, -1, 15, 0, 0, 0, 0),
            Some(Utc.with_ymd_and_hms(2023, 12, 15, 0, 0, 0).unwrap())
        );
        // Oversized minutes spill into hours.
        assert_eq!(
            compose_utc_rolling(2024, 0, 1, 0, 90, 0, 0),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 1, 30, 0).unwrap())
        );
    }

    #[test]
    fn offset_sign_matches_js_convention() {
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(offset_minutes(winter, Some(Tz::America__New_York)), 300);
        assert_eq!(offset_minutes(winter, Some(Tz::Europe__Berlin)), -60);
        assert_eq!(offset_minutes(winter, Some(Tz::UTC)), 0);

        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        assert_eq!(offset_minutes(summer, Some(Tz::America__New_York)), 240);
        assert_eq!(offset_minutes(summer, Some(Tz::Europe__Berlin)), -120);
    }

    #[test]
    fn civil_view_round_trips_through_compose() {
        let zones = [Tz::America__New_York, Tz::Europe__Berlin, Tz::Asia__Tokyo];
        let instants = [
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap(),
        ];
        for tz in zones {
            for t in instants {
                let view = civil_view(t, Some(tz));
                assert_eq!(compose_civil(&tz, &view), Some(t), "{tz:?} {t}");
            }
        }
    }
}
