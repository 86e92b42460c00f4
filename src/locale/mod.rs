//! Locale resolution and the engine façade.
//!
//! A [`Locale`] bundles everything needed to move between instants,
//! calendar-relative date parts, formatted text, and month grids: the
//! resolved identifier, the active calendar system, regional defaults
//! from the registry, precomputed day and month names, an optional
//! timezone, and a memoized month-component cache.

mod page;
mod parts;

pub use page::{CalendarDay, MonthComponents, Page, PageInput};
pub use parts::{
    DateInput, DateOutput, DateOutputKind, DateParts, NormalizeOptions, PartsInput, Patch,
    TimeAdjust, TimeOfDay, TimeOption, TimeSource, ValidHours,
};

use std::fmt;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Datelike, Local, Utc};
use chrono_tz::Tz;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::CalendarKind;
use crate::mask;
use crate::names;
use crate::provider;
use crate::registry;
use crate::timezone;

/// Mask applied when none is given.
pub(crate) const DEFAULT_MASK: &str = "YYYY-MM-DD";
/// Expansion of the `iso` mask macro unless overridden.
pub(crate) const ISO_MASK: &str = "YYYY-MM-DDTHH:mm:ss.SSS";

/// Text direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    fn from_id(id: &str) -> Option<Direction> {
        match id {
            "ltr" => Some(Direction::Ltr),
            "rtl" => Some(Direction::Rtl),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length variants of the precomputed day names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameLength {
    Long,
    Short,
    /// First two characters of the short name.
    Shorter,
    /// First character of the long name.
    Narrow,
}

/// Resolved mask set. `l` is the regional long date mask and `iso` the
/// full round-trip mask; both are available as macros inside other
/// masks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Masks {
    pub l: String,
    pub iso: String,
}

impl Default for Masks {
    fn default() -> Self {
        Masks {
            l: registry::baseline().long_mask.to_string(),
            iso: ISO_MASK.to_string(),
        }
    }
}

/// Caller-facing mask overrides; unset fields fall through to the
/// registry and the built-in iso mask.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskOverrides {
    #[serde(rename = "L")]
    pub l: Option<String>,
    pub iso: Option<String>,
}

/// Partial locale configuration. Every field is optional; resolution
/// merges it over the registry entry for the matched identifier and a
/// fixed baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocaleConfig {
    pub id: Option<String>,
    pub first_day_of_week: Option<u32>,
    pub masks: MaskOverrides,
    /// Calendar identifier, validated at resolution; unsupported values
    /// are discarded.
    pub calendar: Option<String>,
    /// `ltr` or `rtl`; anything else is discarded.
    pub direction: Option<String>,
    pub am_pm: Option<[String; 2]>,
}

/// Defaults for a caller-registered locale, shadowing the built-in
/// registry at both the exact-match and prefix-match stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocaleDefaults {
    pub first_day_of_week: Option<u32>,
    pub masks: MaskOverrides,
    pub calendar: Option<String>,
    pub direction: Option<String>,
    pub am_pm: Option<[String; 2]>,
}

/// Construction-time options.
#[derive(Debug, Clone, Default)]
pub struct LocaleOptions {
    /// IANA timezone name; `None` or an unknown name means system local,
    /// `"utc"` (any case) means UTC.
    pub timezone: Option<String>,
    /// Additional locale defaults keyed by tag.
    pub locales: FxHashMap<String, LocaleDefaults>,
}

/// What a `Locale` is built from.
#[derive(Debug, Clone, Default)]
pub enum LocaleInit {
    /// Resolve everything from the environment.
    #[default]
    Default,
    Id(String),
    Config(LocaleConfig),
}

impl From<&str> for LocaleInit {
    fn from(id: &str) -> Self {
        LocaleInit::Id(id.to_string())
    }
}

impl From<String> for LocaleInit {
    fn from(id: String) -> Self {
        LocaleInit::Id(id)
    }
}

impl From<LocaleConfig> for LocaleInit {
    fn from(config: LocaleConfig) -> Self {
        LocaleInit::Config(config)
    }
}

/// Registry defaults for a tag as a partial configuration, without
/// constructing a `Locale`.
pub fn lookup_default(tag: &str) -> Option<LocaleConfig> {
    let (id, entry) = registry::lookup(tag)?;
    Some(LocaleConfig {
        id: Some(id.to_string()),
        first_day_of_week: Some(entry.first_day_of_week),
        masks: MaskOverrides {
            l: Some(entry.long_mask.to_string()),
            iso: None,
        },
        calendar: None,
        direction: None,
        am_pm: entry.am_pm.map(|[am, pm]| [am.to_string(), pm.to_string()]),
    })
}

/// A resolved locale: the engine's façade.
#[derive(Debug)]
pub struct Locale {
    id: String,
    calendar: CalendarKind,
    direction: Direction,
    first_day_of_week: u32,
    masks: Masks,
    am_pm: [String; 2],
    timezone: Option<Tz>,
    /// CLDR first weekday of the locale, used by week numbering
    /// independently of the configured first day.
    cldr_first_day: u32,
    /// Weekend days indexed by weekday - 1 (0 = Sunday).
    weekend: [bool; 7],
    day_names_long: [String; 7],
    day_names_short: [String; 7],
    day_names_shorter: [String; 7],
    day_names_narrow: [String; 7],
    month_names_long: Vec<String>,
    month_names_short: Vec<String>,
    month_cache: RwLock<FxHashMap<(u32, i32), Arc<MonthComponents>>>,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::new(LocaleInit::Default, LocaleOptions::default())
    }
}

impl Locale {
    pub fn new(init: impl Into<LocaleInit>, options: LocaleOptions) -> Locale {
        let config = match init.into() {
            LocaleInit::Default => LocaleConfig::default(),
            LocaleInit::Id(id) => LocaleConfig {
                id: Some(id),
                ..LocaleConfig::default()
            },
            LocaleInit::Config(config) => config,
        };

        let detected = provider::detect_locale();
        let requested = config.id.clone().unwrap_or_else(|| detected.clone());
        let (id, builtin, custom) = match_locale(&requested, &detected, &options.locales);
        let baseline = registry::baseline();
        let icu_locale = provider::parse_tag(&id);

        let mut calendar = icu_locale
            .as_ref()
            .map(provider::default_calendar)
            .unwrap_or_default();
        if let Some(raw) = custom.and_then(|c| c.calendar.as_deref()) {
            match CalendarKind::from_id(raw) {
                Some(kind) => calendar = kind,
                None => debug!(
                    calendar = raw,
                    locale = %id,
                    "registered locale names an unsupported calendar"
                ),
            }
        }
        if let Some(raw) = config.calendar.as_deref() {
            match CalendarKind::from_id(raw) {
                Some(kind) => calendar = kind,
                None => debug!(calendar = raw, "discarding unsupported calendar override"),
            }
        }

        let mut direction = icu_locale
            .as_ref()
            .map(provider::direction)
            .unwrap_or_default();
        if let Some(raw) = custom.and_then(|c| c.direction.as_deref()) {
            match Direction::from_id(raw) {
                Some(d) => direction = d,
                None => debug!(
                    direction = raw,
                    locale = %id,
                    "registered locale names an unknown direction"
                ),
            }
        }
        if let Some(raw) = config.direction.as_deref() {
            match Direction::from_id(raw) {
                Some(d) => direction = d,
                None => debug!(direction = raw, "discarding unknown direction override"),
            }
        }

        let first_day_of_week = config
            .first_day_of_week
            .or(custom.and_then(|c| c.first_day_of_week))
            .or(builtin.map(|e| e.first_day_of_week))
            .unwrap_or(baseline.first_day_of_week)
            .clamp(1, 7);

        let masks = Masks {
            l: config
                .masks
                .l
                .clone()
                .or_else(|| custom.and_then(|c| c.masks.l.clone()))
                .or_else(|| builtin.map(|e| e.long_mask.to_string()))
                .unwrap_or_else(|| baseline.long_mask.to_string()),
            iso: config
                .masks
                .iso
                .clone()
                .or_else(|| custom.and_then(|c| c.masks.iso.clone()))
                .unwrap_or_else(|| ISO_MASK.to_string()),
        };

        let am_pm = config
            .am_pm
            .clone()
            .or_else(|| custom.and_then(|c| c.am_pm.clone()))
            .or_else(|| {
                builtin
                    .and_then(|e| e.am_pm)
                    .map(|[am, pm]| [am.to_string(), pm.to_string()])
            })
            .unwrap_or_else(|| [String::from("am"), String::from("pm")]);

        let timezone = timezone::resolve(options.timezone.as_deref());
        if timezone.is_none() {
            if let Some(name) = options.timezone.as_deref().filter(|n| !n.is_empty()) {
                debug!(timezone = name, "unknown timezone, using system local");
            }
        }

        let cldr_first_day = icu_locale
            .as_ref()
            .and_then(provider::first_day_of_week)
            .unwrap_or(1);
        let weekend = icu_locale.as_ref().map(provider::weekend).unwrap_or({
            let mut days = [false; 7];
            days[0] = true;
            days[6] = true;
            days
        });

        let posix = names::posix_locale(&id);
        let day_names_long = rotate_names(names::long_weekdays(posix), first_day_of_week);
        let day_names_short = rotate_names(names::short_weekdays(posix), first_day_of_week);
        let day_names_shorter: [String; 7] =
            std::array::from_fn(|i| day_names_short[i].chars().take(2).collect());
        let day_names_narrow: [String; 7] =
            std::array::from_fn(|i| day_names_long[i].chars().take(1).collect());
        let (month_names_long, month_names_short) = month_name_tables(calendar, posix);

        debug!(
            locale = %id,
            calendar = calendar.as_str(),
            %direction,
            first_day_of_week,
            timezone = %timezone::zone_name(timezone),
            "resolved locale"
        );

        Locale {
            id,
            calendar,
            direction,
            first_day_of_week,
            masks,
            am_pm,
            timezone,
            cldr_first_day,
            weekend,
            day_names_long,
            day_names_short,
            day_names_shorter,
            day_names_narrow,
            month_names_long,
            month_names_short,
            month_cache: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn calendar(&self) -> CalendarKind {
        self.calendar
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Configured first day of week, 1 (Sunday) through 7 (Saturday).
    pub fn first_day_of_week(&self) -> u32 {
        self.first_day_of_week
    }

    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }

    /// IANA name of the active zone (the system's when unconfigured).
    pub fn timezone_name(&self) -> String {
        timezone::zone_name(self.timezone)
    }

    pub fn masks(&self) -> &Masks {
        &self.masks
    }

    pub fn am_pm(&self) -> &[String; 2] {
        &self.am_pm
    }

    pub(crate) fn day_period(&self, am: bool) -> &str {
        if am { &self.am_pm[0] } else { &self.am_pm[1] }
    }

    /// Day names of the requested length, starting at the configured
    /// first day of week.
    pub fn day_names(&self, length: NameLength) -> &[String; 7] {
        match length {
            NameLength::Long => &self.day_names_long,
            NameLength::Short => &self.day_names_short,
            NameLength::Shorter => &self.day_names_shorter,
            NameLength::Narrow => &self.day_names_narrow,
        }
    }

    /// Month names of the active calendar at its reference year.
    pub fn month_names(&self) -> &[String] {
        &self.month_names_long
    }

    pub fn month_names_short(&self) -> &[String] {
        &self.month_names_short
    }

    pub(crate) fn cldr_first_day(&self) -> u32 {
        self.cldr_first_day
    }

    pub(crate) fn weekend_table(&self) -> &[bool; 7] {
        &self.weekend
    }

    pub(crate) fn month_cache(&self) -> &RwLock<FxHashMap<(u32, i32), Arc<MonthComponents>>> {
        &self.month_cache
    }

    /// Name of a specific month, honoring leap months in lunisolar
    /// calendars (which make name position depend on the year).
    pub fn month_label(&self, year: i32, month: u32, long: bool) -> Option<&str> {
        if self.calendar.gregorian_months() {
            let names = if long {
                &self.month_names_long
            } else {
                &self.month_names_short
            };
            names.get(month.checked_sub(1)? as usize).map(String::as_str)
        } else {
            let code = self.calendar.month_code(year, month)?;
            // The M06 code is Adar in a common year and Adar II when the
            // leap month M05L precedes it.
            if self.calendar == CalendarKind::Hebrew
                && code.as_str() == "M06"
                && self.calendar.months_in_year(year) == Some(13)
            {
                return Some("Adar II");
            }
            names::coded_month_name(self.calendar, code.as_str())
        }
    }

    /// Formats an instant through a mask. A mask ending in a `Z` zone
    /// field renders UTC field values; otherwise the configured timezone
    /// (or system local) applies.
    pub fn format(&self, instant: DateTime<Utc>, mask: &str) -> String {
        let mask = match self.normalize_masks(&[mask], DEFAULT_MASK).into_iter().next() {
            Some(mask) => mask,
            None => DEFAULT_MASK.to_string(),
        };
        let (tokens, wants_utc) = mask::tokenize(&mask);
        let zone = if wants_utc { Some(Tz::UTC) } else { self.timezone };
        match self.date_parts_in_zone(instant, zone) {
            Some(parts) => mask::format::render(&tokens, &parts, self),
            None => String::new(),
        }
    }

    /// Parses text against candidate masks in order. The first mask
    /// whose tokens all match decides the outcome, even when its fields
    /// compose to nothing; masks that fail to match are skipped. When no
    /// mask matches, an ISO-shaped native parse is attempted.
    pub fn parse(&self, text: &str, masks: &[&str]) -> Option<DateTime<Utc>> {
        if text.chars().count() > 1000 {
            debug!(length = text.len(), "rejecting oversized parse input");
            return None;
        }
        for mask in self.normalize_masks(masks, DEFAULT_MASK) {
            let (tokens, _) = mask::tokenize(&mask);
            if let Some(fields) = mask::parse::match_tokens(&tokens, text, self) {
                return self.compose_parsed(fields);
            }
        }
        mask::parse::parse_iso(text)
    }

    /// Expands mask macros, drops empty results, and falls back to the
    /// given default mask.
    fn normalize_masks(&self, masks: &[&str], default_mask: &str) -> Vec<String> {
        let mut out: Vec<String> = masks
            .iter()
            .map(|m| self.expand_macros(m))
            .filter(|m| !m.is_empty())
            .collect();
        if out.is_empty() {
            let fallback = self.expand_macros(default_mask);
            if !fallback.is_empty() {
                out.push(fallback);
            }
        }
        out
    }

    // First occurrence only, macro `L` before `iso`.
    fn expand_macros(&self, mask: &str) -> String {
        mask.replacen('L', &self.masks.l, 1)
            .replacen("iso", &self.masks.iso, 1)
    }

    fn compose_parsed(&self, mut fields: mask::parse::ParsedFields) -> Option<DateTime<Utc>> {
        if let (Some(hour), Some(is_pm)) = (fields.hour, fields.is_pm) {
            if is_pm && hour != 12 {
                fields.hour = Some(hour + 12);
            } else if !is_pm && hour == 12 {
                fields.hour = Some(0);
            }
        }
        let today = Local::now().date_naive();
        let year = fields.year.filter(|&y| y != 0).unwrap_or_else(|| today.year());
        let month0 = fields.month0.unwrap_or(0);
        let day = i64::from(fields.day.filter(|&d| d != 0).unwrap_or(1));
        let hours = i64::from(fields.hour.unwrap_or(0));
        let minutes = i64::from(fields.minute.unwrap_or(0));
        let seconds = i64::from(fields.second.unwrap_or(0));
        let millis = i64::from(fields.millisecond.unwrap_or(0));

        if let Some(offset) = fields.timezone_offset {
            // An embedded offset pins the wall clock: correct the minute
            // field and compose in UTC, rolling any overflow.
            let minutes = minutes - i64::from(offset);
            timezone::compose_utc_rolling(year, month0, day, hours, minutes, seconds, millis)
        } else {
            self.date_from_parts(&PartsInput {
                year: Some(year),
                month: Some(month0 + 1),
                day: Some(day),
                hours: Some(hours),
                minutes: Some(minutes),
                seconds: Some(seconds),
                milliseconds: Some(millis),
                calendar: None,
            })
        }
    }
}

/// Exact case-insensitive match, then 2-letter prefix, then the detected
/// tag as-is. Caller-registered locales shadow the built-in registry at
/// both stages.
fn match_locale<'a>(
    requested: &str,
    detected: &str,
    custom: &'a FxHashMap<String, LocaleDefaults>,
) -> (
    String,
    Option<&'static registry::RegistryEntry>,
    Option<&'a LocaleDefaults>,
) {
    let lower = requested.to_lowercase();
    let mut candidates = vec![lower.clone()];
    if let Some(prefix) = lower.get(..2).filter(|p| p.len() < lower.len()) {
        candidates.push(prefix.to_string());
    }
    for candidate in &candidates {
        if let Some((key, defaults)) = custom
            .iter()
            .find(|(key, _)| key.to_lowercase() == *candidate)
        {
            let builtin = registry::lookup(key).map(|(_, entry)| entry);
            return (key.clone(), builtin, Some(defaults));
        }
        if let Some((id, entry)) = registry::lookup(candidate) {
            if id.to_lowercase() == *candidate {
                return (id.to_string(), Some(entry), None);
            }
        }
    }
    let builtin = registry::lookup(detected)
        .filter(|(id, _)| id.eq_ignore_ascii_case(detected))
        .map(|(_, entry)| entry);
    (detected.to_string(), builtin, None)
}

fn rotate_names(names: &'static [&'static str], first_day_of_week: u32) -> [String; 7] {
    std::array::from_fn(|i| {
        let idx = (i + first_day_of_week as usize - 1) % 7;
        names.get(idx).map(|s| s.to_string()).unwrap_or_default()
    })
}

fn month_name_tables(
    calendar: CalendarKind,
    posix: pure_rust_locales::Locale,
) -> (Vec<String>, Vec<String>) {
    if calendar.gregorian_months() {
        let long = names::long_months(posix)
            .iter()
            .map(|s| s.to_string())
            .collect();
        let short = names::short_months(posix)
            .iter()
            .map(|s| s.to_string())
            .collect();
        (long, short)
    } else {
        let year = calendar.reference_year();
        let count = calendar.months_in_year(year).unwrap_or(12);
        let table: Vec<String> = (1..=count)
            .map(|month| {
                calendar
                    .month_code(year, month)
                    .and_then(|code| names::coded_month_name(calendar, code.as_str()))
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        (table.clone(), table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn resolves_builtin_locales() {
        let en = Locale::new("en-US", LocaleOptions::default());
        assert_eq!(en.id(), "en-US");
        assert_eq!(en.first_day_of_week(), 1);
        assert_eq!(en.masks().l, "MM/DD/YYYY");
        assert_eq!(en.calendar(), CalendarKind::Gregorian);
        assert_eq!(en.direction(), Direction::Ltr);
        assert_eq!(en.am_pm(), &["am".to_string(), "pm".to_string()]);
    }

    #[test]
    fn prefix_matching_falls_back_to_the_language() {
        let fr = Locale::new("fr-BE", LocaleOptions::default());
        assert_eq!(fr.id(), "fr");
        assert_eq!(fr.first_day_of_week(), 2);
    }

    #[test]
    fn aliases_resolve_to_regional_defaults() {
        let zh = Locale::new("zh", LocaleOptions::default());
        assert_eq!(zh.id(), "zh");
        assert_eq!(zh.am_pm(), &["上午".to_string(), "下午".to_string()]);
        assert_eq!(zh.first_day_of_week(), 2);
    }

    #[test]
    fn case_is_ignored_when_matching() {
        let en = Locale::new("EN-us", LocaleOptions::default());
        assert_eq!(en.id(), "en-US");
    }

    #[test]
    fn regional_calendars_come_from_cldr() {
        assert_eq!(
            Locale::new("th", LocaleOptions::default()).calendar(),
            CalendarKind::Buddhist
        );
        assert_eq!(
            Locale::new("fa-IR", LocaleOptions::default()).calendar(),
            CalendarKind::Persian
        );
    }

    #[test]
    fn rtl_locales_carry_their_direction() {
        let he = Locale::new("he", LocaleOptions::default());
        assert_eq!(he.direction(), Direction::Rtl);
        let ar = Locale::new("ar", LocaleOptions::default());
        assert_eq!(ar.direction(), Direction::Rtl);
    }

    #[test]
    fn unsupported_calendar_override_is_discarded() {
        let locale = Locale::new(
            LocaleConfig {
                id: Some("en-US".to_string()),
                calendar: Some("chinese".to_string()),
                ..LocaleConfig::default()
            },
            LocaleOptions::default(),
        );
        assert_eq!(locale.calendar(), CalendarKind::Gregorian);
    }

    #[test]
    fn supported_calendar_override_wins() {
        let locale = Locale::new(
            LocaleConfig {
                id: Some("en-US".to_string()),
                calendar: Some("hebrew".to_string()),
                ..LocaleConfig::default()
            },
            LocaleOptions::default(),
        );
        assert_eq!(locale.calendar(), CalendarKind::Hebrew);
        assert_eq!(locale.month_names().len(), 12);
        assert_eq!(locale.month_names()[0], "Tishri");
    }

    #[test]
    fn first_day_of_week_is_clamped() {
        let locale = Locale::new(
            LocaleConfig {
                id: Some("en-US".to_string()),
                first_day_of_week: Some(99),
                ..LocaleConfig::default()
            },
            LocaleOptions::default(),
        );
        assert_eq!(locale.first_day_of_week(), 7);
    }

    #[test]
    fn registered_locales_shadow_builtins() {
        let mut locales = FxHashMap::default();
        locales.insert(
            "xx".to_string(),
            LocaleDefaults {
                first_day_of_week: Some(3),
                masks: MaskOverrides {
                    l: Some("YYYY.MM.DD".to_string()),
                    iso: None,
                },
                ..LocaleDefaults::default()
            },
        );
        let locale = Locale::new(
            "xx-Nowhere",
            LocaleOptions {
                timezone: None,
                locales,
            },
        );
        assert_eq!(locale.id(), "xx");
        assert_eq!(locale.first_day_of_week(), 3);
        assert_eq!(locale.masks().l, "YYYY.MM.DD");
    }

    #[test]
    fn unmatched_fields_fall_back_to_the_baseline() {
        // A registered locale with nothing filled in picks everything up
        // from the en-IE baseline.
        let mut locales = FxHashMap::default();
        locales.insert("xx".to_string(), LocaleDefaults::default());
        let locale = Locale::new(
            "xx",
            LocaleOptions {
                timezone: None,
                locales,
            },
        );
        assert_eq!(locale.id(), "xx");
        assert_eq!(locale.first_day_of_week(), 2);
        assert_eq!(locale.masks().l, "DD/MM/YYYY");
        assert_eq!(locale.masks().iso, ISO_MASK);
        assert_eq!(locale.am_pm(), &["am".to_string(), "pm".to_string()]);
    }

    #[test]
    fn day_names_start_at_the_configured_first_day() {
        let en = Locale::new("en-US", LocaleOptions::default());
        assert_eq!(en.day_names(NameLength::Long)[0], "Sunday");
        assert_eq!(en.day_names(NameLength::Shorter)[0], "Su");
        assert_eq!(en.day_names(NameLength::Narrow)[1], "M");

        let fr = Locale::new("fr", LocaleOptions::default());
        assert_eq!(fr.day_names(NameLength::Long)[0], "lundi");
        assert_eq!(fr.day_names(NameLength::Long)[6], "dimanche");
    }

    #[test]
    fn gregorian_month_names_follow_the_language() {
        let fr = Locale::new("fr", LocaleOptions::default());
        assert_eq!(fr.month_names()[0], "janvier");
        assert_eq!(fr.month_names_short()[2], "mars");
        let en = Locale::new("en-US", LocaleOptions::default());
        assert_eq!(en.month_names().len(), 12);
        assert_eq!(en.month_names()[11], "December");
    }

    #[test]
    fn formats_a_plain_date_mask() {
        let en = utc_locale("en-US");
        assert_eq!(
            en.format(instant(2024, 1, 15, 0, 0, 0), "YYYY-MM-DD"),
            "2024-01-15"
        );
        assert_eq!(
            en.format(instant(2024, 1, 15, 0, 0, 0), "L"),
            "01/15/2024"
        );
        // An empty mask falls back to the default.
        assert_eq!(en.format(instant(2024, 1, 15, 0, 0, 0), ""), "2024-01-15");
    }

    #[test]
    fn formats_names_ordinals_and_periods() {
        let en = utc_locale("en-US");
        let t = instant(2024, 1, 15, 13, 5, 9);
        assert_eq!(
            en.format(t, "WWWW, MMMM Do YYYY"),
            "Monday, January 15th 2024"
        );
        assert_eq!(en.format(t, "h:mm a"), "1:05 pm");
        assert_eq!(en.format(t, "hh:mm A"), "01:05 PM");
        assert_eq!(en.format(t, "H[h]mm"), "13h05");
    }

    #[test]
    fn format_weekday_names_ignore_rotation() {
        // Monday first: the arrays are rotated, the output must not be.
        let fr = utc_locale("fr");
        let monday = instant(2024, 1, 15, 0, 0, 0);
        assert_eq!(fr.format(monday, "WWWW"), "lundi");
        let sunday = instant(2024, 1, 14, 0, 0, 0);
        assert_eq!(fr.format(sunday, "WWWW"), "dimanche");
    }

    #[test]
    fn trailing_zone_masks_format_in_utc() {
        let ny = Locale::new(
            "en-US",
            LocaleOptions {
                timezone: Some("America/New_York".to_string()),
                ..LocaleOptions::default()
            },
        );
        let t = instant(2024, 1, 15, 1, 30, 0);
        // New York is five hours behind in January.
        assert_eq!(ny.format(t, "YYYY-MM-DD HH:mm"), "2024-01-14 20:30");
        assert_eq!(ny.format(t, "YYYY-MM-DDTHH:mm:ssZ"), "2024-01-15T01:30:00Z");
        // A trailing offset field also switches the fields to UTC.
        assert_eq!(ny.format(t, "HH:mm ZZZZ"), "01:30 +00:00");
        // A non-trailing one reports the configured zone.
        assert_eq!(ny.format(t, "ZZZ HH:mm"), "-0500 20:30");
        assert_eq!(ny.format(t, "ZZ HH:mm"), "-05 20:30");
    }

    #[test]
    fn masked_round_trips_truncate_to_mask_precision() {
        let en = utc_locale("en-US");
        let full = instant(2024, 3, 5, 14, 25, 36);
        let cases = [
            ("YYYY-MM-DDTHH:mm:ss.SSS", instant(2024, 3, 5, 14, 25, 36)),
            ("YYYY-MM-DD HH:mm:ss", instant(2024, 3, 5, 14, 25, 36)),
            ("YYYY-MM-DD HH:mm", instant(2024, 3, 5, 14, 25, 0)),
            ("MM/DD/YYYY h:mm A", instant(2024, 3, 5, 14, 25, 0)),
            ("YYYY-MM-DD", instant(2024, 3, 5, 0, 0, 0)),
            ("MMMM D, YYYY", instant(2024, 3, 5, 0, 0, 0)),
        ];
        for (mask, expected) in cases {
            let text = en.format(full, mask);
            assert_eq!(en.parse(&text, &[mask]), Some(expected), "{mask}: {text}");
        }
    }

    #[test]
    fn parses_regional_day_month_order() {
        let fr = utc_locale("fr");
        assert_eq!(
            fr.parse("05/03/2024", &["DD/MM/YYYY"]),
            Some(instant(2024, 3, 5, 0, 0, 0))
        );
        assert_eq!(
            fr.parse("05/03/2024", &["L"]),
            Some(instant(2024, 3, 5, 0, 0, 0))
        );
    }

    #[test]
    fn parses_twelve_hour_times() {
        let en = utc_locale("en-US");
        assert_eq!(
            en.parse("01/15/2024 03:05 pm", &["MM/DD/YYYY hh:mm a"]),
            Some(instant(2024, 1, 15, 15, 5, 0))
        );
        assert_eq!(
            en.parse("01/15/2024 12:00 am", &["MM/DD/YYYY hh:mm a"]),
            Some(instant(2024, 1, 15, 0, 0, 0))
        );
        assert_eq!(
            en.parse("01/15/2024 12:30 pm", &["MM/DD/YYYY hh:mm a"]),
            Some(instant(2024, 1, 15, 12, 30, 0))
        );
    }

    #[test]
    fn parsed_offsets_correct_to_utc() {
        let en = utc_locale("en-US");
        assert_eq!(
            en.parse("2024-01-15 10:30 +02:00", &["YYYY-MM-DD HH:mm ZZZZ"]),
            Some(instant(2024, 1, 15, 8, 30, 0))
        );
        assert_eq!(
            en.parse("2024-01-15 00:30 -01:30", &["YYYY-MM-DD HH:mm ZZZZ"]),
            Some(instant(2024, 1, 15, 2, 0, 0))
        );
    }

    #[test]
    fn month_names_round_trip_through_parse() {
        let en = utc_locale("en-US");
        assert_eq!(
            en.parse("March 5, 2024", &["MMMM D, YYYY"]),
            Some(instant(2024, 3, 5, 0, 0, 0))
        );
        assert_eq!(
            en.parse("mArCh 5, 2024", &["MMMM D, YYYY"]),
            Some(instant(2024, 3, 5, 0, 0, 0))
        );
    }

    #[test]
    fn unknown_month_name_keeps_the_month_unset() {
        let en = utc_locale("en-US");
        // The word matches, the lookup misses, composition proceeds with
        // the month defaulted to January.
        let parsed = en.parse("Floop 5, 2024", &["MMMM D, YYYY"]).unwrap();
        let parts = en.date_parts(parsed).unwrap();
        assert_eq!(parts.year, 2024);
        assert_eq!(parts.month, 1);
        assert_eq!(parts.day, 5);
    }

    #[test]
    fn failing_masks_fall_through_to_iso() {
        let en = utc_locale("en-US");
        assert_eq!(
            en.parse("2024-03-05T06:30:00Z", &["DD/MM/YYYY"]),
            Some(instant(2024, 3, 5, 6, 30, 0))
        );
        assert_eq!(en.parse("not a date", &["DD/MM/YYYY"]), None);
    }

    #[test]
    fn first_matching_mask_wins() {
        let en = utc_locale("en-US");
        assert_eq!(
            en.parse("05/03/2024", &["DD/MM/YYYY", "MM/DD/YYYY"]),
            Some(instant(2024, 3, 5, 0, 0, 0))
        );
    }

    #[test]
    fn oversized_input_is_rejected() {
        let en = utc_locale("en-US");
        let text = "9".repeat(1001);
        assert_eq!(en.parse(&text, &["YYYY"]), None);
    }

    #[test]
    fn two_digit_years_pivot() {
        let en = utc_locale("en-US");
        assert_eq!(
            en.parse("01/15/24", &["MM/DD/YY"]),
            Some(instant(2024, 1, 15, 0, 0, 0))
        );
        assert_eq!(
            en.parse("01/15/99", &["MM/DD/YY"]),
            Some(instant(1999, 1, 15, 0, 0, 0))
        );
    }

    #[test]
    fn registry_defaults_are_queryable() {
        let config = lookup_default("ja").unwrap();
        assert_eq!(config.id.as_deref(), Some("ja"));
        assert_eq!(config.masks.l.as_deref(), Some("YYYY年M月D日"));
        assert!(lookup_default("tlh-QO").is_none());
    }

    #[test]
    fn hebrew_month_labels_shift_in_leap_years() {
        let he = Locale::new(
            LocaleConfig {
                id: Some("en-US".to_string()),
                calendar: Some("hebrew".to_string()),
                ..LocaleConfig::default()
            },
            LocaleOptions::default(),
        );
        // 5784 is a leap year: month 6 is Adar I, month 7 is Adar II.
        assert_eq!(he.month_label(5784, 6, true), Some("Adar I"));
        assert_eq!(he.month_label(5784, 7, true), Some("Adar II"));
        // 5783 is not: month 6 is Adar.
        assert_eq!(he.month_label(5783, 6, true), Some("Adar"));
    }
}
