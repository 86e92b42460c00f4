//! Calendar systems and conversions between civil (proleptic Gregorian)
//! dates and calendar-relative fields.
//!
//! All calendar math is delegated to ICU4X. Dates on the civil side are
//! plain [`NaiveDate`]s; the calendar side works in extended years and
//! ordinal months (1-based, so a Hebrew leap year runs 1..=13 and Adar I
//! is the sixth ordinal month of its year).

use chrono::{Datelike, NaiveDate};
use icu::calendar::{AnyCalendar, AnyCalendarKind, Date as IcuDate};
use icu_calendar::types::DateFields;
use std::fmt;
use std::str::FromStr;
use tinystr::TinyAsciiStr;

use crate::error::AlmanacError;

/// A calendar system the engine can decompose dates into.
///
/// Identifiers follow the CLDR `u-ca` keyword values. The Hijri variants
/// are the tabular type II calendar with civil (Friday) and astronomical
/// (Thursday) epochs, plus the Umm al-Qura lookup table used in Saudi
/// Arabia.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum CalendarKind {
    #[default]
    Gregorian,
    Buddhist,
    Coptic,
    Ethiopic,
    EthiopicAmeteAlem,
    Hebrew,
    Indian,
    IslamicCivil,
    IslamicTbla,
    IslamicUmalqura,
    Japanese,
    Persian,
    Roc,
}

impl CalendarKind {
    /// All supported calendar systems, in identifier order.
    pub const ALL: [CalendarKind; 13] = [
        CalendarKind::Buddhist,
        CalendarKind::Coptic,
        CalendarKind::Ethiopic,
        CalendarKind::EthiopicAmeteAlem,
        CalendarKind::Gregorian,
        CalendarKind::Hebrew,
        CalendarKind::Indian,
        CalendarKind::IslamicCivil,
        CalendarKind::IslamicTbla,
        CalendarKind::IslamicUmalqura,
        CalendarKind::Japanese,
        CalendarKind::Persian,
        CalendarKind::Roc,
    ];

    /// Resolves a calendar identifier, accepting the common aliases that
    /// show up in locale `u-ca` extensions.
    pub fn from_id(id: &str) -> Option<CalendarKind> {
        match id.trim().to_ascii_lowercase().as_str() {
            "gregory" | "gregorian" | "iso8601" => Some(Self::Gregorian),
            "buddhist" => Some(Self::Buddhist),
            "coptic" => Some(Self::Coptic),
            "ethiopic" => Some(Self::Ethiopic),
            "ethioaa" | "ethiopic-amete-alem" => Some(Self::EthiopicAmeteAlem),
            "hebrew" => Some(Self::Hebrew),
            "indian" => Some(Self::Indian),
            "islamic" | "islamic-civil" | "islamicc" => Some(Self::IslamicCivil),
            "islamic-tbla" => Some(Self::IslamicTbla),
            "islamic-umalqura" => Some(Self::IslamicUmalqura),
            "japanese" => Some(Self::Japanese),
            "persian" => Some(Self::Persian),
            "roc" => Some(Self::Roc),
            _ => None,
        }
    }

    /// Canonical CLDR identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gregorian => "gregory",
            Self::Buddhist => "buddhist",
            Self::Coptic => "coptic",
            Self::Ethiopic => "ethiopic",
            Self::EthiopicAmeteAlem => "ethioaa",
            Self::Hebrew => "hebrew",
            Self::Indian => "indian",
            Self::IslamicCivil => "islamic-civil",
            Self::IslamicTbla => "islamic-tbla",
            Self::IslamicUmalqura => "islamic-umalqura",
            Self::Japanese => "japanese",
            Self::Persian => "persian",
            Self::Roc => "roc",
        }
    }

    fn icu_kind(self) -> AnyCalendarKind {
        match self {
            Self::Gregorian => AnyCalendarKind::Gregorian,
            Self::Buddhist => AnyCalendarKind::Buddhist,
            Self::Coptic => AnyCalendarKind::Coptic,
            Self::Ethiopic => AnyCalendarKind::Ethiopian,
            Self::EthiopicAmeteAlem => AnyCalendarKind::EthiopianAmeteAlem,
            Self::Hebrew => AnyCalendarKind::Hebrew,
            Self::Indian => AnyCalendarKind::Indian,
            Self::IslamicCivil => AnyCalendarKind::HijriTabularTypeIIFriday,
            Self::IslamicTbla => AnyCalendarKind::HijriTabularTypeIIThursday,
            Self::IslamicUmalqura => AnyCalendarKind::HijriUmmAlQura,
            Self::Japanese => AnyCalendarKind::Japanese,
            Self::Persian => AnyCalendarKind::Persian,
            Self::Roc => AnyCalendarKind::Roc,
        }
    }

    /// Calendars whose month names coincide with the Gregorian ones.
    pub(crate) fn gregorian_months(self) -> bool {
        matches!(
            self,
            Self::Gregorian | Self::Buddhist | Self::Japanese | Self::Roc
        )
    }

    /// A year used to materialize month names. Chosen so the year is
    /// regular (no leap month) and well inside the calendar's range.
    pub(crate) fn reference_year(self) -> i32 {
        match self {
            Self::Gregorian => 2000,
            Self::Buddhist => 2550,
            Self::Coptic => 1720,
            Self::Ethiopic => 2000,
            Self::EthiopicAmeteAlem => 7500,
            Self::Hebrew => 5750,
            Self::Indian => 1920,
            Self::IslamicCivil | Self::IslamicTbla | Self::IslamicUmalqura => 1420,
            Self::Japanese => 1,
            Self::Persian => 1400,
            Self::Roc => 100,
        }
    }

    /// Decomposes a civil date into fields of this calendar.
    pub fn decompose(self, civil: NaiveDate) -> Option<CalendarDate> {
        let iso = IcuDate::try_new_iso(civil.year(), civil.month() as u8, civil.day() as u8).ok()?;
        let d = iso.to_any().to_calendar(AnyCalendar::new(self.icu_kind()));
        let yi = d.year();
        let year = if yi.era().is_some() {
            yi.extended_year()
        } else {
            yi.era_year_or_related_iso()
        };
        Some(CalendarDate {
            year,
            month: u32::from(d.month().ordinal),
            day: u32::from(d.day_of_month().0),
            month_code: d.month().standard_code.0,
            days_in_month: u32::from(d.days_in_month()),
            days_in_year: u32::from(d.days_in_year()),
            months_in_year: u32::from(d.months_in_year()),
            in_leap_year: d.is_in_leap_year(),
        })
    }

    /// Composes calendar-relative fields back into a civil date. The
    /// month is clamped into the year and the day into the month, so a
    /// 13th month in a 12-month year lands on the final month rather
    /// than failing.
    pub fn compose(self, year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        let month = month.clamp(1, self.months_in_year(year)?);
        let day = day.clamp(1, self.days_in_month(year, month)?);
        let cal = AnyCalendar::new(self.icu_kind());
        let mut fields = DateFields::default();
        fields.extended_year = Some(year);
        fields.ordinal_month = Some(month as u8);
        fields.day = Some(day as u8);
        let d = IcuDate::try_from_fields(fields, Default::default(), cal).ok()?;
        let iso = d.to_iso();
        NaiveDate::from_ymd_opt(
            iso.year().extended_year(),
            u32::from(iso.month().ordinal),
            u32::from(iso.day_of_month().0),
        )
    }

    /// Civil date of the first day of a calendar year.
    pub fn year_start(self, year: i32) -> Option<NaiveDate> {
        self.compose(year, 1, 1)
    }

    /// Number of months in a calendar year.
    pub fn months_in_year(self, year: i32) -> Option<u32> {
        Some(u32::from(self.first_of(year, 1)?.months_in_year()))
    }

    /// Number of days in an ordinal calendar month.
    pub fn days_in_month(self, year: i32, month: u32) -> Option<u32> {
        Some(u32::from(self.first_of(year, month)?.days_in_month()))
    }

    /// Number of days in a calendar year.
    pub fn days_in_year(self, year: i32) -> Option<u32> {
        Some(u32::from(self.first_of(year, 1)?.days_in_year()))
    }

    /// CLDR month code (`M01`..`M13`, with an `L` suffix for leap
    /// months) of an ordinal month.
    pub fn month_code(self, year: i32, month: u32) -> Option<TinyAsciiStr<4>> {
        Some(self.first_of(year, month)?.month().standard_code.0)
    }

    fn first_of(self, year: i32, month: u32) -> Option<IcuDate<AnyCalendar>> {
        let cal = AnyCalendar::new(self.icu_kind());
        let mut fields = DateFields::default();
        fields.extended_year = Some(year);
        fields.ordinal_month = Some(u8::try_from(month).ok()?);
        fields.day = Some(1);
        IcuDate::try_from_fields(fields, Default::default(), cal).ok()
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarKind {
    type Err = AlmanacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| AlmanacError::UnknownCalendar(s.to_string()))
    }
}

impl TryFrom<String> for CalendarKind {
    type Error = AlmanacError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CalendarKind> for String {
    fn from(kind: CalendarKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A civil date decomposed into calendar-relative fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    /// Extended year (continuous across eras).
    pub year: i32,
    /// Ordinal month within the year, 1-based.
    pub month: u32,
    /// Day of month, 1-based.
    pub day: u32,
    /// CLDR month code of the ordinal month.
    pub month_code: TinyAsciiStr<4>,
    pub days_in_month: u32,
    pub days_in_year: u32,
    pub months_in_year: u32,
    pub in_leap_year: bool,
}
