//! Month pages: week/day decomposition of a calendar month into the
//! components and day cells a month grid renders.

use std::sync::Arc;

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarKind;
use crate::timezone;

use super::parts::{DateInput, DateParts};
use super::{Direction, Locale, NormalizeOptions};

/// A month position in the locale's active calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    pub month: u32,
    pub year: i32,
}

impl PartialOrd for Page {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Page {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.month).cmp(&(other.year, other.month))
    }
}

/// What a page can be resolved from.
#[derive(Debug, Clone, PartialEq)]
pub enum PageInput {
    /// Months relative to a base page (this month when absent).
    Offset(i32),
    /// Any date representation; the page containing it.
    Date(DateInput),
    Page(Page),
}

impl From<i32> for PageInput {
    fn from(offset: i32) -> Self {
        PageInput::Offset(offset)
    }
}

impl From<Page> for PageInput {
    fn from(page: Page) -> Self {
        PageInput::Page(page)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for PageInput {
    fn from(instant: chrono::DateTime<chrono::Utc>) -> Self {
        PageInput::Date(DateInput::Instant(instant))
    }
}

impl From<&str> for PageInput {
    fn from(text: &str) -> Self {
        PageInput::Date(DateInput::from(text))
    }
}

impl From<String> for PageInput {
    fn from(text: String) -> Self {
        PageInput::Date(DateInput::from(text))
    }
}

impl From<NaiveDate> for PageInput {
    fn from(date: NaiveDate) -> Self {
        PageInput::Date(DateInput::from(date))
    }
}

/// Shape of one month: its span, week count, and the week numbers of
/// each rendered row under three numbering schemes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthComponents {
    /// Configured first day of week, 1 = Sunday.
    pub first_day_of_week: u32,
    /// Weekday of the month's first day.
    pub first_weekday: u32,
    pub days: u32,
    pub weeks: u32,
    pub month: u32,
    pub year: i32,
    /// Civil week-of-year per row, weeks starting on the configured
    /// first day, week 1 containing January 1st.
    pub week_numbers: Vec<u32>,
    pub iso_week_numbers: Vec<u32>,
    /// Week-of-calendar-year per row under the locale's regional week
    /// convention. Umm al-Qura years opening flush with the week anchor
    /// number one week higher; Ethiopic, Amete Alem, and Indian years
    /// whose first week would number six shift back by one, and shift
    /// forward by one when the prior year ends on the regional week's
    /// last day.
    pub locale_week_numbers: Vec<i32>,
}

/// One cell of a month grid: the day's parts plus position flags and a
/// stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// Civil `YYYY-MM-DD`, with the calendar-relative date appended when
    /// the two differ.
    pub id: String,
    /// 1-based cell index across the grid.
    pub position: u32,
    /// Day-of-month label in the active calendar.
    pub label: String,
    /// Accessible long-form label.
    pub aria_label: String,
    pub parts: DateParts,
    /// The day's civil span in the locale's zone.
    pub range_start: chrono::DateTime<chrono::Utc>,
    pub range_end: chrono::DateTime<chrono::Utc>,
    pub is_today: bool,
    pub is_first_day: bool,
    pub is_last_day: bool,
    pub is_weekend: bool,
    pub in_current_month: bool,
    pub in_prev_month: bool,
    pub in_next_month: bool,
    pub on_top: bool,
    pub on_bottom: bool,
    pub on_left: bool,
    pub on_right: bool,
}

impl Locale {
    /// Components of a month in the active calendar, memoized per
    /// locale. `None` when the calendar cannot represent the month.
    pub fn month_components(&self, month: u32, year: i32) -> Option<Arc<MonthComponents>> {
        let key = (month, year);
        {
            let cache = self
                .month_cache()
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(hit) = cache.get(&key) {
                return Some(Arc::clone(hit));
            }
        }
        let built = Arc::new(self.build_month(month, year)?);
        let mut cache = self
            .month_cache()
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Some(Arc::clone(cache.entry(key).or_insert(built)))
    }

    /// Components of the month before, wrapping into the final month of
    /// the previous calendar year.
    pub fn previous_month_components(&self, month: u32, year: i32) -> Option<Arc<MonthComponents>> {
        if month == 1 {
            let months = self.calendar().months_in_year(year - 1)?;
            self.month_components(months, year - 1)
        } else {
            self.month_components(month - 1, year)
        }
    }

    /// Components of the month after, wrapping into the next calendar
    /// year.
    pub fn next_month_components(&self, month: u32, year: i32) -> Option<Arc<MonthComponents>> {
        let months = self.calendar().months_in_year(year)?;
        if month >= months {
            self.month_components(1, year + 1)
        } else {
            self.month_components(month + 1, year)
        }
    }

    fn build_month(&self, month: u32, year: i32) -> Option<MonthComponents> {
        let calendar = self.calendar();
        let first = calendar.compose(year, month, 1)?;
        let days = calendar.days_in_month(year, month)?;
        let first_weekday = weekday_number(first);
        let cldr_first = self.cldr_first_day();
        let configured_first = self.first_day_of_week();

        // Rows anchor at the configured first day, the same anchor the
        // grid walk uses.
        let leading = (first_weekday + 7 - configured_first) % 7;
        let weeks = (leading + days).div_ceil(7);

        let mut correction: i32 = 0;
        match calendar {
            CalendarKind::IslamicUmalqura if leading == 0 => correction += 1,
            CalendarKind::Ethiopic | CalendarKind::EthiopicAmeteAlem | CalendarKind::Indian
                if leading == 6 =>
            {
                correction -= 1;
            }
            _ => {}
        }
        if matches!(
            calendar,
            CalendarKind::Ethiopic | CalendarKind::EthiopicAmeteAlem | CalendarKind::Indian
        ) {
            // A previous year ending on the final day of a regional week
            // pushes every week number of this year forward by one.
            let last_of_previous = calendar.year_start(year)?.pred_opt()?;
            if (weekday_number(last_of_previous) + 7 - cldr_first) % 7 == 6 {
                correction += 1;
            }
        }

        let year_week_start = week_start(calendar.year_start(year)?, cldr_first)?;
        let mut week_numbers = Vec::with_capacity(weeks as usize);
        let mut iso_week_numbers = Vec::with_capacity(weeks as usize);
        let mut locale_week_numbers = Vec::with_capacity(weeks as usize);
        for row in 0..weeks {
            let sample = first.checked_add_days(Days::new(u64::from(7 * row)))?;
            week_numbers.push(civil_week_number(sample, configured_first)?);
            iso_week_numbers.push(sample.iso_week().week());
            let sample_week_start = week_start(sample, cldr_first)?;
            let elapsed = (sample_week_start - year_week_start).num_days() / 7;
            locale_week_numbers.push(elapsed as i32 + 1 + correction);
        }

        Some(MonthComponents {
            first_day_of_week: configured_first,
            first_weekday,
            days,
            weeks,
            month,
            year,
            week_numbers,
            iso_week_numbers,
            locale_week_numbers,
        })
    }

    /// Whether the active calendar can represent a page.
    pub fn page_is_valid(&self, page: Page) -> bool {
        page.month >= 1
            && self
                .calendar()
                .months_in_year(page.year)
                .is_some_and(|months| page.month <= months)
    }

    /// Civil date identifier of an instant in the locale's zone.
    pub fn day_id(&self, instant: chrono::DateTime<chrono::Utc>) -> String {
        let civil = timezone::civil_view(instant, self.timezone()).date();
        format!("{:04}-{:02}-{:02}", civil.year(), civil.month(), civil.day())
    }

    /// The page containing a date.
    pub fn page_for_date(&self, date: chrono::DateTime<chrono::Utc>) -> Option<Page> {
        let parts = self.date_parts(date)?;
        Some(Page {
            month: parts.month,
            year: parts.year,
        })
    }

    /// Steps a page by whole months, following the active calendar's
    /// month count per year.
    pub fn add_pages(&self, page: Page, count: i32) -> Page {
        let mut month = page.month;
        let mut year = page.year;
        for _ in 0..count.unsigned_abs() {
            if count > 0 {
                let months = self.calendar().months_in_year(year).unwrap_or(12);
                if month >= months {
                    month = 1;
                    year += 1;
                } else {
                    month += 1;
                }
            } else if month <= 1 {
                year -= 1;
                month = self.calendar().months_in_year(year).unwrap_or(12);
            } else {
                month -= 1;
            }
        }
        Page { month, year }
    }

    /// Resolves any page representation: a month offset steps from the
    /// base page (this month when absent), a date maps to its page, and
    /// a page passes through.
    pub fn to_page(&self, input: impl Into<PageInput>, base: Option<Page>) -> Option<Page> {
        match input.into() {
            PageInput::Offset(offset) => {
                let base = match base {
                    Some(page) => page,
                    None => self.page_for_date(chrono::Utc::now())?,
                };
                Some(self.add_pages(base, offset))
            }
            PageInput::Date(input) => {
                let date = self.normalize_date(input, NormalizeOptions::default())?;
                self.page_for_date(date)
            }
            PageInput::Page(page) => Some(page),
        }
    }

    /// Walks a month page into its grid of day cells, `weeks * 7` long,
    /// covering the leading and trailing days of the adjacent months.
    pub fn calendar_days(&self, page: Page) -> Option<Vec<CalendarDay>> {
        let month_comps = self.month_components(page.month, page.year)?;
        let prev_comps = self.previous_month_components(page.month, page.year)?;
        let next_comps = self.next_month_components(page.month, page.year)?;

        let first_day_of_week = month_comps.first_day_of_week;
        let first_weekday = month_comps.first_weekday;
        let leading = (first_weekday + 7 - first_day_of_week) % 7;
        let first_civil = self.calendar().compose(page.year, page.month, 1)?;
        let mut civil = first_civil.checked_sub_days(Days::new(u64::from(leading)))?;

        let today = Local::now().date_naive();
        let (left_column, right_column) = match self.direction() {
            Direction::Ltr => (1, 7),
            Direction::Rtl => (7, 1),
        };

        // Counters run in calendar-relative numbers and are re-seeded at
        // the prev-to-current and current-to-next transitions.
        let mut in_prev = true;
        let mut in_current = false;
        let mut in_next = false;
        // Leading cells can outrun a short final month, such as the
        // five-day thirteenth month before an Ethiopic new year; the
        // seed constrains at day 1.
        let mut day = (i64::from(prev_comps.days) - i64::from(leading) + 1).max(1) as u32;
        let mut day_from_end = prev_comps.days + 1 - day;
        let mut weekday_ordinal = (day - 1) / 7 + 1;
        let mut weekday_ordinal_from_end = 1;
        let mut week = prev_comps.weeks;
        let mut week_from_end = 1i32;
        let mut month = prev_comps.month;
        let mut year = prev_comps.year;

        let mut cells = Vec::with_capacity((month_comps.weeks * 7) as usize);
        for row in 1..=month_comps.weeks {
            let mut weekday = first_day_of_week;
            for column in 1..=7u32 {
                if in_prev && weekday == first_weekday {
                    day = 1;
                    day_from_end = month_comps.days;
                    weekday_ordinal = 1;
                    weekday_ordinal_from_end = (month_comps.days - day) / 7 + 1;
                    week = 1;
                    week_from_end = month_comps.weeks as i32;
                    month = month_comps.month;
                    year = month_comps.year;
                    in_prev = false;
                    in_current = true;
                }

                let range_start =
                    timezone::compose_in_zone(&civil.and_hms_milli_opt(0, 0, 0, 0)?, self.timezone())?;
                let range_end = timezone::compose_in_zone(
                    &civil.and_hms_milli_opt(23, 59, 59, 999)?,
                    self.timezone(),
                )?;
                let is_first_day = in_current && day == 1;
                let is_last_day = in_current && day == month_comps.days;
                let parts = DateParts {
                    milliseconds: 0,
                    seconds: 0,
                    minutes: 0,
                    hours: 0,
                    day,
                    day_from_end,
                    weekday,
                    weekday_ordinal,
                    weekday_ordinal_from_end,
                    week,
                    week_from_end,
                    month,
                    year,
                    timezone_offset: timezone::offset_minutes(range_start, self.timezone()),
                    calendar: self.calendar(),
                    locale: self.id().to_string(),
                    instant: range_start,
                };
                cells.push(CalendarDay {
                    id: day_id(civil, year, month, day),
                    position: (row - 1) * 7 + column,
                    label: day.to_string(),
                    aria_label: self.format(range_start, "WWWW, MMMM D, YYYY"),
                    parts,
                    range_start,
                    range_end,
                    is_today: civil == today,
                    is_first_day,
                    is_last_day,
                    is_weekend: self.weekend_table()[(weekday - 1) as usize],
                    in_current_month: in_current,
                    in_prev_month: in_prev,
                    in_next_month: in_next,
                    on_top: row == 1,
                    on_bottom: row == month_comps.weeks,
                    on_left: column == left_column,
                    on_right: column == right_column,
                });

                if is_last_day {
                    day = 1;
                    day_from_end = next_comps.days;
                    weekday_ordinal = 1;
                    weekday_ordinal_from_end = (next_comps.days - day) / 7 + 1;
                    week = 1;
                    week_from_end = next_comps.weeks as i32;
                    month = next_comps.month;
                    year = next_comps.year;
                    in_current = false;
                    in_next = true;
                } else {
                    day += 1;
                    day_from_end = day_from_end.saturating_sub(1);
                    weekday_ordinal = (day - 1) / 7 + 1;
                    let remaining = (month_comps.days as i32 - day as i32).div_euclid(7) + 1;
                    weekday_ordinal_from_end = remaining.max(0) as u32;
                }
                weekday = if weekday == 7 { 1 } else { weekday + 1 };
                civil = civil.succ_opt()?;
            }
            week += 1;
            week_from_end -= 1;
        }
        Some(cells)
    }
}

fn weekday_number(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday() + 1
}

fn week_start(date: NaiveDate, first_day_of_week: u32) -> Option<NaiveDate> {
    let back = (weekday_number(date) + 7 - first_day_of_week) % 7;
    date.checked_sub_days(Days::new(u64::from(back)))
}

/// Civil week-of-year with week 1 containing January 1st. Dates in the
/// final partial week of December count into week 1 of the next year.
fn civil_week_number(date: NaiveDate, first_day_of_week: u32) -> Option<u32> {
    let start = week_start(date, first_day_of_week)?;
    let this_anchor = week_start(NaiveDate::from_ymd_opt(date.year(), 1, 1)?, first_day_of_week)?;
    let next_anchor = week_start(
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)?,
        first_day_of_week,
    )?;
    let anchor = if date >= next_anchor {
        next_anchor
    } else if date >= this_anchor {
        this_anchor
    } else {
        week_start(
            NaiveDate::from_ymd_opt(date.year() - 1, 1, 1)?,
            first_day_of_week,
        )?
    };
    Some(((start - anchor).num_days() / 7 + 1) as u32)
}

/// Civil id, qualified with the calendar-relative date when the active
/// calendar numbers the day differently.
fn day_id(civil: NaiveDate, year: i32, month: u32, day: u32) -> String {
    let civil_id = format!("{:04}-{:02}-{:02}", civil.year(), civil.month(), civil.day());
    if (civil.year(), civil.month(), civil.day()) == (year, month, day) {
        civil_id
    } else {
        format!("{civil_id}--{year:04}-{month:02}-{day:02}")
    }
}
