//! Multi-calendar date engine: locale resolution, token-mask formatting
//! and parsing, date-parts normalization with timezone handling, and
//! month-grid decomposition across thirteen civil calendar systems.
//!
//! The entry point is [`Locale`]: construct one from a locale id or an
//! explicit configuration, then format, parse, normalize, and decompose
//! dates through it. All data-driven invalidity surfaces as `None` or an
//! empty string; only caller contract violations raise [`AlmanacError`].

pub mod calendar;
pub mod error;
pub mod locale;
mod mask;
mod names;
mod provider;
pub mod range;
mod registry;
mod timezone;

pub use calendar::CalendarKind;
pub use error::AlmanacError;
pub use locale::{
    CalendarDay, DateInput, DateOutput, DateOutputKind, DateParts, Direction, Locale,
    LocaleConfig, LocaleDefaults, LocaleInit, LocaleOptions, MaskOverrides, Masks,
    MonthComponents, NameLength, NormalizeOptions, Page, PageInput, PartsInput, Patch,
    TimeAdjust, TimeOfDay, TimeOption, TimeSource, ValidHours, lookup_default,
};
pub use range::{DateRange, RangeInput};
