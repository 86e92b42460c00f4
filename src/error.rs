use thiserror::Error;

/// Errors reported by the date engine.
///
/// Most resolution-style lookups fall back to a default instead of failing
/// (an unknown locale tag resolves to the baseline, an unresolvable
/// timezone resolves to the system zone), and data-driven operations
/// return `Option` when an input cannot produce a date. Errors are
/// reserved for caller input that is malformed on its face.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlmanacError {
    /// A calendar identifier that does not name a supported calendar
    /// system.
    #[error("unknown calendar `{0}`")]
    UnknownCalendar(String),
    /// A time-of-day literal that does not match `HH:MM`, `HH:MM:SS` or
    /// `HH:MM:SS.SSS`.
    #[error("invalid time literal `{0}`, expected HH:MM[:SS[.SSS]]")]
    InvalidTimeLiteral(String),
}
