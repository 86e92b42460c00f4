//! Matches text against a token stream and collects date fields.
//!
//! Matching is anchored: the cursor starts at the beginning of the input
//! and every token must match exactly where the previous one stopped,
//! with literal mask text required verbatim. Trailing input after the
//! last token is ignored.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeDelta, TimeZone, Utc};

use super::{Field, Token};
use crate::locale::Locale;
use crate::timezone;

/// Fields collected from a successful mask match. Months are zero based
/// and may be -1 when the text carried a literal `00`; composition rolls
/// such values rather than rejecting them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ParsedFields {
    pub year: Option<i32>,
    pub month0: Option<i32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub millisecond: Option<u32>,
    pub is_pm: Option<bool>,
    pub timezone_offset: Option<i32>,
}

pub(crate) fn match_tokens(
    tokens: &[Token],
    input: &str,
    locale: &Locale,
) -> Option<ParsedFields> {
    let mut fields = ParsedFields::default();
    let mut rest = input;
    for token in tokens {
        match token {
            Token::Literal(text) => {
                rest = rest.strip_prefix(text.as_str())?;
            }
            Token::Field(field) => {
                let consumed = match_field(*field, rest, locale, &mut fields)?;
                rest = &rest[consumed..];
            }
        }
    }
    Some(fields)
}

/// Matches one field at the start of `rest`, records its value, and
/// returns the number of bytes consumed.
fn match_field(
    field: Field,
    rest: &str,
    locale: &Locale,
    fields: &mut ParsedFields,
) -> Option<usize> {
    match field {
        Field::Day | Field::DayPad => {
            let (value, len) = two_digits(rest)?;
            fields.day = Some(value);
            Some(len)
        }
        Field::DayOrdinal => {
            let (_, digits) = two_digits(rest)?;
            let suffix = match_word(&rest[digits..])?;
            let matched = &rest[..digits + suffix];
            let lead: String = matched.chars().take_while(char::is_ascii_digit).collect();
            fields.day = lead.parse().ok();
            Some(matched.len())
        }
        Field::WeekdayNum | Field::WeekdayNumPad => {
            let (_, len) = two_digits(rest)?;
            Some(len)
        }
        Field::WeekdayNarrow
        | Field::WeekdayShorter
        | Field::WeekdayShort
        | Field::WeekdayLong => match_word(rest),
        Field::Month | Field::MonthPad => {
            let (value, len) = two_digits(rest)?;
            fields.month0 = Some(value as i32 - 1);
            Some(len)
        }
        Field::MonthShort => {
            let len = match_word(rest)?;
            record_month(&rest[..len], locale.month_names_short(), fields);
            Some(len)
        }
        Field::MonthLong => {
            let len = match_word(rest)?;
            record_month(&rest[..len], locale.month_names(), fields);
            Some(len)
        }
        Field::YearShort => {
            let (value, len) = two_digits(rest)?;
            // Two-digit years pivot at 68 and keep their digit count, so
            // a single digit lands in the current century's first decade.
            let cent = Local::now().year() / 100;
            let chosen = if value > 68 { cent - 1 } else { cent };
            fields.year = Some(chosen * 10_i32.pow(len as u32) + value as i32);
            Some(len)
        }
        Field::Year => {
            let digits = rest.get(..4).filter(|s| s.bytes().all(|b| b.is_ascii_digit()))?;
            fields.year = digits.parse().ok();
            Some(4)
        }
        Field::Millis1 => {
            let value = n_digits(rest, 1)?;
            fields.millisecond = Some(value * 100);
            Some(1)
        }
        Field::Millis2 => {
            let value = n_digits(rest, 2)?;
            fields.millisecond = Some(value * 10);
            Some(2)
        }
        Field::Millis3 => {
            let value = n_digits(rest, 3)?;
            fields.millisecond = Some(value);
            Some(3)
        }
        Field::Hour24 | Field::Hour24Pad | Field::Hour12 | Field::Hour12Pad => {
            let (value, len) = two_digits(rest)?;
            fields.hour = Some(value);
            Some(len)
        }
        Field::Minute | Field::MinutePad => {
            let (value, len) = two_digits(rest)?;
            fields.minute = Some(value);
            Some(len)
        }
        Field::Second | Field::SecondPad => {
            let (value, len) = two_digits(rest)?;
            fields.second = Some(value);
            Some(len)
        }
        Field::DayPeriodLower | Field::DayPeriodUpper => {
            let len = match_word(rest)?;
            let value = rest[..len].to_lowercase();
            let [am, pm] = locale.am_pm();
            if value == *am {
                fields.is_pm = Some(false);
            } else if value == *pm {
                fields.is_pm = Some(true);
            }
            Some(len)
        }
        Field::ZoneLiteral | Field::ZoneHours | Field::ZoneCompact | Field::ZoneColon => {
            let (len, offset) = match_zone(rest);
            if let Some(minutes) = offset {
                fields.timezone_offset = Some(minutes);
            }
            Some(len)
        }
    }
}

fn record_month(matched: &str, names: &[String], fields: &mut ParsedFields) {
    let mut chars = matched.chars();
    let needle: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => return,
    };
    // Names that match no entry leave the month unset; the mask itself
    // still counts as matched.
    if let Some(idx) = names.iter().position(|n| *n == needle) {
        fields.month0 = Some(idx as i32);
    }
}

/// One or two ASCII digits, preferring two.
fn two_digits(rest: &str) -> Option<(u32, usize)> {
    let len = rest.bytes().take(2).take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return None;
    }
    Some((rest[..len].parse().ok()?, len))
}

/// Exactly `n` ASCII digits.
fn n_digits(rest: &str, n: usize) -> Option<u32> {
    let digits = rest.get(..n).filter(|s| s.bytes().all(|b| b.is_ascii_digit()))?;
    digits.parse().ok()
}

fn word_char(c: char) -> bool {
    matches!(c,
        '\'' | 'a'..='z' | 'A'..='Z'
        | '\u{00A0}'..='\u{05FF}'
        | '\u{0700}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFEF}')
}

fn arabic_char(c: char) -> bool {
    matches!(c, '/' | '\u{0600}'..='\u{06FF}')
}

fn run_len(rest: &str, pred: fn(char) -> bool) -> usize {
    rest.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(rest.len(), |(i, _)| i)
}

/// Matches a name-like word: optional leading digits followed by letters
/// (covering Latin plus the BMP letter ranges), or a short run of Arabic
/// words separated by whitespace.
fn match_word(rest: &str) -> Option<usize> {
    let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    let letters = run_len(&rest[digits..], word_char);
    if letters > 0 {
        return Some(digits + letters);
    }

    let first = run_len(rest, arabic_char);
    if first == 0 {
        return None;
    }
    let first_chars = rest[..first].chars().count();
    let mut end = first;
    let mut extra_runs = 0;
    for _ in 0..2 {
        let spaces = run_len(&rest[end..], char::is_whitespace);
        let next = run_len(&rest[end + spaces..], arabic_char);
        if next == 0 {
            break;
        }
        end += spaces + next;
        extra_runs += 1;
    }
    // A lone Arabic character cannot split into the required word pair.
    if extra_runs > 0 || first_chars >= 2 {
        Some(end)
    } else {
        None
    }
}

/// Matches an offset designator. Junk without whitespace may precede a
/// numeric `+HH:MM`/`+HHMM` offset; a bare leading `Z` means UTC; with
/// neither, the match is empty and no offset is recorded.
fn match_zone(rest: &str) -> (usize, Option<i32>) {
    for (i, c) in rest.char_indices() {
        if c.is_whitespace() {
            break;
        }
        if c == '+' || c == '-' {
            if let Some((len, minutes)) = numeric_offset(&rest[i..]) {
                return (i + len, Some(minutes));
            }
        }
    }
    if rest.starts_with('Z') {
        (1, Some(0))
    } else {
        (0, None)
    }
}

/// `[+-]\d\d:?\d\d` starting at a sign character.
fn numeric_offset(s: &str) -> Option<(usize, i32)> {
    let negative = s.starts_with('-');
    let hours = n_digits(&s[1..], 2)?;
    let colon = if s.as_bytes().get(3) == Some(&b':') { 1 } else { 0 };
    let minutes = n_digits(&s[3 + colon..], 2)?;
    let total = (hours * 60 + minutes) as i32;
    Some((5 + colon, if negative { -total } else { total }))
}

/// Parses an ISO-8601 style date or datetime the way a lenient native
/// parser would: `YYYY[-MM[-DD]]`, optionally followed by
/// `THH:MM[:SS[.fff]]` and a `Z` or `±HH:MM` designator. A date without
/// a time reads as UTC midnight; a datetime without a designator reads
/// as system-local wall time.
pub(crate) fn parse_iso(text: &str) -> Option<DateTime<Utc>> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    let bytes = s.as_bytes();

    let (year, mut pos): (i32, usize) = match bytes[0] {
        b'+' | b'-' => {
            let digits = s.get(1..7).filter(|d| d.bytes().all(|b| b.is_ascii_digit()))?;
            let year: i32 = digits.parse().ok()?;
            (if bytes[0] == b'-' { -year } else { year }, 7)
        }
        _ => {
            let digits = s.get(..4).filter(|d| d.bytes().all(|b| b.is_ascii_digit()))?;
            (digits.parse().ok()?, 4)
        }
    };

    let mut month = 1u32;
    let mut day = 1u32;
    if bytes.get(pos) == Some(&b'-') {
        month = n_digits(s.get(pos + 1..)?, 2)?;
        pos += 3;
        if !(1..=12).contains(&month) {
            return None;
        }
        if bytes.get(pos) == Some(&b'-') {
            day = n_digits(s.get(pos + 1..)?, 2)?;
            pos += 3;
            if !(1..=31).contains(&day) {
                return None;
            }
        }
    }
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    if pos == s.len() {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    if !matches!(bytes[pos], b'T' | b't' | b' ') {
        return None;
    }
    pos += 1;
    let hour = n_digits(s.get(pos..)?, 2)?;
    pos += 2;
    if bytes.get(pos) != Some(&b':') {
        return None;
    }
    let minute = n_digits(s.get(pos + 1..)?, 2)?;
    pos += 3;
    let mut second = 0u32;
    if bytes.get(pos) == Some(&b':') {
        second = n_digits(s.get(pos + 1..)?, 2)?;
        pos += 3;
    }
    let mut millis = 0u32;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        let start = pos;
        while bytes.get(pos).is_some_and(|b| b.is_ascii_digit()) {
            pos += 1;
        }
        let frac = &s[start..pos];
        millis = match frac.len() {
            0 => return None,
            1 => frac.parse::<u32>().ok()? * 100,
            2 => frac.parse::<u32>().ok()? * 10,
            _ => frac[..3].parse::<u32>().ok()?,
        };
    }
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    let naive = date.and_hms_milli_opt(hour, minute, second, millis)?;

    match bytes.get(pos) {
        None => timezone::compose_civil(&Local, &naive),
        Some(b'Z') | Some(b'z') if pos + 1 == s.len() => Some(Utc.from_utc_datetime(&naive)),
        Some(&sign @ (b'+' | b'-')) => {
            let hours = n_digits(s.get(pos + 1..)?, 2)?;
            let mut p = pos + 3;
            if bytes.get(p) == Some(&b':') {
                p += 1;
            }
            let minutes = n_digits(s.get(p..)?, 2)?;
            p += 2;
            if p != s.len() || hours > 23 || minutes > 59 {
                return None;
            }
            let offset = (hours * 60 + minutes) as i64;
            let offset = if sign == b'-' { -offset } else { offset };
            let shifted = naive.checked_sub_signed(TimeDelta::minutes(offset))?;
            Some(Utc.from_utc_datetime(&shifted))
        }
        _ => None,
    }
}
