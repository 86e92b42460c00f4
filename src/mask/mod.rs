//! Token-mask grammar shared by the formatter and the parser.
//!
//! A mask mixes field tokens (`YYYY`, `MM`, `h`, `a`, ...) with literal
//! text. Square brackets escape a literal region (`[at]`), and single or
//! double quotes escape one inside a field run (`"o'clock"`). Characters
//! that match no token pass through as literals, which is also how a
//! bare `Y` behaves: only `YY` and `YYYY` are year fields, so `YYY`
//! reads as `YY` followed by a literal `Y`.

pub mod format;
pub mod parse;

/// One lexed element of a mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Verbatim text: copied to output when formatting, matched exactly
    /// when parsing.
    Literal(String),
    Field(Field),
}

/// A mask field token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `D`: day of month.
    Day,
    /// `DD`: day of month, zero padded.
    DayPad,
    /// `Do`: day of month with an ordinal suffix.
    DayOrdinal,
    /// `d`: weekday as a number, 0 = Sunday.
    WeekdayNum,
    /// `dd`: zero-padded weekday number.
    WeekdayNumPad,
    /// `W`: narrow weekday name.
    WeekdayNarrow,
    /// `WW`: two-letter weekday name.
    WeekdayShorter,
    /// `WWW`: short weekday name.
    WeekdayShort,
    /// `WWWW`: full weekday name.
    WeekdayLong,
    /// `M`: month number.
    Month,
    /// `MM`: month number, zero padded.
    MonthPad,
    /// `MMM`: short month name.
    MonthShort,
    /// `MMMM`: full month name.
    MonthLong,
    /// `YY`: two-digit year.
    YearShort,
    /// `YYYY`: four-digit year.
    Year,
    /// `H`: hour of day, 0..=23.
    Hour24,
    /// `HH`: zero-padded hour of day.
    Hour24Pad,
    /// `h`: hour on the 12-hour clock.
    Hour12,
    /// `hh`: zero-padded 12-hour clock hour.
    Hour12Pad,
    /// `m`: minutes.
    Minute,
    /// `mm`: zero-padded minutes.
    MinutePad,
    /// `s`: seconds.
    Second,
    /// `ss`: zero-padded seconds.
    SecondPad,
    /// `S`: tenths of a second.
    Millis1,
    /// `SS`: hundredths of a second.
    Millis2,
    /// `SSS`: milliseconds.
    Millis3,
    /// `a`: day-period label as configured.
    DayPeriodLower,
    /// `A`: day-period label, uppercased.
    DayPeriodUpper,
    /// `Z`: the literal `Z` designator.
    ZoneLiteral,
    /// `ZZ`: offset hours, `+01`.
    ZoneHours,
    /// `ZZZ`: compact offset, `+0100`.
    ZoneCompact,
    /// `ZZZZ`: offset with a colon, `+01:00`.
    ZoneColon,
}

/// Lexes a mask. The boolean is true when the mask ends in a zone field,
/// which formatting treats as a request for UTC field values.
pub fn tokenize(mask: &str) -> (Vec<Token>, bool) {
    let mut tokens = Vec::new();
    // Bracket bodies are replaced by a placeholder in the shadow string
    // used for the trailing-Z check, mirroring how they are shielded
    // from field lexing.
    let mut shadow = String::new();
    let mut rest = mask;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open + 1..].find(']') else {
            break;
        };
        scan_segment(&rest[..open], &mut tokens, &mut shadow);
        push_literal(&mut tokens, &rest[open + 1..open + 1 + close]);
        shadow.push_str("??");
        rest = &rest[open + 1 + close + 1..];
    }
    scan_segment(rest, &mut tokens, &mut shadow);
    let utc = shadow.ends_with('Z');
    (tokens, utc)
}

fn scan_segment(seg: &str, tokens: &mut Vec<Token>, shadow: &mut String) {
    shadow.push_str(seg);
    let chars: Vec<char> = seg.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        let mut field = |f: Field, len: usize| {
            tokens.push(Token::Field(f));
            len
        };
        i += match c {
            'd' => {
                if run >= 2 {
                    field(Field::WeekdayNumPad, 2)
                } else {
                    field(Field::WeekdayNum, 1)
                }
            }
            'W' => match run.min(4) {
                1 => field(Field::WeekdayNarrow, 1),
                2 => field(Field::WeekdayShorter, 2),
                3 => field(Field::WeekdayShort, 3),
                _ => field(Field::WeekdayLong, 4),
            },
            'M' => match run.min(4) {
                1 => field(Field::Month, 1),
                2 => field(Field::MonthPad, 2),
                3 => field(Field::MonthShort, 3),
                _ => field(Field::MonthLong, 4),
            },
            'Y' => {
                if run >= 4 {
                    field(Field::Year, 4)
                } else if run >= 2 {
                    field(Field::YearShort, 2)
                } else {
                    push_literal_char(tokens, 'Y');
                    1
                }
            }
            'S' => match run.min(3) {
                1 => field(Field::Millis1, 1),
                2 => field(Field::Millis2, 2),
                _ => field(Field::Millis3, 3),
            },
            'D' => {
                if chars.get(i + 1) == Some(&'o') {
                    field(Field::DayOrdinal, 2)
                } else if run >= 2 {
                    field(Field::DayPad, 2)
                } else {
                    field(Field::Day, 1)
                }
            }
            'Z' => match run.min(4) {
                1 => field(Field::ZoneLiteral, 1),
                2 => field(Field::ZoneHours, 2),
                3 => field(Field::ZoneCompact, 3),
                _ => field(Field::ZoneColon, 4),
            },
            'H' => {
                if run >= 2 {
                    field(Field::Hour24Pad, 2)
                } else {
                    field(Field::Hour24, 1)
                }
            }
            'h' => {
                if run >= 2 {
                    field(Field::Hour12Pad, 2)
                } else {
                    field(Field::Hour12, 1)
                }
            }
            'm' => {
                if run >= 2 {
                    field(Field::MinutePad, 2)
                } else {
                    field(Field::Minute, 1)
                }
            }
            's' => {
                if run >= 2 {
                    field(Field::SecondPad, 2)
                } else {
                    field(Field::Second, 1)
                }
            }
            'a' => field(Field::DayPeriodLower, 1),
            'A' => field(Field::DayPeriodUpper, 1),
            '"' | '\'' => match chars[i + 1..].iter().position(|&x| x == c) {
                Some(rel) => {
                    let inner: String = chars[i + 1..i + 1 + rel].iter().collect();
                    push_literal(tokens, &inner);
                    rel + 2
                }
                None => {
                    push_literal_char(tokens, c);
                    1
                }
            },
            other => {
                push_literal_char(tokens, other);
                1
            }
        };
    }
}

fn push_literal(tokens: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Literal(prev)) = tokens.last_mut() {
        prev.push_str(text);
    } else {
        tokens.push(Token::Literal(text.to_string()));
    }
}

fn push_literal_char(tokens: &mut Vec<Token>, c: char) {
    if let Some(Token::Literal(prev)) = tokens.last_mut() {
        prev.push(c);
    } else {
        tokens.push(Token::Literal(c.to_string()));
    }
}
