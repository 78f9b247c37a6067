//! Pattern-driven parser
//!
//! Patterns use the custom specifiers `d M y h H m s f F t z K`, the
//! culture separators `:` and `/`, quoted literals, `\` escapes and `%` to
//! mark a lone specifier. A single-character pattern names a standard
//! format of the culture.

use super::{Fields, Meridiem, Zone, set_once};
use crate::culture::{Culture, StandardKind};
use crate::error::{MomentError, MomentResult};
use crate::styles::ParseStyles;

const SPECIFIERS: &str = "dMyhHmsfFtz";

fn chars_eq_ci(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Count consecutive repeats of the character at `i`
fn repeat_len(pattern: &[char], i: usize) -> usize {
    let c = pattern[i];
    pattern[i..].iter().take_while(|&&p| p == c).count()
}

/// Read a quoted literal starting at the opening quote
fn quoted(pattern: &[char], start: usize) -> MomentResult<(String, usize)> {
    let quote = pattern[start];
    let mut literal = String::new();
    let mut i = start + 1;
    while i < pattern.len() {
        match pattern[i] {
            c if c == quote => return Ok((literal, i + 1)),
            '\\' => {
                let escaped = pattern
                    .get(i + 1)
                    .ok_or_else(|| MomentError::format("dangling escape in format"))?;
                literal.push(*escaped);
                i += 2;
            }
            c => {
                literal.push(c);
                i += 1;
            }
        }
    }
    Err(MomentError::format(format!("unterminated quote {quote} in format")))
}

struct Reader<'a> {
    input: Vec<char>,
    pos: usize,
    culture: &'a Culture,
    styles: ParseStyles,
    fields: Fields,
}

impl<'a> Reader<'a> {
    fn mismatch(&self, expected: &str) -> MomentError {
        let rest: String = self.input[self.pos..].iter().collect();
        MomentError::format(format!("expected {expected} at '{rest}'"))
    }

    fn skip_white(&mut self) {
        while self.input.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn digits(&mut self, min: usize, max: usize) -> MomentResult<(u32, usize)> {
        let start = self.pos;
        let mut value: u32 = 0;
        while self.pos - start < max {
            match self.input.get(self.pos).and_then(|c| c.to_digit(10)) {
                Some(d) => {
                    let Some(next) = value.checked_mul(10).and_then(|v| v.checked_add(d)) else {
                        self.pos = start;
                        return Err(self.mismatch("a number that fits"));
                    };
                    value = next;
                    self.pos += 1;
                }
                None => break,
            }
        }
        let count = self.pos - start;
        if count < min {
            self.pos = start;
            return Err(self.mismatch(&format!("{min} digit(s)")));
        }
        Ok((value, count))
    }

    fn prefix_len(&self, candidate: &str) -> Option<usize> {
        let mut n = 0;
        for expected in candidate.chars() {
            let actual = *self.input.get(self.pos + n)?;
            if !chars_eq_ci(actual, expected) {
                return None;
            }
            n += 1;
        }
        Some(n)
    }

    /// Longest case-insensitive match among `names`, returning its index
    fn name(&mut self, names: &[&str], what: &str) -> MomentResult<u32> {
        let best = names
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .filter_map(|(i, name)| self.prefix_len(name).map(|len| (i, len)))
            .max_by_key(|&(_, len)| len);
        match best {
            Some((index, len)) => {
                self.pos += len;
                Ok(index as u32)
            }
            None => Err(self.mismatch(what)),
        }
    }

    fn literal(&mut self, literal: &str) -> MomentResult<()> {
        for expected in literal.chars() {
            if expected.is_whitespace() {
                self.whitespace()?;
                continue;
            }
            match self.input.get(self.pos) {
                Some(&c) if chars_eq_ci(c, expected) => self.pos += 1,
                _ => return Err(self.mismatch(&format!("'{expected}'"))),
            }
        }
        Ok(())
    }

    fn whitespace(&mut self) -> MomentResult<()> {
        if !self.input.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            return Err(self.mismatch("whitespace"));
        }
        self.pos += 1;
        if self.styles.contains(ParseStyles::ALLOW_INNER_WHITE) {
            self.skip_white();
        }
        Ok(())
    }

    fn offset(&mut self, hour_digits: (usize, usize), minutes_required: bool) -> MomentResult<i32> {
        let sign = match self.input.get(self.pos) {
            Some('+') => 1,
            Some('-') => -1,
            _ => return Err(self.mismatch("offset sign")),
        };
        self.pos += 1;
        let (hours, _) = self.digits(hour_digits.0, hour_digits.1)?;
        let separator = self.culture.time_separator;
        let minutes = if self.prefix_len(separator).is_some()
            && self
                .input
                .get(self.pos + separator.chars().count())
                .is_some_and(|c| c.is_ascii_digit())
        {
            self.pos += separator.chars().count();
            self.digits(2, 2)?.0
        } else if minutes_required {
            self.digits(2, 2)?.0
        } else {
            0
        };
        if minutes > 59 {
            return Err(MomentError::format(format!("offset minutes {minutes} out of range")));
        }
        Ok(sign * (hours * 60 + minutes) as i32)
    }

    fn specifier(&mut self, spec: char, len: usize) -> MomentResult<()> {
        let culture = self.culture;
        match spec {
            'd' => match len {
                1 | 2 => {
                    let (day, _) = self.digits(len, 2)?;
                    set_once(&mut self.fields.day, day, "day")
                }
                3 => {
                    let dow = self.name(&culture.abbreviated_day_names, "abbreviated day name")?;
                    set_once(&mut self.fields.day_of_week, dow, "day of week")
                }
                _ => {
                    let dow = self.name(&culture.day_names, "day name")?;
                    set_once(&mut self.fields.day_of_week, dow, "day of week")
                }
            },
            'M' => {
                let month = match len {
                    1 | 2 => self.digits(len, 2)?.0,
                    3 => self.name(&culture.abbreviated_month_names, "abbreviated month name")? + 1,
                    _ => self.name(&culture.month_names, "month name")? + 1,
                };
                set_once(&mut self.fields.month, month, "month")
            }
            'y' => {
                let year = if len <= 2 {
                    let (value, _) = self.digits(len, 2)?;
                    culture.expand_two_digit_year(value as i32)
                } else {
                    self.digits(len, len.max(4))?.0 as i32
                };
                set_once(&mut self.fields.year, year, "year")
            }
            'h' | 'H' => {
                let (hour, _) = self.digits(len.min(2), 2)?;
                set_once(&mut self.fields.hour, hour, "hour")?;
                self.fields.hour12 = spec == 'h';
                Ok(())
            }
            'm' => {
                let (minute, _) = self.digits(len.min(2), 2)?;
                set_once(&mut self.fields.minute, minute, "minute")
            }
            's' => {
                let (second, _) = self.digits(len.min(2), 2)?;
                set_once(&mut self.fields.second, second, "second")
            }
            'f' | 'F' => {
                if len > 7 {
                    return Err(MomentError::format("more than seven fraction digits in format"));
                }
                let min = if spec == 'f' { len } else { 0 };
                let (value, count) = self.digits(min, len)?;
                let ticks = value as i64 * 10i64.pow((7 - count) as u32);
                set_once(&mut self.fields.fraction_ticks, ticks, "fraction")
            }
            't' => {
                let am = culture.am_designator;
                let pm = culture.pm_designator;
                let candidates: Vec<String> = if len == 1 {
                    [am, pm]
                        .iter()
                        .map(|d| d.chars().take(1).collect())
                        .collect()
                } else {
                    vec![am.to_string(), pm.to_string()]
                };
                let refs: Vec<&str> = candidates.iter().map(String::as_str).collect();
                let meridiem = match self.name(&refs, "AM/PM designator")? {
                    0 => Meridiem::Am,
                    _ => Meridiem::Pm,
                };
                set_once(&mut self.fields.meridiem, meridiem, "designator")
            }
            'z' => {
                let minutes = match len {
                    1 => self.offset((1, 2), false)?,
                    2 => self.offset((2, 2), false)?,
                    _ => self.offset((2, 2), true)?,
                };
                set_once(&mut self.fields.zone, Zone::Offset(minutes), "time zone")
            }
            _ => Err(MomentError::format(format!("unsupported specifier '{spec}'"))),
        }
    }

    /// `K`: `Z`, an `hh:mm` offset, or nothing at all
    fn zone_designator(&mut self) -> MomentResult<()> {
        match self.input.get(self.pos) {
            Some('Z' | 'z') => {
                self.pos += 1;
                set_once(&mut self.fields.zone, Zone::Utc, "time zone")
            }
            Some('+' | '-') => {
                let minutes = self.offset((2, 2), true)?;
                set_once(&mut self.fields.zone, Zone::Offset(minutes), "time zone")
            }
            _ => Ok(()),
        }
    }

    fn run(&mut self, pattern: &[char]) -> MomentResult<()> {
        if self.styles.contains(ParseStyles::ALLOW_LEADING_WHITE) {
            self.skip_white();
        }
        let mut i = 0;
        while i < pattern.len() {
            let c = pattern[i];
            if self.styles.contains(ParseStyles::ALLOW_INNER_WHITE) && !c.is_whitespace() && i > 0 {
                self.skip_white();
            }
            match c {
                _ if SPECIFIERS.contains(c) => {
                    let len = repeat_len(pattern, i);
                    self.specifier(c, len)?;
                    i += len;
                }
                'K' => {
                    self.zone_designator()?;
                    i += 1;
                }
                ':' => {
                    self.literal(self.culture.time_separator)?;
                    i += 1;
                }
                '/' => {
                    self.literal(self.culture.date_separator)?;
                    i += 1;
                }
                '\'' | '"' => {
                    let (literal, next) = quoted(pattern, i)?;
                    self.literal(&literal)?;
                    i = next;
                }
                '%' => {
                    let next = match pattern.get(i + 1) {
                        Some(&n) if n != '%' => n,
                        _ => return Err(MomentError::format("'%' must precede a specifier")),
                    };
                    if SPECIFIERS.contains(next) {
                        self.specifier(next, 1)?;
                    } else if next == 'K' {
                        self.zone_designator()?;
                    } else {
                        self.literal(&next.to_string())?;
                    }
                    i += 2;
                }
                '\\' => {
                    let escaped = pattern
                        .get(i + 1)
                        .ok_or_else(|| MomentError::format("dangling escape in format"))?;
                    self.literal(&escaped.to_string())?;
                    i += 2;
                }
                c if c.is_whitespace() => {
                    self.whitespace()?;
                    i += 1;
                }
                c => {
                    self.literal(&c.to_string())?;
                    i += 1;
                }
            }
        }
        if self.styles.contains(ParseStyles::ALLOW_TRAILING_WHITE) {
            self.skip_white();
        }
        if self.pos != self.input.len() {
            return Err(self.mismatch("end of input"));
        }
        Ok(())
    }
}

fn parse_one(
    input: &str,
    format: &str,
    culture: &Culture,
    styles: ParseStyles,
) -> MomentResult<Fields> {
    let mut chars = format.chars();
    let (pattern, culture, utc) = match (chars.next(), chars.next()) {
        (None, _) => return Err(MomentError::format("format string is empty")),
        (Some(spec), None) => {
            let (pattern, kind) = culture
                .standard_pattern(spec)
                .ok_or_else(|| MomentError::format(format!("unknown standard format '{spec}'")))?;
            match kind {
                StandardKind::Cultural => (pattern, culture, false),
                StandardKind::Invariant => (pattern, Culture::invariant(), false),
                StandardKind::InvariantUtc => (pattern, Culture::invariant(), true),
            }
        }
        _ => (format.to_string(), culture, false),
    };

    let pattern: Vec<char> = pattern.chars().collect();
    let mut reader = Reader {
        input: input.chars().collect(),
        pos: 0,
        culture,
        styles,
        fields: Fields::default(),
    };
    reader.run(&pattern)?;
    let mut fields = reader.fields;
    if utc && fields.zone.is_none() {
        fields.zone = Some(Zone::Utc);
    }
    Ok(fields)
}

/// Try each format in turn; the first that matches wins
pub(crate) fn parse_any(
    input: &str,
    formats: &[&str],
    culture: &Culture,
    styles: ParseStyles,
) -> MomentResult<Fields> {
    let mut last_error = MomentError::NullInput("formats");
    for format in formats {
        match parse_one(input, format, culture, styles) {
            Ok(fields) => return Ok(fields),
            Err(e) => last_error = e,
        }
    }
    Err(last_error)
}
