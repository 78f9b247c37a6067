//! Free-form parser
//!
//! Splits the input into numbers, words and punctuation, then assigns each
//! piece to a component by shape: `h:mm[:ss[.fffffff]]` groups are times,
//! `+hh:mm` after a time is an offset, names are months, days or
//! designators, and the remaining numbers form the date.

use super::{Fields, Meridiem, Zone, set_once};
use crate::culture::{Culture, DateOrder};
use crate::error::{MomentError, MomentResult};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(Number),
    /// Lowercased run of letters
    Word(String),
    Punct(char),
    Space,
}

#[derive(Debug, Clone, PartialEq)]
struct Number {
    digits: String,
}

impl Number {
    fn value(&self) -> MomentResult<u32> {
        self.digits
            .parse()
            .map_err(|_| MomentError::format(format!("number {} is too large", self.digits)))
    }

    /// Three or more digits, or too large to be a day
    fn is_year_like(&self) -> bool {
        self.digits.len() >= 3 || self.value().map(|v| v > 31).unwrap_or(true)
    }

    fn year(&self, culture: &Culture) -> MomentResult<i32> {
        let value = self.value()? as i32;
        if self.digits.len() <= 2 {
            Ok(culture.expand_two_digit_year(value))
        } else {
            Ok(value)
        }
    }

    fn fraction_ticks(&self) -> i64 {
        let mut ticks = 0i64;
        for i in 0..7 {
            let digit = self
                .digits
                .as_bytes()
                .get(i)
                .map(|b| (b - b'0') as i64)
                .unwrap_or(0);
            ticks = ticks * 10 + digit;
        }
        ticks
    }
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            let mut digits = String::new();
            while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                digits.push(d);
                chars.next();
            }
            tokens.push(Token::Number(Number { digits }));
        } else if c.is_alphabetic() {
            let mut word = String::new();
            while let Some(&l) = chars.peek().filter(|l| l.is_alphabetic()) {
                word.extend(l.to_lowercase());
                chars.next();
            }
            tokens.push(Token::Word(word));
        } else if c.is_whitespace() {
            while chars.peek().is_some_and(|w| w.is_whitespace()) {
                chars.next();
            }
            tokens.push(Token::Space);
        } else {
            tokens.push(Token::Punct(c));
            chars.next();
        }
    }
    tokens
}

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_lowercase()
}

fn find_name(word: &str, full: &[&str], abbreviated: &[&str]) -> Option<u32> {
    full.iter()
        .chain(abbreviated.iter())
        .position(|name| normalize(name) == word)
        .map(|i| (i % full.len()) as u32)
}

fn month_from_name(word: &str, culture: &Culture) -> Option<u32> {
    find_name(word, &culture.month_names, &culture.abbreviated_month_names).map(|i| i + 1)
}

fn day_from_name(word: &str, culture: &Culture) -> Option<u32> {
    find_name(word, &culture.day_names, &culture.abbreviated_day_names)
}

fn meridiem_from_name(word: &str, culture: &Culture) -> Option<Meridiem> {
    if word == normalize(culture.am_designator) || word == "am" {
        Some(Meridiem::Am)
    } else if word == normalize(culture.pm_designator) || word == "pm" {
        Some(Meridiem::Pm)
    } else {
        None
    }
}

struct Lexed<'a> {
    tokens: Vec<Token>,
    pos: usize,
    culture: &'a Culture,
    fields: Fields,
    date_numbers: Vec<Number>,
    month_name: Option<u32>,
}

impl<'a> Lexed<'a> {
    fn at(&self, i: usize) -> Option<&Token> {
        self.tokens.get(i)
    }

    fn number_at(&self, i: usize) -> Option<&Number> {
        match self.at(i) {
            Some(Token::Number(n)) => Some(n),
            _ => None,
        }
    }

    fn punct_at(&self, i: usize, c: char) -> bool {
        self.at(i) == Some(&Token::Punct(c))
    }

    fn next_solid(&self, i: usize) -> Option<&Token> {
        self.tokens[i.min(self.tokens.len())..]
            .iter()
            .find(|t| **t != Token::Space)
    }

    fn run(mut self) -> MomentResult<Fields> {
        while self.pos < self.tokens.len() {
            match self.tokens[self.pos].clone() {
                Token::Space => self.pos += 1,
                Token::Number(n) => self.number(n)?,
                Token::Word(w) => self.word(&w)?,
                Token::Punct(c @ ('+' | '-'))
                    if self.fields.hour.is_some() && self.number_at(self.pos + 1).is_some() =>
                {
                    self.pos += 1;
                    let offset = self.offset(if c == '-' { -1 } else { 1 })?;
                    set_once(&mut self.fields.zone, Zone::Offset(offset), "time zone")?;
                }
                Token::Punct('/' | '-' | '.' | ',') => self.pos += 1,
                Token::Punct(c) => {
                    return Err(MomentError::format(format!("unexpected character '{c}'")));
                }
            }
        }
        self.assemble_date()?;
        if !self.fields.has_date() && self.fields.hour.is_none() {
            return Err(MomentError::format("no date or time found"));
        }
        Ok(self.fields)
    }

    fn number(&mut self, n: Number) -> MomentResult<()> {
        let i = self.pos;
        if self.punct_at(i + 1, ':') {
            let Some(minute) = self.number_at(i + 2).cloned() else {
                return Err(MomentError::format("incomplete time"));
            };
            set_once(&mut self.fields.hour, n.value()?, "hour")?;
            self.fields.minute = Some(minute.value()?);
            self.pos = i + 3;
            if self.punct_at(self.pos, ':') {
                if let Some(second) = self.number_at(self.pos + 1).cloned() {
                    self.fields.second = Some(second.value()?);
                    self.pos += 2;
                    if self.punct_at(self.pos, '.') || self.punct_at(self.pos, ',') {
                        if let Some(fraction) = self.number_at(self.pos + 1).cloned() {
                            self.fields.fraction_ticks = Some(fraction.fraction_ticks());
                            self.pos += 2;
                        }
                    }
                }
            }
            return Ok(());
        }

        // a bare hour directly followed by a designator: "8 PM"
        if self.fields.hour.is_none() {
            if let Some(Token::Word(w)) = self.next_solid(i + 1) {
                if meridiem_from_name(w, self.culture).is_some() {
                    self.fields.hour = Some(n.value()?);
                    self.pos += 1;
                    return Ok(());
                }
            }
        }

        self.date_numbers.push(n);
        self.pos += 1;
        Ok(())
    }

    fn word(&mut self, w: &str) -> MomentResult<()> {
        let culture = self.culture;
        self.pos += 1;
        // the culture's own names win over the invariant fallback
        for names in [culture, Culture::invariant()] {
            if let Some(month) = month_from_name(w, names) {
                return set_once(&mut self.month_name, month, "month");
            }
            if let Some(day) = day_from_name(w, names) {
                return set_once(&mut self.fields.day_of_week, day, "day of week");
            }
        }
        if let Some(meridiem) = meridiem_from_name(w, culture) {
            self.fields.hour12 = true;
            return set_once(&mut self.fields.meridiem, meridiem, "designator");
        }
        match w {
            // ISO date/time separator
            "t" if self.number_at(self.pos).is_some() => Ok(()),
            "z" | "gmt" | "utc" => {
                let sign = match self.at(self.pos) {
                    Some(Token::Punct('+')) => 1,
                    Some(Token::Punct('-')) => -1,
                    _ => return set_once(&mut self.fields.zone, Zone::Utc, "time zone"),
                };
                if self.number_at(self.pos + 1).is_none() {
                    return Err(MomentError::format("incomplete offset"));
                }
                self.pos += 1;
                let offset = self.offset(sign)?;
                set_once(&mut self.fields.zone, Zone::Offset(offset), "time zone")
            }
            "st" | "nd" | "rd" | "th"
                if matches!(self.at(self.pos.saturating_sub(2)), Some(Token::Number(_))) =>
            {
                Ok(())
            }
            _ => Err(MomentError::format(format!("unrecognized word '{w}'"))),
        }
    }

    /// Offset digits after a sign: `h`, `hh`, `hh:mm` or `hhmm`
    fn offset(&mut self, sign: i32) -> MomentResult<i32> {
        let Some(first) = self.number_at(self.pos).cloned() else {
            return Err(MomentError::format("incomplete offset"));
        };
        self.pos += 1;
        let (hours, minutes) = match first.digits.len() {
            1 | 2 => {
                let minutes = if self.punct_at(self.pos, ':') {
                    let m = self
                        .number_at(self.pos + 1)
                        .cloned()
                        .ok_or_else(|| MomentError::format("incomplete offset"))?;
                    self.pos += 2;
                    m.value()?
                } else {
                    0
                };
                (first.value()?, minutes)
            }
            4 => {
                let v = first.value()?;
                (v / 100, v % 100)
            }
            _ => return Err(MomentError::format(format!("bad offset {}", first.digits))),
        };
        if minutes > 59 {
            return Err(MomentError::format(format!("bad offset minutes {minutes}")));
        }
        Ok(sign * (hours * 60 + minutes) as i32)
    }

    fn assemble_date(&mut self) -> MomentResult<()> {
        let culture = self.culture;
        let numbers = std::mem::take(&mut self.date_numbers);
        let fields = &mut self.fields;

        if let Some(month) = self.month_name {
            fields.month = Some(month);
            match numbers.as_slice() {
                [] => {}
                [n] if n.is_year_like() => fields.year = Some(n.year(culture)?),
                [n] => fields.day = Some(n.value()?),
                [a, b] if a.is_year_like() => {
                    fields.year = Some(a.year(culture)?);
                    fields.day = Some(b.value()?);
                }
                [a, b] => {
                    fields.day = Some(a.value()?);
                    fields.year = Some(b.year(culture)?);
                }
                _ => return Err(MomentError::format("too many numbers for a date")),
            }
            return Ok(());
        }

        match numbers.as_slice() {
            [] => {}
            [_] => return Err(MomentError::format("incomplete date")),
            [a, b] if a.is_year_like() => {
                fields.year = Some(a.year(culture)?);
                fields.month = Some(b.value()?);
            }
            [a, b] if b.is_year_like() => {
                fields.month = Some(a.value()?);
                fields.year = Some(b.year(culture)?);
            }
            [a, b] => {
                let (month, day) = match culture.date_order() {
                    DateOrder::DayMonthYear => (b, a),
                    DateOrder::MonthDayYear | DateOrder::YearMonthDay => (a, b),
                };
                fields.month = Some(month.value()?);
                fields.day = Some(day.value()?);
            }
            [a, b, c] => {
                let (year, month, day) = if a.is_year_like() {
                    (a, b, c)
                } else {
                    match culture.date_order() {
                        DateOrder::MonthDayYear => (c, a, b),
                        DateOrder::DayMonthYear => (c, b, a),
                        DateOrder::YearMonthDay => (a, b, c),
                    }
                };
                fields.year = Some(year.year(culture)?);
                fields.month = Some(month.value()?);
                fields.day = Some(day.value()?);
            }
            _ => return Err(MomentError::format("too many numbers for a date")),
        }
        Ok(())
    }
}

/// Parse free-form input; whitespace is always tolerated
pub(crate) fn parse(input: &str, culture: &Culture) -> MomentResult<Fields> {
    let tokens = tokenize(input);
    if tokens.iter().all(|t| *t == Token::Space) {
        return Err(MomentError::format("input is empty"));
    }
    Lexed {
        tokens,
        pos: 0,
        culture,
        fields: Fields::default(),
        date_numbers: Vec::new(),
        month_name: None,
    }
    .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(input: &str) -> MomentResult<Fields> {
        parse(input, Culture::invariant())
    }

    #[test]
    fn test_iso_date_time_with_fraction_and_offset() {
        let f = inv("2008-06-15T08:30:45.1234567+05:30").unwrap();
        assert_eq!((f.year, f.month, f.day), (Some(2008), Some(6), Some(15)));
        assert_eq!((f.hour, f.minute, f.second), (Some(8), Some(30), Some(45)));
        assert_eq!(f.fraction_ticks, Some(1_234_567));
        assert_eq!(f.zone, Some(Zone::Offset(330)));
    }

    #[test]
    fn test_negative_compact_offset() {
        let f = inv("2008-06-15 08:30 -0500").unwrap();
        assert_eq!(f.zone, Some(Zone::Offset(-300)));
    }

    #[test]
    fn test_utc_designators() {
        assert_eq!(inv("2008-06-15T08:30:00Z").unwrap().zone, Some(Zone::Utc));
        assert_eq!(inv("Sun, 15 Jun 2008 08:30:00 GMT").unwrap().zone, Some(Zone::Utc));
        assert_eq!(inv("15 Jun 2008 08:30 GMT+2").unwrap().zone, Some(Zone::Offset(120)));
    }

    #[test]
    fn test_month_and_day_names() {
        let f = inv("Tuesday, December 31, 2019").unwrap();
        assert_eq!((f.year, f.month, f.day), (Some(2019), Some(12), Some(31)));
        assert_eq!(f.day_of_week, Some(2));

        let f = parse("15 juin 2008", Culture::from_name("fr-FR").unwrap()).unwrap();
        assert_eq!((f.year, f.month, f.day), (Some(2008), Some(6), Some(15)));

        let f = parse("3. März 2021", Culture::from_name("de-DE").unwrap()).unwrap();
        assert_eq!((f.year, f.month, f.day), (Some(2021), Some(3), Some(3)));
    }

    #[test]
    fn test_culture_day_name_beats_invariant_month() {
        let fr = Culture::from_name("fr-FR").unwrap();
        let f = parse("mar. 17 juin 2008", fr).unwrap();
        assert_eq!(f.day_of_week, Some(2));
        assert_eq!((f.year, f.month, f.day), (Some(2008), Some(6), Some(17)));

        // English names still resolve when the culture has no match
        let f = parse("17 Jun 2008", fr).unwrap();
        assert_eq!(f.month, Some(6));
    }

    #[test]
    fn test_designators_and_ordinals() {
        let f = inv("June 1st 2008 8 PM").unwrap();
        assert_eq!((f.month, f.day, f.hour), (Some(6), Some(1), Some(8)));
        assert_eq!(f.meridiem, Some(Meridiem::Pm));
        assert!(f.hour12);
    }

    #[test]
    fn test_two_digit_years() {
        let f = inv("6/15/08").unwrap();
        assert_eq!((f.year, f.month, f.day), (Some(2008), Some(6), Some(15)));
        let f = inv("6/15/99").unwrap();
        assert_eq!(f.year, Some(1999));
    }

    #[test]
    fn test_month_year_only() {
        let f = inv("Dec 2019").unwrap();
        assert_eq!((f.year, f.month, f.day), (Some(2019), Some(12), None));
    }

    #[test]
    fn test_garbage_rejected() {
        for input in ["", "   ", "hello world", "12", "1/2/3/4", "10:", "2019-12-31 @ noon"] {
            assert!(matches!(inv(input), Err(MomentError::Format(_))), "{input:?}");
        }
    }
}
