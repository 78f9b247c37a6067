//! Built-in culture tables used for parsing
//!
//! Only the handful of cultures below are carried. Each provides the
//! separators, designators, names and standard patterns the parsers need.

use crate::error::{MomentError, MomentResult};

/// Order in which day, month and year appear in an all-numeric date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

#[derive(Debug)]
pub struct Culture {
    pub name: &'static str,
    pub date_separator: &'static str,
    pub time_separator: &'static str,
    pub am_designator: &'static str,
    pub pm_designator: &'static str,
    pub short_date_pattern: &'static str,
    pub long_date_pattern: &'static str,
    pub short_time_pattern: &'static str,
    pub long_time_pattern: &'static str,
    pub month_day_pattern: &'static str,
    pub year_month_pattern: &'static str,
    pub month_names: [&'static str; 12],
    pub abbreviated_month_names: [&'static str; 12],
    /// Sunday first
    pub day_names: [&'static str; 7],
    pub abbreviated_day_names: [&'static str; 7],
    /// Two-digit years map into the century window ending here
    pub two_digit_year_max: i32,
}

const ENGLISH_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const ENGLISH_MONTHS_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const ENGLISH_DAYS: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];
const ENGLISH_DAYS_ABBR: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

static INVARIANT: Culture = Culture {
    name: "",
    date_separator: "/",
    time_separator: ":",
    am_designator: "AM",
    pm_designator: "PM",
    short_date_pattern: "MM/dd/yyyy",
    long_date_pattern: "dddd, dd MMMM yyyy",
    short_time_pattern: "HH:mm",
    long_time_pattern: "HH:mm:ss",
    month_day_pattern: "MMMM dd",
    year_month_pattern: "yyyy MMMM",
    month_names: ENGLISH_MONTHS,
    abbreviated_month_names: ENGLISH_MONTHS_ABBR,
    day_names: ENGLISH_DAYS,
    abbreviated_day_names: ENGLISH_DAYS_ABBR,
    two_digit_year_max: 2049,
};

static CULTURES: [Culture; 4] = [
    Culture {
        name: "en-US",
        date_separator: "/",
        time_separator: ":",
        am_designator: "AM",
        pm_designator: "PM",
        short_date_pattern: "M/d/yyyy",
        long_date_pattern: "dddd, MMMM d, yyyy",
        short_time_pattern: "h:mm tt",
        long_time_pattern: "h:mm:ss tt",
        month_day_pattern: "MMMM d",
        year_month_pattern: "MMMM yyyy",
        month_names: ENGLISH_MONTHS,
        abbreviated_month_names: ENGLISH_MONTHS_ABBR,
        day_names: ENGLISH_DAYS,
        abbreviated_day_names: ENGLISH_DAYS_ABBR,
        two_digit_year_max: 2049,
    },
    Culture {
        name: "en-GB",
        date_separator: "/",
        time_separator: ":",
        am_designator: "am",
        pm_designator: "pm",
        short_date_pattern: "dd/MM/yyyy",
        long_date_pattern: "dddd, d MMMM yyyy",
        short_time_pattern: "HH:mm",
        long_time_pattern: "HH:mm:ss",
        month_day_pattern: "d MMMM",
        year_month_pattern: "MMMM yyyy",
        month_names: ENGLISH_MONTHS,
        abbreviated_month_names: ENGLISH_MONTHS_ABBR,
        day_names: ENGLISH_DAYS,
        abbreviated_day_names: ENGLISH_DAYS_ABBR,
        two_digit_year_max: 2049,
    },
    Culture {
        name: "fr-FR",
        date_separator: "/",
        time_separator: ":",
        am_designator: "AM",
        pm_designator: "PM",
        short_date_pattern: "dd/MM/yyyy",
        long_date_pattern: "dddd d MMMM yyyy",
        short_time_pattern: "HH:mm",
        long_time_pattern: "HH:mm:ss",
        month_day_pattern: "d MMMM",
        year_month_pattern: "MMMM yyyy",
        month_names: [
            "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
            "septembre", "octobre", "novembre", "décembre",
        ],
        abbreviated_month_names: [
            "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
            "nov.", "déc.",
        ],
        day_names: [
            "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
        ],
        abbreviated_day_names: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
        two_digit_year_max: 2049,
    },
    Culture {
        name: "de-DE",
        date_separator: ".",
        time_separator: ":",
        am_designator: "AM",
        pm_designator: "PM",
        short_date_pattern: "dd.MM.yyyy",
        long_date_pattern: "dddd, d. MMMM yyyy",
        short_time_pattern: "HH:mm",
        long_time_pattern: "HH:mm:ss",
        month_day_pattern: "d. MMMM",
        year_month_pattern: "MMMM yyyy",
        month_names: [
            "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
            "Oktober", "November", "Dezember",
        ],
        abbreviated_month_names: [
            "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.",
            "Nov.", "Dez.",
        ],
        day_names: [
            "Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag",
        ],
        abbreviated_day_names: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
        two_digit_year_max: 2049,
    },
];

impl Culture {
    /// Culture-neutral English conventions
    pub fn invariant() -> &'static Culture {
        &INVARIANT
    }

    /// Look up a built-in culture by its tag; the empty tag is invariant
    pub fn from_name(name: &str) -> MomentResult<&'static Culture> {
        if name.is_empty() {
            return Ok(&INVARIANT);
        }
        CULTURES
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| MomentError::UnknownCulture(name.to_string()))
    }

    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }

    pub fn date_order(&self) -> DateOrder {
        let pattern = self.short_date_pattern;
        let day = pattern.find('d');
        let month = pattern.find('M');
        let year = pattern.find('y');
        match (day, month, year) {
            (Some(d), Some(m), Some(y)) if y < m && y < d => DateOrder::YearMonthDay,
            (Some(d), Some(m), _) if d < m => DateOrder::DayMonthYear,
            _ => DateOrder::MonthDayYear,
        }
    }

    /// Map a one- or two-digit year into the culture's century window
    pub fn expand_two_digit_year(&self, year: i32) -> i32 {
        let century = self.two_digit_year_max / 100 * 100;
        let expanded = century + year;
        if expanded > self.two_digit_year_max {
            expanded - 100
        } else {
            expanded
        }
    }

    /// Expand a single-character standard format into a custom pattern
    ///
    /// Returns the pattern and whether it reads against the invariant
    /// culture, as the sortable and RFC forms do.
    pub fn standard_pattern(&self, specifier: char) -> Option<(String, StandardKind)> {
        let pattern = match specifier {
            'd' => self.short_date_pattern.to_string(),
            'D' => self.long_date_pattern.to_string(),
            'f' => format!("{} {}", self.long_date_pattern, self.short_time_pattern),
            'F' => format!("{} {}", self.long_date_pattern, self.long_time_pattern),
            'g' => format!("{} {}", self.short_date_pattern, self.short_time_pattern),
            'G' => format!("{} {}", self.short_date_pattern, self.long_time_pattern),
            'm' | 'M' => self.month_day_pattern.to_string(),
            't' => self.short_time_pattern.to_string(),
            'T' => self.long_time_pattern.to_string(),
            'y' | 'Y' => self.year_month_pattern.to_string(),
            'o' | 'O' => {
                return Some((
                    "yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffffK".to_string(),
                    StandardKind::Invariant,
                ));
            }
            'r' | 'R' => {
                return Some((
                    "ddd, dd MMM yyyy HH':'mm':'ss 'GMT'".to_string(),
                    StandardKind::InvariantUtc,
                ));
            }
            's' => {
                return Some((
                    "yyyy'-'MM'-'dd'T'HH':'mm':'ss".to_string(),
                    StandardKind::Invariant,
                ));
            }
            'u' => {
                return Some((
                    "yyyy'-'MM'-'dd HH':'mm':'ss'Z'".to_string(),
                    StandardKind::InvariantUtc,
                ));
            }
            _ => return None,
        };
        Some((pattern, StandardKind::Cultural))
    }
}

/// How a standard format is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardKind {
    /// Against the caller's culture
    Cultural,
    /// Against the invariant culture
    Invariant,
    /// Against the invariant culture, with the reading taken as UTC
    InvariantUtc,
}
