// src/dates.rs

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::UnparseableDate;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

#[derive(Clone, Copy)]
enum MonthToken {
    Full,
    Short,
    Number,
}

/// Accepted formats, in priority order. The first one that yields a real date wins.
/// Every pattern is anchored and needs a four-digit unsigned year.
const DATE_FORMATS: [(&str, MonthToken); 5] = [
    // March 15, 2024
    (r"^(?<m>[A-Za-z]+)\s+(?<d>[0-9]{1,2}),\s+(?<y>[0-9]{4})$", MonthToken::Full),
    // 03/15/2024
    (r"^(?<m>[0-9]{1,2})/(?<d>[0-9]{1,2})/(?<y>[0-9]{4})$", MonthToken::Number),
    // 2024-03-15
    (r"^(?<y>[0-9]{4})-(?<m>[0-9]{1,2})-(?<d>[0-9]{1,2})$", MonthToken::Number),
    // Mar 15, 2024
    (r"^(?<m>[A-Za-z]+)\s+(?<d>[0-9]{1,2}),\s+(?<y>[0-9]{4})$", MonthToken::Short),
    // 15 March 2024
    (r"^(?<d>[0-9]{1,2})\s+(?<m>[A-Za-z]+)\s+(?<y>[0-9]{4})$", MonthToken::Full),
];

static DATE_PATTERNS: LazyLock<Vec<(Regex, MonthToken)>> = LazyLock::new(|| {
    DATE_FORMATS
        .iter()
        .map(|&(pattern, month)| (Regex::new(pattern).unwrap(), month))
        .collect()
});

fn month_number(token: &str, kind: MonthToken) -> Option<u32> {
    let by_name = |len: Option<usize>| {
        MONTHS
            .iter()
            .position(|name| {
                let name = len.map_or(*name, |n| &name[..n]);
                name.eq_ignore_ascii_case(token)
            })
            .map(|i| i as u32 + 1)
    };
    match kind {
        MonthToken::Full => by_name(None),
        MonthToken::Short => by_name(Some(3)),
        MonthToken::Number => token.parse().ok(),
    }
}

fn match_format(text: &str, pattern: &Regex, month: MonthToken) -> Option<NaiveDate> {
    let caps = pattern.captures(text)?;
    let year = caps["y"].parse().ok()?;
    let month = month_number(&caps["m"], month)?;
    let day = caps["d"].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a free-form date string against the supported formats.
///
/// Ordinal suffixes ("15th"), two-digit years, signed years, abbreviated names
/// where a full month name is expected and relative dates ("2 days ago") are
/// rejected.
pub fn parse_date(text: &str) -> Result<NaiveDate, UnparseableDate> {
    let trimmed = text.trim();

    DATE_PATTERNS
        .iter()
        .find_map(|(pattern, month)| match_format(trimmed, pattern, *month))
        .ok_or_else(|| UnparseableDate(trimmed.to_string()))
}

/// Inclusive day-granularity range check.
pub fn is_in_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}
