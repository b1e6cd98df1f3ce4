use chrono::{Datelike, NaiveDate};

/// Earliest year the year list offers.
pub const FLOOR_YEAR: i32 = 1981;

pub const MONTHS_IN_YEAR: u32 = 12;

/// Parses an ISO-like date string: `YYYY`, `YYYY-M` or `YYYY-M-D`, with `-` or `/`
/// between parts. Anything after a `T` or a space is treated as a time and ignored.
/// Components never roll over: `2023-02-29` is rejected.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    let date_part = input
        .split(|c: char| c == 'T' || c == 't' || c == ' ')
        .next()
        .unwrap_or_default();
    if date_part.is_empty() {
        return None;
    }

    let mut parts = date_part.split(['-', '/']);
    let year = parts.next().and_then(|part| parse_component(part, 4, 4))?;
    let month = match parts.next() {
        Some(part) => parse_component(part, 1, 2)?,
        None => 1,
    };
    let day = match parts.next() {
        Some(part) => parse_component(part, 1, 2)?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Strict check of a composed `year-month-day` triple. All three parts are required.
pub fn parse_composed(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year = parse_component(year, 4, 4)?;
    let month = parse_component(month, 1, 2)?;
    let day = parse_component(day, 1, 2)?;
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// The year a year field denotes, if it holds one.
pub fn parse_year(value: &str) -> Option<i32> {
    parse_component(value, 4, 4).and_then(|year| i32::try_from(year).ok())
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == MONTHS_IN_YEAR {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

/// Number of selectable years, from [`FLOOR_YEAR`] through the year of `today`.
pub fn year_range(today: NaiveDate) -> u32 {
    u32::try_from(today.year() - FLOOR_YEAR + 1).unwrap_or(0)
}

fn parse_component(value: &str, min_len: usize, max_len: usize) -> Option<u32> {
    let value = value.trim();
    if value.len() < min_len || value.len() > max_len {
        return None;
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
