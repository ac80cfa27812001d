use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse "YYYY-MM" into the first day of that month.
pub fn parse_month(s: &str) -> Option<NaiveDate> {
    if s.len() != 7 {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()
}

/// The month key ("YYYY-MM") a date falls in.
pub fn month_key(d: &NaiveDate) -> String {
    d.format("%Y-%m").to_string()
}

pub fn current_month_key() -> String {
    month_key(&today())
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = NaiveDate::from_ymd_opt(year, month, 1).unwrap();

    while d.month() == month {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    out
}

/// Every day of the month containing `first` (normally the month's first
/// day, as returned by `parse_month`).
pub fn month_days(first: &NaiveDate) -> Vec<NaiveDate> {
    all_days_of_month(first.year(), first.month())
}

/// First and last day of the month containing `d`.
pub fn month_bounds(d: &NaiveDate) -> (NaiveDate, NaiveDate) {
    let days = all_days_of_month(d.year(), d.month());
    (*days.first().unwrap(), *days.last().unwrap())
}

/// All days in [start, end], inclusive.
pub fn days_between(start: &NaiveDate, end: &NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = *start;

    while d <= *end {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    out
}
