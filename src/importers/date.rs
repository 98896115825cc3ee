use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

/// Parses a statement date, resolving `NN/NN/NNNN` as day first. ISO
/// `YYYY-MM-DD` dates are also accepted.
pub fn parse_day_first(s: &str) -> Option<NaiveDate> {
    lazy_static! {
        static ref DAY_FIRST_RX: Regex =
            Regex::new(r"^(\d{1,2})([/.-])(\d{1,2})([/.-])(\d{2}|\d{4})$").unwrap();
        static ref YEAR_FIRST_RX: Regex = Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap();
    }

    let s = s.trim();
    // Monzo exports can carry a time after the date.
    let s = s.split_whitespace().next().unwrap_or(s);

    if let Some(c) = YEAR_FIRST_RX.captures(s) {
        return NaiveDate::from_ymd_opt(
            c[1].parse().ok()?,
            c[2].parse().ok()?,
            c[3].parse().ok()?,
        );
    }

    let c = DAY_FIRST_RX.captures(s)?;
    if c[2] != c[4] {
        return None;
    }
    let day: u32 = c[1].parse().ok()?;
    let month: u32 = c[3].parse().ok()?;
    let mut year: i32 = c[5].parse().ok()?;
    if c[5].len() == 2 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
