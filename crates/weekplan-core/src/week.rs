//! Week calculator.
//!
//! Pure calendar arithmetic: maps a signed week offset to the seven
//! dates of that week and formats the human label. Weeks start on
//! Sunday. The offset is unbounded in both directions.

use chrono::{Datelike, NaiveDate};

pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The seven dates of the week containing `today`, shifted by `offset`
/// whole weeks. `dates[0]` is always a Sunday, `dates[i] = dates[0] + i`.
pub fn week_dates(today: NaiveDate, offset: i32) -> [NaiveDate; 7] {
    let back = today.weekday().num_days_from_sunday() as i64;
    let start =
        today - chrono::Duration::days(back) + chrono::Duration::weeks(offset as i64);
    std::array::from_fn(|i| start + chrono::Duration::days(i as i64))
}

/// The calendar-date key identifying a week: the date of its day 0.
pub fn week_key(dates: &[NaiveDate; 7]) -> NaiveDate {
    dates[0]
}

/// Display label for a week range.
///
/// A week fully inside one month renders as `"Mar 1 – 7, 2026"`;
/// a week spanning two months spells out both boundary dates. Callers
/// show a fixed "This week" label instead when the offset is zero.
pub fn week_label(dates: &[NaiveDate; 7]) -> String {
    let first = dates[0];
    let last = dates[6];
    if first.month() == last.month() && first.year() == last.year() {
        format!(
            "{} {} – {}, {}",
            first.format("%b"),
            first.day(),
            last.day(),
            last.year()
        )
    } else {
        format!("{} – {}", first.format("%b %-d"), last.format("%b %-d, %Y"))
    }
}
