//! Time-window filtering over the transaction ledger.
//!
//! The cutoff is UTC midnight of (today − N calendar months), borrowing
//! from the year on month underflow. A transaction with an unparseable
//! date drops out of the window; it never fails the request.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use crate::dataset::Transaction;
use crate::types::YearMonth;

/// Trailing months considered when a caller does not override the window.
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 3;

/// A transaction that survived the window, tagged with its parsed
/// instant and calendar bucket. Produced per query, never stored.
#[derive(Debug, Clone)]
pub struct FilteredTransaction {
    pub transaction: Transaction,
    pub timestamp: DateTime<Utc>,
    pub year_month: YearMonth,
}

/// UTC midnight of the same day-of-month, `months_back` calendar months
/// before `now`. Day overflow past a shorter target month rolls forward
/// into the next one, civil-calendar style.
pub fn cutoff(now: DateTime<Utc>, months_back: u32) -> DateTime<Utc> {
    let months = now.year() * 12 + now.month0() as i32 - months_back as i32;
    let year = months.div_euclid(12);
    let month = months.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
        .expect("month index in 1..=12")
        .checked_add_days(Days::new(u64::from(now.day() - 1)))
        .expect("date within chrono range")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is valid")
        .and_utc()
}

/// Parse a ledger date: RFC 3339, or a bare `YYYY-MM-DD` taken as UTC
/// midnight. `None` for anything else.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
}

/// The `YYYY-MM` bucket label for an instant, zero-padded, UTC calendar.
pub fn format_year_month(instant: DateTime<Utc>) -> YearMonth {
    format!("{:04}-{:02}", instant.year(), instant.month())
}

/// Keep transactions dated at or after the cutoff (boundary inclusive),
/// in input order, each tagged with the bucket of its own timestamp.
pub fn filter_recent(
    transactions: &[Transaction],
    months_back: u32,
    now: DateTime<Utc>,
) -> Vec<FilteredTransaction> {
    let cutoff = cutoff(now, months_back);

    transactions
        .iter()
        .filter_map(|txn| {
            let Some(timestamp) = parse_instant(&txn.date) else {
                log::debug!("dropping transaction with unparseable date {:?}", txn.date);
                return None;
            };
            if timestamp < cutoff {
                return None;
            }
            Some(FilteredTransaction {
                year_month: format_year_month(timestamp),
                transaction: txn.clone(),
                timestamp,
            })
        })
        .collect()
}
