//! Date-token resolution for partition range specifications
//!
//! A token is one of:
//! - `YYYY-MM-DD` — absolute ISO date
//! - `YYYYMMDD` — absolute compact date
//! - `C<n>` — n days before today (case-insensitive prefix)
//! - `YYYY-MM` — whole month; resolves to the first or last day of the
//!   month depending on whether it opens or closes a range

use chrono::{Datelike, Days, Local, NaiveDate};

/// Which side of a range a token sits on.
///
/// Only matters for `YYYY-MM` tokens: as a range start the month expands
/// to its first day, as a range end to its last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Start,
    End,
}

/// Resolve a date token against the local calendar date.
///
/// Returns `None` for anything that does not name a real calendar day.
pub fn resolve(token: &str, role: Role) -> Option<NaiveDate> {
    resolve_on(token, role, Local::now().date_naive())
}

/// Resolve a date token against an explicit `today`.
///
/// `today` only influences `C<n>` offset tokens; absolute tokens resolve
/// the same regardless. Deterministic, so this is the entry point tests use.
pub fn resolve_on(token: &str, role: Role, today: NaiveDate) -> Option<NaiveDate> {
    let token = if token.starts_with(['C', 'c']) {
        let offset = token[1..].parse::<u64>().unwrap_or(0);
        today.checked_sub_days(Days::new(offset))?
            .format("%Y%m%d")
            .to_string()
    } else {
        token.to_string()
    };

    let iso = if token.len() == 8 && token.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &token[0..4], &token[4..6], &token[6..8])
    } else if token.len() == 7 {
        match role {
            Role::Start => format!("{token}-01"),
            Role::End => format!("{}-{:02}", token, last_day_of_month(&token)?),
        }
    } else {
        token
    };

    validate(&iso)
}

/// Last day of a `YYYY-MM` month: first day of the next month minus one.
/// Correct across leap years without a day-count table.
fn last_day_of_month(year_month: &str) -> Option<u32> {
    let (year, month) = year_month.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    Some(last.day())
}

/// Validate a candidate `YYYY-MM-DD` string.
///
/// The date is parsed, reconstructed, reformatted, and required to match
/// the input exactly. The round trip rejects impossible dates
/// (`2021-02-30`) and non-canonical spellings (`2021-2-03`) alike.
fn validate(iso: &str) -> Option<NaiveDate> {
    if iso.len() != 10 {
        return None;
    }

    let mut parts = iso.splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;

    if !(1..=12).contains(&month) {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    if date.format("%Y-%m-%d").to_string() != iso {
        return None;
    }
    Some(date)
}
