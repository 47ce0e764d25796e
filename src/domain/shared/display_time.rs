//! Display formatting for report timestamps.

use chrono::{DateTime, Utc};

/// Oldest age, in days, still rendered as "N days ago".
const RELATIVE_DAYS_LIMIT: i64 = 7;

/// ISO calendar date (`YYYY-MM-DD`) used in report tables.
pub fn format_iso_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Relative "time ago" label for a timestamp as seen at `now`.
///
/// Under an hour (including timestamps slightly in the future) is "Just now",
/// then whole hours, then whole days for up to a week, then the calendar date.
pub fn format_time_ago(ts: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*ts);

    let hours = elapsed.num_hours();
    if hours < 1 {
        return "Just now".to_string();
    }
    if hours < 24 {
        return format!("{} {} ago", hours, plural(hours, "hour"));
    }

    let days = elapsed.num_days();
    if days < RELATIVE_DAYS_LIMIT {
        return format!("{} {} ago", days, plural(days, "day"));
    }

    ts.format("%b %-d, %Y").to_string()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}
