use chrono::{DateTime, Utc};
use pandascore_api::normalize::TBA;

/// "Mar 5, 2026", or "TBA" when the date is unknown.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(|| TBA.to_owned(), |d| d.format("%b %-d, %Y").to_string())
}

/// "Mar 5, 2026, 06:30 PM UTC".
pub fn format_date_time(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(|| TBA.to_owned(), |d| d.format("%b %-d, %Y, %I:%M %p UTC").to_string())
}

/// "in 3 hours", "2 days ago"; a week or more away falls back to the plain date.
pub fn format_relative(date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(date) = date else {
        return TBA.to_owned();
    };
    let diff = date - now;
    let mins = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    let (amount, unit) = if mins.abs() < 60 {
        (mins, "minutes")
    } else if hours.abs() < 24 {
        (hours, "hours")
    } else if days.abs() < 7 {
        (days, "days")
    } else {
        return format_date(Some(date));
    };

    if amount > 0 {
        format!("in {amount} {unit}")
    } else {
        format!("{} {unit} ago", amount.abs())
    }
}

/// Pad or cut to exactly `max` characters.
pub fn truncate_name(name: &str, max: usize) -> String {
    let mut s: String = name.chars().take(max).collect();
    while s.chars().count() < max {
        s.push(' ');
    }
    s
}
