//! Recurrence interpretation: does a reminder fire on a given day?
//!
//! Only the calendar day matters; `time` is not consulted. Start and end
//! bounds are inclusive. Bounds that do not parse are ignored, since the
//! store keeps those strings exactly as the client sent them.

use chrono::{DateTime, Datelike, Duration, NaiveDate};

use crate::models::{Reminder, ReminderFrequency};

/// Whether `reminder`'s schedule includes `day`. Ignores `active`.
pub fn occurs_on(reminder: &Reminder, day: NaiveDate) -> bool {
    let start = parse_calendar_date(&reminder.start_date);

    if matches!(start, Some(s) if day < s) {
        return false;
    }
    if let Some(end) = reminder.end_date.as_deref().and_then(parse_calendar_date) {
        if day > end {
            return false;
        }
    }

    match &reminder.frequency {
        ReminderFrequency::Daily => true,
        ReminderFrequency::Monthly => match start {
            Some(anchor) => day.day() == anchor.day().min(last_day_of_month(day)),
            None => false,
        },
        ReminderFrequency::Weekly | ReminderFrequency::Custom | ReminderFrequency::Other(_) => {
            let weekday = day.weekday().num_days_from_sunday() as i64;
            reminder.days_of_week.contains(&weekday)
        }
    }
}

/// Parse the calendar date out of an RFC 3339 timestamp or a bare
/// `YYYY-MM-DD`. Timestamps keep the date in their own offset.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

fn last_day_of_month(day: NaiveDate) -> u32 {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first_of_next| (first_of_next - Duration::days(1)).day())
        .unwrap_or(28)
}
