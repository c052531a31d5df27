//! Reminder ordering by time-of-day.
//!
//! Times are compared as stored strings. Zero-padded 24-hour "HH:MM"
//! values sort correctly; "9:00" or "10:00 AM" do not, and nothing here
//! reparses or validates them. Swap the comparator to change that.

use std::cmp::Ordering;

use crate::models::Reminder;

/// Comparator over two stored `time` strings.
pub type TimeOrder = fn(&str, &str) -> Ordering;

/// Byte-wise comparison of the raw strings.
pub fn lexicographic(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Stable sort, so equal times keep insertion order.
pub fn sort_by_time(reminders: &mut [Reminder], order: TimeOrder) {
    reminders.sort_by(|a, b| order(&a.time, &b.time));
}
