use crate::models::Event;
use chrono::{DateTime, Utc};

/// Events split around an evaluation instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<'a> {
    /// `start >= now`, soonest first.
    pub upcoming: Vec<&'a Event>,
    /// `start < now`, most recent first.
    pub past: Vec<&'a Event>,
}

/// Splits `events` at `now`. Equal start times keep their input order in both
/// halves; there is no secondary sort key.
pub fn partition<'a, I>(events: I, now: DateTime<Utc>) -> Timeline<'a>
where
    I: IntoIterator<Item = &'a Event>,
{
    let (mut upcoming, mut past): (Vec<&Event>, Vec<&Event>) =
        events.into_iter().partition(|e| e.start >= now);

    // slice::sort_by is stable
    upcoming.sort_by(|a, b| a.start.cmp(&b.start));
    past.sort_by(|a, b| b.start.cmp(&a.start));

    Timeline { upcoming, past }
}

/// The next `limit` events starting at or after `now`.
pub fn upcoming<'a, I>(events: I, now: DateTime<Utc>, limit: usize) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut next = partition(events, now).upcoming;
    next.truncate(limit);
    next
}
