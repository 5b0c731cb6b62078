//! Display shapes for the event list and the month/week calendar.

use crate::ics;
use crate::models::{Event, EventCategory};
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub id: String,
    pub title: String,
    pub category: EventCategory,
    pub date: String,
    pub time_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    pub registration_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_url: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub ics: String,
}

fn local(instant: DateTime<Utc>, offset: FixedOffset) -> DateTime<FixedOffset> {
    instant.with_timezone(&offset)
}

fn date_label(instant: DateTime<FixedOffset>) -> String {
    instant.format("%A, %B %-d, %Y").to_string()
}

fn clock_label(instant: DateTime<FixedOffset>) -> String {
    instant.format("%-I:%M %p").to_string()
}

/// `"6:00 PM – 8:30 PM"`, or with the end date when the event runs past midnight.
pub fn time_range(event: &Event, offset: FixedOffset) -> String {
    let start = local(event.start, offset);
    let end = local(event.end, offset);
    if start.date_naive() == end.date_naive() {
        format!("{} – {}", clock_label(start), clock_label(end))
    } else {
        format!(
            "{} – {} {}",
            clock_label(start),
            end.format("%b %-d,"),
            clock_label(end)
        )
    }
}

pub fn list_row(event: &Event, offset: FixedOffset, ics_domain: &str) -> ListRow {
    ListRow {
        id: event.id.clone(),
        title: event.title.clone(),
        category: event.category,
        date: date_label(local(event.start, offset)),
        time_range: time_range(event, offset),
        location: event.location.clone(),
        recurrence: event.recurrence.clone(),
        registration_required: event.registration_required,
        registration_url: event.registration_url.clone(),
        start: event.start,
        end: event.end,
        ics: ics::event_to_ics(event, ics_domain),
    }
}

pub fn list_rows<'a, I>(events: I, offset: FixedOffset, ics_domain: &str) -> Vec<ListRow>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .map(|event| list_row(event, offset, ics_domain))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntry {
    pub id: String,
    pub title: String,
    pub category: EventCategory,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<&Event> for CalendarEntry {
    fn from(event: &Event) -> Self {
        CalendarEntry {
            id: event.id.clone(),
            title: event.title.clone(),
            category: event.category,
            start: event.start,
            end: event.end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub events: Vec<CalendarEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Sunday-first rows of seven cells.
    pub weeks: Vec<Vec<CalendarCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekGrid {
    pub start: NaiveDate,
    pub days: Vec<CalendarCell>,
}

fn cell(date: NaiveDate, in_month: bool, events: &[&Event], offset: FixedOffset) -> CalendarCell {
    CalendarCell {
        date,
        in_month,
        events: events
            .iter()
            .filter(|e| local(e.start, offset).date_naive() == date)
            .map(|e| CalendarEntry::from(*e))
            .collect(),
    }
}

/// `None` when the Sunday would fall before the earliest representable date.
pub fn sunday_on_or_before(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_sunday())))
}

fn seven_days(
    start: NaiveDate,
    month: Option<u32>,
    events: &[&Event],
    offset: FixedOffset,
) -> Option<Vec<CalendarCell>> {
    (0..7)
        .map(|n| {
            let date = start.checked_add_days(Days::new(n))?;
            let in_month = month.is_none_or(|m| date.month() == m);
            Some(cell(date, in_month, events, offset))
        })
        .collect()
}

/// Lays events onto the weeks covering `year`/`month` by the local date of
/// their start. Returns `None` for an impossible month or one whose weeks run
/// off the representable calendar.
pub fn month_grid<'a, I>(events: I, year: i32, month: u32, offset: FixedOffset) -> Option<MonthGrid>
where
    I: IntoIterator<Item = &'a Event>,
{
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_first.pred_opt()?;
    let events: Vec<&Event> = events.into_iter().collect();

    let mut weeks = Vec::new();
    let mut week_start = sunday_on_or_before(first)?;
    while week_start <= last {
        weeks.push(seven_days(week_start, Some(month), &events, offset)?);
        match week_start.checked_add_days(Days::new(7)) {
            Some(next) => week_start = next,
            None => break,
        }
    }

    Some(MonthGrid { year, month, weeks })
}

/// Seven consecutive days beginning at `start`, or `None` past the end of the
/// representable calendar.
pub fn week_grid<'a, I>(events: I, start: NaiveDate, offset: FixedOffset) -> Option<WeekGrid>
where
    I: IntoIterator<Item = &'a Event>,
{
    let events: Vec<&Event> = events.into_iter().collect();
    let days = seven_days(start, None, &events, offset)?;
    Some(WeekGrid { start, days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::fixtures::{at, event};
    use chrono::{Offset, Weekday};

    fn utc() -> FixedOffset {
        Utc.fix()
    }

    #[test]
    fn list_row_labels() {
        let mut race = event("race-1", EventCategory::Racing, at(2025, 1, 8, 18, 0));
        race.end = at(2025, 1, 8, 20, 30);
        race.location = Some("AYC Marina".to_string());

        let row = list_row(&race, utc(), "ayc.org");
        assert_eq!(row.id, "race-1");
        assert_eq!(row.date, "Wednesday, January 8, 2025");
        assert_eq!(row.time_range, "6:00 PM – 8:30 PM");
        assert_eq!(row.location.as_deref(), Some("AYC Marina"));
        assert!(row.ics.contains("UID:race-1@ayc.org"));
    }

    #[test]
    fn labels_follow_display_offset() {
        let race = event("late", EventCategory::Racing, at(2025, 1, 9, 2, 0));
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        let row = list_row(&race, eastern, "ayc.org");
        assert_eq!(row.date, "Wednesday, January 8, 2025");
        assert_eq!(row.time_range, "9:00 PM – 11:00 PM");
    }

    #[test]
    fn overnight_event_shows_end_date() {
        let mut cruise = event("overnight", EventCategory::Cruising, at(2025, 7, 12, 9, 0));
        cruise.end = at(2025, 7, 13, 16, 0);
        assert_eq!(time_range(&cruise, utc()), "9:00 AM – Jul 13, 4:00 PM");
    }

    #[test]
    fn month_grid_covers_whole_weeks() {
        let grid = month_grid(std::iter::empty::<&Event>(), 2025, 2, utc()).unwrap();
        // February 2025 starts on a Saturday and ends on a Friday
        assert_eq!(grid.weeks.len(), 5);
        assert!(grid.weeks.iter().all(|w| w.len() == 7));
        let first = &grid.weeks[0][0];
        assert_eq!(first.date.weekday(), Weekday::Sun);
        assert!(!first.in_month);
        assert!(grid.weeks[0][6].in_month);
        assert!(grid.weeks[4][5].in_month);
        assert!(!grid.weeks[4][6].in_month);
    }

    #[test]
    fn month_grid_places_events_on_start_day() {
        let events = vec![
            event("a", EventCategory::Racing, at(2025, 1, 8, 18, 0)),
            event("b", EventCategory::Social, at(2025, 1, 8, 20, 0)),
            event("c", EventCategory::Meeting, at(2025, 1, 31, 19, 0)),
            event("elsewhere", EventCategory::Meeting, at(2025, 3, 1, 19, 0)),
        ];
        let grid = month_grid(&events, 2025, 1, utc()).unwrap();
        let cells: Vec<&CalendarCell> = grid.weeks.iter().flatten().collect();

        let jan8 = cells
            .iter()
            .find(|c| c.date == NaiveDate::from_ymd_opt(2025, 1, 8).unwrap())
            .unwrap();
        let on_jan8: Vec<&str> = jan8.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(on_jan8, ["a", "b"]);

        let placed: usize = cells.iter().map(|c| c.events.len()).sum();
        assert_eq!(placed, 3);
    }

    #[test]
    fn december_and_invalid_months() {
        assert!(month_grid(std::iter::empty::<&Event>(), 2025, 12, utc()).is_some());
        assert!(month_grid(std::iter::empty::<&Event>(), 2025, 13, utc()).is_none());
        assert!(month_grid(std::iter::empty::<&Event>(), 2025, 0, utc()).is_none());
    }

    #[test]
    fn grids_at_calendar_limits_are_none() {
        let none = std::iter::empty::<&Event>;
        assert!(week_grid(none(), NaiveDate::MAX, utc()).is_none());
        assert!(month_grid(none(), NaiveDate::MAX.year(), 12, utc()).is_none());

        // the first month only fits when the earliest date is itself a Sunday
        let min_is_sunday = NaiveDate::MIN.weekday() == Weekday::Sun;
        assert_eq!(
            month_grid(none(), NaiveDate::MIN.year(), 1, utc()).is_some(),
            min_is_sunday
        );
        assert_eq!(sunday_on_or_before(NaiveDate::MIN).is_some(), min_is_sunday);
    }

    #[test]
    fn week_grid_has_seven_days() {
        let events = vec![event("a", EventCategory::Racing, at(2025, 6, 4, 18, 0))];
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let week = week_grid(&events, start, utc()).unwrap();
        assert_eq!(week.days.len(), 7);
        assert_eq!(week.days[3].events.len(), 1);
        assert_eq!(week.days[6].date, NaiveDate::from_ymd_opt(2025, 6, 7).unwrap());
    }
}
