//! iCalendar (RFC 5545) export for single events and the whole programme.

use crate::models::Event;
use chrono::{DateTime, Utc};

const PRODID: &str = "-//Community Yacht Club//Events//EN";
const CRLF: &str = "\r\n";
const MAX_LINE_OCTETS: usize = 75;

/// `YYYYMMDDTHHMMSSZ`
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Backslash-escapes TEXT values. Carriage returns are dropped so that CRLF
/// and LF line endings both become a single `\n`.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}

/// Folds a content line at 75 octets, never inside a UTF-8 sequence.
fn fold_line(line: &str, out: &mut String) {
    let mut budget = MAX_LINE_OCTETS;
    let mut used = 0;
    for c in line.chars() {
        let width = c.len_utf8();
        if used + width > budget {
            out.push_str(CRLF);
            out.push(' ');
            // the leading space counts toward the continuation line
            budget = MAX_LINE_OCTETS - 1;
            used = 0;
        }
        out.push(c);
        used += width;
    }
    out.push_str(CRLF);
}

struct Writer {
    out: String,
}

impl Writer {
    fn new() -> Self {
        Writer { out: String::new() }
    }

    fn line(&mut self, name: &str, value: &str) {
        fold_line(&format!("{name}:{value}"), &mut self.out);
    }

    fn text(&mut self, name: &str, value: &str) {
        self.line(name, &escape_text(value));
    }

    fn begin_calendar(&mut self) {
        self.line("BEGIN", "VCALENDAR");
        self.line("VERSION", "2.0");
        self.line("PRODID", PRODID);
        self.line("CALSCALE", "GREGORIAN");
        self.line("METHOD", "PUBLISH");
    }

    fn end_calendar(&mut self) {
        self.line("END", "VCALENDAR");
    }

    fn event(&mut self, event: &Event, domain: &str) {
        self.line("BEGIN", "VEVENT");
        self.line("UID", &format!("{}@{}", escape_text(&event.id), domain));
        // DTSTAMP mirrors DTSTART so the export depends on the event alone
        self.line("DTSTAMP", &format_utc(event.start));
        self.line("DTSTART", &format_utc(event.start));
        self.line("DTEND", &format_utc(event.end));
        self.text("SUMMARY", &event.title);
        self.text("DESCRIPTION", &event.description);
        if let Some(location) = &event.location {
            self.text("LOCATION", location);
        }
        if let Some(url) = &event.registration_url {
            self.line("URL", url);
        }
        self.line("CATEGORIES", &escape_text(event.category.as_str()));
        self.line("END", "VEVENT");
    }
}

/// A complete VCALENDAR holding one VEVENT.
pub fn event_to_ics(event: &Event, domain: &str) -> String {
    calendar_feed([event], domain)
}

/// A single VCALENDAR with one VEVENT per event, in the given order.
pub fn calendar_feed<'a, I>(events: I, domain: &str) -> String
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut writer = Writer::new();
    writer.begin_calendar();
    for event in events {
        writer.event(event, domain);
    }
    writer.end_calendar();
    writer.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::fixtures::{at, event};
    use crate::models::EventCategory;

    fn race() -> Event {
        let mut race = event("race-1", EventCategory::Racing, at(2025, 1, 8, 18, 0));
        race.title = "A, B".to_string();
        race.end = at(2025, 1, 8, 20, 30);
        race.location = Some("AYC Marina".to_string());
        race.description = "Test; event".to_string();
        race
    }

    #[test]
    fn exports_required_fields() {
        let ics = event_to_ics(&race(), "ayc.org");
        assert!(ics.contains("DTSTART:20250108T180000Z"));
        assert!(ics.contains("DTEND:20250108T203000Z"));
        assert!(ics.contains("SUMMARY:A\\, B"));
        assert!(ics.contains("DESCRIPTION:Test\\; event"));
        assert!(ics.contains("LOCATION:AYC Marina"));
        assert!(ics.contains("UID:race-1@ayc.org"));
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(ics.ends_with("END:VEVENT\r\nEND:VCALENDAR\r\n"));
    }

    #[test]
    fn escapes_backslash_and_newlines() {
        assert_eq!(escape_text("a\\b"), "a\\\\b");
        assert_eq!(escape_text("line one\r\nline two\nthree"), "line one\\nline two\\nthree");
        assert_eq!(escape_text("x;y,z"), "x\\;y\\,z");
    }

    #[test]
    fn uid_is_escaped() {
        let mut odd = race();
        odd.id = "race;1,heat".to_string();
        let ics = event_to_ics(&odd, "ayc.org");
        assert!(ics.contains("UID:race\\;1\\,heat@ayc.org"));
    }

    #[test]
    fn optional_fields_are_omitted() {
        let mut bare = race();
        bare.location = None;
        let ics = event_to_ics(&bare, "ayc.org");
        assert!(!ics.contains("LOCATION"));
        assert!(!ics.contains("URL:"));

        bare.registration_url = Some("https://ayc.org/register/race-1".to_string());
        assert!(event_to_ics(&bare, "ayc.org").contains("URL:https://ayc.org/register/race-1"));
    }

    #[test]
    fn long_lines_fold_on_char_boundaries() {
        let mut long = race();
        long.description = "é".repeat(100);
        let ics = event_to_ics(&long, "ayc.org");

        for line in ics.split("\r\n") {
            assert!(line.len() <= MAX_LINE_OCTETS, "line too long: {line:?}");
        }
        let unfolded = ics.replace("\r\n ", "");
        assert!(unfolded.contains(&format!("DESCRIPTION:{}", "é".repeat(100))));
    }

    #[test]
    fn feed_holds_every_event() {
        let mut second = race();
        second.id = "race-2".to_string();
        let events = [race(), second];
        let feed = calendar_feed(&events, "ayc.org");
        assert_eq!(feed.matches("BEGIN:VEVENT").count(), 2);
        assert_eq!(feed.matches("BEGIN:VCALENDAR").count(), 1);
        assert!(feed.contains("UID:race-2@ayc.org"));
    }
}
