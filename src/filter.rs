//! Category/album and free-text predicates shared by events and photos.
//!
//! Every function here only drops records; relative order of the survivors is
//! the order of the input, so the filters can be applied in any sequence.

use crate::models::{Event, EventCategory, Photo, PhotoAlbum};
use std::collections::BTreeSet;

pub trait Categorized {
    type Category: Ord + Copy;

    fn category(&self) -> Self::Category;
}

pub trait Searchable {
    /// `needle` is already lowercased and trimmed.
    fn matches_text(&self, needle: &str) -> bool;
}

impl Categorized for Event {
    type Category = EventCategory;

    fn category(&self) -> EventCategory {
        self.category
    }
}

impl Categorized for Photo {
    type Category = PhotoAlbum;

    fn category(&self) -> PhotoAlbum {
        self.album
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl Searchable for Event {
    fn matches_text(&self, needle: &str) -> bool {
        contains(&self.title, needle)
            || contains(&self.description, needle)
            || self.location.as_deref().is_some_and(|l| contains(l, needle))
    }
}

impl Searchable for Photo {
    fn matches_text(&self, needle: &str) -> bool {
        contains(&self.title, needle)
            || contains(&self.alt, needle)
            || self.caption.as_deref().is_some_and(|c| contains(c, needle))
    }
}

/// Keeps the items whose category is in `wanted`. An empty set keeps everything.
pub fn filter_by_category<'a, T, I>(items: I, wanted: &BTreeSet<T::Category>) -> Vec<&'a T>
where
    T: Categorized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if wanted.is_empty() {
        return items.into_iter().collect();
    }
    items
        .into_iter()
        .filter(|item| wanted.contains(&item.category()))
        .collect()
}

/// Case-insensitive substring search. A blank query keeps everything.
pub fn search<'a, T, I>(items: I, query: &str) -> Vec<&'a T>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.into_iter().collect();
    }
    items
        .into_iter()
        .filter(|item| item.matches_text(&needle))
        .collect()
}

/// Filter state for the event list and calendar, rebuilt from the request on
/// every query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub categories: BTreeSet<EventCategory>,
    pub search: String,
}

impl EventQuery {
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        let by_category = filter_by_category(events, &self.categories);
        search(by_category, &self.search)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{Event, EventCategory, Photo, PhotoAlbum};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    pub fn event(id: &str, category: EventCategory, start: DateTime<Utc>) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            start,
            end: start + chrono::Duration::hours(2),
            category,
            description: String::new(),
            location: None,
            registration_required: false,
            registration_url: None,
            recurrence: None,
        }
    }

    pub fn photo(id: &str, album: PhotoAlbum, date: NaiveDate) -> Photo {
        Photo {
            id: id.to_string(),
            src: format!("/assets/gallery/{id}.jpg"),
            width: 1600,
            height: 1067,
            alt: format!("Photo {id}"),
            title: format!("Title {id}"),
            caption: None,
            album,
            date,
            photographer: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use chrono::NaiveDate;

    fn sample_events() -> Vec<Event> {
        vec![
            event("a", EventCategory::Racing, at(2025, 5, 1, 18, 0)),
            event("b", EventCategory::Social, at(2025, 5, 2, 18, 0)),
            event("c", EventCategory::Racing, at(2025, 5, 3, 18, 0)),
            event("d", EventCategory::Meeting, at(2025, 5, 4, 18, 0)),
        ]
    }

    fn ids<T: HasId>(items: &[&T]) -> Vec<String> {
        items.iter().map(|i| i.id().to_string()).collect()
    }

    trait HasId {
        fn id(&self) -> &str;
    }
    impl HasId for Event {
        fn id(&self) -> &str {
            &self.id
        }
    }
    impl HasId for Photo {
        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn empty_category_set_is_identity() {
        let events = sample_events();
        let all: Vec<&Event> = events.iter().collect();
        assert_eq!(filter_by_category(&events, &BTreeSet::new()), all);
    }

    #[test]
    fn category_filter_has_no_false_positives_or_negatives() {
        let events = sample_events();
        let wanted = BTreeSet::from([EventCategory::Racing, EventCategory::Meeting]);
        let kept = filter_by_category(&events, &wanted);
        assert!(kept.iter().all(|e| wanted.contains(&e.category)));
        let expected = events.iter().filter(|e| wanted.contains(&e.category)).count();
        assert_eq!(kept.len(), expected);
        assert_eq!(ids(&kept), ["a", "c", "d"]);
    }

    #[test]
    fn unmatched_category_yields_empty() {
        let events = sample_events();
        let wanted = BTreeSet::from([EventCategory::Cruising]);
        assert!(filter_by_category(&events, &wanted).is_empty());
    }

    #[test]
    fn photo_search_covers_title_caption_and_alt() {
        let day = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        let mut spinnaker = photo("p1", PhotoAlbum::Racing, day);
        spinnaker.caption = Some("Spinnaker set at the windward mark".to_string());
        let mut bar = photo("p2", PhotoAlbum::Clubhouse, day);
        bar.alt = "The Porthole Bar at sunset".to_string();
        let plain = photo("p3", PhotoAlbum::Social, day);
        let photos = vec![spinnaker, bar, plain];

        assert_eq!(ids(&search(&photos, "SPINNAKER")), ["p1"]);
        assert_eq!(ids(&search(&photos, "porthole")), ["p2"]);
        assert_eq!(ids(&search(&photos, "title p3")), ["p3"]);
    }

    #[test]
    fn blank_search_is_identity_and_unknown_token_is_empty() {
        let day = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        let photos = vec![
            photo("p1", PhotoAlbum::Racing, day),
            photo("p2", PhotoAlbum::Social, day),
        ];
        let all: Vec<&Photo> = photos.iter().collect();
        assert_eq!(search(&photos, ""), all);
        assert_eq!(search(&photos, "   "), all);
        assert!(search(&photos, "NONMATCHING_TOKEN").is_empty());
    }

    #[test]
    fn composition_order_does_not_matter() {
        let mut events = sample_events();
        events[0].title = "Wednesday Night Race".to_string();
        events[1].title = "Wednesday Social".to_string();
        let wanted = BTreeSet::from([EventCategory::Racing]);

        let category_first = search(filter_by_category(&events, &wanted), "wednesday");
        let search_first = filter_by_category(search(&events, "wednesday"), &wanted);
        assert_eq!(category_first, search_first);
        assert_eq!(ids(&category_first), ["a"]);
    }

    #[test]
    fn event_query_searches_location() {
        let mut events = sample_events();
        events[3].location = Some("Clubhouse Ballroom".to_string());
        let query = EventQuery {
            categories: BTreeSet::new(),
            search: " ballroom ".to_string(),
        };
        assert_eq!(ids(&query.apply(&events)), ["d"]);
    }
}
