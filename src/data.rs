use crate::error::{AppError, AppResult};
use crate::models::{Event, EventCategory, Photo, PhotoAlbum};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// The club's events and gallery. Built once at startup and shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteData {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl SiteData {
    pub fn new(events: Vec<Event>, photos: Vec<Photo>) -> AppResult<Self> {
        let data = SiteData { events, photos };
        data.validate()?;
        Ok(data)
    }

    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        let data: SiteData = serde_json::from_str(raw)?;
        Self::new(data.events, data.photos)
    }

    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let data = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            events = data.events.len(),
            photos = data.photos.len(),
            "loaded site data"
        );
        Ok(data)
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn photo(&self, id: &str) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    fn validate(&self) -> AppResult<()> {
        let mut seen = HashSet::new();
        for event in &self.events {
            if !seen.insert(event.id.as_str()) {
                return Err(AppError::InvalidData(format!("duplicate event id '{}'", event.id)));
            }
            if event.end < event.start {
                return Err(AppError::InvalidData(format!(
                    "event '{}' ends before it starts",
                    event.id
                )));
            }
        }

        seen.clear();
        for photo in &self.photos {
            if !seen.insert(photo.id.as_str()) {
                return Err(AppError::InvalidData(format!("duplicate photo id '{}'", photo.id)));
            }
            if photo.width == 0 || photo.height == 0 {
                return Err(AppError::InvalidData(format!(
                    "photo '{}' has an empty dimension",
                    photo.id
                )));
            }
        }
        Ok(())
    }

    /// The built-in programme and gallery used when no manifest is configured.
    pub fn seed() -> Self {
        SiteData {
            events: seed_events(),
            photos: seed_photos(),
        }
    }
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

struct EventSeed {
    id: &'static str,
    title: &'static str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    category: EventCategory,
    description: &'static str,
    location: Option<&'static str>,
    registration_url: Option<&'static str>,
    recurrence: Option<&'static str>,
}

impl From<EventSeed> for Event {
    fn from(seed: EventSeed) -> Self {
        Event {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            start: seed.start,
            end: seed.end,
            category: seed.category,
            description: seed.description.to_string(),
            location: seed.location.map(str::to_string),
            registration_required: seed.registration_url.is_some(),
            registration_url: seed.registration_url.map(str::to_string),
            recurrence: seed.recurrence.map(str::to_string),
        }
    }
}

// times are UTC; the club sits at UTC-5/-4
fn seed_events() -> Vec<Event> {
    [
        EventSeed {
            id: "annual-meeting-2025",
            title: "Annual General Meeting",
            start: utc(2025, 1, 14, 0, 0),
            end: utc(2025, 1, 14, 2, 0),
            category: EventCategory::Meeting,
            description: "Election of officers, treasurer's report, and the 2025 sailing calendar.",
            location: Some("Clubhouse Main Room"),
            registration_url: None,
            recurrence: None,
        },
        EventSeed {
            id: "frostbite-series-1",
            title: "Frostbite Series, Race 1",
            start: utc(2025, 2, 2, 18, 0),
            end: utc(2025, 2, 2, 21, 0),
            category: EventCategory::Racing,
            description: "Winter dinghy racing; dry suits required. Hot chowder after racing.",
            location: Some("AYC Marina"),
            registration_url: Some("https://ayc.org/racing/frostbite"),
            recurrence: Some("First Sunday of each month, November through March"),
        },
        EventSeed {
            id: "safety-seminar-2025",
            title: "Spring Safety Seminar",
            start: utc(2025, 3, 22, 14, 0),
            end: utc(2025, 3, 22, 17, 0),
            category: EventCategory::Meeting,
            description: "Coast Guard Auxiliary review of VHF procedure, flares, and man-overboard drills.",
            location: Some("Clubhouse Main Room"),
            registration_url: Some("https://ayc.org/events/safety-seminar"),
            recurrence: None,
        },
        EventSeed {
            id: "opening-day-2025",
            title: "Opening Day & Blessing of the Fleet",
            start: utc(2025, 5, 3, 15, 0),
            end: utc(2025, 5, 3, 20, 0),
            category: EventCategory::Social,
            description: "Commodore's address, flag raising, fleet blessing, and a dockside barbecue.",
            location: Some("AYC Marina"),
            registration_url: None,
            recurrence: None,
        },
        EventSeed {
            id: "wednesday-night-race-1",
            title: "Wednesday Night Series, Race 1",
            start: utc(2025, 5, 14, 22, 0),
            end: utc(2025, 5, 15, 0, 30),
            category: EventCategory::Racing,
            description: "PHRF handicap racing, harbour course. Skippers' meeting 5:30 PM.",
            location: Some("Harbour Race Course"),
            registration_url: Some("https://ayc.org/racing/wednesday-nights"),
            recurrence: Some("Every Wednesday, May through September"),
        },
        EventSeed {
            id: "memorial-day-cruise",
            title: "Memorial Day Cruise to Sandy Cove",
            start: utc(2025, 5, 24, 13, 0),
            end: utc(2025, 5, 26, 20, 0),
            category: EventCategory::Cruising,
            description: "Three-day raft-up at Sandy Cove. Cruise captain: contact the fleet captain for mooring plan.",
            location: Some("Sandy Cove"),
            registration_url: Some("https://ayc.org/cruising/memorial-day"),
            recurrence: None,
        },
        EventSeed {
            id: "summer-solstice-party",
            title: "Summer Solstice Party",
            start: utc(2025, 6, 21, 23, 0),
            end: utc(2025, 6, 22, 3, 0),
            category: EventCategory::Social,
            description: "Live music on the deck, steel drums, and a sunset toast.",
            location: Some("Clubhouse Deck"),
            registration_url: None,
            recurrence: None,
        },
        EventSeed {
            id: "commodores-cup",
            title: "Commodore's Cup Regatta",
            start: utc(2025, 7, 19, 14, 0),
            end: utc(2025, 7, 20, 21, 0),
            category: EventCategory::Racing,
            description: "Two-day invitational regatta; trophies presented at Sunday's dinner.",
            location: Some("Outer Bay"),
            registration_url: Some("https://ayc.org/racing/commodores-cup"),
            recurrence: None,
        },
        EventSeed {
            id: "labor-day-cruise",
            title: "Labor Day Cruise to Pine Island",
            start: utc(2025, 8, 30, 13, 0),
            end: utc(2025, 9, 1, 20, 0),
            category: EventCategory::Cruising,
            description: "Overnight at Pine Island Marina, potluck on Saturday evening.",
            location: Some("Pine Island Marina"),
            registration_url: Some("https://ayc.org/cruising/labor-day"),
            recurrence: None,
        },
        EventSeed {
            id: "fall-board-meeting",
            title: "Board of Directors Meeting",
            start: utc(2025, 10, 7, 23, 0),
            end: utc(2025, 10, 8, 1, 0),
            category: EventCategory::Meeting,
            description: "Open to all members; agenda posted one week in advance.",
            location: Some("Clubhouse Library"),
            registration_url: None,
            recurrence: Some("First Tuesday of each month"),
        },
        EventSeed {
            id: "haul-out-2025",
            title: "Haul-Out Weekend",
            start: utc(2025, 10, 25, 12, 0),
            end: utc(2025, 10, 26, 21, 0),
            category: EventCategory::Social,
            description: "All hands to the travel lift; lunch provided for volunteers.",
            location: Some("AYC Boatyard"),
            registration_url: None,
            recurrence: None,
        },
        EventSeed {
            id: "holiday-party-2025",
            title: "Holiday Party & Awards Dinner",
            start: utc(2025, 12, 13, 23, 30),
            end: utc(2025, 12, 14, 4, 0),
            category: EventCategory::Social,
            description: "Season trophies, silent auction, and dinner. Jackets suggested.",
            location: Some("Clubhouse Main Room"),
            registration_url: Some("https://ayc.org/events/holiday-party"),
            recurrence: None,
        },
    ]
    .into_iter()
    .map(Event::from)
    .collect()
}

fn seed_photos() -> Vec<Photo> {
    let photo = |id: &str,
                 album: PhotoAlbum,
                 (width, height): (u32, u32),
                 title: &str,
                 alt: &str,
                 caption: Option<&str>,
                 date: NaiveDate,
                 photographer: Option<&str>| Photo {
        id: id.to_string(),
        src: format!("/assets/gallery/{id}.jpg"),
        width,
        height,
        alt: alt.to_string(),
        title: title.to_string(),
        caption: caption.map(str::to_string),
        album,
        date,
        photographer: photographer.map(str::to_string),
    };

    vec![
        photo(
            "commodores-cup-start",
            PhotoAlbum::Racing,
            (1600, 1067),
            "Commodore's Cup Start",
            "Fleet of sailboats crossing the start line under spinnaker",
            Some("A clean start at the pin end in 15 knots"),
            date(2024, 7, 20),
            Some("R. Alvarez"),
        ),
        photo(
            "wednesday-night-mark",
            PhotoAlbum::Racing,
            (1600, 1067),
            "Rounding the Windward Mark",
            "Two boats rounding an orange mark at dusk",
            None,
            date(2024, 6, 12),
            Some("J. Whitaker"),
        ),
        photo(
            "sandy-cove-raftup",
            PhotoAlbum::Cruising,
            (1600, 900),
            "Sandy Cove Raft-Up",
            "Eight boats rafted together in a calm anchorage",
            Some("Memorial Day weekend, twelve boats by Sunday"),
            date(2024, 5, 26),
            None,
        ),
        photo(
            "pine-island-sunrise",
            PhotoAlbum::Cruising,
            (1067, 1600),
            "Sunrise at Pine Island",
            "Mast silhouetted against an orange sunrise",
            None,
            date(2024, 8, 31),
            Some("M. Chen"),
        ),
        photo(
            "solstice-deck",
            PhotoAlbum::Social,
            (1600, 1067),
            "Solstice on the Deck",
            "Members dancing on the clubhouse deck at sunset",
            Some("Steel drums and a sunset toast"),
            date(2024, 6, 21),
            None,
        ),
        photo(
            "holiday-awards",
            PhotoAlbum::Social,
            (1600, 1067),
            "Holiday Awards Dinner",
            "Commodore presenting a trophy at the holiday dinner",
            None,
            date(2024, 12, 14),
            Some("R. Alvarez"),
        ),
        photo(
            "clubhouse-exterior",
            PhotoAlbum::Clubhouse,
            (1600, 1067),
            "The Clubhouse",
            "Shingled clubhouse with burgee flying from the flagpole",
            None,
            date(2023, 9, 2),
            None,
        ),
        photo(
            "porthole-bar",
            PhotoAlbum::Clubhouse,
            (1200, 1200),
            "The Porthole Bar",
            "Wood-panelled bar with brass portholes",
            Some("Open Friday and Saturday evenings in season"),
            date(2023, 9, 2),
            None,
        ),
        photo(
            "founding-members-1947",
            PhotoAlbum::Historical,
            (1400, 1000),
            "Founding Members, 1947",
            "Black and white photograph of the club's founders on the dock",
            Some("Twelve founders signed the charter that summer"),
            date(1947, 7, 4),
            None,
        ),
        photo(
            "first-regatta-1952",
            PhotoAlbum::Historical,
            (1400, 1000),
            "First Club Regatta",
            "Vintage wooden sloops racing in the harbour",
            None,
            date(1952, 8, 16),
            None,
        ),
    ]
}
