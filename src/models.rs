use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Racing,
    Cruising,
    Social,
    Meeting,
}

impl EventCategory {
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Racing,
        EventCategory::Cruising,
        EventCategory::Social,
        EventCategory::Meeting,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::Racing => "racing",
            EventCategory::Cruising => "cruising",
            EventCategory::Social => "social",
            EventCategory::Meeting => "meeting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoAlbum {
    Racing,
    Cruising,
    Social,
    Clubhouse,
    Historical,
}

impl PhotoAlbum {
    pub const ALL: [PhotoAlbum; 5] = [
        PhotoAlbum::Racing,
        PhotoAlbum::Cruising,
        PhotoAlbum::Social,
        PhotoAlbum::Clubhouse,
        PhotoAlbum::Historical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PhotoAlbum::Racing => "racing",
            PhotoAlbum::Cruising => "cruising",
            PhotoAlbum::Social => "social",
            PhotoAlbum::Clubhouse => "clubhouse",
            PhotoAlbum::Historical => "historical",
        }
    }
}

/// Returned when a query string names a category or album that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}'", self.0)
    }
}

impl FromStr for EventCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EventCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVariant(wanted.to_string()))
    }
}

impl FromStr for PhotoAlbum {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PhotoAlbum::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVariant(wanted.to_string()))
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PhotoAlbum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub category: EventCategory,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub registration_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_url: Option<String>,
    /// Free text such as "Every Wednesday, May through September".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub album: PhotoAlbum,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photographer: Option<String>,
}
