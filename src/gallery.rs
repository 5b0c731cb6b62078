use crate::filter::{filter_by_category, search};
use crate::models::{Photo, PhotoAlbum};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "oldest" => Ok(SortOrder::Ascending),
            "desc" | "descending" | "newest" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Returns the photos ordered by capture date. The input is left untouched and
/// photos from the same day keep their relative order.
pub fn sort_by_date<'a, I>(photos: I, order: SortOrder) -> Vec<&'a Photo>
where
    I: IntoIterator<Item = &'a Photo>,
{
    let mut sorted: Vec<&Photo> = photos.into_iter().collect();
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::Descending => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
    }
    sorted
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoQuery {
    pub albums: BTreeSet<PhotoAlbum>,
    pub search: String,
    pub order: SortOrder,
}

impl PhotoQuery {
    pub fn apply<'a>(&self, photos: &'a [Photo]) -> Vec<&'a Photo> {
        let by_album = filter_by_category(photos, &self.albums);
        sort_by_date(search(by_album, &self.search), self.order)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumCount {
    pub album: PhotoAlbum,
    pub count: usize,
}

/// Every album with its photo count, in declaration order, including empty ones.
pub fn albums_with_counts(photos: &[Photo]) -> Vec<AlbumCount> {
    PhotoAlbum::ALL
        .into_iter()
        .map(|album| AlbumCount {
            album,
            count: photos.iter().filter(|p| p.album == album).count(),
        })
        .collect()
}
