use serde::{Deserialize, Serialize};

/// Separator used when genres are flattened into one label
pub const GENRE_SEPARATOR: &str = " | ";

/// Detail for one movie: genres plus trailers and reviews
///
/// Only ever built from a detail fetch; not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub movie_id: i64,
    pub genres: Vec<String>,
    pub videos: Vec<Video>,
    pub reviews: Vec<Review>,
}

impl MovieDetail {
    /// Genre names joined with [`GENRE_SEPARATOR`]
    pub fn genre_label(&self) -> String {
        self.genres.join(GENRE_SEPARATOR)
    }

    pub fn has_videos(&self) -> bool {
        !self.videos.is_empty()
    }

    pub fn has_reviews(&self) -> bool {
        !self.reviews.is_empty()
    }
}

/// A trailer, teaser or clip hosted on a video site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,

    /// Opaque reference on the hosting site
    pub key: String,

    pub name: String,

    /// Hosting site, e.g. `YouTube`
    pub site: String,

    /// Vertical resolution (360, 480, 720, 1080)
    pub size: i32,

    /// Category, e.g. `Trailer`, `Teaser`, `Clip`
    #[serde(rename = "type")]
    pub video_type: String,
}

impl Video {
    pub fn is_youtube(&self) -> bool {
        self.site.eq_ignore_ascii_case("youtube")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub content: String,
    pub url: String,
}
