use serde::{Deserialize, Serialize};

pub mod profile;
pub mod saved_list;

pub use profile::Profile;
pub use saved_list::SavedList;

/// A recommended film awaiting a user decision
///
/// Immutable once constructed: enrichment produces a new value via
/// [`Candidate::with_artwork`] rather than mutating in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    /// Unique within a session; generated when the source omits one
    pub id: String,
    pub title: String,
    /// Display form, not necessarily numeric ("2021", "early 80s")
    pub year: String,
    pub director: String,
    pub description: String,
    /// Rationale for the recommendation
    pub reason: String,
    #[serde(default)]
    pub artwork_url: Option<String>,
}

impl Candidate {
    /// Key used for duplicate detection in the saved list and raw payloads
    pub fn dedupe_key(&self) -> (&str, &str) {
        (self.title.as_str(), self.year.as_str())
    }

    /// Returns a copy carrying the looked-up artwork URL
    pub fn with_artwork(&self, artwork_url: Option<String>) -> Self {
        Self {
            artwork_url,
            ..self.clone()
        }
    }
}

/// Raw recommendation payload as returned by the recommendation provider
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawRecommendation {
    pub title: String,
    pub year: String,
    pub director: String,
    pub description: String,
    pub reason: String,
}

impl RawRecommendation {
    /// Promotes the raw payload to a session candidate with the given id.
    /// Artwork stays absent until enrichment completes.
    pub fn into_candidate(self, id: String) -> Candidate {
        Candidate {
            id,
            title: self.title,
            year: self.year,
            director: self.director,
            description: self.description,
            reason: self.reason,
            artwork_url: None,
        }
    }
}

/// A selectable mood/genre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Genre {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

/// The fixed set of moods offered before a swipe session
pub const GENRES: &[Genre] = &[
    Genre { id: "action", label: "Action", icon: "💥" },
    Genre { id: "romance", label: "Romance", icon: "❤️" },
    Genre { id: "scifi", label: "Sci-Fi", icon: "👽" },
    Genre { id: "horror", label: "Horror", icon: "👻" },
    Genre { id: "comedy", label: "Comedy", icon: "😂" },
    Genre { id: "drama", label: "Drama", icon: "🎭" },
    Genre { id: "thriller", label: "Thriller", icon: "🔪" },
    Genre { id: "war", label: "War", icon: "⚔️" },
];

/// Looks up a genre by its stable id
pub fn genre_by_id(id: &str) -> Option<&'static Genre> {
    GENRES.iter().find(|g| g.id == id)
}

/// What kind of entity an autocomplete search targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Movie,
    Person,
}

/// An autocomplete entry offered while filling in profile favorites
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Suggestion {
    pub id: u64,
    pub display_name: String,
    /// Release year for movies
    pub year: Option<String>,
    /// Known-for department for people ("Directing", "Acting")
    pub department: Option<String>,
    pub image_url: Option<String>,
}
