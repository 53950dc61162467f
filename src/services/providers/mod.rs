/// External provider abstractions
///
/// This module provides a pluggable architecture for the two opaque
/// collaborators the engine depends on: the recommendation generator and
/// the artwork/metadata lookup service. Each provider hides its wire
/// format behind a trait so the engine and the tests never touch HTTP.
use crate::{
    error::AppResult,
    models::{Genre, Profile, RawRecommendation, SearchKind, Suggestion},
};

pub mod gemini;
pub mod tmdb;

pub use gemini::GeminiProvider;
pub use tmdb::TmdbProvider;

/// Trait for recommendation providers
///
/// One call produces the raw candidate batch for a whole swipe session.
/// The provider may consult the profile's watch-history reference to skip
/// already-seen titles; the engine passes it through untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    async fn recommend(
        &self,
        profile: &Profile,
        genre: &Genre,
    ) -> AppResult<Vec<RawRecommendation>>;
}

/// Trait for artwork/metadata providers
///
/// Lookup failures are expected and isolated by callers; a missing poster
/// is never fatal to a session.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ArtworkProvider: Send + Sync {
    /// Best available poster URL for a film title, if any
    async fn first_poster_url(&self, title: &str) -> AppResult<Option<String>>;

    /// Autocomplete search over movies or people, optionally filtered by
    /// department for people ("Directing", "Acting"). Results are capped
    /// for presentation.
    #[cfg_attr(test, mockall::concretize)]
    async fn suggest(
        &self,
        query: &str,
        kind: SearchKind,
        role_filter: Option<&str>,
    ) -> AppResult<Vec<Suggestion>>;
}
