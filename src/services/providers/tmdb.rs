/// TMDB artwork and metadata provider
///
/// Provides poster lookups for card backgrounds and the movie/person
/// autocomplete behind the onboarding form. Department filtering for
/// people ("Directing" vs "Acting") happens after retrieval; the search
/// endpoint has no server-side filter for it.
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{SearchKind, Suggestion},
    services::providers::ArtworkProvider,
};

/// Cap on autocomplete entries shown in the UI
const SUGGESTION_LIMIT: usize = 5;

/// Queries shorter than this never hit the network
const MIN_QUERY_CHARS: usize = 2;

/// Full-resolution size used for card background posters
const POSTER_SIZE: &str = "original";

/// Thumbnail size used in autocomplete rows
const THUMBNAIL_SIZE: &str = "w500";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
    language: String,
}

/// TMDB search result; movies carry `title`, people carry `name`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResult {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbSearchResult>,
}

fn endpoint(kind: SearchKind) -> &'static str {
    match kind {
        SearchKind::Movie => "search/movie",
        SearchKind::Person => "search/person",
    }
}

/// Applies the post-retrieval department filter and the presentation cap
fn select_results(
    mut results: Vec<TmdbSearchResult>,
    kind: SearchKind,
    role_filter: Option<&str>,
) -> Vec<TmdbSearchResult> {
    if kind == SearchKind::Person {
        if let Some(role) = role_filter {
            results.retain(|r| r.known_for_department.as_deref() == Some(role));
        }
    }
    results.truncate(SUGGESTION_LIMIT);
    results
}

impl TmdbProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
            image_url: config.tmdb_image_url.clone(),
            language: config.language.clone(),
        }
    }

    async fn search_raw(&self, query: &str, kind: SearchKind) -> AppResult<Vec<TmdbSearchResult>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let url = format!("{}/{}", self.api_url, endpoint(kind));
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("language", self.language.as_str()),
                ("page", "1"),
                ("include_adult", "false"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ArtworkLookup(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let payload: TmdbSearchResponse = response.json().await?;
        Ok(payload.results)
    }

    fn image_url(&self, path: Option<&str>, size: &str) -> Option<String> {
        path.map(|p| format!("{}/{}{}", self.image_url, size, p))
    }

    fn to_suggestion(&self, result: TmdbSearchResult) -> Suggestion {
        let display_name = result
            .title
            .or(result.name)
            .unwrap_or_default();
        // Movies get the release year, people their known-for department
        let year = result
            .release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .filter(|y| !y.is_empty())
            .map(str::to_string);
        let image_path = result.poster_path.or(result.profile_path);

        Suggestion {
            id: result.id,
            display_name,
            year,
            department: result.known_for_department,
            image_url: self.image_url(image_path.as_deref(), THUMBNAIL_SIZE),
        }
    }
}

#[async_trait::async_trait]
impl ArtworkProvider for TmdbProvider {
    async fn first_poster_url(&self, title: &str) -> AppResult<Option<String>> {
        let results = self.search_raw(title, SearchKind::Movie).await?;
        let poster = results
            .first()
            .and_then(|r| self.image_url(r.poster_path.as_deref(), POSTER_SIZE));

        tracing::debug!(
            title = %title,
            found = poster.is_some(),
            provider = "tmdb",
            "Poster lookup completed"
        );

        Ok(poster)
    }

    async fn suggest(
        &self,
        query: &str,
        kind: SearchKind,
        role_filter: Option<&str>,
    ) -> AppResult<Vec<Suggestion>> {
        let results = self.search_raw(query, kind).await?;

        let suggestions: Vec<Suggestion> = select_results(results, kind, role_filter)
            .into_iter()
            .map(|r| self.to_suggestion(r))
            .collect();

        tracing::info!(
            query = %query,
            results = suggestions.len(),
            provider = "tmdb",
            "Suggestion search completed"
        );

        Ok(suggestions)
    }
}
