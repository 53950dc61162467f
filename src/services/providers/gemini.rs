/// Gemini recommendation provider
///
/// Calls the Generative Language REST API with a film-critic prompt built
/// from the user's taste anchors and the chosen genre. The model is asked
/// for a bare JSON array, but responses routinely arrive wrapped in prose
/// or code fences, so the array is mined out of the text before parsing.
///
/// The search tool is enabled so the model can consult the user's public
/// watch history (when a profile URL is given) and skip films they have
/// already seen.
use regex::Regex;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Genre, Profile, RawRecommendation},
    services::providers::RecommendationProvider,
};

/// How many recommendations one session asks for
const RECOMMENDATION_COUNT: usize = 5;

const GENERATION_TEMPERATURE: f64 = 0.7;

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    model: String,
    json_array: Regex,
}

impl GeminiProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: config.gemini_api_key.clone(),
            api_url: config.gemini_api_url.clone(),
            model: config.gemini_model.clone(),
            // First '[' through last ']' across newlines
            json_array: Regex::new(r"(?s)\[.*\]").expect("valid literal pattern"),
        }
    }

    fn build_prompt(&self, profile: &Profile, genre: &Genre) -> String {
        let mut watch_history_context = String::new();
        if let Some(films_url) = profile.watch_history_films_url() {
            watch_history_context = format!(
                "\nThe user keeps a public watch diary.\n\
                 Watched films URL: {}\n\
                 Use the search tool to check whether the user behind that URL \
                 has already seen a film before recommending it. If you find \
                 evidence they have seen it, DISCARD it and pick another. \
                 The goal is discovering new films.\n",
                films_url
            );
        }

        format!(
            "Act as an expert film critic.\n\
             The user's tastes:\n\
             - Favorite movie: {}\n\
             - Favorite director: {}\n\
             - Favorite actor: {}\n\
             {}\n\
             The user wants to watch a film in the genre: {}.\n\
             \n\
             Produce a list of {} EXCELLENT film recommendations that cross-reference these tastes.\n\
             \n\
             RESPONSE FORMAT:\n\
             Respond ONLY with a valid JSON array. Do not include markdown code fences.\n\
             Every entry must have exactly this structure:\n\
             [\n\
               {{\n\
                 \"title\": \"Title\",\n\
                 \"year\": \"Year\",\n\
                 \"director\": \"Director name\",\n\
                 \"description\": \"Exciting synopsis (max 150 chars)\",\n\
                 \"reason\": \"Why it fits their tastes (brief)\"\n\
               }}\n\
             ]",
            profile.favorite_movie,
            profile.favorite_director,
            profile.favorite_actor,
            watch_history_context,
            genre.label,
            RECOMMENDATION_COUNT,
        )
    }

    /// Mines the JSON array out of conversational model output.
    ///
    /// A response with no array, or an array that does not parse as
    /// recommendations, is a provider failure.
    fn extract_recommendations(&self, text: &str) -> AppResult<Vec<RawRecommendation>> {
        let matched = self.json_array.find(text).ok_or_else(|| {
            AppError::Provider("No JSON array found in model response".to_string())
        })?;

        serde_json::from_str::<Vec<RawRecommendation>>(matched.as_str()).map_err(|e| {
            AppError::Provider(format!("Failed to parse model recommendations: {}", e))
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    fn joined_text(&self) -> String {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for GeminiProvider {
    async fn recommend(
        &self,
        profile: &Profile,
        genre: &Genre,
    ) -> AppResult<Vec<RawRecommendation>> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AppError::CredentialMissing)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": self.build_prompt(profile, genre) }] }],
            "tools": [{ "google_search": {} }],
            "generationConfig": { "temperature": GENERATION_TEMPERATURE },
        });

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let payload: GenerateContentResponse = response.json().await?;
        let recommendations = self.extract_recommendations(&payload.joined_text())?;

        tracing::info!(
            genre = %genre.id,
            results = recommendations.len(),
            provider = "gemini",
            "Recommendations fetched"
        );

        Ok(recommendations)
    }
}
