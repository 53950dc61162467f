use serde::{Deserialize, Serialize};

const LETTERBOXD_BASE_URL: &str = "https://letterboxd.com";

/// Taste anchors gathered during onboarding
///
/// The flow state machine refuses to request candidates until all three
/// favorites are non-empty after trimming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Profile {
    pub favorite_movie: String,
    pub favorite_director: String,
    pub favorite_actor: String,
    /// Optional watch-history reference (Letterboxd profile URL or bare username)
    #[serde(default)]
    pub watch_history_url: Option<String>,
}

impl Profile {
    /// True when every required field has content after trimming
    pub fn is_complete(&self) -> bool {
        !self.favorite_movie.trim().is_empty()
            && !self.favorite_director.trim().is_empty()
            && !self.favorite_actor.trim().is_empty()
    }

    /// Canonical watched-films URL for the optional watch-history reference.
    ///
    /// The reference is treated as opaque beyond normalization: trim, prefix
    /// a bare username with the Letterboxd base URL, default the scheme,
    /// strip trailing slashes, and point the path at the `/films/` section.
    pub fn watch_history_films_url(&self) -> Option<String> {
        let raw = self.watch_history_url.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }

        let mut base = if !raw.contains("letterboxd.com") && !raw.contains('/') {
            // Just a username
            format!("{}/{}", LETTERBOXD_BASE_URL, raw)
        } else if !raw.contains("letterboxd.com") && !raw.starts_with("http") {
            format!("https://{}", raw)
        } else {
            raw.to_string()
        };

        while base.ends_with('/') {
            base.pop();
        }

        if base.ends_with("/films") {
            Some(base)
        } else {
            Some(format!("{}/films/", base))
        }
    }
}
