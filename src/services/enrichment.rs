/// Candidate enrichment pipeline
///
/// Takes the raw recommendation payload, drops duplicates, assigns
/// session-scoped identifiers, and fans out one artwork lookup per item.
/// Lookups run concurrently but the output always matches the input in
/// length and order. A failed or hung lookup costs that one item its
/// artwork and nothing else.
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::models::{Candidate, RawRecommendation};
use crate::services::providers::ArtworkProvider;

/// Upper bound for a single artwork lookup; past it the item ships without
/// a poster rather than blocking the whole batch
pub const ARTWORK_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Drops later (title, year) duplicates from the raw payload, keeping the
/// first occurrence and the original order
pub fn dedupe_raw(raw: Vec<RawRecommendation>) -> Vec<RawRecommendation> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter(|r| seen.insert((r.title.clone(), r.year.clone())))
        .collect()
}

/// Enriches the raw payload with artwork.
///
/// Output length equals input length and output order equals input order,
/// regardless of lookup completion order.
pub async fn enrich(
    raw: Vec<RawRecommendation>,
    artwork: Arc<dyn ArtworkProvider>,
) -> Vec<Candidate> {
    enrich_with_timeout(raw, artwork, ARTWORK_LOOKUP_TIMEOUT).await
}

pub(crate) async fn enrich_with_timeout(
    raw: Vec<RawRecommendation>,
    artwork: Arc<dyn ArtworkProvider>,
    lookup_timeout: Duration,
) -> Vec<Candidate> {
    let batch = chrono::Utc::now().timestamp_millis();
    let candidates: Vec<Candidate> = raw
        .into_iter()
        .enumerate()
        .map(|(index, rec)| rec.into_candidate(format!("rec-{}-{}", batch, index)))
        .collect();

    let mut lookups = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        let provider = Arc::clone(&artwork);
        let title = candidate.title.clone();
        lookups.push(tokio::spawn(async move {
            match tokio::time::timeout(lookup_timeout, provider.first_poster_url(&title)).await {
                Ok(Ok(url)) => url,
                Ok(Err(e)) => {
                    tracing::warn!(title = %title, error = %e, "Artwork lookup failed");
                    None
                }
                Err(_) => {
                    tracing::warn!(title = %title, "Artwork lookup timed out");
                    None
                }
            }
        }));
    }

    // Await in spawn order so the output order matches the input order
    let mut enriched = Vec::with_capacity(candidates.len());
    for (candidate, lookup) in candidates.into_iter().zip(lookups) {
        let url = match lookup.await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(title = %candidate.title, error = %e, "Artwork lookup task died");
                None
            }
        };
        enriched.push(candidate.with_artwork(url));
    }

    let misses = enriched.iter().filter(|c| c.artwork_url.is_none()).count();
    if misses > 0 {
        tracing::info!(
            total = enriched.len(),
            without_artwork = misses,
            "Enrichment completed with partial artwork"
        );
    }

    enriched
}
