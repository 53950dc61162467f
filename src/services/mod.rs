use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{Candidate, Genre, Profile};

pub mod enrichment;
pub mod providers;

use providers::{ArtworkProvider, RecommendationProvider};

/// Produces the enriched candidate batch for one swipe session.
///
/// Recommendation failures propagate; artwork problems never do. The
/// caller hands the result to the flow state machine together with the
/// session ticket so stale batches can be discarded.
pub async fn fetch_session_candidates(
    recommender: &dyn RecommendationProvider,
    artwork: Arc<dyn ArtworkProvider>,
    profile: &Profile,
    genre: &Genre,
) -> AppResult<Vec<Candidate>> {
    let raw = recommender.recommend(profile, genre).await?;
    let deduped = enrichment::dedupe_raw(raw);
    Ok(enrichment::enrich(deduped, artwork).await)
}
