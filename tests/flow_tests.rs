use std::sync::Arc;

use reelmatch::engine::{AppFlow, AppPhase, Point, Verdict};
use reelmatch::error::{AppError, AppResult};
use reelmatch::models::{Genre, Profile, RawRecommendation, SearchKind, Suggestion, GENRES};
use reelmatch::services::providers::{ArtworkProvider, RecommendationProvider};
use reelmatch::services::fetch_session_candidates;
use reelmatch::storage::{JsonFileStore, MemoryStore, StateStore};
use reelmatch::Candidate;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .try_init();
}

fn profile() -> Profile {
    Profile {
        favorite_movie: "Heat".to_string(),
        favorite_director: "Michael Mann".to_string(),
        favorite_actor: "Al Pacino".to_string(),
        watch_history_url: None,
    }
}

fn candidate(id: &str, title: &str, year: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        title: title.to_string(),
        year: year.to_string(),
        director: "Someone".to_string(),
        description: "A film.".to_string(),
        reason: "Because".to_string(),
        artwork_url: None,
    }
}

/// Fixed-batch recommendation provider for full-flow runs
struct CannedRecommender {
    batch: Vec<(&'static str, &'static str)>,
}

#[async_trait::async_trait]
impl RecommendationProvider for CannedRecommender {
    async fn recommend(
        &self,
        _profile: &Profile,
        _genre: &Genre,
    ) -> AppResult<Vec<RawRecommendation>> {
        Ok(self
            .batch
            .iter()
            .map(|(title, year)| RawRecommendation {
                title: title.to_string(),
                year: year.to_string(),
                director: "Someone".to_string(),
                description: "A film.".to_string(),
                reason: "Because".to_string(),
            })
            .collect())
    }
}

/// Artwork provider that knows some titles and fails on one
struct FlakyArtwork;

#[async_trait::async_trait]
impl ArtworkProvider for FlakyArtwork {
    async fn first_poster_url(&self, title: &str) -> AppResult<Option<String>> {
        match title {
            "Cursed" => Err(AppError::ArtworkLookup("lookup broke".to_string())),
            "Obscure" => Ok(None),
            _ => Ok(Some(format!("https://img/{}.jpg", title))),
        }
    }

    async fn suggest(
        &self,
        _query: &str,
        _kind: SearchKind,
        _role_filter: Option<&str>,
    ) -> AppResult<Vec<Suggestion>> {
        Ok(Vec::new())
    }
}

#[test]
fn empty_profile_submit_leaves_setup_unchanged() {
    init_tracing();
    let mut flow = AppFlow::new(MemoryStore::new());

    flow.submit_profile(Profile::default());

    assert_eq!(flow.phase(), AppPhase::SettingUp);
    assert_eq!(flow.profile(), None);
}

#[test]
fn zero_candidates_surface_a_non_credential_error() {
    init_tracing();
    let mut flow = AppFlow::new(MemoryStore::with_profile(profile()));
    let ticket = flow.choose_genre(&GENRES[0]).unwrap();

    flow.deliver(ticket, Ok(Vec::new()));

    let message = flow.error_message().expect("empty batch is an error");
    assert_ne!(message, AppError::CredentialMissing.user_message());

    // Single recovery action: back to mood selection
    flow.dismiss_error();
    assert_eq!(flow.phase(), AppPhase::SelectingMood);
    assert_eq!(flow.error_message(), None);
}

#[tokio::test]
async fn drag_past_threshold_accepts_and_advances() {
    init_tracing();
    let mut flow = AppFlow::new(MemoryStore::with_profile(profile()));
    let ticket = flow.choose_genre(&GENRES[0]).unwrap();
    flow.deliver(
        ticket,
        Ok(vec![
            candidate("a", "Dune", "2021"),
            candidate("b", "Alien", "1979"),
        ]),
    );

    flow.drag_begin(Point::new(0.0, 0.0));
    flow.drag_move(Point::new(150.0, -8.0));
    let swipe = flow.drag_release().await.expect("past threshold commits");

    assert_eq!(swipe.verdict, Verdict::Accepted);
    assert_eq!(swipe.card.title, "Dune");
    assert_eq!(flow.saved_list().len(), 1);
    assert_eq!(flow.deck().unwrap().active_card().unwrap().id, "b");
}

#[test]
fn duplicate_accept_keeps_saved_list_length() {
    init_tracing();
    let store = MemoryStore::with_profile(profile());
    let mut seeded = reelmatch::SavedList::new();
    seeded.insert(candidate("old", "Dune", "2021"));
    store.save_saved_list(&seeded);

    let mut flow = AppFlow::new(store);
    assert_eq!(flow.saved_list().len(), 1);

    let ticket = flow.choose_genre(&GENRES[0]).unwrap();
    flow.deliver(ticket, Ok(vec![candidate("fresh", "Dune", "2021")]));
    flow.accept();

    assert_eq!(flow.saved_list().len(), 1);
    assert_eq!(flow.saved_list().entries()[0].id, "old");
}

#[test]
fn removing_unknown_saved_id_is_a_noop() {
    init_tracing();
    let mut flow = AppFlow::new(MemoryStore::with_profile(profile()));
    let ticket = flow.choose_genre(&GENRES[0]).unwrap();
    flow.deliver(ticket, Ok(vec![candidate("a", "Dune", "2021")]));
    flow.accept();

    assert_eq!(flow.phase(), AppPhase::ReviewingSaved);
    flow.remove_saved("never-existed");
    assert_eq!(flow.saved_list().len(), 1);
}

#[test]
fn malformed_persisted_profile_starts_onboarding() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("profile.json"), "{definitely not json").unwrap();

    let flow = AppFlow::new(JsonFileStore::new(dir.path()));
    assert_eq!(flow.phase(), AppPhase::SettingUp);
}

#[test]
fn saved_list_survives_restart_via_file_store() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    {
        let store = JsonFileStore::new(dir.path());
        store.save_profile(&profile());
        let mut flow = AppFlow::new(store);
        let ticket = flow.choose_genre(&GENRES[0]).unwrap();
        flow.deliver(ticket, Ok(vec![candidate("a", "Dune", "2021")]));
        flow.accept();
    }

    let flow = AppFlow::new(JsonFileStore::new(dir.path()));
    assert_eq!(flow.phase(), AppPhase::SelectingMood);
    assert_eq!(flow.saved_list().len(), 1);
    assert_eq!(flow.saved_list().entries()[0].title, "Dune");
}

#[test]
fn stale_fetch_result_is_discarded_after_navigation() {
    init_tracing();
    let mut flow = AppFlow::new(MemoryStore::with_profile(profile()));

    let first = flow.choose_genre(&GENRES[0]).unwrap();
    flow.deliver(first, Err(AppError::Provider("network down".to_string())));
    flow.dismiss_error();

    let second = flow.choose_genre(&GENRES[1]).unwrap();

    // The first session's retry finally lands; it must not touch the new deck
    flow.deliver(first, Ok(vec![candidate("late", "Dune", "2021")]));
    assert!(flow.deck().unwrap().active_card().is_none());

    flow.deliver(second, Ok(vec![candidate("b", "Alien", "1979")]));
    assert_eq!(flow.deck().unwrap().active_card().unwrap().id, "b");
}

#[tokio::test]
async fn full_session_with_partial_artwork() {
    init_tracing();
    let recommender = CannedRecommender {
        batch: vec![
            ("Dune", "2021"),
            ("Cursed", "2020"),
            ("Obscure", "1931"),
            ("Dune", "2021"), // provider repeated itself
        ],
    };

    let mut flow = AppFlow::new(MemoryStore::with_profile(profile()));
    let ticket = flow.choose_genre(&GENRES[2]).unwrap();

    let result = fetch_session_candidates(
        &recommender,
        Arc::new(FlakyArtwork),
        &profile(),
        &GENRES[2],
    )
    .await;
    flow.deliver(ticket, result);

    let deck = flow.deck().unwrap();
    assert_eq!(deck.visible_cards().len(), 2);
    assert_eq!(deck.active_card().unwrap().title, "Dune");
    assert_eq!(
        deck.active_card().unwrap().artwork_url.as_deref(),
        Some("https://img/Dune.jpg")
    );
    assert_eq!(deck.preloaded_card().unwrap().artwork_url, None);

    // Accept everything; duplicates were already dropped by the pipeline
    flow.accept();
    flow.accept();
    let last = flow.accept().unwrap();
    assert!(last.exhausted);

    assert_eq!(flow.phase(), AppPhase::ReviewingSaved);
    assert_eq!(flow.saved_list().len(), 3);

    flow.back_to_mood();
    assert_eq!(flow.phase(), AppPhase::SelectingMood);
    assert_eq!(flow.saved_list().len(), 3);
}

#[tokio::test]
async fn cancelled_drag_keeps_the_card() {
    init_tracing();
    let mut flow = AppFlow::new(MemoryStore::with_profile(profile()));
    let ticket = flow.choose_genre(&GENRES[0]).unwrap();
    flow.deliver(ticket, Ok(vec![candidate("a", "Dune", "2021")]));

    flow.drag_begin(Point::new(0.0, 0.0));
    flow.drag_move(Point::new(60.0, 0.0));
    assert!(flow.drag_release().await.is_none());

    assert_eq!(flow.deck().unwrap().active_card().unwrap().id, "a");
    assert!(flow.saved_list().is_empty());
}
