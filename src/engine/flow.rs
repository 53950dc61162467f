use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Candidate, Genre, Profile, SavedList};
use crate::storage::StateStore;

use super::deck::{DeckSession, Swipe, Verdict};
use super::gesture::Point;

/// Top-level application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// Collecting or editing the taste profile
    SettingUp,
    /// Picking a mood/genre for the next session
    SelectingMood,
    /// An active swipe session (loading, erroring, or swiping)
    Swiping,
    /// Browsing the liked list
    ReviewingSaved,
}

/// Identity of one candidate fetch, used to discard stale deliveries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTicket(Uuid);

impl SessionTicket {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// The application flow state machine.
///
/// Owns the profile, the saved list, and the current deck session, and is
/// the single writer for both persisted records. Profile and saved-list
/// mutations persist synchronously at the mutation site. Events that are
/// undefined for the current phase are ignored.
pub struct AppFlow<S: StateStore> {
    store: S,
    phase: AppPhase,
    profile: Option<Profile>,
    saved: SavedList,
    deck: Option<DeckSession>,
    session: Option<SessionTicket>,
}

impl<S: StateStore> AppFlow<S> {
    /// Boots the flow from persisted state. A readable profile skips
    /// onboarding; a missing or corrupt one starts it.
    pub fn new(store: S) -> Self {
        let profile = store.load_profile();
        let saved = store.load_saved_list();
        let phase = match &profile {
            Some(p) if p.is_complete() => AppPhase::SelectingMood,
            _ => AppPhase::SettingUp,
        };

        Self {
            store,
            phase,
            profile,
            saved,
            deck: None,
            session: None,
        }
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn saved_list(&self) -> &SavedList {
        &self.saved
    }

    pub fn deck(&self) -> Option<&DeckSession> {
        self.deck.as_ref()
    }

    /// The single error affordance: the deck's message, while swiping
    pub fn error_message(&self) -> Option<&str> {
        if self.phase != AppPhase::Swiping {
            return None;
        }
        self.deck.as_ref().and_then(|d| d.error_message())
    }

    /// Submits the onboarding form. Incomplete profiles are rejected
    /// without a state change; complete ones persist and move to mood
    /// selection.
    pub fn submit_profile(&mut self, profile: Profile) {
        if self.phase != AppPhase::SettingUp {
            return;
        }
        if !profile.is_complete() {
            return;
        }
        self.store.save_profile(&profile);
        self.profile = Some(profile);
        self.phase = AppPhase::SelectingMood;
    }

    /// Reopens the profile form from mood selection
    pub fn open_settings(&mut self) {
        if self.phase == AppPhase::SelectingMood {
            self.phase = AppPhase::SettingUp;
        }
    }

    /// Opens the liked list from mood selection
    pub fn open_saved(&mut self) {
        if self.phase == AppPhase::SelectingMood {
            self.phase = AppPhase::ReviewingSaved;
        }
    }

    /// Leaves the liked list; the list itself is never cleared by navigation
    pub fn back_to_mood(&mut self) {
        if self.phase == AppPhase::ReviewingSaved {
            self.phase = AppPhase::SelectingMood;
        }
    }

    /// Starts a swipe session for the chosen genre.
    ///
    /// Returns the ticket the eventual fetch result must present; any prior
    /// error is cleared by replacing the deck. Refused (None) while the
    /// profile is incomplete.
    pub fn choose_genre(&mut self, genre: &Genre) -> Option<SessionTicket> {
        if self.phase != AppPhase::SelectingMood {
            return None;
        }
        if !self.profile.as_ref().is_some_and(|p| p.is_complete()) {
            return None;
        }

        let ticket = SessionTicket::new();
        self.phase = AppPhase::Swiping;
        self.deck = Some(DeckSession::loading());
        self.session = Some(ticket);

        tracing::info!(genre = %genre.id, "Swipe session started");
        Some(ticket)
    }

    /// Hands a finished fetch to the session it belongs to.
    ///
    /// Results for a session that is no longer current (user navigated
    /// away, or a newer session replaced it) are discarded.
    pub fn deliver(&mut self, ticket: SessionTicket, result: AppResult<Vec<Candidate>>) {
        if self.phase != AppPhase::Swiping || self.session != Some(ticket) {
            tracing::debug!("Discarding stale candidate delivery");
            return;
        }
        let Some(deck) = self.deck.as_mut() else {
            return;
        };
        match result {
            Ok(candidates) => deck.deliver(candidates),
            Err(e) => {
                tracing::warn!(error = %e, "Candidate fetch failed");
                deck.fail(&e);
            }
        }
    }

    /// Dismisses the blocking error screen, returning to mood selection
    pub fn dismiss_error(&mut self) {
        if self.error_message().is_none() {
            return;
        }
        self.phase = AppPhase::SelectingMood;
        self.deck = None;
        self.session = None;
    }

    pub fn drag_begin(&mut self, point: Point) {
        if let Some(deck) = self.swiping_deck() {
            deck.drag_begin(point);
        }
    }

    pub fn drag_move(&mut self, point: Point) {
        if let Some(deck) = self.swiping_deck() {
            deck.drag_move(point);
        }
    }

    /// Completes a drag; a committed swipe is registered once the card has
    /// settled off-screen.
    pub async fn drag_release(&mut self) -> Option<Swipe> {
        let swipe = self.swiping_deck()?.drag_release().await?;
        self.register(&swipe);
        Some(swipe)
    }

    /// Accept button; same outcome as a completed right-swipe
    pub fn accept(&mut self) -> Option<Swipe> {
        let swipe = self.swiping_deck()?.accept()?;
        self.register(&swipe);
        Some(swipe)
    }

    /// Reject button; same outcome as a completed left-swipe
    pub fn reject(&mut self) -> Option<Swipe> {
        let swipe = self.swiping_deck()?.reject()?;
        self.register(&swipe);
        Some(swipe)
    }

    /// Removes a liked entry while reviewing; unknown ids are a no-op
    pub fn remove_saved(&mut self, id: &str) {
        if self.phase != AppPhase::ReviewingSaved {
            return;
        }
        if self.saved.remove(id) {
            self.store.save_saved_list(&self.saved);
        }
    }

    fn swiping_deck(&mut self) -> Option<&mut DeckSession> {
        if self.phase != AppPhase::Swiping {
            return None;
        }
        self.deck.as_mut()
    }

    /// Bookkeeping for a settled swipe: accepted cards join the saved list
    /// (duplicates by (title, year) are a no-op), and exhausting the deck
    /// moves on to the liked-list review.
    fn register(&mut self, swipe: &Swipe) {
        if swipe.verdict == Verdict::Accepted && self.saved.insert(swipe.card.clone()) {
            self.store.save_saved_list(&self.saved);
        }
        if swipe.exhausted {
            self.phase = AppPhase::ReviewingSaved;
            self.deck = None;
            self.session = None;
        }
    }
}
