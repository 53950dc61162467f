use crate::error::AppError;
use crate::models::Candidate;

use super::gesture::{Decision, GestureSnapshot, GestureTracker, Point, SETTLE_DELAY};

/// User decision on a single card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    /// Maps a committed gesture to its verdict; a cancel maps to nothing
    pub fn from_decision(decision: Decision) -> Option<Self> {
        match decision {
            Decision::CommitRight => Some(Verdict::Accepted),
            Decision::CommitLeft => Some(Verdict::Rejected),
            Decision::Cancel => None,
        }
    }
}

/// Outcome of one advance of the card stack
#[derive(Debug, Clone, PartialEq)]
pub struct Swipe {
    pub verdict: Verdict,
    pub card: Candidate,
    /// Cursor position after the advance
    pub next_index: usize,
    pub exhausted: bool,
}

/// Owns the candidate sequence and the advancing cursor.
///
/// The cursor is monotonic and never exceeds the sequence length. At most
/// two cards are renderable at a time: the active one and the preloaded
/// next one.
#[derive(Debug, Default)]
pub struct CardStack {
    cards: Vec<Candidate>,
    cursor: usize,
}

impl CardStack {
    pub fn new(cards: Vec<Candidate>) -> Self {
        Self { cards, cursor: 0 }
    }

    pub fn active_card(&self) -> Option<&Candidate> {
        self.cards.get(self.cursor)
    }

    /// The card preloaded underneath the active one
    pub fn preloaded_card(&self) -> Option<&Candidate> {
        self.cards.get(self.cursor + 1)
    }

    /// The render window: active card first, then the preloaded one
    pub fn visible_cards(&self) -> &[Candidate] {
        let end = (self.cursor + 2).min(self.cards.len());
        &self.cards[self.cursor.min(self.cards.len())..end]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.cards.len()
    }

    /// Emits the decision for the active card and advances the cursor by one
    pub fn advance(&mut self, verdict: Verdict) -> Option<Swipe> {
        let card = self.cards.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(Swipe {
            verdict,
            card,
            next_index: self.cursor,
            exhausted: self.is_exhausted(),
        })
    }
}

/// Presentation state of a swipe session
#[derive(Debug, Clone, PartialEq)]
pub enum DeckPhase {
    /// Candidates not yet available
    Loading,
    /// Fetch failed or returned nothing; carries the user-facing message
    Error(String),
    /// Cursor within bounds, cards on screen
    Active,
    /// Every candidate has been decided
    Exhausted,
}

/// Orchestrates the gesture tracker and the card stack across one full
/// candidate sequence.
#[derive(Debug)]
pub struct DeckSession {
    phase: DeckPhase,
    stack: CardStack,
    tracker: GestureTracker,
}

impl DeckSession {
    /// A session waiting for its candidates
    pub fn loading() -> Self {
        Self {
            phase: DeckPhase::Loading,
            stack: CardStack::default(),
            tracker: GestureTracker::idle(),
        }
    }

    /// Hands the fetched candidates to the session.
    ///
    /// An empty sequence is an error condition for presentation purposes,
    /// not a legitimate empty deck.
    pub fn deliver(&mut self, cards: Vec<Candidate>) {
        if cards.is_empty() {
            self.phase = DeckPhase::Error(AppError::EmptyResult.user_message());
            return;
        }
        self.stack = CardStack::new(cards);
        self.phase = DeckPhase::Active;
        self.tracker
            .retarget(self.stack.active_card().map(|c| c.id.clone()));
    }

    /// Records a failed fetch
    pub fn fail(&mut self, error: &AppError) {
        self.phase = DeckPhase::Error(error.user_message());
    }

    pub fn phase(&self) -> &DeckPhase {
        &self.phase
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            DeckPhase::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn active_card(&self) -> Option<&Candidate> {
        self.stack.active_card()
    }

    pub fn preloaded_card(&self) -> Option<&Candidate> {
        self.stack.preloaded_card()
    }

    pub fn visible_cards(&self) -> &[Candidate] {
        self.stack.visible_cards()
    }

    pub fn gesture(&self) -> GestureSnapshot {
        self.tracker.snapshot()
    }

    pub fn drag_begin(&mut self, point: Point) {
        if self.phase == DeckPhase::Active {
            self.tracker.begin(point);
        }
    }

    pub fn drag_move(&mut self, point: Point) {
        self.tracker.update(point);
    }

    /// Ends the drag. On a commit the exit animation is given its settle
    /// delay before the decision is reported; a cancel reports nothing.
    pub async fn drag_release(&mut self) -> Option<Swipe> {
        let decision = self.tracker.release();
        let verdict = Verdict::from_decision(decision)?;
        tokio::time::sleep(SETTLE_DELAY).await;
        self.settle(verdict)
    }

    /// Accept via the button surface; bypasses the gesture animation
    pub fn accept(&mut self) -> Option<Swipe> {
        self.settle(Verdict::Accepted)
    }

    /// Reject via the button surface; bypasses the gesture animation
    pub fn reject(&mut self) -> Option<Swipe> {
        self.settle(Verdict::Rejected)
    }

    fn settle(&mut self, verdict: Verdict) -> Option<Swipe> {
        if self.phase != DeckPhase::Active {
            return None;
        }
        let swipe = self.stack.advance(verdict)?;
        if swipe.exhausted {
            self.phase = DeckPhase::Exhausted;
            self.tracker.retarget(None);
        } else {
            self.tracker
                .retarget(self.stack.active_card().map(|c| c.id.clone()));
        }
        Some(swipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::gesture::COMMIT_THRESHOLD;

    fn candidates(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| Candidate {
                id: format!("rec-1-{}", i),
                title: format!("Film {}", i),
                year: "2020".to_string(),
                director: "Someone".to_string(),
                description: "A film.".to_string(),
                reason: "Because".to_string(),
                artwork_url: None,
            })
            .collect()
    }

    #[test]
    fn test_exhaustion_after_exactly_n_advances() {
        for n in 1..=6 {
            let mut stack = CardStack::new(candidates(n));
            for i in 0..n {
                let verdict = if i % 2 == 0 {
                    Verdict::Accepted
                } else {
                    Verdict::Rejected
                };
                let swipe = stack.advance(verdict).unwrap();
                assert_eq!(swipe.exhausted, i == n - 1, "advance {} of {}", i + 1, n);
                assert_eq!(swipe.next_index, i + 1);
            }
            assert!(stack.is_exhausted());
            // Further advances read nothing
            assert_eq!(stack.advance(Verdict::Accepted), None);
            assert_eq!(stack.cursor(), n);
        }
    }

    #[test]
    fn test_render_window_is_at_most_two_cards() {
        let mut stack = CardStack::new(candidates(4));
        assert_eq!(stack.visible_cards().len(), 2);
        assert_eq!(stack.active_card().unwrap().id, "rec-1-0");
        assert_eq!(stack.preloaded_card().unwrap().id, "rec-1-1");

        stack.advance(Verdict::Rejected);
        assert_eq!(stack.active_card().unwrap().id, "rec-1-1");
        assert_eq!(stack.preloaded_card().unwrap().id, "rec-1-2");

        stack.advance(Verdict::Rejected);
        stack.advance(Verdict::Rejected);
        assert_eq!(stack.visible_cards().len(), 1);
        assert_eq!(stack.preloaded_card(), None);

        stack.advance(Verdict::Rejected);
        assert!(stack.visible_cards().is_empty());
    }

    #[test]
    fn test_empty_delivery_is_an_error() {
        let mut deck = DeckSession::loading();
        deck.deliver(Vec::new());

        let message = deck.error_message().expect("empty delivery sets error");
        assert_ne!(message, AppError::CredentialMissing.user_message());
    }

    #[test]
    fn test_failed_fetch_carries_user_message() {
        let mut deck = DeckSession::loading();
        deck.fail(&AppError::CredentialMissing);

        assert_eq!(
            deck.error_message(),
            Some(AppError::CredentialMissing.user_message().as_str())
        );
    }

    #[test]
    fn test_button_path_matches_gesture_outcome() {
        let mut deck = DeckSession::loading();
        deck.deliver(candidates(3));

        let swipe = deck.accept().unwrap();
        assert_eq!(swipe.verdict, Verdict::Accepted);
        assert_eq!(swipe.card.id, "rec-1-0");

        let swipe = deck.reject().unwrap();
        assert_eq!(swipe.verdict, Verdict::Rejected);
        assert_eq!(swipe.card.id, "rec-1-1");
        assert_eq!(*deck.phase(), DeckPhase::Active);

        let swipe = deck.accept().unwrap();
        assert!(swipe.exhausted);
        assert_eq!(*deck.phase(), DeckPhase::Exhausted);
        assert_eq!(deck.accept(), None);
    }

    #[test]
    fn test_gesture_commit_reports_after_settle() {
        tokio_test::block_on(async {
            let mut deck = DeckSession::loading();
            deck.deliver(candidates(2));

            deck.drag_begin(Point::new(0.0, 0.0));
            deck.drag_move(Point::new(COMMIT_THRESHOLD + 50.0, 0.0));
            let swipe = deck.drag_release().await.unwrap();

            assert_eq!(swipe.verdict, Verdict::Accepted);
            assert_eq!(swipe.card.id, "rec-1-0");
            assert_eq!(deck.active_card().unwrap().id, "rec-1-1");
            // Fresh card starts from a rested tracker
            assert_eq!(deck.gesture().offset, Point::default());
            assert_eq!(deck.gesture().opacity, 1.0);
        });
    }

    #[test]
    fn test_gesture_cancel_reports_nothing() {
        tokio_test::block_on(async {
            let mut deck = DeckSession::loading();
            deck.deliver(candidates(2));

            deck.drag_begin(Point::new(0.0, 0.0));
            deck.drag_move(Point::new(40.0, 10.0));
            assert_eq!(deck.drag_release().await, None);
            assert_eq!(deck.active_card().unwrap().id, "rec-1-0");
        });
    }

    #[test]
    fn test_drag_ignored_while_loading() {
        tokio_test::block_on(async {
            let mut deck = DeckSession::loading();
            deck.drag_begin(Point::new(0.0, 0.0));
            deck.drag_move(Point::new(500.0, 0.0));
            assert_eq!(deck.drag_release().await, None);
            assert_eq!(*deck.phase(), DeckPhase::Loading);
        });
    }
}
