pub mod deck;
pub mod flow;
pub mod gesture;

pub use deck::{CardStack, DeckPhase, DeckSession, Swipe, Verdict};
pub use flow::{AppFlow, AppPhase, SessionTicket};
pub use gesture::{Decision, GestureSnapshot, GestureTracker, Point};
