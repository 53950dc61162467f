//! Headless engine for a swipe-driven film recommendation browser.
//!
//! The crate turns pointer motion into accept/reject decisions, runs the
//! card deck and the surrounding application flow as explicit state
//! machines, and enriches fetched recommendations with artwork. Rendering
//! is out of scope: UI layers drive the engine with events and read state
//! snapshots back.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use config::Config;
pub use engine::{AppFlow, AppPhase, DeckPhase, DeckSession, Decision, GestureTracker, Point};
pub use error::{AppError, AppResult};
pub use models::{Candidate, Genre, Profile, SavedList, GENRES};
