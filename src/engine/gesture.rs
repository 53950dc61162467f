use std::time::Duration;

/// Degrees of card rotation per horizontal pixel of drag
pub const ROTATION_PER_PIXEL: f64 = 0.1;

/// Horizontal distance a release must exceed to commit a decision
pub const COMMIT_THRESHOLD: f64 = 100.0;

/// Off-screen offset a committed card is driven to
pub const EJECT_DISTANCE: f64 = 500.0;

/// How long the exit animation plays before the decision is reported
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);

/// A pointer position in drag-space units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Classification of a gesture release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    CommitRight,
    CommitLeft,
    Cancel,
}

/// Read-only view of the gesture state for rendering layers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSnapshot {
    pub offset: Point,
    pub rotation: f64,
    pub opacity: f64,
    pub dragging: bool,
}

/// Turns a raw pointer stream into an offset, a derived rotation, and a
/// release classification.
///
/// The tracker is armed for exactly one card at a time; input for anything
/// but the armed card is ignored. State resets whenever the armed card
/// changes. Everything outside this type reads the state through
/// [`GestureTracker::snapshot`] only.
#[derive(Debug)]
pub struct GestureTracker {
    card_id: Option<String>,
    origin: Point,
    offset: Point,
    rotation: f64,
    opacity: f64,
    dragging: bool,
}

impl GestureTracker {
    /// A tracker not armed for any card; all input is ignored
    pub fn idle() -> Self {
        Self {
            card_id: None,
            origin: Point::default(),
            offset: Point::default(),
            rotation: 0.0,
            opacity: 1.0,
            dragging: false,
        }
    }

    /// Arms the tracker for a new active card, resetting all visual state
    pub fn retarget(&mut self, card_id: Option<String>) {
        self.card_id = card_id;
        self.origin = Point::default();
        self.offset = Point::default();
        self.rotation = 0.0;
        self.opacity = 1.0;
        self.dragging = false;
    }

    pub fn is_armed(&self) -> bool {
        self.card_id.is_some()
    }

    /// Starts a drag; ignored unless armed for an active card
    pub fn begin(&mut self, point: Point) {
        if !self.is_armed() {
            return;
        }
        self.origin = point;
        self.dragging = true;
    }

    /// Tracks pointer motion; ignored unless a drag is in progress
    pub fn update(&mut self, point: Point) {
        if !self.dragging {
            return;
        }
        self.offset = Point::new(point.x - self.origin.x, point.y - self.origin.y);
        self.rotation = self.offset.x * ROTATION_PER_PIXEL;
    }

    /// Ends the drag and classifies it.
    ///
    /// A commit drives the card off-screen (vertical offset preserved) and
    /// fades it out; a cancel eases everything back to the origin.
    pub fn release(&mut self) -> Decision {
        if !self.dragging {
            return Decision::Cancel;
        }
        self.dragging = false;

        if self.offset.x > COMMIT_THRESHOLD {
            self.offset = Point::new(EJECT_DISTANCE, self.offset.y);
            self.opacity = 0.0;
            Decision::CommitRight
        } else if self.offset.x < -COMMIT_THRESHOLD {
            self.offset = Point::new(-EJECT_DISTANCE, self.offset.y);
            self.opacity = 0.0;
            Decision::CommitLeft
        } else {
            self.offset = Point::default();
            self.rotation = 0.0;
            Decision::Cancel
        }
    }

    pub fn snapshot(&self) -> GestureSnapshot {
        GestureSnapshot {
            offset: self.offset,
            rotation: self.rotation,
            opacity: self.opacity,
            dragging: self.dragging,
        }
    }
}
