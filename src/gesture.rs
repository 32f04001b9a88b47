//! Touch swipe tracking and classification.
//!
//! A single-finger touch sequence is tracked from start to end. Horizontal
//! movement past a small threshold, dominating the vertical movement,
//! classifies the sequence as an intentional swipe; only then does a release
//! past the coarser distance threshold navigate. Anything else (taps,
//! vertical motion, multi-touch) is not a navigation gesture.

use egui::{Pos2, TouchId, TouchPhase};

/// Horizontal movement (px) before a sequence counts as a swipe at all.
pub const SWIPE_INTENT_THRESHOLD: f32 = 8.0;
/// Net horizontal displacement (px) at release required to navigate.
pub const SWIPE_DISTANCE_THRESHOLD: f32 = 40.0;

/// Outcome of a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    /// Finger moved leftward: advance to the next image.
    Next,
    /// Finger moved rightward: go back to the previous image.
    Prev,
}

/// Transient per-sequence state; discarded at touch end.
#[derive(Debug, Clone, Copy)]
struct TouchGesture {
    id: TouchId,
    start: Pos2,
    /// Passed the intent threshold with horizontal dominance.
    moved: bool,
    /// A second finger joined; the whole sequence is ignored.
    poisoned: bool,
}

/// Tracks at most one touch sequence at a time.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    gesture: Option<TouchGesture>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one touch event. Returns a navigation action only on the release
    /// of a classified, far-enough horizontal swipe.
    pub fn on_touch(&mut self, id: TouchId, phase: TouchPhase, pos: Pos2) -> Option<SwipeAction> {
        match phase {
            TouchPhase::Start => {
                match &mut self.gesture {
                    Some(gesture) => gesture.poisoned = true,
                    None => {
                        self.gesture = Some(TouchGesture {
                            id,
                            start: pos,
                            moved: false,
                            poisoned: false,
                        });
                    }
                }
                None
            }
            TouchPhase::Move => {
                if let Some(gesture) = &mut self.gesture {
                    if gesture.id != id {
                        gesture.poisoned = true;
                    } else if !gesture.poisoned {
                        let dx = pos.x - gesture.start.x;
                        let dy = pos.y - gesture.start.y;
                        if dx.abs() > SWIPE_INTENT_THRESHOLD && dx.abs() > dy.abs() {
                            gesture.moved = true;
                        }
                    }
                }
                None
            }
            TouchPhase::End => {
                let gesture = self.gesture.as_ref().copied()?;
                if gesture.id != id {
                    // A secondary finger lifted; keep waiting for the first.
                    return None;
                }
                self.gesture = None;
                if gesture.poisoned || !gesture.moved {
                    return None;
                }
                let dx = pos.x - gesture.start.x;
                if dx.abs() <= SWIPE_DISTANCE_THRESHOLD {
                    return None;
                }
                Some(if dx < 0.0 {
                    SwipeAction::Next
                } else {
                    SwipeAction::Prev
                })
            }
            TouchPhase::Cancel => {
                if self.gesture.map_or(false, |g| g.id == id) {
                    self.gesture = None;
                }
                None
            }
        }
    }
}
