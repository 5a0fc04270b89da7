//! Timed end-of-round sequences.
//!
//! After a loss the engine reveals every remaining category one at a time;
//! after a win it pauses before the summary. Both are queued on the engine as
//! `TimedStep`s and consumed in one of two ways:
//!
//! - **Blocking**: `RoundEngine::finish_sequence` applies every step at once.
//! - **Real time**: [`drive_sequence`] waits on a [`Timer`] before each step
//!   and reports every event through a callback.
//!
//! `drive_sequence` holds `&mut RoundEngine` for the whole run, so no other
//! mutation can land between two steps.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::engine::RoundEngine;
use crate::core::Level;
use crate::puzzle::Category;

/// A single sequencing action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceStep {
    /// Clear the category at this level from the board.
    Reveal(Level),
    /// Mark a lost round resolved.
    ConfirmLoss,
    /// Mark a won round resolved.
    ConfirmWin,
}

/// A step and the pause that precedes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimedStep {
    pub delay: Duration,
    pub step: SequenceStep,
}

/// Notification emitted as each step lands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceEvent {
    /// A category was revealed after a loss.
    CategoryRevealed(Category),
    /// The loss sequence finished.
    RoundLost,
    /// The win pause finished.
    RoundWon,
}

/// Source of real-time pauses.
#[async_trait]
pub trait Timer: Send + Sync {
    /// Suspend for `delay`.
    async fn wait(&self, delay: Duration);
}

/// Timer backed by `tokio::time::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioTimer;

#[async_trait]
impl Timer for TokioTimer {
    async fn wait(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Timer that never waits.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateTimer;

#[async_trait]
impl Timer for ImmediateTimer {
    async fn wait(&self, _delay: Duration) {}
}

/// Run every pending step, pausing on `timer` before each.
///
/// Returns the emitted events in order. Does nothing if no sequence is queued.
pub async fn drive_sequence<T, F>(
    engine: &mut RoundEngine,
    timer: &T,
    mut on_event: F,
) -> Vec<SequenceEvent>
where
    T: Timer + ?Sized,
    F: FnMut(&SequenceEvent),
{
    let mut events = Vec::new();

    while let Some(delay) = engine.next_delay() {
        timer.wait(delay).await;
        if let Some(event) = engine.advance() {
            on_event(&event);
            events.push(event);
        }
    }

    events
}
