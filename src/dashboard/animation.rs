// src/dashboard/animation.rs
//! Score count-up animation: a pure counter plus the timer task that drives it

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::trace;

use super::state::Event;

pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Counting,
    Settled,
}

/// Displayed score. Every restart bumps the generation, which retires
/// ticks still in flight from an earlier run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreAnimation {
    generation: u64,
    target: u8,
    displayed: u8,
}

impl ScoreAnimation {
    /// Back to zero with nothing to count toward
    pub fn reset(&mut self) {
        self.restart(0);
    }

    /// Start counting toward `target`; returns the new generation
    pub fn restart(&mut self, target: u8) -> u64 {
        self.generation += 1;
        self.target = target;
        self.displayed = 0;
        self.generation
    }

    /// Apply a tick. Returns false when the tick belongs to a retired run.
    pub fn apply_tick(&mut self, generation: u64, value: u8) -> bool {
        if generation != self.generation {
            return false;
        }
        self.displayed = self.displayed.max(value.min(self.target));
        true
    }

    pub fn phase(&self) -> AnimationPhase {
        if self.displayed >= self.target {
            AnimationPhase::Settled
        } else {
            AnimationPhase::Counting
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn target(&self) -> u8 {
        self.target
    }

    pub fn displayed(&self) -> u8 {
        self.displayed
    }
}

/// Values a run emits: 1, 2, ..., target. A zero target emits a single 0.
pub fn tick_values(target: u8) -> std::ops::RangeInclusive<u8> {
    let first = if target == 0 { 0 } else { 1 };
    first..=target
}

/// Handle to the repeating timer. Dropping it stops the timer.
#[derive(Debug, Default)]
pub struct ScoreTicker {
    handle: Option<JoinHandle<()>>,
}

impl ScoreTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any running timer, then tick toward `target` every `TICK_INTERVAL`
    pub fn start(&mut self, generation: u64, target: u8, events: UnboundedSender<Event>) {
        self.cancel();

        trace!("Score animation {} started toward {}", generation, target);
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            // The first tick of a tokio interval fires immediately
            interval.tick().await;

            for value in tick_values(target) {
                interval.tick().await;
                if events.send(Event::ScoreTick { generation, value }).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ScoreTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
