//! Temporary immunity window

use crate::timer::Countdown;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single optional immunity window. While open, the owning status state
/// rejects every incoming effect.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImmunityState {
    window: Option<Countdown>,
}

impl ImmunityState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_immune(&self) -> bool {
        self.window.is_some()
    }

    /// Open an immunity window for `duration` seconds. Calls while a window
    /// is already open are ignored: the window is neither extended nor
    /// restacked. Returns `true` if a window was opened.
    pub fn set_temporarily(&mut self, duration: f64) -> bool {
        if self.window.is_some() {
            return false;
        }
        self.window = Some(Countdown::new(duration));
        debug!(duration, "immunity window opened");
        true
    }

    /// Advance the window. Returns `true` on the tick it closed.
    pub fn tick(&mut self, delta: f64) -> bool {
        let finished = match &mut self.window {
            Some(timer) => timer.tick(delta),
            None => return false,
        };
        if finished {
            self.window = None;
            debug!("immunity window closed");
        }
        finished
    }
}
