//! Integer tick cooldowns
//!
//! Every repeatable action (firing, spawning, retargeting, tick damage) is
//! gated by one of these. A cooldown is decremented once per simulation step
//! and never goes below zero.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    remaining: u32,
}

impl Cooldown {
    /// A cooldown that is already ready
    pub const READY: Cooldown = Cooldown { remaining: 0 };

    /// A cooldown that becomes ready after `ticks` steps
    pub fn new(ticks: u32) -> Self {
        Self { remaining: ticks }
    }

    /// Advance one step
    #[inline]
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.remaining == 0
    }

    /// Restart the cooldown after performing its action
    #[inline]
    pub fn trigger(&mut self, duration: u32) {
        self.remaining = duration;
    }

    /// Steps left before ready
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance one step and report whether the timer just ran out, rearming it
    /// with `period` if so. Used for periodic effects rather than gated actions.
    pub fn tick_periodic(&mut self, period: u32) -> bool {
        self.tick();
        if self.ready() {
            self.trigger(period);
            true
        } else {
            false
        }
    }
}
