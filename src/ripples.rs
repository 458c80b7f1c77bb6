/*
 * Ripples Module
 *
 * Transient point forces triggered by the user. Each ripple lives for `delay`
 * seconds of simulation time. Expiry is polled against the simulation clock
 * once per tick, so a run with a fixed tick is fully deterministic.
 */

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::vector::Vector2D;

pub const DEFAULT_MAX_RIPPLES: usize = 5;
pub const DEFAULT_RIPPLE_DELAY: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ripple {
    pub pos: Vector2D,
    pub creation_time: f32,
    pub delay: f32,
}

impl Ripple {
    pub fn is_live(&self, now: f32) -> bool {
        now - self.creation_time < self.delay
    }

    /// How far through its life the ripple is, 0 at creation and 1 at expiry.
    pub fn age_fraction(&self, now: f32) -> f32 {
        if self.delay <= 0.0 {
            return 1.0;
        }
        ((now - self.creation_time) / self.delay).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RipplesManager {
    max_ripples: usize,
    delay: f32,
    ripples: Vec<Ripple>,
}

impl Default for RipplesManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RIPPLES, DEFAULT_RIPPLE_DELAY)
    }
}

impl RipplesManager {
    pub fn new(max_ripples: usize, delay: f32) -> Self {
        Self {
            max_ripples,
            delay: delay.max(0.0),
            ripples: Vec::with_capacity(max_ripples),
        }
    }

    pub fn max_ripples(&self) -> usize {
        self.max_ripples
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Queues a ripple at `pos`. Expired ripples are dropped first; returns
    /// `false` (and does nothing) when the live queue is still full.
    pub fn add_point(&mut self, pos: Vector2D, now: f32) -> bool {
        self.prune(now);
        if self.ripples.len() >= self.max_ripples {
            trace!(x = pos.x, y = pos.y, "ripple rejected, queue full");
            return false;
        }
        self.ripples.push(Ripple {
            pos,
            creation_time: now,
            delay: self.delay,
        });
        true
    }

    /// Drops every ripple whose lifetime has elapsed. Safe to call repeatedly.
    pub fn prune(&mut self, now: f32) {
        self.ripples.retain(|r| r.is_live(now));
    }

    /// Positions of the ripples still live at `now`.
    pub fn points(&self, now: f32) -> Vec<Vector2D> {
        self.ripples
            .iter()
            .filter(|r| r.is_live(now))
            .map(|r| r.pos)
            .collect()
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    pub fn clear(&mut self) {
        self.ripples.clear();
    }
}
