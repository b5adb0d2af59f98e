//! Star transition animation driver.
//!
//! Each time the displayed time changes, a short burst of stars grows over the
//! face. The host animation scheduler owns the wall clock and calls
//! [`StarTransition::update`] with a normalized progress ratio in `0.0..=1.0`
//! at whatever cadence it likes; everything here derives elapsed time from the
//! *difference* between successive ratios, so irregular frame intervals are
//! fine.
//!
//! # Run Lifecycle
//!
//! ```text
//! setup ──► update(r0) ──► update(r1) ──► ... ──► teardown
//!   ▲                                               │
//!   └──────────────── restart (teardown + setup) ◄──┘
//! ```
//!
//! # Deferred Layout Refresh
//!
//! The transition doubles as a one-shot scheduler: when the layout has been
//! marked stale, the first update at or past [`REFRESH_RATIO`] reports that the
//! new layout should be applied. This hides the glyph swap behind the stars.
//! The refresh fires at most once per run.
//!
//! # Spawn Rate
//!
//! Stars spawn every [`SPAWN_INTERVAL`] seconds of animation time until
//! `max_spawn_ratio`, the point after which a new star could no longer grow to
//! [`MAX_SCALE`] before the run ends.

use embedded_graphics::prelude::Size;
use rand_xoshiro::rand_core::RngCore;

use crate::particles::{MAX_SCALE, ParticlePool, SCALE_SPEED, SPAWN_SCALE, spawn_position};

// =============================================================================
// Timing Constants
// =============================================================================

/// Total duration of one run in seconds.
pub const TRANSITION_PERIOD: f32 = 1.6;

/// Total duration of one run in milliseconds, for host schedulers.
pub const TRANSITION_PERIOD_MS: u32 = 1600;

/// Seconds of animation time between two spawns.
pub const SPAWN_INTERVAL: f32 = 0.02;

/// Progress ratio at which a stale layout is applied.
pub const REFRESH_RATIO: f32 = 0.25;

const _: () = assert!(TRANSITION_PERIOD_MS == (TRANSITION_PERIOD * 1000.0) as u32);

/// Progress ratio after which no more stars are spawned.
#[inline]
pub const fn max_spawn_ratio() -> f32 {
    (TRANSITION_PERIOD - (MAX_SCALE - SPAWN_SCALE) / SCALE_SPEED) / TRANSITION_PERIOD
}

// =============================================================================
// Run State
// =============================================================================

/// Per-run bookkeeping, reset on every (re)start.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct AnimationClock {
    /// Ratio passed to the previous update.
    pub previous_ratio: f32,
    /// Seconds until the next spawn.
    pub spawn_timer: f32,
    /// Ratio after which spawning stops.
    pub max_spawn_ratio: f32,
    /// Whether this run already applied the pending layout.
    pub time_applied: bool,
}

impl AnimationClock {
    const fn new() -> Self {
        Self {
            previous_ratio: 0.0,
            spawn_timer: 0.0,
            max_spawn_ratio: max_spawn_ratio(),
            time_applied: false,
        }
    }
}

/// What a single update did.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct UpdateOutcome {
    /// The stale layout should be applied now.
    pub refresh_layout: bool,
    /// Stars spawned this update.
    pub spawned: u8,
    /// Spawns dropped because the pool was full.
    pub dropped: u8,
}

/// The star transition: particle pool plus run clock.
pub struct StarTransition {
    pool: ParticlePool,
    clock: AnimationClock,
    layout_stale: bool,
    running: bool,
    dirty: bool,
}

impl StarTransition {
    /// Create an idle transition with an empty pool.
    pub const fn new() -> Self {
        Self {
            pool: ParticlePool::new(),
            clock: AnimationClock::new(),
            layout_stale: false,
            running: false,
            dirty: false,
        }
    }

    /// Start a run from zero progress.
    pub fn setup(&mut self) {
        self.clock = AnimationClock::new();
        self.running = true;
    }

    /// Advance the run to `ratio`.
    ///
    /// Does nothing outside a run. Ratios should not decrease; if one does, it
    /// is treated as zero elapsed time.
    pub fn update<R: RngCore>(
        &mut self,
        ratio: f32,
        canvas: Size,
        rng: &mut R,
    ) -> UpdateOutcome {
        let mut outcome = UpdateOutcome::default();
        if !self.running {
            return outcome;
        }

        let ratio = ratio.clamp(0.0, 1.0);
        let delta_time = ((ratio - self.clock.previous_ratio) * TRANSITION_PERIOD).max(0.0);
        self.clock.previous_ratio = self.clock.previous_ratio.max(ratio);

        if self.layout_stale && !self.clock.time_applied && ratio >= REFRESH_RATIO {
            outcome.refresh_layout = true;
            self.clock.time_applied = true;
            self.layout_stale = false;
        }

        if ratio < self.clock.max_spawn_ratio {
            self.clock.spawn_timer -= delta_time;
            if self.clock.spawn_timer <= 0.0 {
                if self.pool.spawn(spawn_position(rng, canvas)).is_some() {
                    outcome.spawned += 1;
                } else {
                    outcome.dropped += 1;
                }
                self.clock.spawn_timer = SPAWN_INTERVAL;
            }
        }

        self.pool.grow(delta_time * SCALE_SPEED);
        self.dirty = true;
        outcome
    }

    /// End the run and retire every star.
    pub fn teardown(&mut self) {
        self.pool.clear();
        self.running = false;
        self.dirty = true;
    }

    /// Abandon any run in progress and start a fresh one.
    pub fn restart(&mut self) {
        self.teardown();
        self.setup();
    }

    /// Mark the layout as stale so the next run applies it mid-way.
    #[inline]
    pub fn request_layout_refresh(&mut self) { self.layout_stale = true; }

    /// Whether a layout refresh is still pending.
    #[inline]
    pub const fn layout_stale(&self) -> bool { self.layout_stale }

    /// Consume a pending refresh outside of a run.
    pub fn take_layout_refresh(&mut self) -> bool { core::mem::take(&mut self.layout_stale) }

    /// Whether a run is in progress.
    #[inline]
    pub const fn is_running(&self) -> bool { self.running }

    /// Run bookkeeping, mainly for inspection.
    #[inline]
    pub const fn clock(&self) -> &AnimationClock { &self.clock }

    /// Stars to draw.
    #[inline]
    pub const fn pool(&self) -> &ParticlePool { &self.pool }

    /// Return and clear the redraw flag.
    pub fn take_dirty(&mut self) -> bool { core::mem::take(&mut self.dirty) }
}

impl Default for StarTransition {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
