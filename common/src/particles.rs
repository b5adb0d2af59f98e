//! Fixed-capacity particle pool for the star transition.
//!
//! Stars are stored in a plain array of slots with an `active` tag. Spawning
//! takes the first inactive slot; when every slot is busy the spawn is simply
//! dropped, which only makes the effect a little sparser.
//!
//! # Memory
//!
//! [`POOL_SIZE`] slots of 16 bytes each, no heap allocation.

use embedded_graphics::prelude::{Point, Size};
use rand_xoshiro::rand_core::RngCore;

// =============================================================================
// Star Constants
// =============================================================================

/// Number of particle slots.
pub const POOL_SIZE: usize = 16;

/// Half the edge length of an unscaled star, in pixels.
pub const STAR_HALF_SIZE: i32 = 5;

/// Scale of a freshly spawned star.
pub const SPAWN_SCALE: f32 = 1.0;

/// Stars are retired once their scale grows past this.
pub const MAX_SCALE: f32 = 6.0;

/// Scale units gained per second.
pub const SCALE_SPEED: f32 = 10.0;

/// Distance kept from every canvas edge so a fully grown star is never clipped.
pub const SPAWN_BORDER: i32 = MAX_SCALE as i32 * STAR_HALF_SIZE;

/// Outline of an unscaled star, clockwise around its center.
pub const STAR_OUTLINE: [Point; 8] = [
    Point::new(0, -STAR_HALF_SIZE),
    Point::new(1, -1),
    Point::new(STAR_HALF_SIZE, 0),
    Point::new(1, 1),
    Point::new(0, STAR_HALF_SIZE),
    Point::new(-1, 1),
    Point::new(-STAR_HALF_SIZE, 0),
    Point::new(-1, -1),
];

/// Star outline scaled by `scale`, relative to the star center.
///
/// Coordinates are truncated toward zero.
pub fn scaled_outline(scale: f32) -> [Point; 8] {
    STAR_OUTLINE.map(|p| Point::new((p.x as f32 * scale) as i32, (p.y as f32 * scale) as i32))
}

// =============================================================================
// Pool
// =============================================================================

/// One star.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ParticleSlot {
    /// Current scale, `SPAWN_SCALE..=MAX_SCALE` while active.
    pub scale: f32,
    /// Center on the canvas, fixed at spawn.
    pub position: Point,
    /// Whether the slot holds a live star.
    pub active: bool,
}

impl ParticleSlot {
    const EMPTY: Self = Self {
        scale: SPAWN_SCALE,
        position: Point::zero(),
        active: false,
    };
}

/// Arena of star slots indexed by slot id.
pub struct ParticlePool {
    slots: [ParticleSlot; POOL_SIZE],
}

impl ParticlePool {
    /// Create a pool with every slot inactive.
    pub const fn new() -> Self {
        Self {
            slots: [ParticleSlot::EMPTY; POOL_SIZE],
        }
    }

    /// Activate the first free slot at `position`.
    ///
    /// Returns the slot id, or `None` when the pool is exhausted.
    pub fn spawn(
        &mut self,
        position: Point,
    ) -> Option<usize> {
        let (idx, slot) = self.slots.iter_mut().enumerate().find(|(_, slot)| !slot.active)?;
        *slot = ParticleSlot {
            scale: SPAWN_SCALE,
            position,
            active: true,
        };
        Some(idx)
    }

    /// Grow every active star by `delta_scale` and retire those past [`MAX_SCALE`].
    pub fn grow(
        &mut self,
        delta_scale: f32,
    ) {
        for slot in self.slots.iter_mut().filter(|slot| slot.active) {
            slot.scale += delta_scale;
            if slot.scale > MAX_SCALE {
                slot.active = false;
            }
        }
    }

    /// Deactivate every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }

    /// Iterate over live stars.
    pub fn active(&self) -> impl Iterator<Item = &ParticleSlot> { self.slots.iter().filter(|slot| slot.active) }

    /// Number of live stars.
    #[inline]
    pub fn active_count(&self) -> usize { self.active().count() }

    /// Whether every slot is in use.
    #[inline]
    pub fn is_full(&self) -> bool { self.slots.iter().all(|slot| slot.active) }

    /// Read a slot by id.
    #[inline]
    pub fn slot(
        &self,
        idx: usize,
    ) -> Option<&ParticleSlot> {
        self.slots.get(idx)
    }
}

impl Default for ParticlePool {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Spawn Placement
// =============================================================================

/// Uniform integer in `min..=max`. Bounds are swapped if given in reverse.
pub fn range_random<R: RngCore>(
    rng: &mut R,
    min: i32,
    max: i32,
) -> i32 {
    let (lo, hi) = if min > max { (max, min) } else { (min, max) };
    let span = (hi - lo) as u32 + 1;
    lo + (rng.next_u32() % span) as i32
}

/// Random star center inside `canvas`, inset by [`SPAWN_BORDER`] on every edge.
pub fn spawn_position<R: RngCore>(
    rng: &mut R,
    canvas: Size,
) -> Point {
    let x = range_random(rng, SPAWN_BORDER, canvas.width as i32 - SPAWN_BORDER);
    let y = range_random(rng, SPAWN_BORDER, canvas.height as i32 - SPAWN_BORDER);
    Point::new(x, y)
}

// =============================================================================
// Unit Tests
// =============================================================================
