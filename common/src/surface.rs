//! Render surface: glyph slots and star drawing.
//!
//! The surface owns a fixed grid of [`SLOTS_PER_ROW`] glyph slots for each of
//! the four rows. Applying a layout only moves and hides slots; the glyph
//! pixels are fetched from the atlas at draw time.
//!
//! # Draw Order
//!
//! 1. Background fill
//! 2. Visible glyph slots (hour/minute in the time color, date/month in the date color)
//! 3. Active stars in the particle color

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, Triangle};

use crate::atlas::GlyphAtlas;
use crate::colors::Theme;
use crate::glyphs::{AtlasCell, MAX_RUN_LEN};
use crate::layout::{LayoutResult, ROW_COUNT, Row, SizeClass};
use crate::particles::{ParticlePool, ParticleSlot, scaled_outline};

/// Glyph slots per row.
pub const SLOTS_PER_ROW: usize = MAX_RUN_LEN;

/// One drawable glyph position.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GlyphSlot {
    pub cell: AtlasCell,
    pub size: SizeClass,
    /// Screen area covered by the glyph.
    pub frame: Rectangle,
    pub hidden: bool,
}

impl GlyphSlot {
    const HIDDEN: Self = Self {
        cell: AtlasCell::new(0, 0),
        size: SizeClass::Small,
        frame: Rectangle::zero(),
        hidden: true,
    };
}

/// Fixed grid of glyph slots plus a redraw flag.
pub struct RenderSurface {
    slots: [[GlyphSlot; SLOTS_PER_ROW]; ROW_COUNT],
    dirty: bool,
}

impl RenderSurface {
    /// Every slot hidden, dirty so the first frame paints the background.
    pub const fn new() -> Self {
        Self {
            slots: [[GlyphSlot::HIDDEN; SLOTS_PER_ROW]; ROW_COUNT],
            dirty: true,
        }
    }

    /// Move, resize, and show/hide slots to match `layout`.
    pub fn apply_layout(
        &mut self,
        layout: &LayoutResult,
    ) {
        for (row, placed) in layout.iter() {
            let cell_size = placed.cell_size;
            let slots = &mut self.slots[row.index()];
            for (i, slot) in slots.iter_mut().enumerate() {
                *slot = match placed.run.get(i) {
                    Some(&cell) if placed.visible => GlyphSlot {
                        cell,
                        size: placed.size,
                        frame: Rectangle::new(
                            placed.origin + Point::new(i as i32 * cell_size as i32, 0),
                            Size::new_equal(cell_size),
                        ),
                        hidden: false,
                    },
                    _ => GlyphSlot {
                        hidden: true,
                        ..*slot
                    },
                };
            }
        }
        self.dirty = true;
    }

    /// Slots of one row.
    #[inline]
    pub fn row(
        &self,
        row: Row,
    ) -> &[GlyphSlot; SLOTS_PER_ROW] {
        &self.slots[row.index()]
    }

    /// Number of slots currently shown.
    pub fn visible_count(&self) -> usize { self.slots.iter().flatten().filter(|s| !s.hidden).count() }

    #[inline]
    pub fn mark_dirty(&mut self) { self.dirty = true; }

    #[inline]
    pub const fn is_dirty(&self) -> bool { self.dirty }

    /// Paint the full face and clear the dirty flag.
    pub fn draw<D, A>(
        &mut self,
        target: &mut D,
        atlas: &A,
        theme: &Theme,
        particles: &ParticlePool,
    ) where
        D: DrawTarget<Color = Rgb565>,
        A: GlyphAtlas,
    {
        target.clear(theme.background).ok();

        for row in Row::ALL {
            let color = if row.is_time() { theme.time } else { theme.date };
            for slot in self.slots[row.index()].iter().filter(|s| !s.hidden) {
                atlas.draw_glyph(target, slot.cell, slot.size, &slot.frame, color);
            }
        }

        let style = PrimitiveStyle::with_fill(theme.particle);
        for star in particles.active() {
            draw_star(target, star, style);
        }

        self.dirty = false;
    }
}

impl Default for RenderSurface {
    fn default() -> Self { Self::new() }
}

/// Fill one star as a fan of triangles around its center.
fn draw_star<D>(
    target: &mut D,
    star: &ParticleSlot,
    style: PrimitiveStyle<Rgb565>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let outline = scaled_outline(star.scale).map(|p| p + star.position);
    for (i, &p) in outline.iter().enumerate() {
        let next = outline[(i + 1) % outline.len()];
        Triangle::new(star.position, p, next)
            .into_styled(style)
            .draw(target)
            .ok();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
