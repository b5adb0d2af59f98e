//! Display profiles.
//!
//! A [`DisplayProfile`] describes one target screen: canvas size, the pixel
//! size of each glyph class, how many colors the panel can show, and the
//! vertical nudges used when date rows are enabled. One binary supports every
//! profile; the host picks one at start-up.
//!
//! Nudge values are tuned against the atlas artwork.

use embedded_graphics::prelude::Size;

/// Color capability of the panel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorDepth {
    /// Black and white only.
    Mono,
    /// 2 bits per channel (64 colors).
    Palette64,
    /// Full RGB565.
    Full,
}

/// Capability descriptor for one display.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DisplayProfile {
    /// Drawable area in pixels.
    pub canvas: Size,
    /// Cell size for hour/minute rows with at most 3 glyphs.
    pub large_cell: u32,
    /// Cell size for hour/minute rows with more than 3 glyphs.
    pub medium_cell: u32,
    /// Cell size for the date and month rows.
    pub small_cell: u32,
    /// Color capability.
    pub color_depth: ColorDepth,
    /// Vertical shift when exactly one date row is shown.
    pub single_row_nudge: i32,
    /// Vertical shift when both date rows are shown and differ in width.
    pub dual_row_nudge: i32,
}

/// 144x168 rectangular black-and-white display.
pub const RECT_MONO: DisplayProfile = DisplayProfile {
    canvas: Size::new(144, 168),
    large_cell: 48,
    medium_cell: 36,
    small_cell: 16,
    color_depth: ColorDepth::Mono,
    single_row_nudge: 8,
    dual_row_nudge: 4,
};

/// 144x168 rectangular 64-color display.
pub const RECT_COLOR: DisplayProfile = DisplayProfile {
    color_depth: ColorDepth::Palette64,
    ..RECT_MONO
};

/// 180x180 round 64-color display.
pub const ROUND_COLOR: DisplayProfile = DisplayProfile {
    canvas: Size::new(180, 180),
    ..RECT_COLOR
};

// Compile-time validation: a full-width large row must fit on every canvas
const _: () = assert!(RECT_MONO.large_cell * 3 <= RECT_MONO.canvas.width);
const _: () = assert!(RECT_MONO.medium_cell * 4 <= RECT_MONO.canvas.width);
const _: () = assert!(RECT_MONO.small_cell < RECT_MONO.medium_cell);
const _: () = assert!(RECT_MONO.medium_cell < RECT_MONO.large_cell);
const _: () = assert!(RECT_MONO.dual_row_nudge < RECT_MONO.single_row_nudge);

impl DisplayProfile {
    /// Canvas width as a signed coordinate.
    #[inline]
    pub const fn width(&self) -> i32 { self.canvas.width as i32 }

    /// Canvas height as a signed coordinate.
    #[inline]
    pub const fn height(&self) -> i32 { self.canvas.height as i32 }
}

impl Default for DisplayProfile {
    fn default() -> Self { RECT_COLOR }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_share_cell_sizes() {
        for profile in [RECT_MONO, RECT_COLOR, ROUND_COLOR] {
            assert_eq!(profile.large_cell, 48);
            assert_eq!(profile.medium_cell, 36);
            assert_eq!(profile.small_cell, 16);
        }
    }

    #[test]
    fn test_profile_color_depths() {
        assert_eq!(RECT_MONO.color_depth, ColorDepth::Mono);
        assert_eq!(RECT_COLOR.color_depth, ColorDepth::Palette64);
        assert_eq!(ROUND_COLOR.color_depth, ColorDepth::Palette64);
    }

    #[test]
    fn test_round_canvas() {
        assert_eq!(ROUND_COLOR.width(), 180);
        assert_eq!(ROUND_COLOR.height(), 180);
    }
}
