//! On-screen log overlay.
//!
//! Draws the newest entries of a [`LogBuffer`] over the bottom of the face,
//! one line per entry, colored by level:
//!
//! ```text
//! ┌──────────────────────────┐
//! │ LOG                  #42 │
//! │ I face 144x168           │
//! │ D tick 13:00             │
//! │ W unknown key vibrate    │
//! └──────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::String;
use profont::PROFONT_7_POINT;

use crate::colors::{GRAY, WHITE};
use crate::log_buffer::LogBuffer;

/// Height of one overlay line in pixels.
pub const LINE_HEIGHT: u32 = 10;

const PADDING: i32 = 2;
const PREFIX_WIDTH: i32 = 8;

const OVERLAY_BG: Rgb565 = Rgb565::new(1, 2, 1);
const BORDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GRAY, 1);

/// Number of log lines that fit in `height` pixels (after the header line).
#[inline]
pub const fn lines_for_height(height: u32) -> usize {
    let body = height.saturating_sub(LINE_HEIGHT + 2 * PADDING as u32);
    (body / LINE_HEIGHT) as usize
}

/// Draw the log overlay filling `area`.
pub fn draw_log_overlay<D>(
    display: &mut D,
    log: &LogBuffer,
    area: Rectangle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.fill_solid(&area, OVERLAY_BG).ok();
    area.into_styled(BORDER_STYLE).draw(display).ok();

    let top = area.top_left.y + PADDING;
    let left = area.top_left.x + PADDING;
    let right = area.top_left.x + area.size.width as i32 - PADDING - 1;

    let header_style = MonoTextStyle::new(&PROFONT_7_POINT, WHITE);
    let top_left = TextStyleBuilder::new().baseline(Baseline::Top).build();
    let top_right = TextStyleBuilder::new()
        .baseline(Baseline::Top)
        .alignment(Alignment::Right)
        .build();

    Text::with_text_style("LOG", Point::new(left, top), header_style, top_left)
        .draw(display)
        .ok();
    let mut seq: String<12> = String::new();
    let _ = write!(seq, "#{}", log.next_seq());
    Text::with_text_style(&seq, Point::new(right, top), MonoTextStyle::new(&PROFONT_7_POINT, GRAY), top_right)
        .draw(display)
        .ok();

    let capacity = lines_for_height(area.size.height);
    let skip = log.len().saturating_sub(capacity);
    let mut y = top + LINE_HEIGHT as i32;
    for entry in log.iter().skip(skip) {
        let style = MonoTextStyle::new(&PROFONT_7_POINT, entry.level.color());
        let mut prefix: String<2> = String::new();
        prefix.push(entry.level.prefix()).ok();
        Text::with_text_style(&prefix, Point::new(left, y), style, top_left)
            .draw(display)
            .ok();
        Text::with_text_style(&entry.message, Point::new(left + PREFIX_WIDTH, y), style, top_left)
            .draw(display)
            .ok();
        y += LINE_HEIGHT as i32;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
