//! Color constants and theme resolution.
//!
//! Settings carry colors as `0xRRGGBB` words, the format the companion app
//! sends. [`Theme::resolve`] turns them into [`Rgb565`] values the panel can
//! actually show, depending on its [`ColorDepth`]:
//!
//! | depth       | mapping                                         |
//! |-------------|-------------------------------------------------|
//! | `Full`      | direct 888 to 565 conversion                    |
//! | `Palette64` | each channel quantized to 2 bits, then expanded |
//! | `Mono`      | white when luma >= 128, else black              |

use embedded_graphics::pixelcolor::{Rgb565, Rgb888, RgbColor};

use crate::config::ColorDepth;

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black (0, 0, 0).
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31).
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Error log lines.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green. Info log lines.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow. Warning log lines.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Dark gray. Debug and trace log lines.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

// =============================================================================
// Packed Colors
// =============================================================================

/// `0xRRGGBB` black.
pub const HEX_BLACK: u32 = 0x00_0000;

/// `0xRRGGBB` white.
pub const HEX_WHITE: u32 = 0xFF_FFFF;

/// Threshold on Rec. 601 luma (0-255) above which a mono panel shows white.
pub const MONO_LUMA_THRESHOLD: u32 = 128;

/// Split a `0xRRGGBB` word into its channels. Bits above 24 are ignored.
#[inline]
pub const fn unpack_rgb(hex: u32) -> Rgb888 {
    Rgb888::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Keep the top two bits of a channel and stretch them back over 0-255.
#[inline]
const fn quantize_channel(value: u8) -> u8 { (value >> 6) * 85 }

/// Rec. 601 luma, 0-255.
#[inline]
fn luma(color: Rgb888) -> u32 {
    (299 * u32::from(color.r()) + 587 * u32::from(color.g()) + 114 * u32::from(color.b())) / 1000
}

/// Map one `0xRRGGBB` color onto what a panel of `depth` can show.
pub fn resolve_color(
    hex: u32,
    depth: ColorDepth,
) -> Rgb565 {
    let color = unpack_rgb(hex);
    match depth {
        ColorDepth::Full => Rgb565::from(color),
        ColorDepth::Palette64 => Rgb565::from(Rgb888::new(
            quantize_channel(color.r()),
            quantize_channel(color.g()),
            quantize_channel(color.b()),
        )),
        ColorDepth::Mono => {
            if luma(color) >= MONO_LUMA_THRESHOLD {
                WHITE
            } else {
                BLACK
            }
        }
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Colors used to paint the face, already mapped to the panel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Theme {
    pub background: Rgb565,
    pub particle: Rgb565,
    /// Hour and minute rows.
    pub time: Rgb565,
    /// Date and month rows.
    pub date: Rgb565,
}

impl Theme {
    /// Resolve the four packed colors of `colors` for a panel of `depth`.
    pub fn resolve(
        colors: &ColorSettings,
        depth: ColorDepth,
    ) -> Self {
        Self {
            background: resolve_color(colors.background, depth),
            particle: resolve_color(colors.particle, depth),
            time: resolve_color(colors.time, depth),
            date: resolve_color(colors.date, depth),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::resolve(&ColorSettings::default(), ColorDepth::Full) }
}

/// The four user-chosen colors, as `0xRRGGBB`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ColorSettings {
    pub background: u32,
    pub particle: u32,
    pub time: u32,
    pub date: u32,
}

impl ColorSettings {
    /// Black background, everything else white.
    pub const fn new() -> Self {
        Self {
            background: HEX_BLACK,
            particle: HEX_WHITE,
            time: HEX_WHITE,
            date: HEX_WHITE,
        }
    }
}

impl Default for ColorSettings {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
