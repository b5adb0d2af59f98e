//! Time/date fields to glyph runs.
//!
//! Numbers are spelled the way they are read aloud in Chinese, so the glyph
//! sequence is not positional:
//!
//! | value | glyphs     |
//! |-------|------------|
//! | 0     | `0`        |
//! | 7     | `7`        |
//! | 10    | `十`       |
//! | 13    | `十 3`     |
//! | 20    | `2 十`     |
//! | 23    | `2 十 3`   |
//!
//! No number below 100 needs more than three glyphs. Composite fields then wrap
//! the numeral with unit glyphs, AM/PM markers, or the date prefix.

use crate::config::DisplayModeFlags;
use crate::glyphs::{GlyphRun, NumeralStyle, TEN_COLUMN, Token, lunar_month_run, numeral_cell};

/// One snapshot of the wall clock, as delivered by the host once per minute.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TimeFields {
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Day of month, 1-31.
    pub day: u8,
    /// Month, 0-11.
    pub month: u8,
}

impl TimeFields {
    pub const fn new(
        hour: u8,
        minute: u8,
        day: u8,
        month: u8,
    ) -> Self {
        Self {
            hour,
            minute,
            day,
            month,
        }
    }
}

// =============================================================================
// Numerals
// =============================================================================

/// Spell `value` (0-99) as 1-3 numeral glyphs.
pub fn decompose_number(
    value: u8,
    style: NumeralStyle,
) -> GlyphRun {
    debug_assert!(value < 100, "numeral out of range: {value}");

    let tens = value / 10;
    let ones = value % 10;

    let (columns, len) = if tens > 1 && ones > 0 {
        ([tens, TEN_COLUMN, ones], 3)
    } else if value > 10 {
        if tens >= 2 { ([tens, TEN_COLUMN, 0], 2) } else { ([TEN_COLUMN, ones, 0], 2) }
    } else if tens > 0 {
        ([TEN_COLUMN, 0, 0], 1)
    } else {
        ([ones, 0, 0], 1)
    };

    let mut run = GlyphRun::new();
    for &column in &columns[..len] {
        run.push(numeral_cell(column, style)).ok();
    }
    run
}

/// Apply the 12-hour convention when the 24-hour clock is off.
///
/// Midnight and noon both read as 12.
#[inline]
pub const fn format_hour(
    hour: u8,
    hour_24: bool,
) -> u8 {
    if hour_24 {
        hour
    } else if hour == 0 {
        12
    } else if hour > 12 {
        hour - 12
    } else {
        hour
    }
}

// =============================================================================
// Composite Fields
// =============================================================================

fn push_token(
    run: &mut GlyphRun,
    token: Token,
    style: NumeralStyle,
) {
    run.push(token.cell(style)).ok();
}

fn extend_numeral(
    run: &mut GlyphRun,
    value: u8,
    style: NumeralStyle,
) {
    for &cell in decompose_number(value, style).iter() {
        run.push(cell).ok();
    }
}

/// Hour row: optional AM/PM marker, hour numeral, 时.
pub fn compose_hour(
    hour: u8,
    flags: &DisplayModeFlags,
) -> GlyphRun {
    let style = NumeralStyle::from_formal(flags.formal_digits);
    let mut run = GlyphRun::new();

    if !flags.hour_24 && flags.show_am_pm {
        let marker = if hour < 12 { Token::Am } else { Token::Pm };
        push_token(&mut run, marker, style);
    }
    extend_numeral(&mut run, format_hour(hour, flags.hour_24), style);
    push_token(&mut run, Token::HourUnit, style);
    run
}

/// Minute row: minute numeral and 分, or nothing on the hour.
pub fn compose_minute(
    minute: u8,
    flags: &DisplayModeFlags,
) -> GlyphRun {
    let mut run = GlyphRun::new();
    if minute == 0 {
        return run;
    }

    let style = NumeralStyle::from_formal(flags.formal_digits);
    extend_numeral(&mut run, minute, style);
    push_token(&mut run, Token::MinuteUnit, style);
    run
}

/// Date row: optional prefix glyph, day numeral, 日.
pub fn compose_date(
    day: u8,
    flags: &DisplayModeFlags,
) -> GlyphRun {
    let style = NumeralStyle::from_formal(flags.formal_digits);
    let mut run = GlyphRun::new();

    if flags.date_prefix {
        push_token(&mut run, Token::DatePrefix, style);
    }
    extend_numeral(&mut run, day, style);
    push_token(&mut run, Token::DayUnit, style);
    run
}

/// Month row: traditional month name, or month numeral (1-12) and 月.
pub fn compose_month(
    month: u8,
    flags: &DisplayModeFlags,
) -> GlyphRun {
    if flags.lunar_month {
        return lunar_month_run(usize::from(month));
    }

    let style = NumeralStyle::from_formal(flags.formal_digits);
    let mut run = GlyphRun::new();
    extend_numeral(&mut run, month + 1, style);
    push_token(&mut run, Token::MonthUnit, style);
    run
}

// =============================================================================
// Unit Tests
// =============================================================================
