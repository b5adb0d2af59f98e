//! Display mode flags.
//!
//! These flags select how the time and date fields are spelled out. They are
//! owned by the persisted settings and only read by the layout code.

/// Where the optional date/month rows sit relative to the time rows.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[repr(u8)]
pub enum DatePosition {
    /// Date rows directly below the last time row.
    #[default]
    Below = 0,
    /// Date rows directly above the hour row.
    Above = 1,
}

impl DatePosition {
    /// Decode a stored/transmitted value. Unknown values fall back to the default.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Above,
            _ => Self::Below,
        }
    }
}

/// Mutually independent switches controlling glyph composition and layout.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DisplayModeFlags {
    /// 24-hour clock. When false, hours are shown 1-12.
    pub hour_24: bool,
    /// Prepend 上午/下午 to the hour (12-hour clock only).
    pub show_am_pm: bool,
    /// Use traditional month names instead of numbered months.
    pub lunar_month: bool,
    /// Show the decorative prefix glyph in front of the date.
    pub date_prefix: bool,
    /// Use the formal numeral row of the atlas.
    pub formal_digits: bool,
    /// Placement of the date/month rows.
    pub date_position: DatePosition,
    /// Show the day-of-month row.
    pub show_date: bool,
    /// Show the month row.
    pub show_month: bool,
}

impl DisplayModeFlags {
    /// Factory defaults: plain 24-hour clock, no date rows.
    pub const fn new() -> Self {
        Self {
            hour_24: true,
            show_am_pm: false,
            lunar_month: false,
            date_prefix: false,
            formal_digits: false,
            date_position: DatePosition::Below,
            show_date: false,
            show_month: false,
        }
    }

    /// Whether any of the date/month rows is enabled.
    #[inline]
    pub const fn has_date_rows(&self) -> bool { self.show_date || self.show_month }
}

impl Default for DisplayModeFlags {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
