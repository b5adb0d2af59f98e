//! Row layout for the clock face.
//!
//! The face shows up to four horizontal rows of glyph cells:
//!
//! ```text
//!          [month]        <- optional, small cells (above or below the time)
//!          [date ]
//!      [  hour rows  ]    <- large when <= 3 glyphs, medium otherwise
//!      [ minute rows ]    <- hidden on the hour
//! ```
//!
//! Every row is centered horizontally. The hour/minute pair is centered
//! vertically on the canvas; the date rows are then attached directly above or
//! below it and the whole stack is nudged by a small, per-profile offset so the
//! block does not look lopsided.
//!
//! The layout is recomputed wholesale on every refresh.

use core::cmp::Ordering;

use embedded_graphics::prelude::Point;

use crate::config::{DatePosition, DisplayModeFlags, DisplayProfile};
use crate::decompose::{TimeFields, compose_date, compose_hour, compose_minute, compose_month};
use crate::glyphs::GlyphRun;

/// Rows with this many glyphs or fewer use the large cell size.
pub const LARGE_ROW_MAX_GLYPHS: usize = 3;

/// Number of laid-out rows.
pub const ROW_COUNT: usize = 4;

/// The four independently laid-out strips of the face.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Row {
    Hour = 0,
    Minute = 1,
    Month = 2,
    Date = 3,
}

impl Row {
    /// All rows in slot order.
    pub const ALL: [Self; ROW_COUNT] = [Self::Hour, Self::Minute, Self::Month, Self::Date];

    /// Index into per-row arrays.
    #[inline]
    pub const fn index(self) -> usize { self as usize }

    /// Whether the row belongs to the time block (drawn in the time color).
    #[inline]
    pub const fn is_time(self) -> bool { matches!(self, Self::Hour | Self::Minute) }
}

/// Glyph size class; each has its own atlas image.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SizeClass {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeClass {
    /// Pixel size of one square cell of this class on `profile`.
    pub const fn cell_size(
        self,
        profile: &DisplayProfile,
    ) -> u32 {
        match self {
            Self::Small => profile.small_cell,
            Self::Medium => profile.medium_cell,
            Self::Large => profile.large_cell,
        }
    }
}

/// Size class for an hour or minute row: fewer glyphs get the bigger font.
#[inline]
pub const fn time_size_class(glyph_count: usize) -> SizeClass {
    if glyph_count <= LARGE_ROW_MAX_GLYPHS {
        SizeClass::Large
    } else {
        SizeClass::Medium
    }
}

/// Placement of one row.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RowLayout {
    /// Atlas size class for every glyph of the row.
    pub size: SizeClass,
    /// Edge length of one cell in pixels; 0 for hidden rows.
    pub cell_size: u32,
    /// Top-left corner of the first glyph.
    pub origin: Point,
    /// Whether the row is drawn at all.
    pub visible: bool,
    /// Glyphs, left to right.
    pub run: GlyphRun,
}

impl RowLayout {
    fn hidden(size: SizeClass) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    fn sized(
        run: GlyphRun,
        size: SizeClass,
        profile: &DisplayProfile,
    ) -> Self {
        if run.is_empty() {
            return Self::hidden(size);
        }
        Self {
            size,
            cell_size: size.cell_size(profile),
            origin: Point::zero(),
            visible: true,
            run,
        }
    }

    /// Total width of the row in pixels.
    #[inline]
    pub fn width(&self) -> u32 { self.run.len() as u32 * self.cell_size }

    /// Height of the row in pixels (0 when hidden).
    #[inline]
    pub const fn height(&self) -> i32 { self.cell_size as i32 }

    fn place(
        &mut self,
        canvas_width: i32,
        top: i32,
    ) {
        if self.visible {
            self.origin = Point::new((canvas_width - self.width() as i32) / 2, top);
        }
    }
}

/// Placement of all four rows.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct LayoutResult {
    rows: [RowLayout; ROW_COUNT],
}

impl LayoutResult {
    /// Layout of a single row.
    #[inline]
    pub fn row(
        &self,
        row: Row,
    ) -> &RowLayout {
        &self.rows[row.index()]
    }

    /// Iterate rows together with their identity.
    pub fn iter(&self) -> impl Iterator<Item = (Row, &RowLayout)> { Row::ALL.into_iter().zip(self.rows.iter()) }
}

// =============================================================================
// Layout Computation
// =============================================================================

/// Lay out hour, minute, and the optional date rows for `time`.
///
/// Inputs are not range-checked; the tick source guarantees valid fields.
pub fn compute_layout(
    time: &TimeFields,
    flags: &DisplayModeFlags,
    profile: &DisplayProfile,
) -> LayoutResult {
    debug_assert!(time.hour < 24 && time.minute < 60, "time out of range: {time:?}");

    let hour_run = compose_hour(time.hour, flags);
    let minute_run = compose_minute(time.minute, flags);

    let hour_size = time_size_class(hour_run.len());
    let minute_size = time_size_class(minute_run.len());
    let mut hour = RowLayout::sized(hour_run, hour_size, profile);
    let mut minute = RowLayout::sized(minute_run, minute_size, profile);

    let month_run = if flags.show_month {
        compose_month(time.month, flags)
    } else {
        GlyphRun::new()
    };
    let date_run = if flags.show_date {
        compose_date(time.day, flags)
    } else {
        GlyphRun::new()
    };
    let mut month = RowLayout::sized(month_run, SizeClass::Small, profile);
    let mut date = RowLayout::sized(date_run, SizeClass::Small, profile);

    // Time block, centered on its own
    let hour_top = (profile.height() - (hour.height() + minute.height())) / 2;
    let minute_top = hour_top + hour.height();
    let time_bottom = minute_top + minute.height();

    // Date block, month above date, attached to the time block
    let date_block_height = month.height() + date.height();
    let date_block_top = match flags.date_position {
        DatePosition::Above => hour_top - date_block_height,
        DatePosition::Below => time_bottom,
    };

    let nudge = date_rows_nudge(&month, &date, flags.date_position, profile);
    let width = profile.width();

    hour.place(width, hour_top + nudge);
    minute.place(width, minute_top + nudge);
    month.place(width, date_block_top + nudge);
    date.place(width, date_block_top + month.height() + nudge);

    LayoutResult {
        rows: [hour, minute, month, date],
    }
}

/// Vertical shift applied to every row when date rows are shown.
///
/// A single date row pushes the stack away from the side it sits on. With both
/// rows, the stack moves down when the month is wider and up when the date is
/// wider.
fn date_rows_nudge(
    month: &RowLayout,
    date: &RowLayout,
    position: DatePosition,
    profile: &DisplayProfile,
) -> i32 {
    match (month.visible, date.visible) {
        (true, true) => match month.width().cmp(&date.width()) {
            Ordering::Greater => profile.dual_row_nudge,
            Ordering::Less => -profile.dual_row_nudge,
            Ordering::Equal => 0,
        },
        (true, false) | (false, true) => match position {
            DatePosition::Above => profile.single_row_nudge,
            DatePosition::Below => -profile.single_row_nudge,
        },
        (false, false) => 0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RECT_COLOR;
    use crate::glyphs::{NumeralStyle, Token};

    const PROFILE: DisplayProfile = RECT_COLOR;

    fn layout(
        time: TimeFields,
        flags: DisplayModeFlags,
    ) -> LayoutResult {
        compute_layout(&time, &flags, &PROFILE)
    }

    fn plain(token: Token) -> crate::glyphs::AtlasCell { token.cell(NumeralStyle::Plain) }

    #[test]
    fn test_minute_hidden_on_the_hour() {
        let result = layout(TimeFields::new(9, 0, 1, 0), DisplayModeFlags::default());
        let minute = result.row(Row::Minute);
        assert!(!minute.visible);
        assert_eq!(minute.cell_size, 0);

        let hour = result.row(Row::Hour);
        assert_eq!(hour.origin.y, (PROFILE.height() - hour.height()) / 2, "hour recenters alone");
    }

    #[test]
    fn test_minute_visible_otherwise() {
        for minute in 1..60 {
            let result = layout(TimeFields::new(9, minute, 1, 0), DisplayModeFlags::default());
            assert!(result.row(Row::Minute).visible, "minute {minute} should be visible");
        }
    }

    #[test]
    fn test_size_class_boundaries() {
        // Glyph counts include the unit glyph
        let size_for = |hour| layout(TimeFields::new(hour, 0, 1, 0), DisplayModeFlags::default()).row(Row::Hour).size;
        assert_eq!(size_for(9), SizeClass::Large, "9时 is 2 glyphs");
        assert_eq!(size_for(10), SizeClass::Large, "十时 is 2 glyphs");
        assert_eq!(size_for(19), SizeClass::Large, "十九时 is 3 glyphs");
        assert_eq!(size_for(20), SizeClass::Large, "二十时 is 3 glyphs");
        assert_eq!(size_for(23), SizeClass::Medium, "二十三时 is 4 glyphs");
    }

    #[test]
    fn test_rows_centered_horizontally() {
        let result = layout(TimeFields::new(23, 45, 1, 0), DisplayModeFlags::default());
        let hour = result.row(Row::Hour);
        assert_eq!(hour.width(), 4 * PROFILE.medium_cell);
        assert_eq!(hour.origin.x, (PROFILE.width() - hour.width() as i32) / 2);

        let minute = result.row(Row::Minute);
        assert_eq!(minute.origin.x, (PROFILE.width() - minute.width() as i32) / 2);
    }

    #[test]
    fn test_time_block_stacking() {
        let result = layout(TimeFields::new(9, 5, 1, 0), DisplayModeFlags::default());
        let hour = result.row(Row::Hour);
        let minute = result.row(Row::Minute);
        assert_eq!(hour.origin.y, (PROFILE.height() - (hour.height() + minute.height())) / 2);
        assert_eq!(minute.origin.y, hour.origin.y + hour.height());
    }

    #[test]
    fn test_thirteen_hundred_24h() {
        let result = layout(TimeFields::new(13, 0, 1, 0), DisplayModeFlags::default());
        let hour = result.row(Row::Hour);
        assert_eq!(
            hour.run.as_slice(),
            &[plain(Token::Ten), plain(Token::Digit(3)), plain(Token::HourUnit)]
        );
        assert!(!result.row(Row::Minute).visible);
        assert!(!result.row(Row::Date).visible);
        assert!(!result.row(Row::Month).visible);
    }

    #[test]
    fn test_midnight_12h_with_am_pm() {
        let flags = DisplayModeFlags {
            hour_24: false,
            show_am_pm: true,
            ..DisplayModeFlags::default()
        };
        let result = layout(TimeFields::new(0, 5, 1, 0), flags);
        let hour = result.row(Row::Hour);
        assert_eq!(hour.run.as_slice(), &[
            plain(Token::Am),
            plain(Token::Ten),
            plain(Token::Digit(2)),
            plain(Token::HourUnit)
        ]);
        assert_eq!(hour.size, SizeClass::Medium);

        let minute = result.row(Row::Minute);
        assert_eq!(
            minute.run.as_slice(),
            &[plain(Token::Digit(5)), plain(Token::MinuteUnit)]
        );
        assert_eq!(minute.size, SizeClass::Large);
    }

    #[test]
    fn test_single_date_row_below_nudges_up() {
        let plain_result = layout(TimeFields::new(9, 5, 12, 3), DisplayModeFlags::default());
        let flags = DisplayModeFlags {
            show_date: true,
            ..DisplayModeFlags::default()
        };
        let result = layout(TimeFields::new(9, 5, 12, 3), flags);

        let shift = result.row(Row::Hour).origin.y - plain_result.row(Row::Hour).origin.y;
        assert_eq!(shift, -PROFILE.single_row_nudge);

        let minute = result.row(Row::Minute);
        let date = result.row(Row::Date);
        assert!(date.visible);
        assert_eq!(date.size, SizeClass::Small);
        assert_eq!(date.origin.y, minute.origin.y + minute.height(), "date sits right under minute");
    }

    #[test]
    fn test_single_month_row_above_nudges_down() {
        let plain_result = layout(TimeFields::new(9, 5, 12, 3), DisplayModeFlags::default());
        let flags = DisplayModeFlags {
            show_month: true,
            date_position: DatePosition::Above,
            ..DisplayModeFlags::default()
        };
        let result = layout(TimeFields::new(9, 5, 12, 3), flags);

        let hour = result.row(Row::Hour);
        let shift = hour.origin.y - plain_result.row(Row::Hour).origin.y;
        assert_eq!(shift, PROFILE.single_row_nudge);

        let month = result.row(Row::Month);
        assert_eq!(month.origin.y + month.height(), hour.origin.y, "month sits right above hour");
    }

    #[test]
    fn test_date_rows_follow_hour_when_minute_hidden() {
        let flags = DisplayModeFlags {
            show_date: true,
            ..DisplayModeFlags::default()
        };
        let result = layout(TimeFields::new(9, 0, 12, 3), flags);
        let hour = result.row(Row::Hour);
        assert_eq!(result.row(Row::Date).origin.y, hour.origin.y + hour.height());
    }

    #[test]
    fn test_both_rows_nudge_by_wider_row() {
        let both = DisplayModeFlags {
            show_date: true,
            show_month: true,
            ..DisplayModeFlags::default()
        };
        let baseline = layout(TimeFields::new(9, 5, 1, 0), DisplayModeFlags::default())
            .row(Row::Hour)
            .origin
            .y;
        let hour_y = |time| layout(time, both).row(Row::Hour).origin.y;

        // 12月 (3 glyphs) vs 1日 (2 glyphs): month wider, shift down
        assert_eq!(hour_y(TimeFields::new(9, 5, 1, 11)) - baseline, PROFILE.dual_row_nudge);
        // 1月 (2) vs 25日 (4): date wider, shift up
        assert_eq!(hour_y(TimeFields::new(9, 5, 25, 0)) - baseline, -PROFILE.dual_row_nudge);
        // 1月 vs 1日: tie, no shift
        assert_eq!(hour_y(TimeFields::new(9, 5, 1, 0)) - baseline, 0);
    }

    #[test]
    fn test_both_rows_stack_month_then_date() {
        let flags = DisplayModeFlags {
            show_date: true,
            show_month: true,
            date_position: DatePosition::Above,
            ..DisplayModeFlags::default()
        };
        let result = layout(TimeFields::new(9, 5, 1, 0), flags);
        let month = result.row(Row::Month);
        let date = result.row(Row::Date);
        let hour = result.row(Row::Hour);
        assert_eq!(date.origin.y, month.origin.y + month.height());
        assert_eq!(hour.origin.y, date.origin.y + date.height());
        assert!(month.origin.y >= 0, "date block must stay on screen");
    }

    #[test]
    fn test_invalid_lunar_month_hides_month_row() {
        let flags = DisplayModeFlags {
            show_month: true,
            lunar_month: true,
            ..DisplayModeFlags::default()
        };
        let result = layout(TimeFields::new(9, 5, 1, 12), flags);
        assert!(!result.row(Row::Month).visible);
    }

    #[test]
    fn test_layout_fits_canvas_for_all_times() {
        use crate::config::{RECT_MONO, ROUND_COLOR};

        let row_sets = [(true, false), (false, true), (true, true)];
        for profile in [RECT_MONO, RECT_COLOR, ROUND_COLOR] {
            for position in [DatePosition::Below, DatePosition::Above] {
                for (show_date, show_month) in row_sets {
                    let flags = DisplayModeFlags {
                        show_date,
                        show_month,
                        date_prefix: true,
                        date_position: position,
                        ..DisplayModeFlags::default()
                    };
                    for (day, month) in [(1, 0), (28, 11), (28, 0), (1, 11)] {
                        for hour in 0..24 {
                            for minute in 0..60 {
                                let time = TimeFields::new(hour, minute, day, month);
                                let result = compute_layout(&time, &flags, &profile);
                                for (row, placed) in result.iter().filter(|(_, r)| r.visible) {
                                    assert!(
                                        placed.origin.y >= 0,
                                        "{row:?} above canvas at {hour}:{minute} ({position:?}, {profile:?})"
                                    );
                                    assert!(
                                        placed.origin.y + placed.height() <= profile.height(),
                                        "{row:?} below canvas at {hour}:{minute} ({position:?}, {profile:?})"
                                    );
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_above_stack_can_touch_top_edge() {
        // 9:05 large rows, prefixed 28th wider than 1月: both rows nudge up
        let flags = DisplayModeFlags {
            show_date: true,
            show_month: true,
            date_prefix: true,
            date_position: DatePosition::Above,
            ..DisplayModeFlags::default()
        };
        let result = layout(TimeFields::new(9, 5, 28, 0), flags);
        assert_eq!(result.row(Row::Month).origin.y, 0);
        assert_eq!(result.row(Row::Date).origin.y, PROFILE.small_cell as i32);
    }
}
