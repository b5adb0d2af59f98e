//! Glyph atlas catalog.
//!
//! Every visible element of the clock face is a fixed-size cell cut out of a
//! shared atlas image. The atlas is a grid of [`ATLAS_COLUMNS`] x [`ATLAS_ROWS`]
//! equally sized cells, addressed by `(column, row)`:
//!
//! ```text
//! row 0  plain numerals   0 1 2 3 4 5 6 7 8 9 十 时 分
//! row 1  formal numerals  零 壹 贰 叁 肆 伍 陆 柒 捌 玖 拾 时 分
//! row 2  calendar         上午 下午 日 月 <prefix> 正 冬 腊
//! ```
//!
//! Each size class (small / medium / large) has its own atlas image with the
//! same grid, so a cell coordinate is valid in all of them.

use heapless::Vec;

// =============================================================================
// Atlas Geometry
// =============================================================================

/// Number of cell columns in every atlas image.
pub const ATLAS_COLUMNS: u8 = 13;

/// Number of cell rows in every atlas image.
pub const ATLAS_ROWS: u8 = 3;

/// Maximum number of glyphs in a single displayed field.
pub const MAX_RUN_LEN: usize = 6;

/// Column of the "ten" ideograph in both numeral rows.
pub const TEN_COLUMN: u8 = 10;

const PLAIN_ROW: u8 = 0;
const FORMAL_ROW: u8 = 1;
const CALENDAR_ROW: u8 = 2;

/// Position of a glyph inside an atlas image.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AtlasCell {
    pub column: u8,
    pub row: u8,
}

impl AtlasCell {
    pub const fn new(
        column: u8,
        row: u8,
    ) -> Self {
        Self { column, row }
    }
}

/// Ordered glyphs making up one displayed field, left to right.
pub type GlyphRun = Vec<AtlasCell, MAX_RUN_LEN>;

/// Which numeral row of the atlas to use.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum NumeralStyle {
    /// Everyday numerals (一 二 三 ...).
    #[default]
    Plain,
    /// Financial/"formal" numerals (壹 贰 叁 ...).
    Formal,
}

impl NumeralStyle {
    #[inline]
    pub const fn from_formal(formal: bool) -> Self { if formal { Self::Formal } else { Self::Plain } }

    const fn atlas_row(self) -> u8 {
        match self {
            Self::Plain => PLAIN_ROW,
            Self::Formal => FORMAL_ROW,
        }
    }
}

// =============================================================================
// Semantic Tokens
// =============================================================================

/// Semantic glyph identifiers, resolved to atlas cells via [`Token::cell`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Token {
    /// Single digit 0-9.
    Digit(u8),
    /// The "ten" ideograph (十 / 拾).
    Ten,
    /// Hour unit (时).
    HourUnit,
    /// Minute unit (分).
    MinuteUnit,
    /// Morning marker (上午).
    Am,
    /// Afternoon marker (下午).
    Pm,
    /// Day-of-month unit (日).
    DayUnit,
    /// Month unit (月).
    MonthUnit,
    /// Decorative glyph shown in front of the date.
    DatePrefix,
    /// First lunar month (正).
    LunarFirst,
    /// Eleventh lunar month (冬).
    LunarWinter,
    /// Twelfth lunar month (腊).
    LunarLast,
}

impl Token {
    /// Resolve this token to its atlas cell.
    ///
    /// `style` only affects numerals; unit and calendar glyphs live at the
    /// same cell regardless of style.
    pub const fn cell(
        self,
        style: NumeralStyle,
    ) -> AtlasCell {
        let numeral_row = style.atlas_row();
        match self {
            Self::Digit(d) => AtlasCell::new(d, numeral_row),
            Self::Ten => AtlasCell::new(TEN_COLUMN, numeral_row),
            Self::HourUnit => AtlasCell::new(11, numeral_row),
            Self::MinuteUnit => AtlasCell::new(12, numeral_row),
            Self::Am => AtlasCell::new(0, CALENDAR_ROW),
            Self::Pm => AtlasCell::new(1, CALENDAR_ROW),
            Self::DayUnit => AtlasCell::new(2, CALENDAR_ROW),
            Self::MonthUnit => AtlasCell::new(3, CALENDAR_ROW),
            Self::DatePrefix => AtlasCell::new(4, CALENDAR_ROW),
            Self::LunarFirst => AtlasCell::new(5, CALENDAR_ROW),
            Self::LunarWinter => AtlasCell::new(6, CALENDAR_ROW),
            Self::LunarLast => AtlasCell::new(7, CALENDAR_ROW),
        }
    }
}

/// Atlas cell for a numeral slot: a digit 0-9 or [`TEN_COLUMN`].
#[inline]
pub const fn numeral_cell(
    column: u8,
    style: NumeralStyle,
) -> AtlasCell {
    AtlasCell::new(column, style.atlas_row())
}

/// Whether `cell` is one of the numeral glyphs (digit or ten) of either row.
#[inline]
pub const fn is_numeral(cell: AtlasCell) -> bool {
    (cell.row == PLAIN_ROW || cell.row == FORMAL_ROW) && cell.column <= TEN_COLUMN
}

// =============================================================================
// Lunar Month Names
// =============================================================================

/// Traditional month names, indexed by month 0-11. Each is followed by 月.
const LUNAR_MONTHS: [Token; 12] = [
    Token::LunarFirst,
    Token::Digit(2),
    Token::Digit(3),
    Token::Digit(4),
    Token::Digit(5),
    Token::Digit(6),
    Token::Digit(7),
    Token::Digit(8),
    Token::Digit(9),
    Token::Ten,
    Token::LunarWinter,
    Token::LunarLast,
];

/// Glyph run for the traditional name of month `index` (0 = 正月).
///
/// Returns an empty run for an index outside 0-11 so the month row simply
/// disappears instead of showing garbage.
pub fn lunar_month_run(index: usize) -> GlyphRun {
    let mut run = GlyphRun::new();
    if let Some(name) = LUNAR_MONTHS.get(index) {
        run.push(name.cell(NumeralStyle::Plain)).ok();
        run.push(Token::MonthUnit.cell(NumeralStyle::Plain)).ok();
    }
    run
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_cells_follow_style_row() {
        assert_eq!(Token::Digit(7).cell(NumeralStyle::Plain), AtlasCell::new(7, 0));
        assert_eq!(Token::Digit(7).cell(NumeralStyle::Formal), AtlasCell::new(7, 1));
        assert_eq!(Token::Ten.cell(NumeralStyle::Formal), AtlasCell::new(TEN_COLUMN, 1));
    }

    #[test]
    fn test_calendar_cells_ignore_style() {
        assert_eq!(
            Token::MonthUnit.cell(NumeralStyle::Plain),
            Token::MonthUnit.cell(NumeralStyle::Formal)
        );
        assert_eq!(Token::Am.cell(NumeralStyle::Formal).row, 2);
    }

    #[test]
    fn test_all_cells_inside_atlas() {
        let tokens = [
            Token::Digit(0),
            Token::Digit(9),
            Token::Ten,
            Token::HourUnit,
            Token::MinuteUnit,
            Token::Am,
            Token::Pm,
            Token::DayUnit,
            Token::MonthUnit,
            Token::DatePrefix,
            Token::LunarFirst,
            Token::LunarWinter,
            Token::LunarLast,
        ];
        for style in [NumeralStyle::Plain, NumeralStyle::Formal] {
            for token in tokens {
                let cell = token.cell(style);
                assert!(cell.column < ATLAS_COLUMNS, "{token:?} column out of atlas");
                assert!(cell.row < ATLAS_ROWS, "{token:?} row out of atlas");
            }
        }
    }

    #[test]
    fn test_lunar_month_runs() {
        for index in 0..12 {
            let run = lunar_month_run(index);
            assert_eq!(run.len(), 2, "month {index} should be name + unit");
            assert_eq!(run[1], Token::MonthUnit.cell(NumeralStyle::Plain));
        }
        assert_eq!(lunar_month_run(0)[0], Token::LunarFirst.cell(NumeralStyle::Plain));
        assert_eq!(lunar_month_run(9)[0], Token::Ten.cell(NumeralStyle::Plain));
        assert_eq!(lunar_month_run(11)[0], Token::LunarLast.cell(NumeralStyle::Plain));
    }

    #[test]
    fn test_lunar_month_out_of_range_is_empty() {
        assert!(lunar_month_run(12).is_empty());
        assert!(lunar_month_run(usize::MAX).is_empty());
    }

    #[test]
    fn test_is_numeral() {
        assert!(is_numeral(Token::Digit(0).cell(NumeralStyle::Plain)));
        assert!(is_numeral(Token::Ten.cell(NumeralStyle::Formal)));
        assert!(!is_numeral(Token::HourUnit.cell(NumeralStyle::Plain)));
        assert!(!is_numeral(Token::Am.cell(NumeralStyle::Plain)));
    }
}
