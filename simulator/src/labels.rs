//! Stand-in glyph atlases rendered from ASCII labels.
//!
//! The real watch ships hand-drawn ideograph bitmaps. The simulator instead
//! renders a short ASCII label per cell with `profont` into packed 1-bit
//! buffers laid out exactly like the device atlases, so the core drawing path
//! is exercised unchanged.
//!
//! ```text
//! row 0   0  1  2  3  4  5  6  7  8  9  X  h  m
//! row 1   same, boxed (formal numerals)
//! row 2   AM PM d  M  *  Zh Wi La
//! ```

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use klk_common::DisplayProfile;
use klk_common::atlas::{AtlasImage, BitmapAtlas};
use klk_common::glyphs::{ATLAS_COLUMNS, ATLAS_ROWS, AtlasCell};
use profont::{PROFONT_9_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

const PLAIN_LABELS: [&str; ATLAS_COLUMNS as usize] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "X", "h", "m"];
const CALENDAR_LABELS: [&str; 8] = ["AM", "PM", "d", "M", "*", "Zh", "Wi", "La"];

const FORMAL_FRAME: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(BinaryColor::On, 1);

/// Packed 1-bit image, MSB first, rows padded to whole bytes.
pub struct PackedBitmap {
    size: Size,
    row_bytes: usize,
    data: Vec<u8>,
}

impl PackedBitmap {
    pub fn new(size: Size) -> Self {
        let row_bytes = (size.width as usize).div_ceil(8);
        Self {
            size,
            row_bytes,
            data: vec![0; row_bytes * size.height as usize],
        }
    }

    pub fn into_bytes(self) -> Vec<u8> { self.data }
}

impl OriginDimensions for PackedBitmap {
    fn size(&self) -> Size { self.size }
}

impl DrawTarget for PackedBitmap {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(p.x), u32::try_from(p.y)) else {
                continue;
            };
            if x >= self.size.width || y >= self.size.height {
                continue;
            }
            let idx = y as usize * self.row_bytes + x as usize / 8;
            let mask = 0x80u8 >> (x % 8);
            if color.is_on() {
                self.data[idx] |= mask;
            } else {
                self.data[idx] &= !mask;
            }
        }
        Ok(())
    }
}

/// Label font that fits a cell of `cell_size` pixels.
fn font_for(cell_size: u32) -> &'static MonoFont<'static> {
    if cell_size >= 44 {
        &PROFONT_24_POINT
    } else if cell_size >= 28 {
        &PROFONT_18_POINT
    } else {
        &PROFONT_9_POINT
    }
}

/// Label drawn in `cell`, if the cell is populated.
fn label(cell: AtlasCell) -> Option<&'static str> {
    match cell.row {
        0 | 1 => PLAIN_LABELS.get(usize::from(cell.column)).copied(),
        2 => CALENDAR_LABELS.get(usize::from(cell.column)).copied(),
        _ => None,
    }
}

/// Render one full atlas with square `cell_size` cells.
pub fn render_atlas(cell_size: u32) -> Vec<u8> {
    let mut bitmap = PackedBitmap::new(Size::new(
        u32::from(ATLAS_COLUMNS) * cell_size,
        u32::from(ATLAS_ROWS) * cell_size,
    ));
    let style = MonoTextStyle::new(font_for(cell_size), BinaryColor::On);
    let centered = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();

    for row in 0..ATLAS_ROWS {
        for column in 0..ATLAS_COLUMNS {
            let cell = AtlasCell::new(column, row);
            let Some(text) = label(cell) else { continue };
            let area = Rectangle::new(
                Point::new((u32::from(column) * cell_size) as i32, (u32::from(row) * cell_size) as i32),
                Size::new_equal(cell_size),
            );
            Text::with_text_style(text, area.center(), style, centered)
                .draw(&mut bitmap)
                .ok();
            if row == 1 {
                area.offset(-1).into_styled(FORMAL_FRAME).draw(&mut bitmap).ok();
            }
        }
    }
    debug_assert_eq!(bitmap.data.len(), AtlasImage::data_len(cell_size));
    bitmap.into_bytes()
}

/// Atlas buffers for every size class of a profile.
pub struct LabelAtlases {
    profile: DisplayProfile,
    small: Vec<u8>,
    medium: Vec<u8>,
    large: Vec<u8>,
}

impl LabelAtlases {
    pub fn build(profile: &DisplayProfile) -> Self {
        Self {
            profile: *profile,
            small: render_atlas(profile.small_cell),
            medium: render_atlas(profile.medium_cell),
            large: render_atlas(profile.large_cell),
        }
    }

    /// Borrow the buffers as a drawable atlas.
    pub fn atlas(&self) -> BitmapAtlas<'_> {
        BitmapAtlas::new(
            AtlasImage::new(&self.small, self.profile.small_cell),
            AtlasImage::new(&self.medium, self.profile.medium_cell),
            AtlasImage::new(&self.large, self.profile.large_cell),
        )
    }
}
