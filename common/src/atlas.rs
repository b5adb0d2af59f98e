//! Glyph atlas drawing.
//!
//! An atlas is a 1-bit image holding the whole glyph grid for one size class.
//! Glyphs are drawn by copying the "on" pixels of one cell in a single color;
//! "off" pixels are left untouched, so whatever was drawn underneath (the
//! background fill) shows through.

use embedded_graphics::image::{GetPixel, ImageRaw};
use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::glyphs::{ATLAS_COLUMNS, ATLAS_ROWS, AtlasCell};
use crate::layout::SizeClass;

/// Source of glyph pixels.
pub trait GlyphAtlas {
    /// Draw `cell` of the `size` atlas with its top-left at `frame.top_left`.
    fn draw_glyph<D>(
        &self,
        target: &mut D,
        cell: AtlasCell,
        size: SizeClass,
        frame: &Rectangle,
        color: Rgb565,
    ) where
        D: DrawTarget<Color = Rgb565>;
}

/// One size class worth of glyphs.
#[derive(Clone, Copy)]
pub struct AtlasImage<'a> {
    image: ImageRaw<'a, BinaryColor>,
    cell_size: u32,
}

impl<'a> AtlasImage<'a> {
    /// Wrap a packed 1-bit atlas of square `cell_size` cells.
    ///
    /// `data` holds `ATLAS_ROWS * cell_size` rows of
    /// `ATLAS_COLUMNS * cell_size` pixels, MSB first, each row padded to a
    /// whole byte.
    pub const fn new(
        data: &'a [u8],
        cell_size: u32,
    ) -> Self {
        Self {
            image: ImageRaw::new(data, ATLAS_COLUMNS as u32 * cell_size),
            cell_size,
        }
    }

    /// Bytes needed for one atlas of `cell_size` cells.
    pub const fn data_len(cell_size: u32) -> usize {
        let row_bytes = (ATLAS_COLUMNS as usize * cell_size as usize).div_ceil(8);
        row_bytes * ATLAS_ROWS as usize * cell_size as usize
    }

    #[inline]
    pub const fn cell_size(&self) -> u32 { self.cell_size }

    /// Area of `cell` inside the atlas image.
    pub const fn cell_area(
        &self,
        cell: AtlasCell,
    ) -> Rectangle {
        Rectangle::new(
            Point::new(
                (cell.column as u32 * self.cell_size) as i32,
                (cell.row as u32 * self.cell_size) as i32,
            ),
            Size::new_equal(self.cell_size),
        )
    }

    /// Draw the lit pixels of `cell` at `top_left`.
    pub fn draw_cell<D>(
        &self,
        target: &mut D,
        cell: AtlasCell,
        top_left: Point,
        color: Rgb565,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let area = self.cell_area(cell);
        let image = &self.image;
        let pixels = area.points().filter_map(|p| match image.pixel(p) {
            Some(BinaryColor::On) => Some(Pixel(p - area.top_left + top_left, color)),
            _ => None,
        });
        target.draw_iter(pixels).ok();
    }
}

/// [`GlyphAtlas`] backed by one packed bitmap per size class.
#[derive(Clone, Copy)]
pub struct BitmapAtlas<'a> {
    pub small: AtlasImage<'a>,
    pub medium: AtlasImage<'a>,
    pub large: AtlasImage<'a>,
}

impl<'a> BitmapAtlas<'a> {
    pub const fn new(
        small: AtlasImage<'a>,
        medium: AtlasImage<'a>,
        large: AtlasImage<'a>,
    ) -> Self {
        Self { small, medium, large }
    }

    /// Atlas image used for `size`.
    pub const fn image(
        &self,
        size: SizeClass,
    ) -> &AtlasImage<'a> {
        match size {
            SizeClass::Small => &self.small,
            SizeClass::Medium => &self.medium,
            SizeClass::Large => &self.large,
        }
    }
}

impl GlyphAtlas for BitmapAtlas<'_> {
    fn draw_glyph<D>(
        &self,
        target: &mut D,
        cell: AtlasCell,
        size: SizeClass,
        frame: &Rectangle,
        color: Rgb565,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.image(size).draw_cell(target, cell, frame.top_left, color);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FrameBuffer;

    const CELL: u32 = 8;

    /// Atlas with a single lit pixel at the top-left of every cell, plus a
    /// full first row in cell (1, 0).
    fn test_atlas_data() -> Vec<u8> {
        let row_bytes = (ATLAS_COLUMNS as usize * CELL as usize).div_ceil(8);
        let mut data = vec![0u8; AtlasImage::data_len(CELL)];
        for row in 0..ATLAS_ROWS as usize {
            for column in 0..ATLAS_COLUMNS as usize {
                let x = column * CELL as usize;
                let y = row * CELL as usize;
                data[y * row_bytes + x / 8] |= 0x80 >> (x % 8);
            }
        }
        // Cell (1, 0) is 8 px wide and byte aligned: light its whole first row
        data[1] = 0xFF;
        data
    }

    #[test]
    fn test_data_len() {
        // 13 * 8 = 104 px = 13 bytes per row, 24 rows
        assert_eq!(AtlasImage::data_len(8), 13 * 24);
        // 13 * 5 = 65 px -> 9 bytes per row, 15 rows
        assert_eq!(AtlasImage::data_len(5), 9 * 15);
    }

    #[test]
    fn test_cell_area() {
        let data = test_atlas_data();
        let atlas = AtlasImage::new(&data, CELL);
        let area = atlas.cell_area(AtlasCell::new(12, 2));
        assert_eq!(area.top_left, Point::new(96, 16));
        assert_eq!(area.size, Size::new(8, 8));
    }

    #[test]
    fn test_draw_cell_only_lit_pixels() {
        let data = test_atlas_data();
        let atlas = AtlasImage::new(&data, CELL);
        let mut fb = FrameBuffer::new(Size::new(32, 32), Rgb565::BLUE);

        atlas.draw_cell(&mut fb, AtlasCell::new(1, 0), Point::new(10, 10), Rgb565::WHITE);
        assert_eq!(fb.count(Rgb565::WHITE), 8, "one full row of the cell");
        for x in 10..18 {
            assert_eq!(fb.get(Point::new(x, 10)), Rgb565::WHITE);
        }
        assert_eq!(fb.get(Point::new(10, 11)), Rgb565::BLUE, "off pixels are transparent");
    }

    #[test]
    fn test_bitmap_atlas_picks_size_class() {
        let small = test_atlas_data();
        let large = vec![0u8; AtlasImage::data_len(16)];
        let atlas = BitmapAtlas::new(AtlasImage::new(&small, CELL), AtlasImage::new(&small, CELL), AtlasImage::new(&large, 16));
        assert_eq!(atlas.image(SizeClass::Large).cell_size(), 16);

        let mut fb = FrameBuffer::new(Size::new(32, 32), Rgb565::BLACK);
        let frame = Rectangle::new(Point::new(4, 4), Size::new_equal(16));
        atlas.draw_glyph(&mut fb, AtlasCell::new(0, 0), SizeClass::Large, &frame, Rgb565::RED);
        assert_eq!(fb.count(Rgb565::RED), 0, "blank large atlas draws nothing");
        atlas.draw_glyph(&mut fb, AtlasCell::new(0, 0), SizeClass::Small, &frame, Rgb565::RED);
        assert_eq!(fb.get(Point::new(4, 4)), Rgb565::RED);
    }
}
