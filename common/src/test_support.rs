//! Host-side helpers shared by unit tests.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Heap-backed RGB565 frame buffer that silently clips out-of-bounds pixels.
pub struct FrameBuffer {
    size: Size,
    pixels: Vec<Rgb565>,
}

impl FrameBuffer {
    pub fn new(
        size: Size,
        fill: Rgb565,
    ) -> Self {
        Self {
            size,
            pixels: vec![fill; (size.width * size.height) as usize],
        }
    }

    fn index(
        &self,
        p: Point,
    ) -> Option<usize> {
        let (x, y) = (u32::try_from(p.x).ok()?, u32::try_from(p.y).ok()?);
        (x < self.size.width && y < self.size.height).then(|| (y * self.size.width + x) as usize)
    }

    /// Color at `p`. Panics outside the buffer.
    pub fn get(
        &self,
        p: Point,
    ) -> Rgb565 {
        self.pixels[self.index(p).expect("point outside frame buffer")]
    }

    /// Number of pixels currently set to `color`.
    pub fn count(
        &self,
        color: Rgb565,
    ) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size { self.size }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if let Some(idx) = self.index(p) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}
