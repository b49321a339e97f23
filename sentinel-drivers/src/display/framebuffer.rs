//! Monochrome page-organized framebuffer
//!
//! Matches the SSD1306 GDDRAM layout: `PAGES` horizontal bands of 8 rows,
//! each band `W` bytes wide. Bit 0 of a byte is the top pixel of its
//! column within the band.
//!
//! Implements `DrawTarget<Color = BinaryColor>` so embedded-graphics text
//! and primitives render straight into it.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// 1 bit per pixel framebuffer, `W` columns by `PAGES * 8` rows
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer<const W: usize, const PAGES: usize> {
    pages: [[u8; W]; PAGES],
}

impl<const W: usize, const PAGES: usize> Default for Framebuffer<W, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const PAGES: usize> Framebuffer<W, PAGES> {
    /// Width in pixels
    pub const WIDTH: usize = W;

    /// Height in pixels
    pub const HEIGHT: usize = PAGES * 8;

    /// Bytes needed to hold one frame
    pub const LEN: usize = W * PAGES;

    /// Create a cleared framebuffer
    pub const fn new() -> Self {
        Self {
            pages: [[0; W]; PAGES],
        }
    }

    /// Set every byte to `value`
    pub fn fill(&mut self, value: u8) {
        for page in self.pages.iter_mut() {
            page.fill(value);
        }
    }

    /// Set or clear one pixel; coordinates outside the panel are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= W || y >= Self::HEIGHT {
            return;
        }
        let mask = 1u8 << (y % 8);
        let byte = &mut self.pages[y / 8][x];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Read one pixel; coordinates outside the panel read as off
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= W || y >= Self::HEIGHT {
            return false;
        }
        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// One page as sent to the panel
    pub fn page(&self, index: usize) -> Option<&[u8; W]> {
        self.pages.get(index)
    }

    /// Every byte in transmission order: page 0 column 0 first
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.pages.iter().flat_map(|page| page.iter().copied())
    }
}

impl<const W: usize, const PAGES: usize> OriginDimensions for Framebuffer<W, PAGES> {
    fn size(&self) -> Size {
        Size::new(W as u32, Self::HEIGHT as u32)
    }
}

impl<const W: usize, const PAGES: usize> DrawTarget for Framebuffer<W, PAGES> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0 && coord.y >= 0 {
                self.set_pixel(coord.x as usize, coord.y as usize, color.is_on());
            }
        }
        Ok(())
    }
}
