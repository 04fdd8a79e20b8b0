//! In-RAM e-paper canvas.
//!
//! Every screen is drawn into one of these buffers instead of the panel. The
//! finished canvas is handed to a `DisplaySink` or written to a file, and its
//! packed bytes are what the panel driver consumes.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::{BinaryColor, Gray2, GrayColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

/// Total number of pixels on the panel (264 x 176 = 46,464).
const PIXEL_COUNT: usize = DISPLAY_WIDTH_PX as usize * DISPLAY_HEIGHT_PX as usize;

/// Pixel colors the panel can show, with their packed bit representation.
pub trait PanelColor: PixelColor {
    /// Bits per pixel in the packed buffer
    const BITS: usize;

    /// Color a freshly allocated canvas is filled with
    const PAPER: Self;

    /// Packed value, brightest color has all bits set
    fn packed(self) -> u8;
}

impl PanelColor for BinaryColor {
    const BITS: usize = 1;
    const PAPER: Self = BinaryColor::Off;

    fn packed(self) -> u8 {
        // On is black ink
        match self {
            BinaryColor::On => 0,
            BinaryColor::Off => 1,
        }
    }
}

impl PanelColor for Gray2 {
    const BITS: usize = 2;
    const PAPER: Self = Gray2::WHITE;

    fn packed(self) -> u8 {
        self.luma()
    }
}

/// Fixed-size framebuffer implementing `DrawTarget`.
///
/// Drawing outside the panel is clipped silently.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas<C> {
    pixels: Vec<C>,
}

/// 1-bit canvas used by the stat screens
pub type MonoCanvas = Canvas<BinaryColor>;

/// 4-level grayscale canvas used by the timeline chart
pub type GrayCanvas = Canvas<Gray2>;

impl<C: PanelColor> Default for Canvas<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: PanelColor> core::fmt::Debug for Canvas<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Canvas({}x{}, {} bpp)",
            DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, C::BITS
        )
    }
}

impl<C: PanelColor> Canvas<C> {
    /// Allocate a blank (white) canvas.
    pub fn new() -> Self {
        Self {
            pixels: vec![C::PAPER; PIXEL_COUNT],
        }
    }

    /// Color at `(x, y)`, `None` outside the panel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<C> {
        index(x, y).map(|idx| self.pixels[idx])
    }

    /// All pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = C> + '_ {
        self.pixels.iter().copied()
    }

    /// Number of pixels with exactly `color`
    pub fn count(&self, color: C) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Pack the canvas row by row, most significant bits first.
    ///
    /// Rows start on a byte boundary; the panel width is a multiple of 8 so
    /// no padding occurs in practice.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        let per_byte = 8 / C::BITS;
        let row_bytes = (DISPLAY_WIDTH_PX as usize).div_ceil(per_byte);
        let mut bytes = vec![0u8; row_bytes * DISPLAY_HEIGHT_PX as usize];

        for (y, row) in self.pixels.chunks(DISPLAY_WIDTH_PX as usize).enumerate() {
            for (x, color) in row.iter().enumerate() {
                let shift = 8 - C::BITS * (x % per_byte + 1);
                bytes[y * row_bytes + x / per_byte] |= color.packed() << shift;
            }
        }

        bytes
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: C) {
        self.pixels[y * DISPLAY_WIDTH_PX as usize + x] = color;
    }
}

fn index(x: i32, y: i32) -> Option<usize> {
    let w = DISPLAY_WIDTH_PX as i32;
    let h = DISPLAY_HEIGHT_PX as i32;
    (x >= 0 && y >= 0 && x < w && y < h).then(|| y as usize * w as usize + x as usize)
}

impl<C: PanelColor> OriginDimensions for Canvas<C> {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32)
    }
}

impl<C: PanelColor> DrawTarget for Canvas<C> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(idx) = index(coord.x, coord.y) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let w = DISPLAY_WIDTH_PX as i32;
        let h = DISPLAY_HEIGHT_PX as i32;

        let x_start = area.top_left.x.clamp(0, w);
        let y_start = area.top_left.y.clamp(0, h);
        let x_end = area
            .top_left
            .x
            .saturating_add(area.size.width as i32)
            .clamp(0, w);
        let y_end = area
            .top_left
            .y
            .saturating_add(area.size.height as i32)
            .clamp(0, h);

        for y in y_start..y_end {
            for x in x_start..x_end {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}
