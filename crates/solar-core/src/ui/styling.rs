//! Ink colors and font presets for the e-paper panel

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii};
use embedded_graphics::pixelcolor::{BinaryColor, Gray2};
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};

/// Black ink on a 1-bit canvas
pub const INK: BinaryColor = BinaryColor::On;

/// Unprinted paper on a 1-bit canvas
pub const PAPER: BinaryColor = BinaryColor::Off;

// 4-level grayscale, luma 0 is black
pub const GRAY_BLACK: Gray2 = Gray2::new(0);
pub const GRAY_DARK: Gray2 = Gray2::new(1);
pub const GRAY_LIGHT: Gray2 = Gray2::new(2);
pub const GRAY_WHITE: Gray2 = Gray2::new(3);

/// Text size presets
///
/// - `Tiny`: 5x8, chart annotations
/// - `Small`: 6x10, detail row labels
/// - `Medium`: 7x13, row labels and detail values
/// - `Large`: 9x15, primary values
/// - `Title`: 9x18 bold, screen titles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Tiny,
    Small,
    Medium,
    Large,
    Title,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Tiny => &ascii::FONT_5X8,
            TextSize::Small => &ascii::FONT_6X10,
            TextSize::Medium => &ascii::FONT_7X13,
            TextSize::Large => &ascii::FONT_9X15,
            TextSize::Title => &ascii::FONT_9X18_BOLD,
        }
    }

    /// Glyph cell width in pixels
    pub fn char_width(&self) -> u32 {
        self.font().character_size.width
    }

    /// Glyph cell height in pixels
    pub fn char_height(&self) -> u32 {
        self.font().character_size.height
    }

    /// Character style drawing with `color`
    pub fn style<C: PixelColor>(&self, color: C) -> MonoTextStyle<'static, C> {
        MonoTextStyle::new(self.font(), color)
    }
}

/// Text positioned by its top edge with the given alignment
///
/// Layout coordinates on the screens are top-left based, so every text
/// drawn by the dashboard uses a top baseline.
pub fn top_aligned(alignment: Alignment) -> TextStyle {
    TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build()
}
