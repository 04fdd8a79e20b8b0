//! Loading screen
//!
//! Shown while the first bundle is fetched and whenever no data at all is
//! available.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Text};

use crate::ui::TextSize;
use crate::ui::styling::{INK, top_aligned};

use super::Screen;
use super::constants::{
    LOADING_FRAME_BORDER_PX, LOADING_FRAME_HEIGHT_PX, LOADING_FRAME_WIDTH_PX, LOADING_FRAME_Y_PX,
    LOADING_MESSAGE_Y_PX, LOADING_TITLE_Y_PX, LOADING_X_PX,
};

/// Default message while data is being fetched
pub const LOADING_MESSAGE: &str = "Loading data...";

/// Message when neither fresh nor cached data exists
pub const NO_DATA_MESSAGE: &str = "No data available";

/// Title, status message and an empty progress frame
pub struct LoadingScreen<'a> {
    message: &'a str,
}

impl<'a> LoadingScreen<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Default for LoadingScreen<'_> {
    fn default() -> Self {
        Self::new(LOADING_MESSAGE)
    }
}

impl Screen for LoadingScreen<'_> {
    type Color = BinaryColor;

    fn name(&self) -> &'static str {
        "loading"
    }

    fn draw_screen<D: DrawTarget<Color = BinaryColor>>(&self, target: &mut D) -> Result<(), D::Error> {
        let title_style = TextSize::Title.style(INK);
        let line_height = TextSize::Title.char_height() as i32 + 6;

        for (i, line) in ["Solar", "Dashboard"].into_iter().enumerate() {
            Text::with_text_style(
                line,
                Point::new(LOADING_X_PX, LOADING_TITLE_Y_PX + line_height * i as i32),
                title_style,
                top_aligned(Alignment::Left),
            )
            .draw(target)?;
        }

        Text::with_text_style(
            self.message,
            Point::new(LOADING_X_PX, LOADING_MESSAGE_Y_PX),
            TextSize::Large.style(INK),
            top_aligned(Alignment::Left),
        )
        .draw(target)?;

        Rectangle::new(
            Point::new(LOADING_X_PX, LOADING_FRAME_Y_PX),
            Size::new(LOADING_FRAME_WIDTH_PX, LOADING_FRAME_HEIGHT_PX),
        )
        .into_styled(PrimitiveStyle::with_stroke(INK, LOADING_FRAME_BORDER_PX))
        .draw(target)?;

        Ok(())
    }
}
