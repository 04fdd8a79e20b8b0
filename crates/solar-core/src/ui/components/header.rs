//! Screen header: title, right-aligned annotation and separator rule

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Text};

use crate::ui::styling::{TextSize, top_aligned};
use crate::ui::DISPLAY_WIDTH_PX;

/// Left edge of the title text in pixels
const TITLE_X_PX: i32 = 5;

/// Top edge of the title text in pixels
const TITLE_Y_PX: i32 = 3;

/// Right edge of the annotation text in pixels
const ANNOTATION_RIGHT_PX: i32 = DISPLAY_WIDTH_PX as i32 - 5;

/// Top edge of the annotation text in pixels
const ANNOTATION_Y_PX: i32 = 6;

/// Top edge of the separator rule in pixels
pub const SEPARATOR_Y_PX: i32 = 25;

/// Thickness of the separator rule in pixels
const SEPARATOR_HEIGHT_PX: u32 = 2;

/// Title region drawn at the top of every screen
///
/// ```ignore
/// Header::new("TODAY")
///     .with_annotation("14.12.2024")
///     .draw(&mut canvas, INK)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Header<'a> {
    title: &'a str,
    annotation: Option<&'a str>,
    title_size: TextSize,
    rule: bool,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            annotation: None,
            title_size: TextSize::Title,
            rule: true,
        }
    }

    /// Time, date or period shown right-aligned next to the title
    pub fn with_annotation(mut self, annotation: &'a str) -> Self {
        self.annotation = Some(annotation);
        self
    }

    pub fn with_title_size(mut self, size: TextSize) -> Self {
        self.title_size = size;
        self
    }

    /// Skip the separator rule, used where a chart starts right below the title
    pub fn without_rule(mut self) -> Self {
        self.rule = false;
        self
    }

    pub fn draw<D, C>(&self, target: &mut D, ink: C) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
        C: PixelColor,
    {
        Text::with_text_style(
            self.title,
            Point::new(TITLE_X_PX, TITLE_Y_PX),
            self.title_size.style(ink),
            top_aligned(Alignment::Left),
        )
        .draw(target)?;

        if let Some(annotation) = self.annotation {
            Text::with_text_style(
                annotation,
                Point::new(ANNOTATION_RIGHT_PX, ANNOTATION_Y_PX),
                TextSize::Medium.style(ink),
                top_aligned(Alignment::Right),
            )
            .draw(target)?;
        }

        if self.rule {
            Rectangle::new(
                Point::new(0, SEPARATOR_Y_PX),
                Size::new(DISPLAY_WIDTH_PX as u32, SEPARATOR_HEIGHT_PX),
            )
            .into_styled(PrimitiveStyle::with_fill(ink))
            .draw(target)?;
        }

        Ok(())
    }
}
