//! Label/value rows of the stat screens
//!
//! Labels are left-aligned, values right-aligned against the panel edge so
//! the unit columns line up regardless of the number width.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Text};
use heapless::String;

use super::format_label;
use crate::ui::DISPLAY_WIDTH_PX;
use crate::ui::styling::{TextSize, top_aligned};

/// Maximum length of a formatted value (characters)
pub const MAX_VALUE_LENGTH: usize = 24;

/// Left edge of primary row labels in pixels
const PRIMARY_LABEL_X_PX: i32 = 5;

/// Left edge of indented detail row labels in pixels
const DETAIL_LABEL_X_PX: i32 = 15;

/// Right edge of all values in pixels
const VALUE_RIGHT_PX: i32 = DISPLAY_WIDTH_PX as i32 - 5;

/// Gap between the footer rule and the footer row in pixels
const FOOTER_GAP_PX: i32 = 6;

/// Visual weight of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Main figure: medium label, large value
    Primary,
    /// Indented breakdown of the row above: small label, medium value
    Detail,
}

impl RowKind {
    fn label_x(self) -> i32 {
        match self {
            Self::Primary => PRIMARY_LABEL_X_PX,
            Self::Detail => DETAIL_LABEL_X_PX,
        }
    }

    fn label_size(self) -> TextSize {
        match self {
            Self::Primary => TextSize::Medium,
            Self::Detail => TextSize::Small,
        }
    }

    fn value_size(self) -> TextSize {
        match self {
            Self::Primary => TextSize::Large,
            Self::Detail => TextSize::Medium,
        }
    }
}

/// One label/value line
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow<'a> {
    label: &'a str,
    value: String<MAX_VALUE_LENGTH>,
    kind: RowKind,
}

impl<'a> StatRow<'a> {
    pub fn primary(label: &'a str, value: String<MAX_VALUE_LENGTH>) -> Self {
        Self {
            label,
            value,
            kind: RowKind::Primary,
        }
    }

    pub fn detail(label: &'a str, value: String<MAX_VALUE_LENGTH>) -> Self {
        Self {
            label,
            value,
            kind: RowKind::Detail,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Draw the row with its top edge at `y`
    pub fn draw<D, C>(&self, y: i32, target: &mut D, ink: C) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
        C: PixelColor,
    {
        let label_size = self.kind.label_size();
        let value_size = self.kind.value_size();

        // Bottom-align the smaller label with the value
        let label_offset = (value_size.char_height() - label_size.char_height()) as i32;

        Text::with_text_style(
            self.label,
            Point::new(self.kind.label_x(), y + label_offset),
            label_size.style(ink),
            top_aligned(Alignment::Left),
        )
        .draw(target)?;

        Text::with_text_style(
            self.value.as_str(),
            Point::new(VALUE_RIGHT_PX, y),
            value_size.style(ink),
            top_aligned(Alignment::Right),
        )
        .draw(target)?;

        Ok(())
    }
}

/// Draw a 1-px rule at `rule_y` and a primary row just below it
pub fn draw_footer<D, C>(rule_y: i32, row: &StatRow<'_>, target: &mut D, ink: C) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    Line::new(
        Point::new(0, rule_y),
        Point::new(DISPLAY_WIDTH_PX as i32 - 1, rule_y),
    )
    .into_styled(PrimitiveStyle::with_stroke(ink, 1))
    .draw(target)?;

    row.draw(rule_y + FOOTER_GAP_PX, target, ink)
}

/// Format a value with fixed precision and a unit suffix
///
/// Values too long for [`MAX_VALUE_LENGTH`] are cut off with a warning
/// instead of failing the render.
pub fn format_quantity(value: f64, precision: usize, unit: &str) -> String<MAX_VALUE_LENGTH> {
    format_label(format_args!("{:.*} {}", precision, value, unit))
}
