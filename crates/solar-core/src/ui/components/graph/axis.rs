//! Axis lines, grid rules and label rendering

use chrono::{NaiveDateTime, Timelike};
use embedded_graphics::pixelcolor::Gray2;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Text};
use heapless::String;

use crate::ui::DISPLAY_WIDTH_PX;
use crate::ui::components::format_label;
use crate::ui::styling::{TextSize, top_aligned};

use super::constants::{
    AXIS_COLOR, GRID_COLOR, GRID_DOT_PITCH_PX, GRID_RULE_COUNT, LABEL_COLOR,
    MAX_AXIS_LABEL_LENGTH, X_AXIS_LABEL_COUNT, X_LABEL_GAP_PX, X_LABEL_SHIFT_PX, Y_LABEL_X_PX,
};
use super::viewport::Viewport;

/// Dotted horizontal rules evenly spaced inside the plot
pub(super) fn draw_grid<D: DrawTarget<Color = Gray2>>(
    viewport: &Viewport,
    target: &mut D,
) -> Result<(), D::Error> {
    let height = viewport.plot_area().size.height as i32;

    for i in 1..=GRID_RULE_COUNT {
        let y = viewport.top() + height * i / (GRID_RULE_COUNT + 1);
        let dots = (viewport.left()..=viewport.right())
            .step_by(GRID_DOT_PITCH_PX)
            .map(|x| Pixel(Point::new(x, y), GRID_COLOR));
        target.draw_iter(dots)?;
    }

    Ok(())
}

/// Y-axis along the left edge, x-axis along value zero
pub(super) fn draw_axes<D: DrawTarget<Color = Gray2>>(
    viewport: &Viewport,
    target: &mut D,
) -> Result<(), D::Error> {
    let style = PrimitiveStyle::with_stroke(AXIS_COLOR, 1);
    let origin = Point::new(viewport.left(), viewport.bottom());

    Line::new(Point::new(viewport.left(), viewport.top()), origin)
        .into_styled(style)
        .draw(target)?;
    Line::new(origin, Point::new(viewport.right(), viewport.bottom()))
        .into_styled(style)
        .draw(target)?;

    Ok(())
}

/// Scale maximum, zero and unit to the left of the plot
pub(super) fn draw_value_labels<D: DrawTarget<Color = Gray2>>(
    viewport: &Viewport,
    target: &mut D,
) -> Result<(), D::Error> {
    let style = TextSize::Tiny.style(LABEL_COLOR);
    let half_glyph = (TextSize::Tiny.char_height() / 2) as i32;
    let mid = viewport.top() + viewport.plot_area().size.height as i32 / 2;

    let max_label = format_value_label(viewport.y_max());
    let labels = [
        (max_label.as_str(), viewport.top() - half_glyph),
        ("kW", mid - half_glyph),
        ("0", viewport.bottom() - half_glyph),
    ];

    for (text, y) in labels {
        Text::with_text_style(
            text,
            Point::new(Y_LABEL_X_PX, y),
            style,
            top_aligned(Alignment::Left),
        )
        .draw(target)?;
    }

    Ok(())
}

/// Indices of the time labels: first, quarters and last sample
pub fn time_label_indices(count: usize) -> [usize; X_AXIS_LABEL_COUNT] {
    let last = count.saturating_sub(1);
    [0, count / 4, count / 2, 3 * count / 4, last].map(|i| i.min(last))
}

/// `HH:MM` labels under the x-axis
pub(super) fn draw_time_labels<D: DrawTarget<Color = Gray2>>(
    timestamps: &[NaiveDateTime],
    viewport: &Viewport,
    target: &mut D,
) -> Result<(), D::Error> {
    if timestamps.is_empty() {
        return Ok(());
    }

    let style = TextSize::Tiny.style(LABEL_COLOR);
    let y = viewport.bottom() + X_LABEL_GAP_PX;

    for index in time_label_indices(timestamps.len()) {
        let label = format_time_label(timestamps[index]);
        let width = (label.len() as u32 * TextSize::Tiny.char_width()) as i32;
        let max_x = DISPLAY_WIDTH_PX as i32 - width;
        let x = (viewport.x_at(index) - X_LABEL_SHIFT_PX).clamp(0, max_x);

        Text::with_text_style(
            label.as_str(),
            Point::new(x, y),
            style,
            top_aligned(Alignment::Left),
        )
        .draw(target)?;
    }

    Ok(())
}

/// Format the scale maximum with one decimal
pub fn format_value_label(value: f64) -> String<MAX_AXIS_LABEL_LENGTH> {
    format_label(format_args!("{:.1}", value))
}

/// Format a timestamp as `HH:MM`
pub fn format_time_label(timestamp: NaiveDateTime) -> String<MAX_AXIS_LABEL_LENGTH> {
    format_label(format_args!(
        "{:02}:{:02}",
        timestamp.hour(),
        timestamp.minute()
    ))
}
