//! Area fill under a polyline
//!
//! Walks each segment column by column and draws a vertical line from the
//! interpolated curve height down to the x-axis.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

/// Fill the area between the polyline `screen_points` and `bottom`
pub(super) fn fill_under<D, C>(
    screen_points: &[Point],
    bottom: i32,
    color: C,
    target: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    if screen_points.len() < 2 {
        return Ok(());
    }

    let style = PrimitiveStyle::with_stroke(color, 1);

    for pair in screen_points.windows(2) {
        let (mut x0, mut y0) = (pair[0].x, pair[0].y);
        let (mut x1, mut y1) = (pair[1].x, pair[1].y);

        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let dx = (x1 - x0).max(1) as f64;
        for x in x0..=x1 {
            let t = f64::from(x - x0) / dx;
            let y_line = y0 + (f64::from(y1 - y0) * t) as i32;
            if y_line < bottom {
                Line::new(Point::new(x, y_line), Point::new(x, bottom))
                    .into_styled(style)
                    .draw(target)?;
            }
        }
    }

    Ok(())
}
