//! Series polylines

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

/// Stroke pattern of a series line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    /// Only every other segment is drawn, starting with the first
    Dashed,
}

impl LineStyle {
    fn draws_segment(self, index: usize) -> bool {
        match self {
            Self::Solid => true,
            Self::Dashed => index % 2 == 0,
        }
    }
}

/// Connect consecutive screen points with straight lines
pub(super) fn draw_polyline<D, C>(
    screen_points: &[Point],
    line_style: LineStyle,
    color: C,
    width: u32,
    target: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = C>,
    C: PixelColor,
{
    let style = PrimitiveStyle::with_stroke(color, width);

    for (index, pair) in screen_points.windows(2).enumerate() {
        if line_style.draws_segment(index) {
            Line::new(pair[0], pair[1]).into_styled(style).draw(target)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::GrayCanvas;
    use crate::ui::styling::{GRAY_BLACK, GRAY_WHITE};

    fn points() -> [Point; 4] {
        [
            Point::new(10, 40),
            Point::new(30, 40),
            Point::new(50, 40),
            Point::new(70, 40),
        ]
    }

    #[test]
    fn test_dashed_skips_odd_segments() {
        let mut canvas = GrayCanvas::new();
        let Ok(()) = draw_polyline(&points(), LineStyle::Dashed, GRAY_BLACK, 1, &mut canvas);

        assert_eq!(canvas.pixel(20, 40), Some(GRAY_BLACK));
        assert_eq!(canvas.pixel(40, 40), Some(GRAY_WHITE));
        assert_eq!(canvas.pixel(60, 40), Some(GRAY_BLACK));
    }

    #[test]
    fn test_solid_draws_every_segment() {
        let mut canvas = GrayCanvas::new();
        let Ok(()) = draw_polyline(&points(), LineStyle::Solid, GRAY_BLACK, 1, &mut canvas);

        assert!((10..=70).all(|x| canvas.pixel(x, 40) == Some(GRAY_BLACK)));
    }
}
