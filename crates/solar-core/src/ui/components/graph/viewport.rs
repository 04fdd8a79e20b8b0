//! Viewport and coordinate transformation utilities
//!
//! Maps chart data space (sample index, kilowatts) to screen space.

use alloc::vec::Vec;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::constants::{MIN_Y_MAX_KW, PLOT_HEIGHT_PX, PLOT_WIDTH_PX, PLOT_X_PX, PLOT_Y_PX};

/// Index/value to pixel transform over a fixed plot rectangle
///
/// x maps sample index `0..count-1` linearly across the plot width, y maps
/// `0..y_max` onto the plot height with higher values towards the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    plot: Rectangle,
    count: usize,
    y_max: f64,
}

impl Viewport {
    /// Viewport over the dashboard's chart rectangle
    pub fn new(count: usize, max_value: f64) -> Self {
        Self::with_plot(
            Rectangle::new(
                Point::new(PLOT_X_PX, PLOT_Y_PX),
                Size::new(PLOT_WIDTH_PX, PLOT_HEIGHT_PX),
            ),
            count,
            max_value,
        )
    }

    /// Viewport over an arbitrary rectangle
    ///
    /// `max_value` is raised to [`MIN_Y_MAX_KW`] so the scale never collapses.
    pub fn with_plot(plot: Rectangle, count: usize, max_value: f64) -> Self {
        let y_max = if max_value.is_finite() {
            max_value.max(MIN_Y_MAX_KW)
        } else {
            MIN_Y_MAX_KW
        };

        Self { plot, count, y_max }
    }

    pub fn plot_area(&self) -> Rectangle {
        self.plot
    }

    pub fn left(&self) -> i32 {
        self.plot.top_left.x
    }

    pub fn right(&self) -> i32 {
        self.plot.top_left.x + self.plot.size.width as i32
    }

    pub fn top(&self) -> i32 {
        self.plot.top_left.y
    }

    /// The x-axis, where value zero is drawn
    pub fn bottom(&self) -> i32 {
        self.plot.top_left.y + self.plot.size.height as i32
    }

    /// Top of the value scale in kilowatts
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Screen x of sample `index`
    pub fn x_at(&self, index: usize) -> i32 {
        // a single point sits on the left edge instead of dividing by zero
        let span = self.count.saturating_sub(1).max(1) as f64;
        self.left() + (index as f64 / span * f64::from(self.plot.size.width)) as i32
    }

    /// Screen y of `value`, clamped to the plot
    pub fn y_at(&self, value: f64) -> i32 {
        let norm = (value / self.y_max).clamp(0.0, 1.0);
        self.bottom() - (norm * f64::from(self.plot.size.height)) as i32
    }

    pub fn point(&self, index: usize, value: f64) -> Point {
        Point::new(self.x_at(index), self.y_at(value))
    }

    /// Screen points of a whole series
    pub fn screen_points(&self, values: &[f64]) -> Vec<Point> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| self.point(index, *value))
            .collect()
    }
}
