//! Dual-series area chart for the timeline screen
//!
//! Draws generation and household consumption power over one day onto a
//! 4-level grayscale target:
//!
//! - Light gray fill under the larger of the two curves
//! - Dark gray fill where both curves overlap (self-consumption)
//! - Consumption as a dashed black line, generation as a solid one
//! - Dotted grid rules, axis lines, scale and time labels
//!
//! Both series are joined by sample index. Timestamps are only used for the
//! x-axis labels.
//!
//! # Example
//!
//! ```ignore
//! let data = ChartData::from_timeline(&bundle.timeline);
//! DualSeriesChart::new(&data).draw(&mut canvas)?;
//! ```

mod axis;
pub mod constants;
mod envelope;
mod fill;
mod stats;
mod stroke;
mod viewport;

pub use axis::{format_time_label, format_value_label, time_label_indices};
pub use envelope::{FillPlan, overlap, union};
pub use stats::SeriesStats;
pub use stroke::LineStyle;
pub use viewport::Viewport;

use alloc::vec::Vec;
use chrono::NaiveDateTime;
use embedded_graphics::pixelcolor::Gray2;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use log::{debug, warn};

use crate::aggregator::DataIssue;
use crate::model::DualSeriesTimeline;
use crate::ui::styling::{TextSize, top_aligned};
use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

use constants::{
    LABEL_COLOR, OVERLAP_FILL, SERIES_LINE_WIDTH_PX, SINGLE_FILL, STATS_Y_PX, STROKE_COLOR,
    UNION_FILL,
};

/// Text shown instead of the chart when there is nothing to plot
pub const NO_DATA_MESSAGE: &str = "no data available";

/// Chart-ready series in kilowatts
///
/// Consumption with fewer than two points is dropped; otherwise both series
/// are truncated to their common length.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    generation_kw: Vec<f64>,
    consumption_kw: Vec<f64>,
    timestamps: Vec<NaiveDateTime>,
    daily_total_wh: f64,
}

impl ChartData {
    pub fn from_timeline(timeline: &DualSeriesTimeline) -> Self {
        let mut generation_kw: Vec<f64> = timeline.generation.values().map(to_kw).collect();
        let mut consumption_kw: Vec<f64> = timeline.consumption.values().map(to_kw).collect();
        let mut timestamps: Vec<NaiveDateTime> = timeline
            .generation
            .samples
            .iter()
            .map(|sample| sample.timestamp)
            .collect();

        if consumption_kw.len() < 2 {
            consumption_kw.clear();
        } else if consumption_kw.len() != generation_kw.len() {
            debug!(
                "{}",
                DataIssue::LengthMismatch {
                    generation: generation_kw.len(),
                    consumption: consumption_kw.len(),
                }
            );
            let common = generation_kw.len().min(consumption_kw.len());
            generation_kw.truncate(common);
            consumption_kw.truncate(common);
            timestamps.truncate(common);
        }

        Self {
            generation_kw,
            consumption_kw,
            timestamps,
            daily_total_wh: timeline.daily_total_wh,
        }
    }

    pub fn generation_kw(&self) -> &[f64] {
        &self.generation_kw
    }

    pub fn consumption_kw(&self) -> &[f64] {
        &self.consumption_kw
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Largest value of either series, zero when both are empty
    pub fn max_kw(&self) -> f64 {
        self.generation_kw
            .iter()
            .chain(self.consumption_kw.iter())
            .copied()
            .fold(0.0, f64::max)
    }

    pub fn fill_plan(&self) -> FillPlan {
        FillPlan::for_series(&self.generation_kw, &self.consumption_kw)
    }

    /// Viewport scaled to both series
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.generation_kw.len(), self.max_kw())
    }
}

fn to_kw(watts: f64) -> f64 {
    watts / 1000.0
}

/// Renders [`ChartData`] with grid, fills, strokes and annotations
pub struct DualSeriesChart<'a> {
    data: &'a ChartData,
}

impl<'a> DualSeriesChart<'a> {
    pub fn new(data: &'a ChartData) -> Self {
        Self { data }
    }

    /// Draw the chart, or a centered placeholder when generation has fewer
    /// than two points. Returns the fill plan that was used.
    pub fn draw<D: DrawTarget<Color = Gray2>>(&self, target: &mut D) -> Result<FillPlan, D::Error> {
        let plan = self.data.fill_plan();

        if plan == FillPlan::Placeholder {
            warn!(
                "{}",
                DataIssue::DegenerateSeries {
                    len: self.data.generation_kw.len()
                }
            );
            draw_placeholder(target)?;
            return Ok(plan);
        }

        let viewport = self.data.viewport();
        let generation = viewport.screen_points(&self.data.generation_kw);
        let consumption = viewport.screen_points(&self.data.consumption_kw);

        axis::draw_grid(&viewport, target)?;

        match &plan {
            FillPlan::Overlap { union, overlap } => {
                fill::fill_under(&viewport.screen_points(union), viewport.bottom(), UNION_FILL, target)?;
                fill::fill_under(&viewport.screen_points(overlap), viewport.bottom(), OVERLAP_FILL, target)?;
            }
            FillPlan::Single => {
                fill::fill_under(&generation, viewport.bottom(), SINGLE_FILL, target)?;
            }
            FillPlan::Placeholder => {}
        }

        axis::draw_axes(&viewport, target)?;

        stroke::draw_polyline(
            &consumption,
            LineStyle::Dashed,
            STROKE_COLOR,
            SERIES_LINE_WIDTH_PX,
            target,
        )?;
        stroke::draw_polyline(
            &generation,
            LineStyle::Solid,
            STROKE_COLOR,
            SERIES_LINE_WIDTH_PX,
            target,
        )?;

        axis::draw_value_labels(&viewport, target)?;
        axis::draw_time_labels(&self.data.timestamps, &viewport, target)?;

        if let Some(stats) = SeriesStats::from_values(&self.data.generation_kw) {
            Text::with_text_style(
                stats.summary_line(self.data.daily_total_wh).as_str(),
                Point::new(viewport.left(), STATS_Y_PX),
                TextSize::Tiny.style(LABEL_COLOR),
                top_aligned(Alignment::Left),
            )
            .draw(target)?;
        }

        debug!(
            "Chart drawn: {} points, y max {:.2} kW, overlap fill: {}",
            self.data.generation_kw.len(),
            viewport.y_max(),
            matches!(plan, FillPlan::Overlap { .. })
        );

        Ok(plan)
    }
}

fn draw_placeholder<D: DrawTarget<Color = Gray2>>(target: &mut D) -> Result<(), D::Error> {
    let centered = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();

    Text::with_text_style(
        NO_DATA_MESSAGE,
        Point::new(DISPLAY_WIDTH_PX as i32 / 2, DISPLAY_HEIGHT_PX as i32 / 2),
        TextSize::Small.style(LABEL_COLOR),
        centered,
    )
    .draw(target)?;
    Ok(())
}
