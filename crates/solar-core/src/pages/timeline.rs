//! Timeline screen: generation and consumption power over the day

use embedded_graphics::pixelcolor::Gray2;
use embedded_graphics::prelude::*;
use heapless::String;

use crate::model::DualSeriesTimeline;
use crate::ui::Header;
use crate::ui::TextSize;
use crate::ui::components::format_label;
use crate::ui::components::graph::constants::{LABEL_COLOR, MAX_AXIS_LABEL_LENGTH};
use crate::ui::components::graph::{ChartData, DualSeriesChart};

use super::Screen;

/// Title length: "Timeline - " plus a `dd.mm.yyyy` date
const MAX_TITLE_LENGTH: usize = MAX_AXIS_LABEL_LENGTH * 2;

pub struct TimelineScreen<'a> {
    timeline: &'a DualSeriesTimeline,
}

impl<'a> TimelineScreen<'a> {
    pub fn new(timeline: &'a DualSeriesTimeline) -> Self {
        Self { timeline }
    }
}

impl Screen for TimelineScreen<'_> {
    type Color = Gray2;

    fn name(&self) -> &'static str {
        "timeline"
    }

    fn draw_screen<D: DrawTarget<Color = Gray2>>(&self, target: &mut D) -> Result<(), D::Error> {
        let title: String<MAX_TITLE_LENGTH> =
            format_label(format_args!("Timeline - {}", self.timeline.date_label));

        Header::new(&title)
            .with_title_size(TextSize::Small)
            .without_rule()
            .draw(target, LABEL_COLOR)?;

        let data = ChartData::from_timeline(self.timeline);
        DualSeriesChart::new(&data).draw(target)?;

        Ok(())
    }
}
