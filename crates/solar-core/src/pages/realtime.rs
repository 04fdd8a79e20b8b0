//! Realtime screen: current power flows in watts

use chrono::Timelike;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use heapless::String;

use crate::model::RealtimeSnapshot;
use crate::ui::components::{MAX_VALUE_LENGTH, format_label, format_quantity};
use crate::ui::styling::INK;
use crate::ui::{Header, StatRow, draw_footer};

use super::Screen;
use super::constants::{
    GRID_BALANCE_THRESHOLD_W, REALTIME_FOOTER_RULE_Y_PX, REALTIME_ROWS_Y_PX,
};

/// Direction of the net grid flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStatus {
    /// Net feed-in above the threshold
    Exporting,
    /// Net import above the threshold
    Importing,
    /// Within the threshold either way
    Balanced,
}

impl GridStatus {
    /// Classify net grid power (feed-in minus import) in watts
    pub fn assess(grid_net_w: f64) -> Self {
        if grid_net_w > GRID_BALANCE_THRESHOLD_W {
            Self::Exporting
        } else if grid_net_w < -GRID_BALANCE_THRESHOLD_W {
            Self::Importing
        } else {
            Self::Balanced
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Exporting => "exporting",
            Self::Importing => "importing",
            Self::Balanced => "balanced",
        }
    }
}

/// Four watt rows and the grid status
pub struct RealtimeScreen<'a> {
    snapshot: &'a RealtimeSnapshot,
}

impl<'a> RealtimeScreen<'a> {
    pub fn new(snapshot: &'a RealtimeSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn status(&self) -> GridStatus {
        GridStatus::assess(self.snapshot.grid_net_w)
    }
}

impl Screen for RealtimeScreen<'_> {
    type Color = BinaryColor;

    fn name(&self) -> &'static str {
        "realtime"
    }

    fn draw_screen<D: DrawTarget<Color = BinaryColor>>(&self, target: &mut D) -> Result<(), D::Error> {
        let snapshot = self.snapshot;

        let time: String<MAX_VALUE_LENGTH> = format_label(format_args!(
            "{:02}:{:02}",
            snapshot.timestamp.hour(),
            snapshot.timestamp.minute()
        ));

        Header::new("REALTIME")
            .with_annotation(&time)
            .draw(target, INK)?;

        let rows = [
            ("Solar power", snapshot.solar_power_w),
            ("Consumption", snapshot.consumption_w),
            ("Grid feed-in", snapshot.grid_feedin_w),
            ("Grid import", snapshot.grid_import_w),
        ];

        for ((label, watts), y) in rows.into_iter().zip(REALTIME_ROWS_Y_PX) {
            StatRow::primary(label, format_quantity(watts, 0, "W")).draw(y, target, INK)?;
        }

        let status: String<MAX_VALUE_LENGTH> =
            format_label(format_args!("{}", self.status().label()));
        draw_footer(
            REALTIME_FOOTER_RULE_Y_PX,
            &StatRow::primary("Status:", status),
            target,
            INK,
        )
    }
}
