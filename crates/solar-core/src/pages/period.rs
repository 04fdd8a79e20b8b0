//! Daily and rolling-window energy screens

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::model::PeriodSummary;
use crate::ui::components::format_quantity;
use crate::ui::styling::INK;
use crate::ui::{Header, StatRow, draw_footer};

use super::Screen;
use super::constants::{PERIOD_FOOTER_RULE_Y_PX, PERIOD_ROWS_Y_PX};

/// Which period a [`PeriodScreen`] shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodKind {
    /// Today, kWh with two decimals
    Daily,
    /// Rolling window, kWh with one decimal and the daily average
    Monthly,
}

impl PeriodKind {
    fn title(self) -> &'static str {
        match self {
            Self::Daily => "TODAY",
            Self::Monthly => "PERIOD",
        }
    }

    fn precision(self) -> usize {
        match self {
            Self::Daily => 2,
            Self::Monthly => 1,
        }
    }
}

/// Generation and consumption totals with their breakdown
pub struct PeriodScreen<'a> {
    summary: &'a PeriodSummary,
    kind: PeriodKind,
}

impl<'a> PeriodScreen<'a> {
    pub fn new(summary: &'a PeriodSummary, kind: PeriodKind) -> Self {
        Self { summary, kind }
    }

    /// Rows in drawing order
    fn rows(&self) -> [StatRow<'static>; 6] {
        let s = self.summary;
        let precision = self.kind.precision();
        let kwh = |wh: f64| format_quantity(wh / 1000.0, precision, "kWh");

        let fed = StatRow::detail("Fed to grid", kwh(s.fed_to_grid_wh));
        let (second_row, third_row) = match self.kind {
            PeriodKind::Daily => (fed, StatRow::detail("Self-consumed", kwh(s.self_consumed_wh))),
            PeriodKind::Monthly => (
                StatRow::detail("avg/day", kwh(s.daily_average_wh.unwrap_or(0.0))),
                fed,
            ),
        };

        [
            StatRow::primary("Generation", kwh(s.total_generation_wh)),
            second_row,
            third_row,
            StatRow::primary("Consumption", kwh(s.total_consumption_wh)),
            StatRow::detail("From solar", kwh(s.from_solar_wh)),
            StatRow::detail("From grid", kwh(s.from_grid_wh)),
        ]
    }
}

impl Screen for PeriodScreen<'_> {
    type Color = BinaryColor;

    fn name(&self) -> &'static str {
        match self.kind {
            PeriodKind::Daily => "daily",
            PeriodKind::Monthly => "monthly",
        }
    }

    fn draw_screen<D: DrawTarget<Color = BinaryColor>>(&self, target: &mut D) -> Result<(), D::Error> {
        Header::new(self.kind.title())
            .with_annotation(&self.summary.label)
            .draw(target, INK)?;

        for (row, y) in self.rows().iter().zip(PERIOD_ROWS_Y_PX) {
            row.draw(y, target, INK)?;
        }

        draw_footer(
            PERIOD_FOOTER_RULE_Y_PX,
            &StatRow::primary(
                "Self-sufficiency",
                format_quantity(self.summary.self_sufficiency_pct, 1, "%"),
            ),
            target,
            INK,
        )
    }
}
