//! Daily and rolling-window energy summaries

use alloc::format;
use alloc::string::String;
use chrono::NaiveDate;
use log::warn;

use crate::model::{Metric, PeriodSummary, SeriesSet};

use super::DataIssue;

/// How the yield series of a period are reduced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodMode {
    /// One calendar day; each metric reports at most one value
    SingleDay { day: NaiveDate },
    /// A window of days summed up and averaged over a fixed length
    RollingWindow {
        start: NaiveDate,
        end: NaiveDate,
        /// Configured window length used as the averaging divisor
        days: u32,
    },
}

impl PeriodMode {
    /// Header label: `dd.mm.yyyy` for a day, `dd.mm - dd.mm` for a window
    pub fn label(&self) -> String {
        match self {
            Self::SingleDay { day } => format!("{}", day.format("%d.%m.%Y")),
            Self::RollingWindow { start, end, .. } => {
                format!("{} - {}", start.format("%d.%m"), end.format("%d.%m"))
            }
        }
    }
}

/// Self-sufficiency in percent, zero when nothing was consumed
pub fn self_sufficiency_pct(from_solar_wh: f64, total_consumption_wh: f64) -> f64 {
    if total_consumption_wh > 0.0 {
        from_solar_wh / total_consumption_wh * 100.0
    } else {
        0.0
    }
}

/// Reduce the generation and consumption yield series of a period.
///
/// Missing metrics and empty series degrade to zero. In rolling-window mode
/// the daily average divides by the configured window length, not by the
/// number of entries returned, so missing days lower the average.
pub fn summarize_period(
    generation: &SeriesSet,
    consumption: &SeriesSet,
    mode: PeriodMode,
) -> PeriodSummary {
    let field = |set: &SeriesSet, metric: Metric| -> f64 {
        let Some(series) = set.get(&metric) else {
            warn!("{}", DataIssue::MissingMetric(metric));
            return 0.0;
        };

        match mode {
            PeriodMode::SingleDay { .. } => series
                .samples
                .first()
                .map_or(0.0, |sample| sample.value_or_zero()),
            PeriodMode::RollingWindow { .. } => series.sum(),
        }
    };

    let total_generation_wh = field(generation, Metric::TotalYield);
    let total_consumption_wh = field(consumption, Metric::TotalConsumptionYield);
    let from_solar_wh = field(consumption, Metric::PvConsumptionYield);

    let daily_average_wh = match mode {
        PeriodMode::SingleDay { .. } => None,
        PeriodMode::RollingWindow { days, .. } => {
            Some(total_generation_wh / f64::from(days.max(1)))
        }
    };

    PeriodSummary {
        label: mode.label(),
        total_generation_wh,
        fed_to_grid_wh: field(generation, Metric::FeedInYield),
        self_consumed_wh: field(generation, Metric::SelfConsumptionYield),
        total_consumption_wh,
        from_solar_wh,
        from_grid_wh: field(consumption, Metric::GridConsumptionYield),
        self_sufficiency_pct: self_sufficiency_pct(from_solar_wh, total_consumption_wh),
        daily_average_wh,
    }
}
