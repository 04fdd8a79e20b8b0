//! Data model shared by the aggregator, the renderer and the collaborators
//!
//! Raw portal readings arrive as [`TimeSeries`] grouped in a [`SeriesSet`];
//! the aggregator reduces them to the four screen records collected in a
//! [`ScreenBundle`], which is the only input the renderer needs.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Named metric reported by the solar portal
///
/// The serialized names are the series keys used by the portal's chart API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Solar power used by the house (W, 10-minute interval)
    PvConsumptionPower,
    /// Household consumption power (W)
    HomeConsumptionPower,
    /// Power exported to the grid (W)
    GridFeedinPower,
    /// Power imported from the grid (W)
    GridConsumptionPower,
    /// Total generated energy (Wh, daily interval)
    TotalYield,
    /// Generated energy exported to the grid (Wh)
    FeedInYield,
    /// Generated energy consumed by the house (Wh)
    SelfConsumptionYield,
    /// Total household consumption (Wh)
    TotalConsumptionYield,
    /// Household consumption covered by solar (Wh)
    PvConsumptionYield,
    /// Household consumption covered by the grid (Wh)
    GridConsumptionYield,
}

impl Metric {
    /// Power metrics polled at 10-minute resolution for today
    pub const POWER: [Metric; 4] = [
        Metric::PvConsumptionPower,
        Metric::HomeConsumptionPower,
        Metric::GridFeedinPower,
        Metric::GridConsumptionPower,
    ];

    /// Daily yield metrics describing generation
    pub const GENERATION_YIELD: [Metric; 3] = [
        Metric::TotalYield,
        Metric::FeedInYield,
        Metric::SelfConsumptionYield,
    ];

    /// Daily yield metrics describing household consumption
    pub const CONSUMPTION_YIELD: [Metric; 3] = [
        Metric::TotalConsumptionYield,
        Metric::PvConsumptionYield,
        Metric::GridConsumptionYield,
    ];

    /// Portal series name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PvConsumptionPower => "pv_consumption_power",
            Self::HomeConsumptionPower => "home_consumption_power",
            Self::GridFeedinPower => "grid_feedin_power",
            Self::GridConsumptionPower => "grid_consumption_power",
            Self::TotalYield => "total_yield",
            Self::FeedInYield => "feed_in_yield",
            Self::SelfConsumptionYield => "self_consumption_yield",
            Self::TotalConsumptionYield => "total_consumption_yield",
            Self::PvConsumptionYield => "pv_consumption_yield",
            Self::GridConsumptionYield => "grid_consumption_yield",
        }
    }
}

impl core::fmt::Display for Metric {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reading of a metric
///
/// `value` is `None` when the portal reported no reading for the slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

impl Sample {
    pub const fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self {
            timestamp,
            value: Some(value),
        }
    }

    pub const fn missing(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            value: None,
        }
    }

    /// Value with "no reading" treated as zero
    pub fn value_or_zero(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

/// Chronological samples of one metric over a queried window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub metric: Metric,
    pub samples: Vec<Sample>,
}

impl TimeSeries {
    pub fn new(metric: Metric, samples: Vec<Sample>) -> Self {
        Self { metric, samples }
    }

    pub fn empty(metric: Metric) -> Self {
        Self::new(metric, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Values with missing readings mapped to zero
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(Sample::value_or_zero)
    }

    /// Sum of all readings (missing readings count as zero)
    pub fn sum(&self) -> f64 {
        self.values().sum()
    }

    /// Shorten the series to at most `len` samples
    pub fn truncate(&mut self, len: usize) {
        self.samples.truncate(len);
    }
}

/// Series returned for one query, keyed by metric
///
/// A metric missing from the set was not reported by the portal.
pub type SeriesSet = BTreeMap<Metric, TimeSeries>;

/// Current power flows, built from the latest readings of a poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeSnapshot {
    pub timestamp: NaiveDateTime,
    pub solar_power_w: f64,
    pub consumption_w: f64,
    pub grid_feedin_w: f64,
    pub grid_import_w: f64,
    /// Feed-in minus import; negative while importing
    pub grid_net_w: f64,
}

/// Energy totals for one day or a rolling window of days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Date (`dd.mm.yyyy`) or period (`dd.mm - dd.mm`) shown in the header
    pub label: String,
    pub total_generation_wh: f64,
    pub fed_to_grid_wh: f64,
    pub self_consumed_wh: f64,
    pub total_consumption_wh: f64,
    pub from_solar_wh: f64,
    pub from_grid_wh: f64,
    /// Not clamped; upstream skew can push it past 100
    pub self_sufficiency_pct: f64,
    /// Only set for rolling windows
    pub daily_average_wh: Option<f64>,
}

/// Generation and household consumption power over one day
///
/// Both series hold watts and are joined by sample index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualSeriesTimeline {
    pub date_label: String,
    pub generation: TimeSeries,
    pub consumption: TimeSeries,
    pub daily_total_wh: f64,
}

/// Everything the renderer needs for one poll
///
/// Built fresh on every successful poll and replaced wholesale by the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenBundle {
    pub realtime: RealtimeSnapshot,
    pub daily: PeriodSummary,
    pub monthly: PeriodSummary,
    pub timeline: DualSeriesTimeline,
}

/// Screens the dashboard can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScreenId {
    Realtime,
    Daily,
    Monthly,
    Timeline,
}

impl ScreenId {
    pub const ALL: [ScreenId; 4] = [
        ScreenId::Realtime,
        ScreenId::Daily,
        ScreenId::Monthly,
        ScreenId::Timeline,
    ];

    /// Lower-case name, used for log lines and exported file names
    pub const fn name(self) -> &'static str {
        match self {
            Self::Realtime => "realtime",
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Timeline => "timeline",
        }
    }

    /// Following screen, wrapping back to realtime
    pub const fn next(self) -> Self {
        match self {
            Self::Realtime => Self::Daily,
            Self::Daily => Self::Monthly,
            Self::Monthly => Self::Timeline,
            Self::Timeline => Self::Realtime,
        }
    }

    /// Whether the screen renders onto a 4-level grayscale canvas
    pub const fn is_grayscale(self) -> bool {
        matches!(self, Self::Timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use chrono::NaiveDate;

    fn ts(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_missing_values_sum_as_zero() {
        let series = TimeSeries::new(
            Metric::TotalYield,
            vec![
                Sample::new(ts(0), 1200.0),
                Sample::missing(ts(1)),
                Sample::new(ts(2), 300.0),
            ],
        );

        assert_eq!(series.sum(), 1500.0);
    }

    #[test]
    fn test_screen_cycle_wraps() {
        let mut screen = ScreenId::Realtime;
        for _ in 0..ScreenId::ALL.len() {
            screen = screen.next();
        }
        assert_eq!(screen, ScreenId::Realtime);
    }

    #[test]
    fn test_metric_names_match_portal() {
        assert_eq!(Metric::GridFeedinPower.as_str(), "grid_feedin_power");
        assert_eq!(Metric::FeedInYield.as_str(), "feed_in_yield");
    }
}
