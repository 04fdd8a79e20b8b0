//! Generation/consumption power series for the timeline chart

use alloc::string::String;
use alloc::vec::Vec;
use log::{debug, warn};

use crate::model::{DualSeriesTimeline, Metric, Sample, TimeSeries};

use super::DataIssue;

/// Pointwise sum of self-consumed and fed-in solar power.
///
/// Joined by index over the shorter of the two series; each sample keeps the
/// timestamp of the self-consumption reading and missing readings count as
/// zero.
pub fn generation_series(pv_consumption: &TimeSeries, grid_feedin: &TimeSeries) -> TimeSeries {
    if pv_consumption.len() != grid_feedin.len() {
        debug!(
            "{}",
            DataIssue::LengthMismatch {
                generation: pv_consumption.len(),
                consumption: grid_feedin.len(),
            }
        );
    }

    let samples: Vec<Sample> = pv_consumption
        .samples
        .iter()
        .zip(grid_feedin.samples.iter())
        .map(|(pv, feedin)| Sample::new(pv.timestamp, pv.value_or_zero() + feedin.value_or_zero()))
        .collect();

    TimeSeries::new(Metric::PvConsumptionPower, samples)
}

/// Pair generation with household consumption by sample index.
///
/// When consumption has readings both series are truncated to their common
/// length. An empty consumption series leaves generation untouched so the
/// chart can still show a single curve.
pub fn build_timeline(
    pv_consumption: &TimeSeries,
    grid_feedin: &TimeSeries,
    home_consumption: &TimeSeries,
    date_label: String,
    daily_total_wh: f64,
) -> DualSeriesTimeline {
    let mut generation = generation_series(pv_consumption, grid_feedin);
    let mut consumption = home_consumption.clone();

    if !consumption.is_empty() && consumption.len() != generation.len() {
        warn!(
            "{}",
            DataIssue::LengthMismatch {
                generation: generation.len(),
                consumption: consumption.len(),
            }
        );
        let common = generation.len().min(consumption.len());
        generation.truncate(common);
        consumption.truncate(common);
    }

    DualSeriesTimeline {
        date_label,
        generation,
        consumption,
        daily_total_wh,
    }
}
