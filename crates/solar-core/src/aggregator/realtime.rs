//! Realtime snapshot from the latest power readings

use chrono::NaiveDateTime;
use log::warn;

use crate::model::{Metric, RealtimeSnapshot, Sample, SeriesSet};

use super::DataIssue;

/// Pick the reading that best describes "now" for one series.
///
/// Scans backwards for the last sample with a non-null, non-zero value. If
/// every sample is zero or null, the very last sample is used (null reads
/// as zero). An empty series yields `None`.
pub fn latest_reading(samples: &[Sample]) -> Option<(NaiveDateTime, f64)> {
    let active = samples
        .iter()
        .rev()
        .find(|sample| matches!(sample.value, Some(v) if v != 0.0));

    active
        .or_else(|| samples.last())
        .map(|sample| (sample.timestamp, sample.value_or_zero()))
}

/// Reduce the power series of one poll to a [`RealtimeSnapshot`].
///
/// Missing metrics degrade to `0.0`. The snapshot timestamp is the one of the
/// selected solar sample, falling back to `now`.
pub fn summarize_realtime(series: &SeriesSet, now: NaiveDateTime) -> RealtimeSnapshot {
    let reading = |metric: Metric| -> Option<(NaiveDateTime, f64)> {
        match series.get(&metric) {
            Some(s) => latest_reading(&s.samples),
            None => {
                warn!("{}", DataIssue::MissingMetric(metric));
                None
            }
        }
    };

    let solar = reading(Metric::PvConsumptionPower);
    let value = |r: Option<(NaiveDateTime, f64)>| r.map_or(0.0, |(_, v)| v);

    let solar_power_w = value(solar);
    let consumption_w = value(reading(Metric::HomeConsumptionPower));
    let grid_feedin_w = value(reading(Metric::GridFeedinPower));
    let grid_import_w = value(reading(Metric::GridConsumptionPower));

    RealtimeSnapshot {
        timestamp: solar.map_or(now, |(ts, _)| ts),
        solar_power_w,
        consumption_w,
        grid_feedin_w,
        grid_import_w,
        grid_net_w: grid_feedin_w - grid_import_w,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimeSeries;
    use alloc::vec;
    use alloc::vec::Vec;
    use chrono::NaiveDate;

    fn ts(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(12, minute, 0))
            .unwrap()
    }

    fn set(entries: Vec<(Metric, Vec<Sample>)>) -> SeriesSet {
        entries
            .into_iter()
            .map(|(metric, samples)| (metric, TimeSeries::new(metric, samples)))
            .collect()
    }

    #[test]
    fn test_skips_trailing_zeros() {
        let solar = vec![
            Sample::new(ts(0), 100.0),
            Sample::new(ts(10), 0.0),
            Sample::new(ts(20), 0.0),
        ];
        let snapshot = summarize_realtime(&set(vec![(Metric::PvConsumptionPower, solar)]), ts(30));

        assert_eq!(snapshot.solar_power_w, 100.0);
        assert_eq!(snapshot.timestamp, ts(0));
    }

    #[test]
    fn test_skips_trailing_nulls() {
        let samples = [Sample::new(ts(0), 250.0), Sample::missing(ts(10))];
        assert_eq!(latest_reading(&samples), Some((ts(0), 250.0)));
    }

    #[test]
    fn test_all_zero_falls_back_to_last_sample() {
        let samples = [Sample::new(ts(0), 0.0), Sample::missing(ts(10))];
        assert_eq!(latest_reading(&samples), Some((ts(10), 0.0)));
    }

    #[test]
    fn test_empty_and_missing_series_are_zero() {
        let snapshot = summarize_realtime(
            &set(vec![(Metric::HomeConsumptionPower, Vec::new())]),
            ts(45),
        );

        assert_eq!(snapshot.consumption_w, 0.0);
        assert_eq!(snapshot.solar_power_w, 0.0);
        assert_eq!(snapshot.grid_net_w, 0.0);
        assert_eq!(snapshot.timestamp, ts(45));
    }

    #[test]
    fn test_net_is_feedin_minus_import() {
        let snapshot = summarize_realtime(
            &set(vec![
                (Metric::GridFeedinPower, vec![Sample::new(ts(0), 300.0)]),
                (Metric::GridConsumptionPower, vec![Sample::new(ts(0), 1200.0)]),
            ]),
            ts(5),
        );

        assert_eq!(snapshot.grid_net_w, -900.0);
        assert_eq!(
            snapshot.grid_net_w,
            snapshot.grid_feedin_w - snapshot.grid_import_w
        );
    }
}
