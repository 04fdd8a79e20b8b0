//! Synthetic portal producing plausible solar days
//!
//! Generation follows a half-sine between sunrise and sunset with a little
//! cloud wobble; household load has a base plus morning and evening peaks.
//! Daily yields are the integrals of the same curves, scaled per day so the
//! rolling window is not perfectly flat.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

use solar_core::aggregator::{Interval, QueryWindow};
use solar_core::collaborators::{AuthError, Credential, PortalClient, PortalError, TokenProvider};
use solar_core::model::{Metric, Sample, TimeSeries};

/// Peak generation on a clear day, in watts
const PEAK_GENERATION_W: f64 = 4200.0;

/// Always-on household load, in watts
const BASE_LOAD_W: f64 = 280.0;

const SUNRISE_HOUR: f64 = 6.0;
const SUNSET_HOUR: f64 = 20.0;

/// Spacing of the power samples
const POWER_STEP_MINUTES: i64 = 10;

/// Hands out a fixed credential
pub struct StaticTokens {
    token: String,
}

impl StaticTokens {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl TokenProvider for StaticTokens {
    fn token(&mut self) -> Result<Credential, AuthError> {
        if self.token.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(Credential::new(self.token.clone()))
    }
}

/// Power flows at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
struct Flows {
    generation_w: f64,
    home_w: f64,
}

impl Flows {
    /// Generation used directly by the house
    fn self_consumed_w(&self) -> f64 {
        self.generation_w.min(self.home_w)
    }

    fn feedin_w(&self) -> f64 {
        self.generation_w - self.self_consumed_w()
    }

    fn import_w(&self) -> f64 {
        self.home_w - self.self_consumed_w()
    }

    fn power(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::PvConsumptionPower => Some(self.self_consumed_w()),
            Metric::HomeConsumptionPower => Some(self.home_w),
            Metric::GridFeedinPower => Some(self.feedin_w()),
            Metric::GridConsumptionPower => Some(self.import_w()),
            _ => None,
        }
    }
}

/// Portal answering every query with generated data
pub struct MockPortal {
    frozen_at: Option<NaiveDateTime>,
}

impl MockPortal {
    /// Portal whose data ends at the current wall-clock time
    pub fn new() -> Self {
        Self { frozen_at: None }
    }

    /// Portal whose data ends at `now`, regardless of the wall clock
    pub fn frozen(now: NaiveDateTime) -> Self {
        Self {
            frozen_at: Some(now),
        }
    }

    fn now(&self) -> NaiveDateTime {
        self.frozen_at
            .unwrap_or_else(|| chrono::Local::now().naive_local())
    }

    fn power_series(&self, metric: Metric, window: &QueryWindow) -> TimeSeries {
        let end = window.to.min(self.now());
        let mut samples = Vec::new();
        let mut at = window.from;
        while at <= end {
            let value = flows_at(at).power(metric).unwrap_or(0.0);
            samples.push(Sample::new(at, value));
            at += TimeDelta::minutes(POWER_STEP_MINUTES);
        }
        TimeSeries::new(metric, samples)
    }

    fn yield_series(&self, metric: Metric, window: &QueryWindow) -> TimeSeries {
        let last = window.end_date().min(self.now().date());
        let samples = window
            .start_date()
            .iter_days()
            .take_while(|day| *day <= last)
            .filter_map(|day| {
                let midnight = day.and_hms_opt(0, 0, 0)?;
                Some(Sample::new(midnight, daily_yield_wh(day, metric)))
            })
            .collect();
        TimeSeries::new(metric, samples)
    }
}

impl Default for MockPortal {
    fn default() -> Self {
        Self::new()
    }
}

impl PortalClient for MockPortal {
    fn fetch_series(
        &mut self,
        _credential: &Credential,
        metric: Metric,
        window: &QueryWindow,
    ) -> Result<Option<TimeSeries>, PortalError> {
        let series = match window.interval {
            Interval::TenMinutes => self.power_series(metric, window),
            Interval::Day => self.yield_series(metric, window),
        };
        log::debug!("Mock portal served {} samples of {}", series.len(), metric);
        Ok(Some(series))
    }
}

/// Cloudiness factor for a day, between 0.55 and 1.0
fn day_factor(day: NaiveDate) -> f64 {
    let t = f64::from(day.ordinal());
    0.775 + 0.15 * (t / 3.0).sin() + 0.075 * (t / 7.0).cos()
}

fn flows_at(at: NaiveDateTime) -> Flows {
    let hour = f64::from(at.hour()) + f64::from(at.minute()) / 60.0;
    let factor = day_factor(at.date());

    let generation_w = if (SUNRISE_HOUR..SUNSET_HOUR).contains(&hour) {
        let phase = (hour - SUNRISE_HOUR) / (SUNSET_HOUR - SUNRISE_HOUR);
        let wobble = 1.0 - 0.12 * (hour * 2.3).sin().abs();
        PEAK_GENERATION_W * factor * (PI * phase).sin() * wobble
    } else {
        0.0
    };

    let morning = 900.0 * (-(hour - 7.5).powi(2) / 1.5).exp();
    let evening = 1400.0 * (-(hour - 19.0).powi(2) / 3.0).exp();
    let home_w = BASE_LOAD_W + morning + evening + 120.0 * (hour / 1.7).cos().abs();

    Flows {
        generation_w: generation_w.max(0.0),
        home_w,
    }
}

/// Energy of one metric over a whole day, integrated at the power step
fn daily_yield_wh(day: NaiveDate, metric: Metric) -> f64 {
    let Some(start) = day.and_hms_opt(0, 0, 0) else {
        return 0.0;
    };
    let steps = 24 * 60 / POWER_STEP_MINUTES;
    let hours_per_step = POWER_STEP_MINUTES as f64 / 60.0;

    (0..steps)
        .map(|i| flows_at(start + TimeDelta::minutes(i * POWER_STEP_MINUTES)))
        .map(|flows| {
            let watts = match metric {
                Metric::TotalYield => flows.generation_w,
                Metric::FeedInYield => flows.feedin_w(),
                Metric::SelfConsumptionYield | Metric::PvConsumptionYield => {
                    flows.self_consumed_w()
                }
                Metric::TotalConsumptionYield => flows.home_w,
                Metric::GridConsumptionYield => flows.import_w(),
                _ => 0.0,
            };
            watts * hours_per_step
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .expect("valid time")
    }

    fn fetch(portal: &mut MockPortal, metric: Metric, window: QueryWindow) -> TimeSeries {
        portal
            .fetch_series(&Credential::new("t"), metric, &window)
            .expect("mock never fails")
            .expect("mock reports every metric")
    }

    #[test]
    fn test_no_generation_at_night() {
        let flows = flows_at(at(2, 0));
        assert_eq!(flows.generation_w, 0.0);
        assert!(flows.home_w >= BASE_LOAD_W);
        assert_eq!(flows.import_w(), flows.home_w);
    }

    #[test]
    fn test_flows_balance() {
        let flows = flows_at(at(13, 0));
        assert!(flows.generation_w > 0.0);
        let generation = flows.self_consumed_w() + flows.feedin_w();
        assert!((generation - flows.generation_w).abs() < 1e-9);
        let home = flows.self_consumed_w() + flows.import_w();
        assert!((home - flows.home_w).abs() < 1e-9);
    }

    #[test]
    fn test_power_series_ends_at_now() {
        let now = at(12, 5);
        let mut portal = MockPortal::frozen(now);
        let series = fetch(
            &mut portal,
            Metric::PvConsumptionPower,
            QueryWindow::today(now, Interval::TenMinutes),
        );

        // 00:00 through 12:00 every ten minutes
        assert_eq!(series.len(), 73);
        assert_eq!(series.samples[0].timestamp, at(0, 0));
        assert_eq!(series.samples[72].timestamp, at(12, 0));
    }

    #[test]
    fn test_rolling_yields_one_per_day() {
        let now = at(18, 0);
        let mut portal = MockPortal::frozen(now);
        let series = fetch(&mut portal, Metric::TotalYield, QueryWindow::rolling(now, 30));

        assert_eq!(series.len(), 31);
        assert!(series.values().all(|wh| wh > 0.0));
    }

    #[test]
    fn test_yields_are_consistent() {
        let day = at(0, 0).date();
        let total = daily_yield_wh(day, Metric::TotalYield);
        let split =
            daily_yield_wh(day, Metric::FeedInYield) + daily_yield_wh(day, Metric::SelfConsumptionYield);
        assert!((total - split).abs() < 1e-6);
    }

    #[test]
    fn test_empty_token_rejected() {
        assert_eq!(
            StaticTokens::new("").token(),
            Err(AuthError::MissingCredentials)
        );
        assert!(StaticTokens::new("abc").token().is_ok());
    }
}
