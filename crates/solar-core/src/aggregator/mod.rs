//! Reduction of raw portal time series into screen records
//!
//! The [`Aggregator`] fetches every metric the dashboard needs through the
//! collaborator traits and reduces the result into a [`ScreenBundle`]. The
//! reduction itself is pure and split by record:
//!
//! - [`summarize_realtime`]: latest power flows
//! - [`summarize_period`]: daily and rolling-window energy totals
//! - [`build_timeline`]: index-joined generation/consumption power curves
//!
//! Data problems never fail a build. A metric the portal did not report, a
//! series too short to chart, or two series of unequal length are logged as
//! a [`DataIssue`] and degrade to zero or to a simpler rendering. Only a
//! failing collaborator aborts the build, with no partial bundle.

mod period;
mod realtime;
mod timeline;
mod window;

pub use period::{PeriodMode, self_sufficiency_pct, summarize_period};
pub use realtime::{latest_reading, summarize_realtime};
pub use timeline::{build_timeline, generation_series};
pub use window::{Interval, QueryWindow};

use chrono::NaiveDateTime;
use log::{debug, info, warn};
use thiserror_no_std::Error;

use crate::collaborators::{AuthError, Credential, PortalClient, PortalError, TokenProvider};
use crate::config::DashboardConfig;
use crate::model::{Metric, ScreenBundle, SeriesSet, TimeSeries};

/// Non-fatal data problems, logged and never returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DataIssue {
    #[error("Metric {0} missing from portal data, using zero")]
    MissingMetric(Metric),

    #[error("Series has {len} point(s), at least 2 are needed to chart it")]
    DegenerateSeries { len: usize },

    #[error("Series lengths differ (generation: {generation}, consumption: {consumption})")]
    LengthMismatch {
        generation: usize,
        consumption: usize,
    },
}

/// Collaborator failure while gathering the raw series
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    #[error("Authentication failed: {error}")]
    Auth { error: AuthError },

    #[error("Fetching {metric} failed: {error}")]
    Fetch { metric: Metric, error: PortalError },
}

/// Everything fetched for one poll, before reduction
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeriesBundle {
    /// Poll time; fallback timestamp for the realtime snapshot
    pub now: NaiveDateTime,
    /// Power metrics of today at 10-minute resolution
    pub power: SeriesSet,
    /// Generation and consumption yields of today
    pub today: SeriesSet,
    /// Daily yields over the rolling window
    pub rolling: SeriesSet,
    /// Window the rolling yields were queried for
    pub rolling_window: QueryWindow,
}

/// Builds [`ScreenBundle`]s from portal data
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    config: DashboardConfig,
}

impl Aggregator {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Gather every series of one poll.
    ///
    /// One credential is requested and used for all queries. The first
    /// failing call aborts the fetch.
    pub fn fetch<T, P>(
        &self,
        tokens: &mut T,
        portal: &mut P,
        now: NaiveDateTime,
    ) -> Result<RawSeriesBundle, AggregationError>
    where
        T: TokenProvider,
        P: PortalClient,
    {
        let credential = tokens
            .token()
            .map_err(|error| AggregationError::Auth { error })?;

        let today_power = QueryWindow::today(now, Interval::TenMinutes);
        let today_yield = QueryWindow::today(now, Interval::Day);
        let rolling_window = QueryWindow::rolling(now, self.config.effective_window_days());

        let yields = Metric::GENERATION_YIELD
            .iter()
            .chain(Metric::CONSUMPTION_YIELD.iter());

        let power = fetch_set(portal, &credential, Metric::POWER.iter(), &today_power)?;
        let today = fetch_set(portal, &credential, yields.clone(), &today_yield)?;
        let rolling = fetch_set(portal, &credential, yields, &rolling_window)?;

        info!(
            "Fetched {} power, {} daily and {} window series",
            power.len(),
            today.len(),
            rolling.len()
        );

        Ok(RawSeriesBundle {
            now,
            power,
            today,
            rolling,
            rolling_window,
        })
    }

    /// Reduce fetched series into the four screen records
    pub fn assemble(&self, raw: &RawSeriesBundle) -> ScreenBundle {
        let realtime = summarize_realtime(&raw.power, raw.now);

        let daily = summarize_period(
            &raw.today,
            &raw.today,
            PeriodMode::SingleDay {
                day: raw.now.date(),
            },
        );

        let monthly = summarize_period(
            &raw.rolling,
            &raw.rolling,
            PeriodMode::RollingWindow {
                start: raw.rolling_window.start_date(),
                end: raw.rolling_window.end_date(),
                days: self.config.effective_window_days(),
            },
        );

        let power = |metric: Metric| -> TimeSeries {
            raw.power.get(&metric).cloned().unwrap_or_else(|| {
                warn!("{}", DataIssue::MissingMetric(metric));
                TimeSeries::empty(metric)
            })
        };

        let timeline = build_timeline(
            &power(Metric::PvConsumptionPower),
            &power(Metric::GridFeedinPower),
            &power(Metric::HomeConsumptionPower),
            daily.label.clone(),
            daily.total_generation_wh,
        );

        debug!(
            "Assembled bundle: solar {:.0} W, today {:.0} Wh, window {:.0} Wh, {} timeline points",
            realtime.solar_power_w,
            daily.total_generation_wh,
            monthly.total_generation_wh,
            timeline.generation.len()
        );

        ScreenBundle {
            realtime,
            daily,
            monthly,
            timeline,
        }
    }

    /// Fetch and reduce in one step
    pub fn build<T, P>(
        &self,
        tokens: &mut T,
        portal: &mut P,
        now: NaiveDateTime,
    ) -> Result<ScreenBundle, AggregationError>
    where
        T: TokenProvider,
        P: PortalClient,
    {
        let raw = self.fetch(tokens, portal, now)?;
        Ok(self.assemble(&raw))
    }
}

fn fetch_set<'a, P: PortalClient>(
    portal: &mut P,
    credential: &Credential,
    metrics: impl Iterator<Item = &'a Metric>,
    window: &QueryWindow,
) -> Result<SeriesSet, AggregationError> {
    let mut set = SeriesSet::new();

    for &metric in metrics {
        match portal.fetch_series(credential, metric, window) {
            Ok(Some(series)) => {
                set.insert(metric, series);
            }
            Ok(None) => warn!("{}", DataIssue::MissingMetric(metric)),
            Err(error) => return Err(AggregationError::Fetch { metric, error }),
        }
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sample;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use chrono::{NaiveDate, TimeDelta};

    use crate::ui::components::graph::ChartData;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .and_then(|d| d.and_hms_opt(13, 5, 0))
            .unwrap()
    }

    struct StaticTokens(Option<AuthError>);

    impl TokenProvider for StaticTokens {
        fn token(&mut self) -> Result<Credential, AuthError> {
            match self.0.clone() {
                Some(error) => Err(error),
                None => Ok(Credential::new("token")),
            }
        }
    }

    /// Answers every query with a constant series; optionally fails one metric
    struct ConstantPortal {
        value: f64,
        failing: Option<Metric>,
        lengths: Vec<(Metric, usize)>,
        calls: Vec<(Metric, Interval)>,
    }

    impl ConstantPortal {
        fn new(value: f64) -> Self {
            Self {
                value,
                failing: None,
                lengths: Vec::new(),
                calls: Vec::new(),
            }
        }
    }

    impl PortalClient for ConstantPortal {
        fn fetch_series(
            &mut self,
            _credential: &Credential,
            metric: Metric,
            window: &QueryWindow,
        ) -> Result<Option<TimeSeries>, PortalError> {
            self.calls.push((metric, window.interval));
            if self.failing == Some(metric) {
                return Err(PortalError::Transport {
                    reason: "timeout".to_string(),
                });
            }
            let len = self
                .lengths
                .iter()
                .find(|(m, _)| *m == metric)
                .map_or(3, |(_, len)| *len);
            let samples = (0..len)
                .map(|i| Sample::new(window.from + TimeDelta::minutes(10 * i as i64), self.value))
                .collect();
            Ok(Some(TimeSeries::new(metric, samples)))
        }
    }

    #[test]
    fn test_build_queries_every_metric_once_per_window() {
        let mut portal = ConstantPortal::new(100.0);
        let aggregator = Aggregator::default();

        let bundle = aggregator
            .build(&mut StaticTokens(None), &mut portal, now())
            .unwrap();

        assert_eq!(portal.calls.len(), 4 + 6 + 6);
        assert_eq!(
            portal
                .calls
                .iter()
                .filter(|(_, interval)| *interval == Interval::TenMinutes)
                .count(),
            4
        );
        assert_eq!(bundle.realtime.solar_power_w, 100.0);
        assert_eq!(bundle.daily.label, "15.06.2024");
        assert_eq!(bundle.timeline.date_label, "15.06.2024");
        assert_eq!(bundle.timeline.daily_total_wh, bundle.daily.total_generation_wh);
    }

    #[test]
    fn test_rolling_average_divides_by_window_days() {
        let mut portal = ConstantPortal::new(1_000.0);
        let aggregator = Aggregator::default();

        let bundle = aggregator
            .build(&mut StaticTokens(None), &mut portal, now())
            .unwrap();

        // three entries of 1000 Wh over a 30 day window
        assert_eq!(bundle.monthly.total_generation_wh, 3_000.0);
        assert_eq!(bundle.monthly.daily_average_wh, Some(100.0));
    }

    #[test]
    fn test_fetch_failure_aborts_without_bundle() {
        let mut portal = ConstantPortal::new(1.0);
        portal.failing = Some(Metric::FeedInYield);

        let result = Aggregator::default().build(&mut StaticTokens(None), &mut portal, now());

        assert!(matches!(
            result,
            Err(AggregationError::Fetch {
                metric: Metric::FeedInYield,
                ..
            })
        ));
    }

    #[test]
    fn test_auth_failure_skips_portal() {
        let mut portal = ConstantPortal::new(1.0);

        let result = Aggregator::default().build(
            &mut StaticTokens(Some(AuthError::MissingCredentials)),
            &mut portal,
            now(),
        );

        assert!(matches!(result, Err(AggregationError::Auth { .. })));
        assert!(portal.calls.is_empty());
    }

    #[test]
    fn test_assemble_degrades_missing_metrics_to_zero() {
        let raw = RawSeriesBundle {
            now: now(),
            power: SeriesSet::new(),
            today: SeriesSet::new(),
            rolling: SeriesSet::new(),
            rolling_window: QueryWindow::rolling(now(), 30),
        };

        let bundle = Aggregator::default().assemble(&raw);

        assert_eq!(bundle.realtime.timestamp, now());
        assert_eq!(bundle.realtime.grid_net_w, 0.0);
        assert_eq!(bundle.daily.self_sufficiency_pct, 0.0);
        assert!(bundle.timeline.generation.is_empty());
    }

    #[test]
    fn test_uneven_power_series_reach_chart_truncated() {
        let mut portal = ConstantPortal::new(2_000.0);
        portal.lengths = vec![
            (Metric::PvConsumptionPower, 10),
            (Metric::GridFeedinPower, 8),
            (Metric::HomeConsumptionPower, 6),
        ];

        let bundle = Aggregator::default()
            .build(&mut StaticTokens(None), &mut portal, now())
            .unwrap();

        assert_eq!(bundle.timeline.generation.len(), 6);
        assert_eq!(bundle.timeline.consumption.len(), 6);
        assert!(bundle.timeline.generation.values().all(|w| w == 4_000.0));

        let chart = ChartData::from_timeline(&bundle.timeline);
        assert_eq!(chart.generation_kw().len(), 6);
        assert_eq!(chart.consumption_kw().len(), 6);
        assert_eq!(chart.timestamps().len(), 6);
        assert_eq!(chart.generation_kw()[0], 4.0);
        assert_eq!(chart.consumption_kw()[5], 2.0);
        assert_eq!(
            chart.timestamps()[5] - chart.timestamps()[0],
            TimeDelta::minutes(50)
        );
    }
}
