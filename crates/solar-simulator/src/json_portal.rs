//! Portal replaying recorded chart-data responses
//!
//! The file holds one portal response per query kind:
//!
//! ```json
//! {
//!   "power":  { "timeSeries": { "pv_consumption_power": [{ "timestamp": "2024-06-15T12:00:00", "value": 1800.0 }] } },
//!   "today":  { "timeSeries": { "total_yield": [...] } },
//!   "window": { "timeSeries": { "total_yield": [...] } }
//! }
//! ```
//!
//! Recorded timestamps are served as-is whatever window is asked for.

use std::collections::BTreeMap;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use solar_core::aggregator::{Interval, QueryWindow};
use solar_core::collaborators::{Credential, PortalClient, PortalError};
use solar_core::model::{Metric, Sample, SeriesSet, TimeSeries};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartResponse {
    #[serde(default)]
    time_series: BTreeMap<String, Vec<Sample>>,
}

#[derive(Debug, Deserialize)]
struct Recording {
    power: ChartResponse,
    today: ChartResponse,
    window: ChartResponse,
}

pub struct JsonPortal {
    power: SeriesSet,
    today: SeriesSet,
    window: SeriesSet,
}

impl JsonPortal {
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| format!("reading {}: {err}", path.display()))?;
        let portal = Self::from_json(&text)
            .map_err(|err| format!("parsing {}: {err}", path.display()))?;
        info!("Loaded recorded series from {}", path.display());
        Ok(portal)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let recording: Recording = serde_json::from_str(text)?;
        Ok(Self {
            power: series_set(recording.power),
            today: series_set(recording.today),
            window: series_set(recording.window),
        })
    }

    fn set_for(&self, window: &QueryWindow) -> &SeriesSet {
        match window.interval {
            Interval::TenMinutes => &self.power,
            Interval::Day if window.start_date() == window.end_date() => &self.today,
            Interval::Day => &self.window,
        }
    }
}

impl PortalClient for JsonPortal {
    fn fetch_series(
        &mut self,
        _credential: &Credential,
        metric: Metric,
        window: &QueryWindow,
    ) -> Result<Option<TimeSeries>, PortalError> {
        Ok(self.set_for(window).get(&metric).cloned())
    }
}

fn series_set(response: ChartResponse) -> SeriesSet {
    let mut set = SeriesSet::new();
    for (name, samples) in response.time_series {
        let Some(metric) = metric_named(&name) else {
            warn!("Ignoring unknown series {}", name);
            continue;
        };
        set.insert(metric, TimeSeries::new(metric, samples));
    }
    set
}

fn metric_named(name: &str) -> Option<Metric> {
    Metric::POWER
        .into_iter()
        .chain(Metric::GENERATION_YIELD)
        .chain(Metric::CONSUMPTION_YIELD)
        .find(|metric| metric.as_str() == name)
}
