//! Statistics shown under the timeline chart

use heapless::String;

use super::constants::MAX_STATS_LENGTH;
use crate::ui::components::format_label;

/// Summary of one chart series
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeriesStats {
    /// Largest value in kilowatts
    pub max: f64,
    /// Mean value in kilowatts
    pub avg: f64,
    /// Number of samples
    pub count: usize,
}

impl SeriesStats {
    /// `None` for an empty series
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let max = values.iter().copied().fold(f64::MIN, f64::max);
        let sum: f64 = values.iter().sum();

        Some(Self {
            max,
            avg: sum / values.len() as f64,
            count: values.len(),
        })
    }

    /// `max X.XX kW  avg X.XX kW  day X.X kWh`
    pub fn summary_line(&self, daily_total_wh: f64) -> String<MAX_STATS_LENGTH> {
        format_label(format_args!(
            "max {:.2} kW  avg {:.2} kW  day {:.1} kWh",
            self.max,
            self.avg,
            daily_total_wh / 1000.0
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_of_series() {
        let stats = SeriesStats::from_values(&[1.0, 3.0, 2.0]).unwrap();

        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.avg, 2.0);
        assert_eq!(stats.count, 3);
        assert_eq!(SeriesStats::from_values(&[]), None);
    }

    #[test]
    fn test_summary_line() {
        let stats = SeriesStats::from_values(&[0.5, 1.5]).unwrap();
        assert_eq!(
            stats.summary_line(12_400.0).as_str(),
            "max 1.50 kW  avg 1.00 kW  day 12.4 kWh"
        );
    }
}
