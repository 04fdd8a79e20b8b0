use serde::{Deserialize, Serialize};

/// Default age after which cached portal data is refetched
pub const DEFAULT_DATA_CACHE_MINUTES: u32 = 15;

/// Default inactivity period before the dashboard returns to the realtime screen
pub const DEFAULT_SCREEN_TIMEOUT_MINUTES: u32 = 30;

/// Default length of the rolling statistics window
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Dashboard tuning knobs
///
/// Every field has a default so partial configurations deserialize.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Minutes before a fetched bundle is considered stale
    pub data_cache_minutes: u32,
    /// Minutes without a button press before returning to the realtime screen
    pub screen_timeout_minutes: u32,
    /// Days covered by the rolling ("monthly") summary
    pub window_days: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_cache_minutes: DEFAULT_DATA_CACHE_MINUTES,
            screen_timeout_minutes: DEFAULT_SCREEN_TIMEOUT_MINUTES,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl DashboardConfig {
    /// Maximum bundle age as a time delta
    pub fn data_max_age(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::minutes(i64::from(self.data_cache_minutes))
    }

    /// Inactivity timeout as a time delta
    pub fn screen_timeout(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::minutes(i64::from(self.screen_timeout_minutes))
    }

    /// Window length used for averaging, never zero
    pub fn effective_window_days(&self) -> u32 {
        self.window_days.max(1)
    }
}
