//! Button-driven dashboard controller
//!
//! Ties the collaborators, the [`Aggregator`], the [`Renderer`] and the
//! [`Cache`] together:
//!
//! 1. **`start`**: loading screen, first fetch, realtime screen.
//! 2. **`press`**: one of four hardware buttons selects a screen; the fourth
//!    also forces a refresh.
//! 3. **`tick`**: called periodically; refetches stale data and falls back to
//!    the realtime screen after a period without button presses.
//!
//! A failed refresh keeps the previous bundle on screen and `tick` waits
//! before trying again, doubling the wait after each consecutive failure up
//! to the cache age. A canvas the display rejects is written to the
//! [`CanvasArchive`] instead.

use chrono::{NaiveDateTime, TimeDelta};
use log::{error, info, warn};

use crate::aggregator::{AggregationError, Aggregator};
use crate::cache::Cache;
use crate::collaborators::{CanvasArchive, DisplaySink, PortalClient, TokenProvider};
use crate::config::DashboardConfig;
use crate::model::{ScreenBundle, ScreenId};
use crate::pages::{LOADING_MESSAGE, NO_DATA_MESSAGE};
use crate::render::{RenderedScreen, Renderer};

/// Name the loading screen is archived under
const LOADING_SCREEN_NAME: &str = "loading";

/// Wait after the first failed refresh before `tick` retries
const RETRY_BASE_MINUTES: i64 = 1;

/// Largest doubling step applied to the retry wait
const MAX_RETRY_SHIFT: u32 = 10;

/// The four keys next to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Realtime screen
    One,
    /// Daily screen
    Two,
    /// Rolling-window screen
    Three,
    /// Refresh data and show the timeline
    Four,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::One, Button::Two, Button::Three, Button::Four];

    /// Button by its printed number (1-4)
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            _ => None,
        }
    }

    /// Screen the button selects
    pub const fn screen(self) -> ScreenId {
        match self {
            Self::One => ScreenId::Realtime,
            Self::Two => ScreenId::Daily,
            Self::Three => ScreenId::Monthly,
            Self::Four => ScreenId::Timeline,
        }
    }

    /// Whether the button forces a data refresh before showing its screen
    pub const fn forces_refresh(self) -> bool {
        matches!(self, Self::Four)
    }
}

/// Dashboard state machine over its collaborators
pub struct Dashboard<T, P, S, F> {
    config: DashboardConfig,
    tokens: T,
    portal: P,
    display: S,
    archive: F,
    aggregator: Aggregator,
    renderer: Renderer,
    cache: Cache,
    current: ScreenId,
    last_interaction: Option<NaiveDateTime>,
    failures: u32,
    retry_at: Option<NaiveDateTime>,
}

impl<T, P, S, F> Dashboard<T, P, S, F>
where
    T: TokenProvider,
    P: PortalClient,
    S: DisplaySink,
    F: CanvasArchive,
{
    pub fn new(config: DashboardConfig, tokens: T, portal: P, display: S, archive: F) -> Self {
        Self {
            config,
            tokens,
            portal,
            display,
            archive,
            aggregator: Aggregator::new(config),
            renderer: Renderer::new(),
            cache: Cache::new(config.data_max_age()),
            current: ScreenId::Realtime,
            last_interaction: None,
            failures: 0,
            retry_at: None,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn current_screen(&self) -> ScreenId {
        self.current
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn display(&self) -> &S {
        &self.display
    }

    pub fn archive(&self) -> &F {
        &self.archive
    }

    /// Earliest time `tick` tries again after a failed refresh
    pub fn retry_at(&self) -> Option<NaiveDateTime> {
        self.retry_at
    }

    /// Seed the cache with a previously persisted bundle
    ///
    /// The bundle counts as fresh only while it is younger than the
    /// configured cache age.
    pub fn restore(&mut self, bundle: ScreenBundle, fetched_at: NaiveDateTime) {
        info!("Restored bundle fetched at {}", fetched_at);
        self.cache.store(bundle, fetched_at);
    }

    /// Boot sequence: loading screen, initial fetch, realtime screen
    pub fn start(&mut self, now: NaiveDateTime) {
        let loading = RenderedScreen::Mono(self.renderer.render_loading(LOADING_MESSAGE));
        present(&mut self.display, &mut self.archive, LOADING_SCREEN_NAME, &loading);

        if !self.cache.freshness(now) {
            let _ = self.refresh(now);
        }

        self.last_interaction = Some(now);
        self.show(ScreenId::Realtime);
    }

    /// Handle a button press
    pub fn press(&mut self, button: Button, now: NaiveDateTime) {
        info!("Button {:?} pressed: {}", button, button.screen().name());
        self.last_interaction = Some(now);

        if button.forces_refresh() {
            let _ = self.refresh(now);
        }

        self.show(button.screen());
    }

    /// Periodic housekeeping. Returns `true` if the display was redrawn.
    pub fn tick(&mut self, now: NaiveDateTime) -> bool {
        let mut redraw = false;

        let waiting = self.retry_at.is_some_and(|at| now < at);
        if !self.cache.freshness(now) && !waiting {
            info!("Data is stale, refreshing");
            redraw = self.refresh(now).is_ok();
        }

        let idle = self
            .last_interaction
            .is_some_and(|last| now - last > self.config.screen_timeout());
        if idle && self.current != ScreenId::Realtime {
            info!("No input for {} min, returning to realtime", self.config.screen_timeout_minutes);
            self.current = ScreenId::Realtime;
            redraw = true;
        }

        if redraw {
            self.show(self.current);
        }

        redraw
    }

    /// Fetch and cache a new bundle.
    ///
    /// On failure the previous bundle stays available, marked stale.
    pub fn refresh(&mut self, now: NaiveDateTime) -> Result<(), AggregationError> {
        match self
            .aggregator
            .build(&mut self.tokens, &mut self.portal, now)
        {
            Ok(bundle) => {
                info!("Refreshed data at {}", now);
                self.cache.store(bundle, now);
                self.failures = 0;
                self.retry_at = None;
                Ok(())
            }
            Err(err) => {
                self.failures = self.failures.saturating_add(1);
                let delay = retry_delay(self.failures, self.config.data_max_age());
                self.retry_at = Some(now + delay);
                error!(
                    "Refresh failed ({} in a row), retrying in {} s: {}",
                    self.failures,
                    delay.num_seconds(),
                    err
                );
                self.cache.invalidate();
                Err(err)
            }
        }
    }

    /// Render (or reuse) `id` and push it to the display
    fn show(&mut self, id: ScreenId) {
        self.current = id;

        if self.cache.rendered(id).is_none() {
            let Some(bundle) = self.cache.bundle() else {
                warn!("No data to show {} screen", id.name());
                let canvas = self.renderer.render_loading(NO_DATA_MESSAGE);
                present(
                    &mut self.display,
                    &mut self.archive,
                    LOADING_SCREEN_NAME,
                    &RenderedScreen::Mono(canvas),
                );
                return;
            };
            let screen = self.renderer.render_screen(id, bundle);
            self.cache.store_rendered(id, screen);
        }

        if let Some(screen) = self.cache.rendered(id) {
            present(&mut self.display, &mut self.archive, id.name(), screen);
        }
    }
}

/// Wait before the next automatic refresh after `failures` consecutive failures
fn retry_delay(failures: u32, cap: TimeDelta) -> TimeDelta {
    let shift = failures.saturating_sub(1).min(MAX_RETRY_SHIFT);
    let delay = TimeDelta::minutes(RETRY_BASE_MINUTES << shift);
    delay.min(cap).max(TimeDelta::minutes(RETRY_BASE_MINUTES))
}

/// Send a canvas to the display, falling back to the archive
fn present<S: DisplaySink, F: CanvasArchive>(
    display: &mut S,
    archive: &mut F,
    name: &str,
    screen: &RenderedScreen,
) {
    let result = match screen {
        RenderedScreen::Mono(canvas) => display.render(canvas),
        RenderedScreen::Gray4(canvas) => display.render_gray4(canvas),
    };

    let Err(err) = result else {
        info!("Displayed {} screen", name);
        return;
    };

    warn!("Display failed ({}), archiving {} screen", err, name);
    if let Err(err) = archive.save(name, screen) {
        error!("Archiving {} screen failed: {}", name, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_map_to_screens() {
        assert_eq!(Button::from_number(1).map(Button::screen), Some(ScreenId::Realtime));
        assert_eq!(Button::from_number(3).map(Button::screen), Some(ScreenId::Monthly));
        assert_eq!(Button::from_number(5), None);
        assert!(Button::Four.forces_refresh());
        assert!(!Button::Two.forces_refresh());
    }

    #[test]
    fn test_retry_delay_doubles_up_to_cap() {
        let cap = TimeDelta::minutes(15);
        assert_eq!(retry_delay(1, cap), TimeDelta::minutes(1));
        assert_eq!(retry_delay(2, cap), TimeDelta::minutes(2));
        assert_eq!(retry_delay(4, cap), TimeDelta::minutes(8));
        assert_eq!(retry_delay(5, cap), cap);
        assert_eq!(retry_delay(u32::MAX, cap), cap);
        assert_eq!(retry_delay(3, TimeDelta::zero()), TimeDelta::minutes(1));
    }
}
