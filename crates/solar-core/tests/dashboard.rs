//! Dashboard behaviour driven through in-memory collaborators

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use solar_core::aggregator::{Interval, QueryWindow};
use solar_core::canvas::{GrayCanvas, MonoCanvas};
use solar_core::collaborators::{
    AuthError, CanvasArchive, Credential, DisplaySink, PortalClient, PortalError, SinkError,
    TokenProvider,
};
use solar_core::config::DashboardConfig;
use solar_core::dashboard::{Button, Dashboard};
use solar_core::model::{Metric, Sample, ScreenId, TimeSeries};
use solar_core::render::RenderedScreen;

struct StaticTokens;

impl TokenProvider for StaticTokens {
    fn token(&mut self) -> Result<Credential, AuthError> {
        Ok(Credential::new("test-token"))
    }
}

/// Six samples per query; fails while `failing` is set
#[derive(Clone, Default)]
struct FakePortal {
    failing: Rc<Cell<bool>>,
    calls: Rc<Cell<usize>>,
}

impl PortalClient for FakePortal {
    fn fetch_series(
        &mut self,
        _credential: &Credential,
        metric: Metric,
        window: &QueryWindow,
    ) -> Result<Option<TimeSeries>, PortalError> {
        self.calls.set(self.calls.get() + 1);
        if self.failing.get() {
            return Err(PortalError::Unauthorized);
        }

        let step = match window.interval {
            Interval::TenMinutes => TimeDelta::minutes(10),
            Interval::Day => TimeDelta::days(1),
        };
        let value = match metric {
            Metric::PvConsumptionPower => 800.0,
            Metric::GridFeedinPower => 1_200.0,
            Metric::HomeConsumptionPower => 1_000.0,
            _ => 500.0,
        };
        let samples = (0..6)
            .map(|i| Sample::new(window.from + step * i, value))
            .collect();

        Ok(Some(TimeSeries::new(metric, samples)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shown {
    Mono,
    Gray,
}

#[derive(Clone, Default)]
struct FakeDisplay {
    shown: Rc<RefCell<Vec<Shown>>>,
    broken: bool,
}

impl FakeDisplay {
    fn check(&self) -> Result<(), SinkError> {
        if self.broken {
            Err(SinkError::Hardware {
                reason: "busy pin stuck".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl DisplaySink for FakeDisplay {
    fn render(&mut self, _canvas: &MonoCanvas) -> Result<(), SinkError> {
        self.check()?;
        self.shown.borrow_mut().push(Shown::Mono);
        Ok(())
    }

    fn render_gray4(&mut self, _canvas: &GrayCanvas) -> Result<(), SinkError> {
        self.check()?;
        self.shown.borrow_mut().push(Shown::Gray);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct MemoryArchive {
    saved: Rc<RefCell<Vec<String>>>,
}

impl CanvasArchive for MemoryArchive {
    fn save(&mut self, name: &str, _screen: &RenderedScreen) -> Result<(), SinkError> {
        self.saved.borrow_mut().push(name.to_string());
        Ok(())
    }
}

type TestDashboard = Dashboard<StaticTokens, FakePortal, FakeDisplay, MemoryArchive>;

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap()
}

fn fakes() -> (FakePortal, FakeDisplay, MemoryArchive) {
    Default::default()
}

fn dashboard(portal: &FakePortal, display: &FakeDisplay, archive: &MemoryArchive) -> TestDashboard {
    Dashboard::new(
        DashboardConfig::default(),
        StaticTokens,
        portal.clone(),
        display.clone(),
        archive.clone(),
    )
}

#[test]
fn test_start_shows_loading_then_realtime() {
    let (portal, display, archive) = fakes();
    let mut dash = dashboard(&portal, &display, &archive);

    dash.start(at(12, 0));

    assert_eq!(*display.shown.borrow(), vec![Shown::Mono, Shown::Mono]);
    assert_eq!(dash.current_screen(), ScreenId::Realtime);
    assert!(dash.cache().freshness(at(12, 0)));
    assert_eq!(portal.calls.get(), 16);
}

#[test]
fn test_button_four_refreshes_and_shows_timeline() {
    let (portal, display, archive) = fakes();
    let mut dash = dashboard(&portal, &display, &archive);
    dash.start(at(12, 0));

    dash.press(Button::Four, at(12, 1));

    assert_eq!(portal.calls.get(), 32);
    assert_eq!(dash.current_screen(), ScreenId::Timeline);
    assert_eq!(display.shown.borrow().last(), Some(&Shown::Gray));
}

#[test]
fn test_screen_buttons_reuse_cached_data() {
    let (portal, display, archive) = fakes();
    let mut dash = dashboard(&portal, &display, &archive);
    dash.start(at(12, 0));

    dash.press(Button::Two, at(12, 1));
    dash.press(Button::Three, at(12, 2));
    dash.press(Button::Two, at(12, 3));

    assert_eq!(portal.calls.get(), 16);
    assert_eq!(dash.current_screen(), ScreenId::Daily);
    assert_eq!(display.shown.borrow().len(), 5);
}

#[test]
fn test_tick_refreshes_stale_data_only() {
    let (portal, display, archive) = fakes();
    let mut dash = dashboard(&portal, &display, &archive);
    dash.start(at(12, 0));

    assert!(!dash.tick(at(12, 10)));
    assert_eq!(portal.calls.get(), 16);

    assert!(dash.tick(at(12, 16)));
    assert_eq!(portal.calls.get(), 32);
    assert_eq!(dash.current_screen(), ScreenId::Realtime);
}

#[test]
fn test_inactivity_returns_to_realtime() {
    let (portal, display, archive) = fakes();
    let mut dash = dashboard(&portal, &display, &archive);
    dash.start(at(12, 0));
    dash.press(Button::Three, at(12, 0));

    dash.tick(at(12, 14));
    assert_eq!(dash.current_screen(), ScreenId::Monthly);

    dash.tick(at(12, 31));
    assert_eq!(dash.current_screen(), ScreenId::Realtime);
}

#[test]
fn test_failed_refresh_keeps_stale_bundle() {
    let (portal, display, archive) = fakes();
    let mut dash = dashboard(&portal, &display, &archive);
    dash.start(at(12, 0));
    let before = dash.cache().bundle().cloned();

    portal.failing.set(true);
    dash.press(Button::Four, at(12, 5));

    assert_eq!(dash.cache().bundle().cloned(), before);
    assert!(!dash.cache().freshness(at(12, 5)));
    assert_eq!(display.shown.borrow().last(), Some(&Shown::Gray));
}

#[test]
fn test_no_data_shows_loading_screen() {
    let (portal, display, archive) = fakes();
    portal.failing.set(true);
    let mut dash = dashboard(&portal, &display, &archive);

    dash.start(at(12, 0));
    dash.press(Button::Two, at(12, 1));

    assert!(dash.cache().bundle().is_none());
    assert!(display.shown.borrow().iter().all(|shown| *shown == Shown::Mono));
    assert_eq!(display.shown.borrow().len(), 3);
}

#[test]
fn test_display_failure_falls_back_to_archive() {
    let portal = FakePortal::default();
    let display = FakeDisplay {
        broken: true,
        ..Default::default()
    };
    let archive = MemoryArchive::default();
    let mut dash = dashboard(&portal, &display, &archive);

    dash.start(at(12, 0));
    dash.press(Button::Four, at(12, 1));

    assert!(display.shown.borrow().is_empty());
    assert_eq!(*archive.saved.borrow(), vec!["loading", "realtime", "timeline"]);
}

#[test]
fn test_restored_fresh_bundle_skips_fetch() {
    let (portal, display, archive) = fakes();
    let mut seeded = dashboard(&portal, &display, &archive);
    seeded.start(at(12, 0));
    let bundle = seeded.cache().bundle().cloned().unwrap();

    let fresh_portal = FakePortal::default();
    let mut dash = dashboard(&fresh_portal, &display, &archive);
    dash.restore(bundle, at(12, 0));
    dash.start(at(12, 5));

    assert_eq!(fresh_portal.calls.get(), 0);
    assert_eq!(dash.current_screen(), ScreenId::Realtime);
}

#[test]
fn test_failed_refresh_backs_off_until_retry() {
    let (portal, display, archive) = fakes();
    let mut dash = dashboard(&portal, &display, &archive);
    dash.start(at(12, 0));
    portal.failing.set(true);

    assert!(!dash.tick(at(12, 16)));
    let after_failure = portal.calls.get();
    assert_eq!(dash.retry_at(), Some(at(12, 17)));

    assert!(!dash.tick(at(12, 16)));
    assert_eq!(portal.calls.get(), after_failure);

    assert!(!dash.tick(at(12, 17)));
    assert!(portal.calls.get() > after_failure);
    assert_eq!(dash.retry_at(), Some(at(12, 19)));

    portal.failing.set(false);
    let before_press = portal.calls.get();
    dash.press(Button::Four, at(12, 18));
    assert_eq!(portal.calls.get(), before_press + 16);
    assert_eq!(dash.retry_at(), None);
    assert!(dash.cache().freshness(at(12, 18)));
}
