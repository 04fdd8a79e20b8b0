//! Desktop simulator for the solar e-paper dashboard.
//!
//! Drives the solar-core `Dashboard` with a synthetic (or recorded) portal and
//! shows the panel in an SDL2 window via `embedded-graphics-simulator`.
//!
//! # Key bindings
//!
//! | Key | Action                      |
//! |-----|-----------------------------|
//! | 1   | Realtime power flows        |
//! | 2   | Today's energy totals       |
//! | 3   | Rolling-window totals       |
//! | 4   | Refresh data, show timeline |
//! | Q   | Quit                        |
//!
//! With `--export <dir>` no window is opened: every screen is rendered once
//! and written to `<dir>` as PNG.

mod cli;
mod json_portal;
mod mock_portal;
mod panel;
mod settings;
mod snapshot_file;

use std::cell::RefCell;
use std::error::Error;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use clap::Parser;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorEvent, Window, sdl2::Keycode};
use log::{error, info};

use solar_core::aggregator::{Aggregator, QueryWindow};
use solar_core::collaborators::{
    CanvasArchive, Credential, DisplaySink, PortalClient, PortalError, TokenProvider,
};
use solar_core::dashboard::{Button, Dashboard};
use solar_core::model::{Metric, ScreenId, TimeSeries};
use solar_core::pages::LOADING_MESSAGE;
use solar_core::render::{RenderedScreen, Renderer};
use solar_core::snapshot::Snapshot;
use solar_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

use cli::CliOptions;
use json_portal::JsonPortal;
use mock_portal::{MockPortal, StaticTokens};
use panel::{PngArchive, SharedFrame, WindowPanel, new_frame};
use settings::Settings;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 3;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// How often the dashboard checks for stale data and inactivity.
const TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Credential handed to the simulated portals.
const SIMULATOR_TOKEN: &str = "simulator";

// ---------------------------------------------------------------------------
// Portal selection
// ---------------------------------------------------------------------------

/// Where the simulated portal data comes from
enum PortalSource {
    Mock(MockPortal),
    Recorded(JsonPortal),
}

impl PortalSource {
    fn open(series: Option<&Path>) -> Result<Self, String> {
        match series {
            Some(path) => Ok(Self::Recorded(JsonPortal::load(path)?)),
            None => Ok(Self::Mock(MockPortal::new())),
        }
    }
}

impl PortalClient for PortalSource {
    fn fetch_series(
        &mut self,
        credential: &Credential,
        metric: Metric,
        window: &QueryWindow,
    ) -> Result<Option<TimeSeries>, PortalError> {
        match self {
            Self::Mock(portal) => portal.fetch_series(credential, metric, window),
            Self::Recorded(portal) => portal.fetch_series(credential, metric, window),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Map an SDL keycode to one of the four panel buttons.
fn keycode_to_button(keycode: Keycode) -> Option<Button> {
    match keycode {
        Keycode::Num1 | Keycode::Kp1 => Some(Button::One),
        Keycode::Num2 | Keycode::Kp2 => Some(Button::Two),
        Keycode::Num3 | Keycode::Kp3 => Some(Button::Three),
        Keycode::Num4 | Keycode::Kp4 => Some(Button::Four),
        _ => None,
    }
}

/// Write the cached bundle to disk if it changed since `saved_at`.
fn persist<T, P, S, F>(
    dashboard: &Dashboard<T, P, S, F>,
    path: &Path,
    saved_at: Option<NaiveDateTime>,
) -> Option<NaiveDateTime>
where
    T: TokenProvider,
    P: PortalClient,
    S: DisplaySink,
    F: CanvasArchive,
{
    let cache = dashboard.cache();
    let (Some(bundle), Some(fetched_at)) = (cache.bundle(), cache.fetched_at()) else {
        return saved_at;
    };
    if saved_at == Some(fetched_at) {
        return saved_at;
    }

    match snapshot_file::save(path, &Snapshot::new(bundle.clone(), fetched_at)) {
        Ok(()) => info!("Saved snapshot to {}", path.display()),
        Err(err) => error!("Saving snapshot failed: {}", err),
    }
    Some(fetched_at)
}

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

/// Fetch once and write every screen as PNG.
fn export(
    settings: &Settings,
    mut portal: PortalSource,
    dir: &Path,
    scale: u32,
) -> Result<(), Box<dyn Error>> {
    let mut tokens = StaticTokens::new(SIMULATOR_TOKEN);
    let bundle = Aggregator::new(settings.dashboard)
        .build(&mut tokens, &mut portal, now())
        .map_err(|err| err.to_string())?;

    let renderer = Renderer::new();
    let mut archive = PngArchive::new(dir, scale);

    let loading = RenderedScreen::Mono(renderer.render_loading(LOADING_MESSAGE));
    archive
        .save("loading", &loading)
        .map_err(|err| err.to_string())?;

    for id in ScreenId::ALL {
        let screen = renderer.render_screen(id, &bundle);
        archive
            .save(id.name(), &screen)
            .map_err(|err| err.to_string())?;
    }

    info!("Exported {} screens to {}", ScreenId::ALL.len() + 1, dir.display());
    Ok(())
}

/// Interactive SDL window.
fn run_window(settings: &Settings, portal: PortalSource, scale: u32) -> Result<(), Box<dyn Error>> {
    let frame: SharedFrame = Rc::new(RefCell::new(new_frame()));
    let mut dashboard = Dashboard::new(
        settings.dashboard,
        StaticTokens::new(SIMULATOR_TOKEN),
        portal,
        WindowPanel::new(Rc::clone(&frame)),
        PngArchive::new(&settings.output_dir, scale),
    );

    let snapshot_path = settings.snapshot_path();
    let mut saved_at = None;
    if let Some(snapshot) = snapshot_file::load(&snapshot_path) {
        saved_at = Some(snapshot.fetched_at);
        dashboard.restore(snapshot.bundle, snapshot.fetched_at);
    }

    let output_settings = OutputSettingsBuilder::new().scale(scale).build();
    let mut window = Window::new("Solar Dashboard Simulator", &output_settings);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    dashboard.start(now());
    saved_at = persist(&dashboard, &snapshot_path, saved_at);
    window.update(&*frame.borrow());

    let mut last_tick = Instant::now();

    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }

                    if let Some(button) = keycode_to_button(keycode) {
                        dashboard.press(button, now());
                    }
                }

                _ => {}
            }
        }

        // --- Housekeeping -------------------------------------------------
        if last_tick.elapsed() >= TICK_INTERVAL {
            dashboard.tick(now());
            last_tick = Instant::now();
        }
        saved_at = persist(&dashboard, &snapshot_path, saved_at);

        window.update(&*frame.borrow());

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!(
        "Simulator exiting after {} panel refreshes",
        dashboard.display().refreshes()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn run(options: CliOptions) -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env()?;

    let scale = options.scale.unwrap_or(WINDOW_SCALE);
    let series = options.series.or_else(|| settings.series_file.clone());
    let portal = PortalSource::open(series.as_deref())?;

    info!("Starting solar dashboard simulator");
    info!(
        "Display: {}×{} (scale {}×), cache {} min, window {} days",
        DISPLAY_WIDTH_PX,
        DISPLAY_HEIGHT_PX,
        scale,
        settings.dashboard.data_cache_minutes,
        settings.dashboard.effective_window_days()
    );

    match options.export {
        Some(dir) => export(&settings, portal, &dir, scale),
        None => {
            info!("Keys: 1=Realtime  2=Today  3=Period  4=Refresh+Timeline  Q=Quit");
            run_window(&settings, portal, scale)
        }
    }
}

fn main() {
    env_logger::init();

    let options = CliOptions::parse();
    if let Err(err) = run(options) {
        error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_map_to_buttons() {
        assert_eq!(keycode_to_button(Keycode::Num1), Some(Button::One));
        assert_eq!(keycode_to_button(Keycode::Kp4), Some(Button::Four));
        assert_eq!(keycode_to_button(Keycode::Num5), None);
    }

    #[test]
    fn test_default_source_is_mock() {
        let source = PortalSource::open(None).expect("mock always opens");
        assert!(matches!(source, PortalSource::Mock(_)));
    }

    #[test]
    fn test_missing_recording_is_an_error() {
        assert!(PortalSource::open(Some(Path::new("/nonexistent/series.json"))).is_err());
    }
}
