//! Screen rendering entry point
//!
//! [`Renderer::render_screen`] dispatches a [`ScreenId`] to its screen and
//! draws it onto a fresh canvas. Nothing is shared between calls, so the
//! same bundle always renders to byte-identical canvases.

use alloc::vec::Vec;
use log::debug;

use crate::canvas::{Canvas, GrayCanvas, MonoCanvas};
use crate::model::{ScreenBundle, ScreenId};
use crate::pages::{
    LoadingScreen, PeriodKind, PeriodScreen, RealtimeScreen, Screen, TimelineScreen,
};

/// Canvas produced for one screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedScreen {
    /// 1-bit stat or loading screen
    Mono(MonoCanvas),
    /// 4-level grayscale timeline chart
    Gray4(GrayCanvas),
}

impl RenderedScreen {
    pub fn is_grayscale(&self) -> bool {
        matches!(self, Self::Gray4(_))
    }

    /// Panel-ready bytes, rows packed most significant bits first
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        match self {
            Self::Mono(canvas) => canvas.to_packed_bytes(),
            Self::Gray4(canvas) => canvas.to_packed_bytes(),
        }
    }
}

/// Stateless renderer for all dashboard screens
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Render one screen of `bundle`
    pub fn render_screen(&self, id: ScreenId, bundle: &ScreenBundle) -> RenderedScreen {
        match id {
            ScreenId::Realtime => RenderedScreen::Mono(draw(&RealtimeScreen::new(&bundle.realtime))),
            ScreenId::Daily => RenderedScreen::Mono(draw(&PeriodScreen::new(
                &bundle.daily,
                PeriodKind::Daily,
            ))),
            ScreenId::Monthly => RenderedScreen::Mono(draw(&PeriodScreen::new(
                &bundle.monthly,
                PeriodKind::Monthly,
            ))),
            ScreenId::Timeline => {
                RenderedScreen::Gray4(draw(&TimelineScreen::new(&bundle.timeline)))
            }
        }
    }

    /// Render the loading screen with `message`
    pub fn render_loading(&self, message: &str) -> MonoCanvas {
        draw(&LoadingScreen::new(message))
    }
}

fn draw<S: Screen>(screen: &S) -> Canvas<S::Color> {
    let mut canvas = Canvas::new();
    let Ok(()) = screen.draw_screen(&mut canvas);
    debug!("Rendered {} screen", screen.name());
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DualSeriesTimeline, Metric, PeriodSummary, RealtimeSnapshot, Sample, TimeSeries,
    };
    use crate::ui::styling::{GRAY_DARK, INK, PAPER};
    use alloc::string::ToString;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    fn power(metric: Metric, watts: &[f64]) -> TimeSeries {
        let samples = watts
            .iter()
            .enumerate()
            .map(|(i, w)| Sample::new(at(6 + i as u32 / 6, (i as u32 % 6) * 10), *w))
            .collect();
        TimeSeries::new(metric, samples)
    }

    fn summary(label: &str, average: Option<f64>) -> PeriodSummary {
        PeriodSummary {
            label: label.to_string(),
            total_generation_wh: 12_400.0,
            fed_to_grid_wh: 8_000.0,
            self_consumed_wh: 4_400.0,
            total_consumption_wh: 10_000.0,
            from_solar_wh: 4_400.0,
            from_grid_wh: 5_600.0,
            self_sufficiency_pct: 44.0,
            daily_average_wh: average,
        }
    }

    fn bundle(consumption: &[f64]) -> ScreenBundle {
        ScreenBundle {
            realtime: RealtimeSnapshot {
                timestamp: at(13, 5),
                solar_power_w: 3_200.0,
                consumption_w: 900.0,
                grid_feedin_w: 2_300.0,
                grid_import_w: 0.0,
                grid_net_w: 2_300.0,
            },
            daily: summary("15.06.2024", None),
            monthly: summary("16.05 - 15.06", Some(413.0)),
            timeline: DualSeriesTimeline {
                date_label: "15.06.2024".to_string(),
                generation: power(
                    Metric::PvConsumptionPower,
                    &[0.0, 400.0, 1_200.0, 2_500.0, 3_100.0, 2_000.0, 600.0, 0.0],
                ),
                consumption: power(Metric::HomeConsumptionPower, consumption),
                daily_total_wh: 12_400.0,
            },
        }
    }

    #[test]
    fn test_screen_pixel_models() {
        let renderer = Renderer::new();
        let bundle = bundle(&[300.0; 8]);

        for id in ScreenId::ALL {
            let screen = renderer.render_screen(id, &bundle);
            assert_eq!(screen.is_grayscale(), id.is_grayscale());
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let renderer = Renderer::new();
        let bundle = bundle(&[300.0, 500.0, 800.0, 400.0, 900.0, 1_500.0, 700.0, 300.0]);

        for id in ScreenId::ALL {
            let first = renderer.render_screen(id, &bundle).to_packed_bytes();
            let second = renderer.render_screen(id, &bundle).to_packed_bytes();
            assert_eq!(first, second, "{} differs between renders", id.name());
        }
    }

    #[test]
    fn test_stat_screens_draw_ink() {
        let renderer = Renderer::new();
        let bundle = bundle(&[]);

        for id in [ScreenId::Realtime, ScreenId::Daily, ScreenId::Monthly] {
            let RenderedScreen::Mono(canvas) = renderer.render_screen(id, &bundle) else {
                panic!("{} should be 1-bit", id.name());
            };
            assert!(canvas.count(INK) > 500);
            // separator rule under the title
            assert_eq!(canvas.pixel(131, 25), Some(INK));
        }
    }

    #[test]
    fn test_timeline_without_consumption_still_fills() {
        let renderer = Renderer::new();

        let RenderedScreen::Gray4(canvas) = renderer.render_screen(ScreenId::Timeline, &bundle(&[]))
        else {
            panic!("timeline should be grayscale");
        };
        assert!(canvas.count(GRAY_DARK) > 0);
    }

    #[test]
    fn test_loading_screen() {
        let canvas = Renderer::new().render_loading("Loading data...");

        assert!(canvas.count(INK) > 0);
        // progress frame border
        assert_eq!(canvas.pixel(130, 145), Some(INK));
        assert_eq!(canvas.pixel(130, 150), Some(PAPER));
    }
}
