//! Dashboard screens
//!
//! Each screen borrows the record it shows and draws itself onto a target of
//! its pixel model: 1-bit for the stat screens and the loading screen, 4-level
//! grayscale for the timeline chart. Screens hold no state between draws, so
//! drawing the same record twice yields the same pixels.

mod constants;
mod loading;
mod period;
mod realtime;
mod timeline;

pub use loading::{LOADING_MESSAGE, LoadingScreen, NO_DATA_MESSAGE};
pub use period::{PeriodKind, PeriodScreen};
pub use realtime::{GridStatus, RealtimeScreen};
pub use timeline::TimelineScreen;

use embedded_graphics::prelude::*;

use crate::canvas::PanelColor;

/// A full-panel layout drawn from one record
pub trait Screen {
    /// Pixel model the screen is drawn in
    type Color: PanelColor;

    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Draw the whole screen onto a blank target
    fn draw_screen<D: DrawTarget<Color = Self::Color>>(&self, target: &mut D) -> Result<(), D::Error>;
}
