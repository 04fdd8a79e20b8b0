//! Desktop stand-ins for the e-paper panel and the file fallback
//!
//! Canvases are copied into an RGB `SimulatorDisplay` which the SDL window
//! shows; the archive writes the same frame to a PNG file.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use embedded_graphics::pixelcolor::{BinaryColor, Gray2, GrayColor, Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use log::{debug, info};

use solar_core::canvas::{Canvas, GrayCanvas, MonoCanvas, PanelColor};
use solar_core::collaborators::{CanvasArchive, DisplaySink, SinkError};
use solar_core::render::RenderedScreen;
use solar_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

/// RGB frame shown in the simulator window
pub type Frame = SimulatorDisplay<Rgb565>;

/// Frame shared between the display sink and the window loop
pub type SharedFrame = Rc<RefCell<Frame>>;

pub fn new_frame() -> Frame {
    SimulatorDisplay::new(Size::new(
        u32::from(DISPLAY_WIDTH_PX),
        u32::from(DISPLAY_HEIGHT_PX),
    ))
}

/// How a panel color looks on screen
pub trait PanelRgb: PanelColor {
    fn rgb(self) -> Rgb565;
}

impl PanelRgb for BinaryColor {
    fn rgb(self) -> Rgb565 {
        match self {
            BinaryColor::On => Rgb565::BLACK,
            BinaryColor::Off => Rgb565::WHITE,
        }
    }
}

impl PanelRgb for Gray2 {
    fn rgb(self) -> Rgb565 {
        let v = self.luma() * 85;
        Rgb565::from(Rgb888::new(v, v, v))
    }
}

/// Copy a canvas pixel for pixel into `frame`
pub fn blit<C: PanelRgb>(canvas: &Canvas<C>, frame: &mut Frame) {
    let width = usize::from(DISPLAY_WIDTH_PX);
    let pixels = canvas.pixels().enumerate().map(|(i, color)| {
        let x = (i % width) as i32;
        let y = (i / width) as i32;
        Pixel(Point::new(x, y), color.rgb())
    });
    let Ok(()) = frame.draw_iter(pixels);
}

/// Copy any rendered screen into `frame`
pub fn blit_screen(screen: &RenderedScreen, frame: &mut Frame) {
    match screen {
        RenderedScreen::Mono(canvas) => blit(canvas, frame),
        RenderedScreen::Gray4(canvas) => blit(canvas, frame),
    }
}

/// Display sink drawing into the window's frame
pub struct WindowPanel {
    frame: SharedFrame,
    refreshes: usize,
}

impl WindowPanel {
    pub fn new(frame: SharedFrame) -> Self {
        Self {
            frame,
            refreshes: 0,
        }
    }

    /// Number of canvases pushed so far
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    fn show<C: PanelRgb>(&mut self, canvas: &Canvas<C>) -> Result<(), SinkError> {
        let mut frame = self
            .frame
            .try_borrow_mut()
            .map_err(|err| SinkError::Hardware {
                reason: err.to_string(),
            })?;
        blit(canvas, &mut frame);
        self.refreshes += 1;
        debug!("Panel refresh #{} ({} bpp)", self.refreshes, C::BITS);
        Ok(())
    }
}

impl DisplaySink for WindowPanel {
    fn render(&mut self, canvas: &MonoCanvas) -> Result<(), SinkError> {
        self.show(canvas)
    }

    fn render_gray4(&mut self, canvas: &GrayCanvas) -> Result<(), SinkError> {
        self.show(canvas)
    }
}

/// Writes screens as `<dir>/<name>.png`
pub struct PngArchive {
    dir: PathBuf,
    scale: u32,
}

impl PngArchive {
    pub fn new(dir: impl Into<PathBuf>, scale: u32) -> Self {
        Self {
            dir: dir.into(),
            scale: scale.max(1),
        }
    }

    /// Path a screen named `name` is written to
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.png"))
    }
}

impl CanvasArchive for PngArchive {
    fn save(&mut self, name: &str, screen: &RenderedScreen) -> Result<(), SinkError> {
        let write_error = |reason: String| SinkError::Write {
            name: name.to_string(),
            reason,
        };

        std::fs::create_dir_all(&self.dir).map_err(|err| write_error(err.to_string()))?;

        let mut frame = new_frame();
        blit_screen(screen, &mut frame);

        let settings = OutputSettingsBuilder::new().scale(self.scale).build();
        let path = self.path_for(name);
        frame
            .to_rgb_output_image(&settings)
            .save_png(&path)
            .map_err(|err| write_error(err.to_string()))?;

        info!("Wrote {}", path.display());
        Ok(())
    }
}
