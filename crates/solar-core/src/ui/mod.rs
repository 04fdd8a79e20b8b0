//! Drawing building blocks shared by the dashboard screens
//!
//! - Panel geometry constants
//! - Ink colors and font presets ([`styling`])
//! - Header, label/value rows and the dual-series chart ([`components`])

pub mod components;
pub mod styling;

/// E-paper panel width in pixels
pub const DISPLAY_WIDTH_PX: u16 = 264;

/// E-paper panel height in pixels
pub const DISPLAY_HEIGHT_PX: u16 = 176;

pub use components::{Header, StatRow, draw_footer};
pub use styling::TextSize;
