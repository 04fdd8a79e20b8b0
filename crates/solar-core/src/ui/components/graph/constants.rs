//! Constants for chart rendering
//!
//! Geometry in pixels, values in kilowatts.

use embedded_graphics::pixelcolor::Gray2;

use crate::ui::styling::{GRAY_BLACK, GRAY_DARK, GRAY_LIGHT};

/// Left edge of the plot rectangle
pub const PLOT_X_PX: i32 = 30;

/// Top edge of the plot rectangle
pub const PLOT_Y_PX: i32 = 20;

/// Plot rectangle width
pub const PLOT_WIDTH_PX: u32 = 225;

/// Plot rectangle height
pub const PLOT_HEIGHT_PX: u32 = 125;

/// Lower bound of the y-axis maximum, keeps flat-zero days drawable
pub const MIN_Y_MAX_KW: f64 = 0.1;

/// Number of horizontal grid rules inside the plot
pub const GRID_RULE_COUNT: i32 = 4;

/// Pixel pitch of the dotted grid rules
pub const GRID_DOT_PITCH_PX: usize = 3;

/// Stroke width of both series
pub const SERIES_LINE_WIDTH_PX: u32 = 2;

/// Number of time labels under the x-axis
pub const X_AXIS_LABEL_COUNT: usize = 5;

/// Maximum length of formatted axis labels (characters)
pub const MAX_AXIS_LABEL_LENGTH: usize = 16;

/// Maximum length of the stats line (characters)
pub const MAX_STATS_LENGTH: usize = 64;

/// Gap between the x-axis and its time labels
pub const X_LABEL_GAP_PX: i32 = 2;

/// Time labels are shifted left so they sit centered under their tick
pub const X_LABEL_SHIFT_PX: i32 = 10;

/// Left edge of the y-axis labels
pub const Y_LABEL_X_PX: i32 = 5;

/// Top edge of the stats line
pub const STATS_Y_PX: i32 = 161;

pub const AXIS_COLOR: Gray2 = GRAY_LIGHT;
pub const GRID_COLOR: Gray2 = GRAY_LIGHT;
pub const LABEL_COLOR: Gray2 = GRAY_BLACK;
pub const STROKE_COLOR: Gray2 = GRAY_BLACK;

/// Area under the larger of the two curves
pub const UNION_FILL: Gray2 = GRAY_LIGHT;

/// Area under both curves (self-consumption)
pub const OVERLAP_FILL: Gray2 = GRAY_DARK;

/// Area under generation when consumption is unavailable
pub const SINGLE_FILL: Gray2 = GRAY_DARK;
