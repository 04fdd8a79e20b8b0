//! Layout constants of the stat screens
//!
//! Vertical positions are the top edges of rows in pixels.

// ============================================================================
// Realtime
// ============================================================================

/// Rows for solar, consumption, feed-in and import
pub(super) const REALTIME_ROWS_Y_PX: [i32; 4] = [33, 58, 83, 108];

/// Rule above the status footer
pub(super) const REALTIME_FOOTER_RULE_Y_PX: i32 = 135;

/// Net grid power beyond which the house counts as exporting or importing
pub(super) const GRID_BALANCE_THRESHOLD_W: f64 = 100.0;

// ============================================================================
// Period (daily and rolling window)
// ============================================================================

/// Generation, two detail rows, consumption, two detail rows
pub(super) const PERIOD_ROWS_Y_PX: [i32; 6] = [30, 49, 65, 85, 104, 120];

/// Rule above the self-sufficiency footer
pub(super) const PERIOD_FOOTER_RULE_Y_PX: i32 = 142;

// ============================================================================
// Loading
// ============================================================================

/// Left edge of all loading screen content
pub(super) const LOADING_X_PX: i32 = 20;

/// Top of the two-line title
pub(super) const LOADING_TITLE_Y_PX: i32 = 40;

/// Top of the status message
pub(super) const LOADING_MESSAGE_Y_PX: i32 = 115;

/// Top of the empty progress frame
pub(super) const LOADING_FRAME_Y_PX: i32 = 145;

/// Progress frame size
pub(super) const LOADING_FRAME_WIDTH_PX: u32 = 224;
pub(super) const LOADING_FRAME_HEIGHT_PX: u32 = 10;
pub(super) const LOADING_FRAME_BORDER_PX: u32 = 2;
