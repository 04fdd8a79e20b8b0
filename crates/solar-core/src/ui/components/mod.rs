//! Reusable screen components

pub mod graph;
mod header;
mod stat_rows;
mod text;

pub use header::Header;
pub use stat_rows::{MAX_VALUE_LENGTH, RowKind, StatRow, draw_footer, format_quantity};
pub use text::format_label;
