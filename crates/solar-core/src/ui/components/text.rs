//! Fixed-capacity label formatting

use core::fmt::Arguments;
use heapless::String;
use log::warn;

/// Format `args` into a string of at most `N` bytes.
///
/// Text past the capacity is dropped and reported, the render carries on
/// with the shortened label.
pub fn format_label<const N: usize>(args: Arguments<'_>) -> String<N> {
    let mut s = String::new();
    if core::fmt::write(&mut s, args).is_err() {
        warn!("Label truncated to {} bytes: \"{}\"", N, s);
    }
    s
}
