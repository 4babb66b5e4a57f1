//! Hatlight display backends
//!
//! - [`TerminalDisplay`] draws the matrix with ANSI true color escape sequences.
//! - [`UnicornHatHd`] drives the real matrix over SPI (requires the `hardware` feature).

// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub use hatlight_core as core;

pub use crate::terminal::TerminalDisplay;
#[cfg(feature = "hardware")]
pub use crate::unicorn_hat_hd::UnicornHatHd;

mod terminal;
#[cfg(feature = "hardware")]
mod unicorn_hat_hd;

/// Serializes a frame in the matrix raster order: rows of `[r, g, b]` triplets.
pub fn frame_bytes(frame: &hatlight_core::display::Frame) -> impl Iterator<Item = u8> + '_ {
    frame
        .iter()
        .flatten()
        .flat_map(|pixel| [pixel.r, pixel.g, pixel.b])
}
