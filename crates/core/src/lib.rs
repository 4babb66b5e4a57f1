//! Hatlight core types
//!
//! Colors, the LED gamma table, the rounded rectangle mask and the [`Display`] trait
//! shared by every display backend.

// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
// Too many false positives.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

pub use smart_leds::RGB8;

pub use crate::{
    color::{gamma, gamma_correct, scale, Hsv, GAMMA},
    display::{Display, Framebuffer, Rotation},
    errors::{Error, Result},
    mask::{MaskCell, MaskGrid, ROUND_RECT},
};

pub mod color;
pub mod display;
pub mod errors;
pub mod mask;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// Width of the LED matrix in pixels.
pub const WIDTH: usize = 16;
/// Height of the LED matrix in pixels.
pub const HEIGHT: usize = 16;
