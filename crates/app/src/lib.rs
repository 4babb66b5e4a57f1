//! Hatlight application
//!
//! Two independent programs painting on the LED matrix:
//!
//! - [`pattern`]: a rounded rectangle of a random color fading in and out.
//! - [`toll`]: the current I-405 toll rates rendered as a bar gauge.

// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
// Too many false positives.
#![allow(
    async_fn_in_trait,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

pub use hatlight_core as core;
pub use hatlight_core::{Error as HatlightError, Result as HatlightResult};

pub use crate::{
    pattern::{PatternAnimator, PatternConfig},
    toll::{
        source::{StaticRates, TollRateSource, TollTripRecord, WsdotClient},
        TollConfig, TollGauge,
    },
};

pub mod pattern;
pub mod toll;
