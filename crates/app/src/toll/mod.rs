//! I-405 toll rates gauge
//!
//! Two trips are shown at once: the dim bar is the cost of the long trip, the bright bar
//! drawn over it is the cost of the short one. Every dot of a bar stands for
//! `max_toll / width` cents.

use chrono::Timelike;
use hatlight_core::{gamma_correct, Display, Hsv, Rotation, RGB8};

use self::source::{TollRateSource, TollTripRecord};
use crate::HatlightResult;

pub mod source;

/// Toll that lights up the whole bar, in cents.
pub const MAX_TOLL: u32 = 1500;

/// A named toll road segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trip {
    /// Trip identifier used by the WSDOT API.
    pub name: &'static str,
    pub from: &'static str,
    pub to: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Southbound,
    Northbound,
}

/// The long and the short trip shown for a single direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripPair {
    pub direction: Direction,
    pub long: Trip,
    pub short: Trip,
}

impl TripPair {
    pub const SOUTHBOUND: Self = Self {
        direction: Direction::Southbound,
        long: Trip {
            name: "405tp02898",
            from: "SR 524",
            to: "NE 6th",
        },
        short: Trip {
            name: "405tp02162",
            from: "NE 145th",
            to: "NE 6th",
        },
    };

    pub const NORTHBOUND: Self = Self {
        direction: Direction::Northbound,
        long: Trip {
            name: "405tp01353",
            from: "NE 4th",
            to: "I-5",
        },
        short: Trip {
            name: "405tp01352",
            from: "NE 4th",
            to: "SR 522",
        },
    };

    /// South in the morning, north in the afternoon.
    #[must_use]
    pub fn for_hour(hour: u32) -> Self {
        if hour < 12 {
            Self::SOUTHBOUND
        } else {
            Self::NORTHBOUND
        }
    }
}

/// Returns the current local hour.
#[must_use]
pub fn local_hour() -> u32 {
    chrono::Local::now().hour()
}

/// Current tolls of a trip pair, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripRates {
    pub long: u32,
    pub short: u32,
}

impl TripRates {
    /// Picks the rates of the given trips, a trip missing in the records costs nothing.
    #[must_use]
    pub fn from_records(records: &[TollTripRecord], pair: &TripPair) -> Self {
        let mut long = None;
        let mut short = None;
        for record in records {
            if record.trip_name == pair.long.name {
                long = Some(record.current_toll);
            } else if record.trip_name == pair.short.name {
                short = Some(record.current_toll);
            }
        }

        let rate = |trip: &Trip, value: Option<i64>| match value {
            Some(toll) => u32::try_from(toll).unwrap_or_else(|_| {
                log::warn!("Ignoring invalid toll {toll} for the trip {}", trip.name);
                0
            }),
            None => {
                log::debug!("No toll record for the trip {}", trip.name);
                0
            }
        };
        Self {
            long: rate(&pair.long, long),
            short: rate(&pair.short, short),
        }
    }
}

/// Converts a rate to the number of lit dots, never more than `pixels`.
///
/// Halves are rounded to the nearest even number of dots.
#[must_use]
pub fn dots(rate: u32, max_toll: u32, pixels: usize) -> usize {
    let per_dot = f64::from(max_toll) / pixels as f64;
    let dots = (f64::from(rate) / per_dot).round_ties_even();
    (dots as usize).min(pixels)
}

/// Gamma corrected rainbow from the cheapest to the most expensive dot.
#[must_use]
pub fn rainbow() -> [RGB8; 16] {
    let purple = gamma_correct(RGB8::new(255, 0, 255));
    let blue = gamma_correct(RGB8::new(0, 0, 255));
    let green = gamma_correct(RGB8::new(0, 255, 0));
    let yellow = gamma_correct(RGB8::new(255, 255, 0));
    let orange = gamma_correct(RGB8::new(255, 165, 0));
    let red = gamma_correct(RGB8::new(255, 0, 0));

    [
        purple, purple, //
        blue, blue, //
        green, green, green, //
        yellow, yellow, yellow, //
        orange, orange, orange, //
        red, red, red,
    ]
}

/// Rainbow converted to HSV in two brightness variants.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugePalette {
    /// Short trip colors.
    pub bright: Vec<Hsv>,
    /// Long trip colors.
    pub dim: Vec<Hsv>,
}

impl GaugePalette {
    pub const BRIGHT_VALUE: f64 = 1.0;
    pub const DIM_VALUE: f64 = 0.5;

    #[must_use]
    pub fn new(colors: &[RGB8]) -> Self {
        let hsv: Vec<_> = colors.iter().copied().map(Hsv::from_rgb8).collect();
        Self {
            bright: hsv.iter().map(|c| c.with_value(Self::BRIGHT_VALUE)).collect(),
            dim: hsv.iter().map(|c| c.with_value(Self::DIM_VALUE)).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bright.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bright.is_empty()
    }
}

impl Default for GaugePalette {
    fn default() -> Self {
        Self::new(&rainbow())
    }
}

/// Paints the long trip bar with dim colors and then the short trip bar with bright ones
/// on top of it.
///
/// Bars grow along the `y` axis and span every `x`.
pub fn paint_gauge<D: Display>(
    display: &mut D,
    palette: &GaugePalette,
    long_dots: usize,
    short_dots: usize,
) {
    let (_, height) = display.shape();
    let mut paint_bar = |colors: &[Hsv], dots: usize| {
        for (dot, color) in colors.iter().enumerate().take(dots) {
            for x in 0..height {
                display.set_pixel_hsv(x, dot, *color);
            }
        }
    };

    paint_bar(&palette.dim, long_dots);
    paint_bar(&palette.bright, short_dots);
}

/// Gauge settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TollConfig {
    pub brightness: f32,
    pub rotation: Rotation,
    /// Toll that lights up the whole bar, in cents.
    pub max_toll: u32,
}

impl Default for TollConfig {
    fn default() -> Self {
        Self {
            brightness: 0.8,
            rotation: Rotation::Deg0,
            max_toll: MAX_TOLL,
        }
    }
}

/// What has been drawn by the [`TollGauge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaugeReading {
    pub trips: TripPair,
    pub rates: TripRates,
    pub long_dots: usize,
    pub short_dots: usize,
}

/// Fetches the toll rates and renders them as a single frame.
pub struct TollGauge<S> {
    source: S,
    config: TollConfig,
}

impl<S: TollRateSource> TollGauge<S> {
    pub fn new(source: S, config: TollConfig) -> Self {
        Self { source, config }
    }

    /// Renders the gauge for the trips of the given hour.
    ///
    /// The rates are fetched before the display is touched, so a failed request leaves
    /// the previous frame on the matrix.
    pub async fn render<D: Display>(
        &self,
        display: &mut D,
        hour: u32,
    ) -> HatlightResult<GaugeReading> {
        let trips = TripPair::for_hour(hour);
        log::debug!("Selected {:?} trips for {hour}h", trips.direction);

        let records = self.source.toll_rates().await?;
        log::debug!("Received {} toll records", records.len());
        let rates = TripRates::from_records(&records, &trips);

        display.setup()?;
        display.set_brightness(self.config.brightness);
        display.set_rotation(self.config.rotation);

        let (width, _) = display.shape();
        let long_dots = dots(rates.long, self.config.max_toll, width);
        let short_dots = dots(rates.short, self.config.max_toll, width);
        log::info!(
            "{} -> {}: {} cents ({long_dots} dots), {} -> {}: {} cents ({short_dots} dots)",
            trips.long.from,
            trips.long.to,
            rates.long,
            trips.short.from,
            trips.short.to,
            rates.short,
        );

        paint_gauge(display, &GaugePalette::default(), long_dots, short_dots);
        display.show()?;

        Ok(GaugeReading {
            trips,
            rates,
            long_dots,
            short_dots,
        })
    }
}
