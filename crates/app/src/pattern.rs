//! Rounded rectangle animation.

use std::{convert::Infallible, future::Future, time::Duration};

use hatlight_core::{color::scale, Display, MaskCell, MaskGrid, Rotation, RGB8, ROUND_RECT};

use crate::HatlightResult;

/// Colors the rectangle is painted with, one is chosen at random every cycle.
pub const PALETTE: [RGB8; 8] = [
    rgb(255, 165, 0),   // orange
    rgb(173, 216, 230), // light blue
    rgb(0, 255, 0),     // green
    rgb(255, 0, 0),     // red
    rgb(255, 192, 203), // pink
    rgb(32, 32, 32),    // dark gray
    rgb(255, 255, 0),   // yellow
    rgb(255, 0, 255),   // purple
];

/// Number of brightness steps in a single fade.
pub const FADE_STEPS: u8 = 9;

const BLACK: RGB8 = rgb(0, 0, 0);
const WHITE: RGB8 = rgb(255, 255, 255);

const fn rgb(r: u8, g: u8, b: u8) -> RGB8 {
    RGB8 { r, g, b }
}

/// Animation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternConfig {
    /// Delay between two brightness steps.
    pub step: Duration,
    /// Light up the pixel at the origin while fading in, handy to check the orientation.
    pub mark_origin: bool,
    pub rotation: Rotation,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            step: Duration::from_millis(25),
            mark_origin: false,
            rotation: Rotation::Deg0,
        }
    }
}

/// Chooses a color from the [`PALETTE`] uniformly.
pub fn pick_color(rng: &mut fastrand::Rng) -> RGB8 {
    PALETTE[rng.usize(..PALETTE.len())]
}

/// Paints the mask: off cells are black, half cells get a half of the color intensity.
pub fn paint_mask<D: Display>(display: &mut D, mask: &MaskGrid, color: RGB8) {
    let (width, height) = display.shape();
    for x in 0..width {
        for y in 0..height {
            let pixel = match mask.cell(x, y).unwrap_or(MaskCell::Off) {
                MaskCell::Off => BLACK,
                MaskCell::Half => scale(color, 0.5),
                MaskCell::Full => color,
            };
            display.set_pixel(x, y, pixel);
        }
    }
}

/// Raises the brightness from zero up to 90% step by step.
pub async fn fade_in<D: Display>(display: &mut D, step: Duration) -> HatlightResult<()> {
    display.set_brightness(0.0);
    display.show()?;
    for i in 1..=FADE_STEPS {
        display.set_brightness(f32::from(i) / 10.0);
        display.show()?;
        tokio::time::sleep(step).await;
    }
    Ok(())
}

/// Lowers the brightness from the full one down to 20% step by step.
pub async fn fade_out<D: Display>(display: &mut D, step: Duration) -> HatlightResult<()> {
    display.set_brightness(1.0);
    display.show()?;
    for i in (2..=FADE_STEPS + 1).rev() {
        display.set_brightness(f32::from(i) / 10.0);
        display.show()?;
        tokio::time::sleep(step).await;
    }
    Ok(())
}

/// Endless rounded rectangle animation.
pub struct PatternAnimator<D> {
    display: D,
    rng: fastrand::Rng,
    config: PatternConfig,
}

impl<D: Display> PatternAnimator<D> {
    /// Creates a new animator with a randomly seeded color generator.
    pub fn new(display: D, config: PatternConfig) -> Self {
        Self::with_rng(display, config, fastrand::Rng::new())
    }

    pub fn with_rng(display: D, config: PatternConfig, rng: fastrand::Rng) -> Self {
        Self {
            display,
            rng,
            config,
        }
    }

    /// Returns the display back.
    pub fn into_display(self) -> D {
        self.display
    }

    /// Runs a single animation cycle and returns the color it has been painted with.
    pub async fn cycle(&mut self) -> HatlightResult<RGB8> {
        let color = pick_color(&mut self.rng);
        log::debug!("Painting rounded rectangle with {color:?}");

        paint_mask(&mut self.display, &ROUND_RECT, color);
        if self.config.mark_origin {
            self.display.set_pixel(0, 0, WHITE);
        }
        fade_in(&mut self.display, self.config.step).await?;

        if self.config.mark_origin {
            self.display.set_pixel(0, 0, BLACK);
        }
        fade_out(&mut self.display, self.config.step).await?;
        Ok(color)
    }

    async fn animate(&mut self) -> HatlightResult<Infallible> {
        loop {
            self.cycle().await?;
        }
    }

    /// Runs the animation until the `shutdown` future resolves, then turns the display off.
    ///
    /// A failed `shutdown` future stops the animation as well, its error is returned
    /// once the display is off.
    pub async fn run_until<F>(&mut self, shutdown: F) -> HatlightResult<()>
    where
        F: Future<Output = HatlightResult<()>>,
    {
        self.display.setup()?;
        self.display.set_rotation(self.config.rotation);
        self.display.set_brightness(0.0);

        let outcome = tokio::select! {
            result = self.animate() => match result {
                Ok(never) => match never {},
                Err(err) => {
                    log::error!("Animation failed: {err}");
                    Err(err)
                }
            },
            result = shutdown => {
                if let Err(err) = &result {
                    log::error!("Shutdown signal failed: {err}");
                }
                result
            }
        };

        log::info!("Stopping animation");
        self.display.off()?;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use hatlight_core::{test_utils::MemoryDisplay, HEIGHT, WIDTH};

    use super::*;

    #[test]
    fn test_paint_mask() {
        let mut display = MemoryDisplay::new();
        let color = RGB8::new(173, 216, 230);
        paint_mask(&mut display, &ROUND_RECT, color);

        let fb = display.framebuffer();
        assert_eq!(display.pixel_writes, WIDTH * HEIGHT);
        assert_eq!(fb.pixel(0, 0), Some(BLACK));
        assert_eq!(fb.pixel(15, 15), Some(BLACK));
        assert_eq!(fb.pixel(0, 1), Some(RGB8::new(86, 108, 115)));
        assert_eq!(fb.pixel(14, 0), Some(RGB8::new(86, 108, 115)));
        assert_eq!(fb.pixel(8, 8), Some(color));
    }

    #[test]
    fn test_pick_color_is_from_palette() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut seen = [false; PALETTE.len()];
        for _ in 0..1000 {
            let color = pick_color(&mut rng);
            let index = PALETTE.iter().position(|c| *c == color).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|x| *x));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fade_brightness_sequence() {
        let mut display = MemoryDisplay::new();
        fade_in(&mut display, Duration::from_millis(25)).await.unwrap();
        fade_out(&mut display, Duration::from_millis(25)).await.unwrap();

        let expected: Vec<f32> = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 9, 8, 7, 6, 5, 4, 3, 2]
            .into_iter()
            .map(|i| i as f32 / 10.0)
            .collect();
        let actual = display.brightness_history();
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(&expected) {
            assert!((a - e).abs() < 1e-6, "{actual:?}");
        }
    }
}
