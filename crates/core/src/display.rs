//! Display abstraction layer
//!
//! Every backend owns a [`Framebuffer`] and only has to know how to commit it, the pixel
//! level operations are provided by the [`Display`] trait itself.

use smart_leds::RGB8;

use crate::{color::scale, Hsv, Result, HEIGHT, WIDTH};

/// Pixels of the whole matrix, indexed as `[x][y]`.
pub type Frame = [[RGB8; HEIGHT]; WIDTH];

/// Display rotation, in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Rounds the given angle to the nearest quarter turn.
    #[must_use]
    pub fn from_degrees(degrees: i32) -> Self {
        let quarters = (f64::from(degrees) / 90.0).round() as i32;
        match quarters.rem_euclid(4) {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    /// Returns the logical pixel shown at the given physical position.
    ///
    /// The rotation is counter-clockwise, the matrix must be square.
    fn source(self, i: usize, j: usize) -> (usize, usize) {
        const LAST: usize = WIDTH - 1;
        match self {
            Self::Deg0 => (i, j),
            Self::Deg90 => (j, LAST - i),
            Self::Deg180 => (LAST - i, LAST - j),
            Self::Deg270 => (LAST - j, i),
        }
    }
}

/// In-memory pixel buffer with the display settings applied on commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    pixels: Frame,
    brightness: f32,
    rotation: Rotation,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            pixels: [[RGB8::default(); HEIGHT]; WIDTH],
            brightness: 0.5,
            rotation: Rotation::default(),
        }
    }
}

impl Framebuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a pixel color, returns `false` if the position is out of the matrix.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: RGB8) -> bool {
        match self.pixels.get_mut(x).and_then(|column| column.get_mut(y)) {
            Some(pixel) => {
                *pixel = color;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<RGB8> {
        self.pixels.get(x)?.get(y).copied()
    }

    pub fn clear(&mut self) {
        self.pixels = [[RGB8::default(); HEIGHT]; WIDTH];
    }

    #[must_use]
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness.clamp(0.0, 1.0);
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Returns the matrix shape as `(width, height)`, taking the rotation into account.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        match self.rotation {
            Rotation::Deg0 | Rotation::Deg180 => (WIDTH, HEIGHT),
            Rotation::Deg90 | Rotation::Deg270 => (HEIGHT, WIDTH),
        }
    }

    /// Returns the frame as it should appear on the hardware: rotated and scaled
    /// by the current brightness.
    #[must_use]
    pub fn rendered(&self) -> Frame {
        let mut frame = [[RGB8::default(); HEIGHT]; WIDTH];
        for (i, column) in frame.iter_mut().enumerate() {
            for (j, pixel) in column.iter_mut().enumerate() {
                let (x, y) = self.rotation.source(i, j);
                *pixel = scale(self.pixels[x][y], self.brightness);
            }
        }
        frame
    }
}

/// LED matrix driver.
pub trait Display {
    /// Returns the pixel buffer of this display.
    fn framebuffer(&self) -> &Framebuffer;
    /// Returns the mutable pixel buffer of this display.
    fn framebuffer_mut(&mut self) -> &mut Framebuffer;
    /// Commits the current buffer to the device.
    fn show(&mut self) -> Result<()>;

    /// Prepares the device before the first frame.
    fn setup(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.framebuffer_mut().set_rotation(rotation);
    }

    /// Sets the global brightness, the value is clamped to `[0.0, 1.0]`.
    fn set_brightness(&mut self, brightness: f32) {
        self.framebuffer_mut().set_brightness(brightness);
    }

    fn shape(&self) -> (usize, usize) {
        self.framebuffer().shape()
    }

    /// Sets a pixel color, positions outside of the matrix are ignored.
    fn set_pixel(&mut self, x: usize, y: usize, color: RGB8) {
        if !self.framebuffer_mut().set_pixel(x, y, color) {
            log::warn!("Ignoring pixel ({x}, {y}) outside of the matrix");
        }
    }

    fn set_pixel_hsv(&mut self, x: usize, y: usize, color: Hsv) {
        self.set_pixel(x, y, color.to_rgb8());
    }

    fn clear(&mut self) {
        self.framebuffer_mut().clear();
    }

    /// Turns all pixels off.
    fn off(&mut self) -> Result<()> {
        self.clear();
        self.show()
    }
}

macro_rules! impl_forward_display {
    ($($ptr:ty),*) => {
        $(
            impl<T: ?Sized + Display> Display for $ptr {
                fn framebuffer(&self) -> &Framebuffer {
                    T::framebuffer(self)
                }

                fn framebuffer_mut(&mut self) -> &mut Framebuffer {
                    T::framebuffer_mut(self)
                }

                fn show(&mut self) -> Result<()> {
                    T::show(self)
                }

                fn setup(&mut self) -> Result<()> {
                    T::setup(self)
                }

                fn set_rotation(&mut self, rotation: Rotation) {
                    T::set_rotation(self, rotation);
                }

                fn set_brightness(&mut self, brightness: f32) {
                    T::set_brightness(self, brightness);
                }

                fn shape(&self) -> (usize, usize) {
                    T::shape(self)
                }

                fn set_pixel(&mut self, x: usize, y: usize, color: RGB8) {
                    T::set_pixel(self, x, y, color);
                }

                fn set_pixel_hsv(&mut self, x: usize, y: usize, color: Hsv) {
                    T::set_pixel_hsv(self, x, y, color);
                }

                fn clear(&mut self) {
                    T::clear(self);
                }

                fn off(&mut self) -> Result<()> {
                    T::off(self)
                }
            }
        )*
    };
}

impl_forward_display!(&mut T, Box<T>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemoryDisplay;

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(89), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(180), Rotation::Deg180);
        assert_eq!(Rotation::from_degrees(-90), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(360), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(290), Rotation::Deg270);
    }

    #[test]
    fn test_rendered_applies_brightness() {
        let mut fb = Framebuffer::new();
        fb.set_brightness(0.5);
        assert!(fb.set_pixel(1, 2, RGB8::new(255, 100, 3)));
        assert_eq!(fb.rendered()[1][2], RGB8::new(127, 50, 1));

        fb.set_brightness(2.0);
        assert!((fb.brightness() - 1.0).abs() < f32::EPSILON);
        assert_eq!(fb.rendered()[1][2], RGB8::new(255, 100, 3));
    }

    #[test]
    fn test_rendered_applies_rotation() {
        let red = RGB8::new(255, 0, 0);
        let mut fb = Framebuffer::new();
        fb.set_brightness(1.0);
        fb.set_pixel(0, 0, red);

        let expectations = [
            (Rotation::Deg0, (0, 0)),
            (Rotation::Deg90, (WIDTH - 1, 0)),
            (Rotation::Deg180, (WIDTH - 1, HEIGHT - 1)),
            (Rotation::Deg270, (0, HEIGHT - 1)),
        ];
        for (rotation, (x, y)) in expectations {
            fb.set_rotation(rotation);
            let frame = fb.rendered();
            assert_eq!(frame[x][y], red, "{rotation:?}");
            let lit = frame.iter().flatten().filter(|&&p| p == red).count();
            assert_eq!(lit, 1);
        }
    }

    #[test]
    fn test_out_of_range_pixel() {
        let mut fb = Framebuffer::new();
        assert!(!fb.set_pixel(WIDTH, 0, RGB8::new(1, 1, 1)));
        assert_eq!(fb.pixel(WIDTH, 0), None);
        assert_eq!(fb.pixel(0, 0), Some(RGB8::default()));
    }

    #[test]
    fn test_display_shape() {
        let _ = env_logger::try_init();

        let mut display = MemoryDisplay::new();
        assert_eq!(display.shape(), (WIDTH, HEIGHT));
        display.set_rotation(Rotation::from_degrees(90));
        assert_eq!(display.shape(), (HEIGHT, WIDTH));
    }

    #[test]
    fn test_set_pixel_hsv() {
        let mut display = MemoryDisplay::new();
        display.set_brightness(1.0);
        display.set_pixel_hsv(2, 3, Hsv::new(2.0 / 3.0, 1.0, 0.5));
        display.set_pixel_hsv(WIDTH, 3, Hsv::new(0.0, 1.0, 1.0));
        display.show().unwrap();

        assert_eq!(display.pixel_writes, 2);
        assert_eq!(display.last_frame().unwrap()[2][3], RGB8::new(0, 0, 127));
    }

    #[test]
    fn test_off_clears_buffer() {
        let mut display = MemoryDisplay::new();
        display.set_brightness(1.0);
        for x in 0..WIDTH {
            display.set_pixel(x, x, RGB8::new(255, 255, 255));
        }
        display.show().unwrap();
        display.off().unwrap();

        let frame = display.last_frame().unwrap();
        assert!(frame.iter().flatten().all(|pixel| *pixel == RGB8::default()));
        assert_eq!(display.framebuffer().pixel(3, 3), Some(RGB8::default()));
    }

    /// Display which records every overridden method invoked on it.
    #[derive(Default)]
    struct CallLog {
        framebuffer: Framebuffer,
        calls: Vec<&'static str>,
    }

    impl Display for CallLog {
        fn framebuffer(&self) -> &Framebuffer {
            &self.framebuffer
        }

        fn framebuffer_mut(&mut self) -> &mut Framebuffer {
            &mut self.framebuffer
        }

        fn show(&mut self) -> Result<()> {
            self.calls.push("show");
            Ok(())
        }

        fn setup(&mut self) -> Result<()> {
            self.calls.push("setup");
            Ok(())
        }

        fn set_rotation(&mut self, _rotation: Rotation) {
            self.calls.push("set_rotation");
        }

        fn set_brightness(&mut self, _brightness: f32) {
            self.calls.push("set_brightness");
        }

        fn shape(&self) -> (usize, usize) {
            (4, 2)
        }

        fn set_pixel(&mut self, _x: usize, _y: usize, _color: RGB8) {
            self.calls.push("set_pixel");
        }

        fn set_pixel_hsv(&mut self, _x: usize, _y: usize, _color: Hsv) {
            self.calls.push("set_pixel_hsv");
        }

        fn clear(&mut self) {
            self.calls.push("clear");
        }

        fn off(&mut self) -> Result<()> {
            self.calls.push("off");
            Ok(())
        }
    }

    fn drive<D: Display>(mut display: D) {
        display.setup().unwrap();
        display.set_rotation(Rotation::Deg90);
        display.set_brightness(0.3);
        assert_eq!(display.shape(), (4, 2));
        display.set_pixel(0, 0, RGB8::default());
        display.set_pixel_hsv(0, 0, Hsv::default());
        display.clear();
        display.show().unwrap();
        display.off().unwrap();
    }

    const EXPECTED_CALLS: [&str; 8] = [
        "setup",
        "set_rotation",
        "set_brightness",
        "set_pixel",
        "set_pixel_hsv",
        "clear",
        "show",
        "off",
    ];

    #[test]
    fn test_boxed_display_forwards_overrides() {
        let mut display = CallLog::default();
        drive(&mut display);
        assert_eq!(display.calls, EXPECTED_CALLS);

        let mut boxed: Box<dyn Display> = Box::new(CallLog::default());
        drive(&mut boxed);
        // Settings overrides never touched the framebuffer.
        assert_eq!(boxed.framebuffer(), &Framebuffer::new());
        drive(boxed);
    }

    #[test]
    fn test_boxed_display_calls_are_recorded() {
        let mut boxed = Box::new(CallLog::default());
        drive(&mut boxed);
        assert_eq!(boxed.calls, EXPECTED_CALLS);
    }
}
