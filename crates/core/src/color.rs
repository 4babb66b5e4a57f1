//! Color helpers: LED gamma correction and HSV conversion.

use smart_leds::RGB8;

/// LED gamma correction table.
///
/// See <https://learn.adafruit.com/led-tricks-gamma-correction/the-quick-fix>
#[rustfmt::skip]
pub const GAMMA: [u8; 256] = [
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   1,   1,   1,   1,
      1,   1,   1,   1,   1,   1,   1,   1,   1,   2,   2,   2,   2,   2,   2,   2,
      2,   3,   3,   3,   3,   3,   3,   3,   4,   4,   4,   4,   4,   5,   5,   5,
      5,   6,   6,   6,   6,   7,   7,   7,   7,   8,   8,   8,   9,   9,   9,  10,
     10,  10,  11,  11,  11,  12,  12,  13,  13,  13,  14,  14,  15,  15,  16,  16,
     17,  17,  18,  18,  19,  19,  20,  20,  21,  21,  22,  22,  23,  24,  24,  25,
     25,  26,  27,  27,  28,  29,  29,  30,  31,  32,  32,  33,  34,  35,  35,  36,
     37,  38,  39,  39,  40,  41,  42,  43,  44,  45,  46,  47,  48,  49,  50,  50,
     51,  52,  54,  55,  56,  57,  58,  59,  60,  61,  62,  63,  64,  66,  67,  68,
     69,  70,  72,  73,  74,  75,  77,  78,  79,  81,  82,  83,  85,  86,  87,  89,
     90,  92,  93,  95,  96,  98,  99, 101, 102, 104, 105, 107, 109, 110, 112, 114,
    115, 117, 119, 120, 122, 124, 126, 127, 129, 131, 133, 135, 137, 138, 140, 142,
    144, 146, 148, 150, 152, 154, 156, 158, 160, 162, 164, 167, 169, 171, 173, 175,
    177, 180, 182, 184, 186, 189, 191, 193, 196, 198, 200, 203, 205, 208, 210, 213,
    215, 218, 220, 223, 225, 228, 231, 233, 236, 239, 241, 244, 247, 249, 252, 255,
];

/// Maps a linear intensity to the perceptually corrected one.
#[inline]
#[must_use]
pub const fn gamma(value: u8) -> u8 {
    GAMMA[value as usize]
}

/// Applies [`gamma`] to every channel.
#[must_use]
pub const fn gamma_correct(color: RGB8) -> RGB8 {
    RGB8 {
        r: gamma(color.r),
        g: gamma(color.g),
        b: gamma(color.b),
    }
}

/// Multiplies every channel by `factor`, truncating the result.
#[must_use]
pub fn scale(color: RGB8, factor: f32) -> RGB8 {
    let channel = |c: u8| (f32::from(c) * factor).clamp(0.0, 255.0) as u8;
    RGB8 {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

/// A color in the HSV space, every component lies in `[0, 1]`.
///
/// The hue is expressed as a fraction of a full turn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Converts an 8-bit RGB color to HSV.
    #[must_use]
    pub fn from_rgb8(color: RGB8) -> Self {
        let r = f64::from(color.r) / 255.0;
        let g = f64::from(color.g) / 255.0;
        let b = f64::from(color.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        if max == min {
            return Self::new(0.0, 0.0, max);
        }

        let delta = max - min;
        let s = delta / max;
        let rc = (max - r) / delta;
        let gc = (max - g) / delta;
        let bc = (max - b) / delta;

        #[allow(clippy::float_cmp)]
        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };
        Self::new((h / 6.0).rem_euclid(1.0), s, max)
    }

    /// Converts this color back to 8-bit RGB, truncating every channel.
    #[must_use]
    pub fn to_rgb8(self) -> RGB8 {
        let (r, g, b) = self.to_rgb();
        RGB8 {
            r: (r * 255.0) as u8,
            g: (g * 255.0) as u8,
            b: (b * 255.0) as u8,
        }
    }

    /// Returns the same hue and saturation with the given value.
    #[must_use]
    pub fn with_value(self, v: f64) -> Self {
        Self { v, ..self }
    }

    fn to_rgb(self) -> (f64, f64, f64) {
        let Self { h, s, v } = self;
        if s == 0.0 {
            return (v, v, v);
        }

        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match (sector as i32).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    }
}

impl From<RGB8> for Hsv {
    fn from(color: RGB8) -> Self {
        Self::from_rgb8(color)
    }
}

impl From<Hsv> for RGB8 {
    fn from(color: Hsv) -> Self {
        color.to_rgb8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_gamma_table_ends() {
        assert_eq!(gamma(0), 0);
        assert_eq!(gamma(255), 255);
        assert_eq!(gamma(165), 75);
        assert!(GAMMA.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_scale_truncates() {
        let light_blue = RGB8::new(173, 216, 230);
        assert_eq!(scale(light_blue, 0.5), RGB8::new(86, 108, 115));
        assert_eq!(scale(light_blue, 1.0), light_blue);
        assert_eq!(scale(light_blue, 0.0), RGB8::default());
    }

    #[test]
    fn test_hsv_primaries() {
        let purple = Hsv::from_rgb8(RGB8::new(255, 0, 255));
        assert_close(purple.h, 5.0 / 6.0);
        assert_close(purple.s, 1.0);
        assert_close(purple.v, 1.0);

        let green = Hsv::from_rgb8(RGB8::new(0, 255, 0));
        assert_close(green.h, 1.0 / 3.0);

        let blue = Hsv::from_rgb8(RGB8::new(0, 0, 255));
        assert_close(blue.h, 2.0 / 3.0);

        let grey = Hsv::from_rgb8(RGB8::new(32, 32, 32));
        assert_close(grey.h, 0.0);
        assert_close(grey.s, 0.0);
    }

    #[test]
    fn test_hsv_to_rgb() {
        assert_eq!(Hsv::new(0.0, 1.0, 1.0).to_rgb8(), RGB8::new(255, 0, 0));
        assert_eq!(Hsv::new(5.0 / 6.0, 1.0, 0.5).to_rgb8(), RGB8::new(127, 0, 127));
        assert_eq!(Hsv::new(0.0, 0.0, 1.0).to_rgb8(), RGB8::new(255, 255, 255));
    }

    #[test]
    fn test_hsv_back_and_forth() {
        for color in [
            RGB8::new(0, 255, 0),
            RGB8::new(0, 0, 255),
            RGB8::new(255, 0, 0),
        ] {
            assert_eq!(Hsv::from(color).to_rgb8(), color);
        }
    }
}
