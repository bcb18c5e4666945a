#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend between two colours, `bias` being the share of `other`.
    ///
    /// Channels are truncated towards zero and clamped to `0..=255`, so a bias
    /// that has drifted slightly outside `[0, 1]` still yields a valid colour.
    #[must_use]
    pub fn interpolate(self, other: Self, bias: f64) -> Self {
        let channel = |a: u8, b: u8| -> u8 {
            let value = ((1.0 - bias) * f64::from(a) + bias * f64::from(b)) as i32;
            value.clamp(0, 255) as u8
        };

        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }

    /// Converts hue/saturation/value in `[0, 1]` to RGB. Only the fractional
    /// part of `hue` is used, so hues wrap around the colour wheel.
    #[must_use]
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let to_byte = |channel: f64| (channel * 255.0 + 0.5) as u8;

        if saturation == 0.0 {
            let grey = to_byte(value);
            return Self::new(grey, grey, grey);
        }

        let sector = (hue - hue.floor()) * 6.0;
        let f = sector - sector.floor();
        let p = value * (1.0 - saturation);
        let q = value * (1.0 - saturation * f);
        let t = value * (1.0 - saturation * (1.0 - f));

        let (r, g, b) = match sector as u32 {
            0 => (value, t, p),
            1 => (q, value, p),
            2 => (p, value, t),
            3 => (p, q, value),
            4 => (t, p, value),
            _ => (value, p, q),
        };

        Self::new(to_byte(r), to_byte(g), to_byte(b))
    }
}
