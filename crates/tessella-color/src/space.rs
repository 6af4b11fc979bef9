#![forbid(unsafe_code)]

//! RGB and HSL color types with hex notation support.

use std::fmt;

/// Errors from parsing color strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The string is not `#rgb` or `#rrggbb` hex notation.
    InvalidHex {
        /// The rejected input.
        input: String,
    },
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHex { input } => {
                write!(f, "invalid hex color {input:?}: expected #rgb or #rrggbb")
            }
        }
    }
}

impl std::error::Error for ColorError {}

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` hex notation; the leading `#` is optional.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let err = || ColorError::InvalidHex {
            input: s.to_string(),
        };
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.is_ascii() {
            return Err(err());
        }
        match digits.len() {
            6 => {
                let channel = |d: &str| u8::from_str_radix(d, 16).map_err(|_| err());
                Ok(Self::new(
                    channel(&digits[0..2])?,
                    channel(&digits[2..4])?,
                    channel(&digits[4..6])?,
                ))
            }
            3 => {
                // Shorthand doubles each digit: #1af -> #11aaff.
                let channel =
                    |d: &str| u8::from_str_radix(d, 16).map(|v| v * 17).map_err(|_| err());
                Ok(Self::new(
                    channel(&digits[0..1])?,
                    channel(&digits[1..2])?,
                    channel(&digits[2..3])?,
                ))
            }
            _ => Err(err()),
        }
    }

    /// Format as lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// HSL color: hue in degrees, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsl {
    /// Hue angle in degrees.
    pub h: f64,
    /// Saturation (0 = gray, 1 = pure).
    pub s: f64,
    /// Lightness (0 = black, 1 = white).
    pub l: f64,
}

impl Hsl {
    /// Create a new HSL color.
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert from RGB.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        let r = rgb.r as f64 / 255.0;
        let g = rgb.g as f64 / 255.0;
        let b = rgb.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Self { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        } * 60.0;

        Self { h, s, l }
    }

    /// Convert to RGB, rounding each channel to the nearest 8-bit value.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);
        if s == 0.0 {
            let v = to_channel(l);
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let hk = (self.h / 360.0).rem_euclid(1.0);
        Rgb::new(
            to_channel(hue_to_channel(p, q, hk + 1.0 / 3.0)),
            to_channel(hue_to_channel(p, q, hk)),
            to_channel(hue_to_channel(p, q, hk - 1.0 / 3.0)),
        )
    }

    /// Scale saturation by `factor`, clamped to `[0, 1]`.
    #[must_use]
    pub fn desaturate(mut self, factor: f64) -> Self {
        self.s = (self.s * factor).clamp(0.0, 1.0);
        self
    }

    /// Shift lightness by `amount`, clamped to `[0, 1]`.
    #[must_use]
    pub fn lighten(mut self, amount: f64) -> Self {
        self.l = (self.l + amount).clamp(0.0, 1.0);
        self
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
