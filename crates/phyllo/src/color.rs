//! Fill colors for generated points.
//!
//! Two mappings are available. `Hue` walks the color wheel with the point
//! index (`hue = n mod 256` degrees, full saturation and brightness), which
//! makes each spiral arm show up as a band of color. `Green` is the darker
//! `rgb(0, n mod 255, n mod 10)` ramp.

use serde::{Deserialize, Serialize};

use crate::generator::PointRecord;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert from hue/saturation/brightness.
    ///
    /// `hue` is in degrees and wraps modulo 360, so any finite value is
    /// accepted. `saturation` and `brightness` are clamped to [0, 1].
    pub fn from_hsb(hue: f64, saturation: f64, brightness: f64) -> Self {
        let s = saturation.clamp(0.0, 1.0);
        let v = brightness.clamp(0.0, 1.0);
        let h = hue.rem_euclid(360.0) / 60.0;

        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Self::new(channel(r), channel(g), channel(b))
    }

    /// `#rrggbb` form used in SVG attributes.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[inline]
fn channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Available color mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Full-saturation hue rotation, `hue = n mod 256`
    #[default]
    Hue,
    /// `rgb(0, n mod 255, n mod 10)`
    Green,
}

impl ColorScheme {
    /// Get all available schemes.
    pub fn all() -> &'static [ColorScheme] {
        &[ColorScheme::Hue, ColorScheme::Green]
    }

    /// Get scheme name as string.
    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Hue => "hue",
            ColorScheme::Green => "green",
        }
    }

    /// Parse scheme from string.
    pub fn from_name(name: &str) -> Option<ColorScheme> {
        match name.to_lowercase().as_str() {
            "hue" | "hsb" | "rainbow" => Some(ColorScheme::Hue),
            "green" | "rgb" => Some(ColorScheme::Green),
            _ => None,
        }
    }

    /// The scheme after this one, wrapping around.
    pub fn next(&self) -> ColorScheme {
        let all = Self::all();
        let idx = all.iter().position(|s| s == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Fill color for a generated point.
    pub fn color(&self, point: &PointRecord) -> Rgb {
        match self {
            ColorScheme::Hue => Rgb::from_hsb(point.hue, 1.0, 1.0),
            ColorScheme::Green => {
                Rgb::new(0, (point.index % 255) as u8, (point.index % 10) as u8)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_point;
    use crate::params::Params;

    #[test]
    fn primary_hues() {
        assert_eq!(Rgb::from_hsb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hsb(120.0, 1.0, 1.0), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hsb(240.0, 1.0, 1.0), Rgb::new(0, 0, 255));
        assert_eq!(Rgb::from_hsb(60.0, 1.0, 1.0), Rgb::new(255, 255, 0));
    }

    #[test]
    fn hue_wraps() {
        assert_eq!(Rgb::from_hsb(360.0, 1.0, 1.0), Rgb::from_hsb(0.0, 1.0, 1.0));
        assert_eq!(Rgb::from_hsb(-120.0, 1.0, 1.0), Rgb::from_hsb(240.0, 1.0, 1.0));
    }

    #[test]
    fn zero_saturation_is_gray() {
        let c = Rgb::from_hsb(200.0, 0.0, 0.5);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }

    #[test]
    fn hex_format() {
        assert_eq!(Rgb::new(255, 0, 16).to_hex(), "#ff0010");
        assert_eq!(Rgb::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn hue_scheme_repeats_every_256() {
        let params = Params::default();
        let a = generate_point(3, &params);
        let b = generate_point(3 + 256, &params);
        assert_eq!(ColorScheme::Hue.color(&a), ColorScheme::Hue.color(&b));
    }

    #[test]
    fn green_scheme_uses_index() {
        let params = Params::default();
        let p = generate_point(263, &params);
        assert_eq!(ColorScheme::Green.color(&p), Rgb::new(0, 8, 3));
    }

    #[test]
    fn names_round_trip() {
        for scheme in ColorScheme::all() {
            assert_eq!(ColorScheme::from_name(scheme.name()), Some(*scheme));
        }
        assert_eq!(ColorScheme::from_name("plaid"), None);
    }

    #[test]
    fn next_cycles() {
        assert_eq!(ColorScheme::Hue.next(), ColorScheme::Green);
        assert_eq!(ColorScheme::Green.next(), ColorScheme::Hue);
    }
}
