//! Tunable parameters for a phyllotaxis pattern.
//!
//! Defaults reproduce the classic sunflower head: 10 000 florets at a
//! 137.5° divergence on an 800×800 canvas, revealed at 240 per second.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::ColorScheme;
use crate::error::PhylloError;
use crate::geometry::Point;

/// The golden angle in degrees: 360° × (1 − 1/φ) ≈ 137.507764°
pub const GOLDEN_ANGLE_DEGREES: f64 = 137.507_764_050_037_85;

pub const DEFAULT_COUNT: usize = 10_000;
pub const DEFAULT_DIVERGENCE: f64 = 137.5;
pub const DEFAULT_SCALE: f64 = 15.0;
pub const DEFAULT_SIZE: f64 = 6.0;
pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 800.0;
pub const DEFAULT_INTERVAL: f64 = 1.0 / 240.0;

/// Largest accepted `count`. Schedules hold every point in memory.
pub const MAX_COUNT: usize = 5_000_000;

/// Everything that shapes a generated pattern.
///
/// Missing keys fall back to the defaults when deserializing, so a config
/// file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Number of objects to place
    pub count: usize,
    /// Divergence angle between consecutive objects (degrees)
    pub divergence: f64,
    /// Scaling factor C in `radius = C * sqrt(n)`
    pub scale: f64,
    /// Radius of each drawn ellipse
    pub size: f64,
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Seconds between consecutive reveals
    pub interval: f64,
    /// Fill color mapping
    pub colors: ColorScheme,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            divergence: DEFAULT_DIVERGENCE,
            scale: DEFAULT_SCALE,
            size: DEFAULT_SIZE,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            interval: DEFAULT_INTERVAL,
            colors: ColorScheme::default(),
        }
    }
}

impl Params {
    /// Center of the canvas; index 0 lands here.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Check every field against the range the generator and renderers accept.
    pub fn validate(&self) -> Result<(), PhylloError> {
        if self.count > MAX_COUNT {
            return Err(PhylloError::invalid(
                "count",
                format!("must be at most {}, got {}", MAX_COUNT, self.count),
            ));
        }
        if !self.divergence.is_finite() {
            return Err(PhylloError::invalid("divergence", "must be a finite number of degrees"));
        }
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(PhylloError::invalid(
                "scale",
                format!("must be finite and >= 0, got {}", self.scale),
            ));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(PhylloError::invalid(
                "size",
                format!("must be finite and > 0, got {}", self.size),
            ));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PhylloError::invalid(
                "width",
                format!("must be finite and > 0, got {}", self.width),
            ));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(PhylloError::invalid(
                "height",
                format!("must be finite and > 0, got {}", self.height),
            ));
        }
        if Duration::try_from_secs_f64(self.interval).is_err() {
            return Err(PhylloError::invalid(
                "interval",
                format!("must be finite and >= 0 seconds, got {}", self.interval),
            ));
        }
        Ok(())
    }

    /// Reveal interval as a `Duration`.
    pub fn reveal_interval(&self) -> Result<Duration, PhylloError> {
        Duration::try_from_secs_f64(self.interval)
            .map_err(|e| PhylloError::invalid("interval", e.to_string()))
    }

    /// Human-readable title, e.g. "Phyllotaxis with 10000 objects".
    pub fn title(&self) -> String {
        title_for(self.count)
    }
}

/// Document title for a pattern of `count` objects.
pub fn title_for(count: usize) -> String {
    format!("Phyllotaxis with {} objects", count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_sunflower() {
        let params = Params::default();
        assert_eq!(params.count, 10_000);
        assert_eq!(params.divergence, 137.5);
        assert_eq!(params.scale, 15.0);
        assert_eq!(params.size, 6.0);
        assert_eq!(params.center(), Point::new(400.0, 400.0));
        assert_eq!(params.colors, ColorScheme::Hue);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn default_interval_is_240_per_second() {
        let interval = Params::default().reveal_interval().unwrap();
        let nanos = interval.as_nanos();
        assert!((4_166_666..=4_166_667).contains(&nanos), "got {}ns", nanos);
    }

    #[test]
    fn golden_angle_is_correct() {
        let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
        let expected = 360.0 * (1.0 - 1.0 / phi);
        assert!((GOLDEN_ANGLE_DEGREES - expected).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_values() {
        let cases: Vec<(&str, Params)> = vec![
            ("scale", Params { scale: -1.0, ..Params::default() }),
            ("size", Params { size: 0.0, ..Params::default() }),
            ("width", Params { width: f64::NAN, ..Params::default() }),
            ("height", Params { height: -800.0, ..Params::default() }),
            ("interval", Params { interval: -0.5, ..Params::default() }),
            ("divergence", Params { divergence: f64::INFINITY, ..Params::default() }),
            ("count", Params { count: usize::MAX / 2, ..Params::default() }),
        ];

        for (field, params) in cases {
            match params.validate() {
                Err(PhylloError::InvalidParameter { name, .. }) => assert_eq!(name, field),
                other => panic!("expected {} to be rejected, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn zero_count_and_zero_interval_are_valid() {
        let params = Params { count: 0, interval: 0.0, ..Params::default() };
        assert!(params.validate().is_ok());
        assert_eq!(params.reveal_interval().unwrap(), Duration::ZERO);
    }

    #[test]
    fn count_limit_is_inclusive() {
        assert!(Params { count: MAX_COUNT, ..Params::default() }.validate().is_ok());
        let err = Params { count: MAX_COUNT + 1, ..Params::default() }.validate().unwrap_err();
        assert!(err.to_string().contains("at most"), "{}", err);
    }

    #[test]
    fn title_names_the_count() {
        let params = Params { count: 42, ..Params::default() };
        assert_eq!(params.title(), "Phyllotaxis with 42 objects");
    }
}
