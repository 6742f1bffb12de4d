//! Phyllotaxis point generation (Vogel's model).
//!
//! Phyllotaxis describes the arrangement of leaves, seeds, or florets in
//! plants. Each floret sits at a fixed divergence angle from the previous
//! one, and its distance from the center grows with the square root of its
//! index, which keeps the packing density constant across the disc.
//!
//! Algorithm:
//!   for n in 0..N:
//!     angle  = n * divergence        (degrees, converted to radians)
//!     radius = C * sqrt(n)
//!     place_point(center + radius * (cos angle, sin angle))
//!
//! Divergence near the golden angle (137.5°) gives the sunflower look.
//! Values such as 30° or 45° give straight-armed spiral families with the
//! same radial spacing.

use std::iter::FusedIterator;
use std::ops::Range;

use serde::Serialize;

use crate::geometry::Point;
use crate::params::Params;

/// Hue values cycle with this period.
pub const HUE_PERIOD: usize = 256;

/// One placed object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointRecord {
    /// Ordering number, starting at 0
    pub index: usize,
    /// Accumulated angle in radians (not wrapped)
    pub angle: f64,
    /// Distance from the canvas center
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    /// Radius of the drawn ellipse
    pub size: f64,
    /// Hue in degrees, in [0, 256)
    pub hue: f64,
}

impl PointRecord {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Compute the record for a single index.
///
/// This is a pure function of `index` and `params`; there is no running
/// state, so any index can be computed on its own.
pub fn generate_point(index: usize, params: &Params) -> PointRecord {
    let n = index as f64;
    let angle = (n * params.divergence).to_radians();
    let radius = params.scale * n.sqrt();
    let position = Point::from_polar(params.center(), radius, angle);

    PointRecord {
        index,
        angle,
        radius,
        x: position.x,
        y: position.y,
        size: params.size,
        hue: (index % HUE_PERIOD) as f64,
    }
}

/// Lazy iterator over the records of a pattern, in index order.
///
/// ## Rust Lesson #12: Iterators
///
/// Implementing `Iterator` gets you `map`, `filter`, `take`, `collect`, etc.
/// for free. Nothing is computed until someone asks for the next item.
#[derive(Debug, Clone)]
pub struct Points<'a> {
    params: &'a Params,
    indices: Range<usize>,
}

impl Iterator for Points<'_> {
    type Item = PointRecord;

    #[inline]
    fn next(&mut self) -> Option<PointRecord> {
        self.indices.next().map(|i| generate_point(i, self.params))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<PointRecord> {
        self.indices.nth(n).map(|i| generate_point(i, self.params))
    }
}

impl DoubleEndedIterator for Points<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<PointRecord> {
        self.indices.next_back().map(|i| generate_point(i, self.params))
    }
}

impl ExactSizeIterator for Points<'_> {}

impl FusedIterator for Points<'_> {}

/// Iterate over all `params.count` records without allocating.
pub fn points(params: &Params) -> Points<'_> {
    Points {
        params,
        indices: 0..params.count,
    }
}

/// Generate every record of the pattern.
pub fn generate(params: &Params) -> Vec<PointRecord> {
    points(params).collect()
}
