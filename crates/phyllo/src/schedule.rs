//! Reveal scheduling.
//!
//! Points appear one after another at a fixed pace: the point with index
//! `n` becomes visible at `n * interval`. The schedule is a plain ordered
//! list, so any front end (terminal player, frame exporter, JSON consumer)
//! can walk it without callbacks or timers of its own.

use std::time::Duration;

use serde::Serialize;

use crate::error::PhylloError;
use crate::generator::{points, PointRecord};
use crate::params::Params;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// A point paired with the time it becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reveal {
    /// Offset from the start of playback
    pub at: Duration,
    pub point: PointRecord,
}

/// Ordered list of reveals, ascending by time.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealSchedule {
    entries: Vec<Reveal>,
    interval: Duration,
}

/// Time at which `index` is revealed, saturating at `u64::MAX` nanoseconds.
pub fn reveal_offset(index: usize, interval: Duration) -> Duration {
    let nanos = interval.as_nanos().saturating_mul(index as u128);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

impl RevealSchedule {
    /// Schedule `records` at `index * interval` each.
    pub fn new(records: impl IntoIterator<Item = PointRecord>, interval: Duration) -> Self {
        let mut entries: Vec<Reveal> = records
            .into_iter()
            .map(|point| Reveal {
                at: reveal_offset(point.index, interval),
                point,
            })
            .collect();

        // Stable, and a no-op for generator output which is already in order.
        entries.sort_by_key(|r| r.at);

        Self { entries, interval }
    }

    /// Validate `params`, generate the pattern, and schedule it.
    pub fn from_params(params: &Params) -> Result<Self, PhylloError> {
        params.validate()?;
        let interval = params.reveal_interval()?;
        Ok(Self::new(points(params), interval))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reveal> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Reveal] {
        &self.entries
    }

    /// Time of the last reveal; zero for an empty schedule.
    pub fn total_duration(&self) -> Duration {
        self.entries.last().map(|r| r.at).unwrap_or(Duration::ZERO)
    }

    /// Number of points visible once `elapsed` has passed.
    pub fn visible_count(&self, elapsed: Duration) -> usize {
        self.entries.partition_point(|r| r.at <= elapsed)
    }

    /// Every reveal with `at <= elapsed`, in order.
    pub fn visible_at(&self, elapsed: Duration) -> &[Reveal] {
        &self.entries[..self.visible_count(elapsed)]
    }

    /// Reveals with `from < at <= to`, for drawing incrementally.
    ///
    /// Returns an empty slice when `to <= from`.
    pub fn revealed_between(&self, from: Duration, to: Duration) -> &[Reveal] {
        let start = self.visible_count(from);
        let end = self.visible_count(to).max(start);
        &self.entries[start..end]
    }

    /// Frames needed at `fps` so the first frame is t = 0 and the last frame
    /// shows every point. Zero for an empty schedule; `fps` of 0 is treated
    /// as 1.
    pub fn frame_count(&self, fps: u32) -> usize {
        if self.entries.is_empty() {
            return 0;
        }
        let fps = fps.max(1) as u128;
        let total = self.total_duration().as_nanos();
        let frames = (total * fps).div_ceil(NANOS_PER_SEC) + 1;
        usize::try_from(frames).unwrap_or(usize::MAX)
    }

    /// Timestamp of frame `frame` at `fps`.
    pub fn frame_time(frame: usize, fps: u32) -> Duration {
        let fps = fps.max(1) as u128;
        let nanos = (frame as u128 * NANOS_PER_SEC) / fps;
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

impl<'a> IntoIterator for &'a RevealSchedule {
    type Item = &'a Reveal;
    type IntoIter = std::slice::Iter<'a, Reveal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
